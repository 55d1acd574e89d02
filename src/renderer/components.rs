use crate::parser::*;
use crate::renderer::traits::*;
use maud::{html, Markup, PreEscaped, Render};

pub fn class_attribute(class: &str) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("class".to_string(), class.to_string());
    attributes
}

/// Plain text as escaped markup.
pub fn text_markup(text: &str) -> String {
    html! { (text) }.into_string()
}

/// An element whose tag and attribute names are only known at runtime.
/// Attribute values are escaped; `content` is inserted as is.
struct Element<'a> {
    tag: &'a str,
    attributes: Vec<(&'a str, &'a str)>,
    content: Markup,
}

impl Render for Element<'_> {
    fn render_to(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(self.tag);
        for (name, value) in &self.attributes {
            buffer.push(' ');
            buffer.push_str(name);
            buffer.push_str("=\"");
            value.render_to(buffer);
            buffer.push('"');
        }
        buffer.push('>');
        self.content.render_to(buffer);
        buffer.push_str("</");
        buffer.push_str(self.tag);
        buffer.push('>');
    }
}

/// HTML adapter built on maud.
///
/// A `method` attribute becomes `data-method`, with `rel="nofollow"` added
/// for anything other than GET.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAdapter;

impl HtmlAdapter {
    fn link_attributes(attributes: &Attributes) -> Attributes {
        let mut attributes = attributes.clone();
        let Some(method) = attributes.remove("method") else {
            return attributes;
        };

        if !method.eq_ignore_ascii_case("get") {
            let rel = attributes.entry("rel".to_string()).or_default();
            if !rel.split_whitespace().any(|r| r == "nofollow") {
                if rel.is_empty() {
                    rel.push_str("nofollow");
                } else {
                    rel.push_str(" nofollow");
                }
            }
        }
        attributes.insert("data-method".to_string(), method.to_lowercase());
        attributes
    }
}

impl Adapter for HtmlAdapter {
    fn link_to(&self, text: &str, url: &str, attributes: &Attributes) -> String {
        let attributes = Self::link_attributes(attributes);
        // href always comes first
        let link = Element {
            tag: "a",
            attributes: std::iter::once(("href", url))
                .chain(
                    attributes
                        .iter()
                        .filter(|(name, _)| name.as_str() != "href")
                        .map(|(name, value)| (name.as_str(), value.as_str())),
                )
                .collect(),
            content: html! { (text) },
        };
        html! { (link) }.into_string()
    }

    fn content_tag(&self, tag: &str, content: &str, attributes: &Attributes) -> String {
        let element = Element {
            tag,
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
            content: PreEscaped(content.to_string()),
        };
        html! { (element) }.into_string()
    }
}
