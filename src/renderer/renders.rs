use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared policy only. `render` is left unimplemented.
pub struct BaseRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl BaseRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }
}

impl Renderer for BaseRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }
}

/// Nested `ul`/`ol` lists, one `li` per item.
pub struct ListRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl ListRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }

    fn list_content(&self, container: &ItemContainer) -> RenderResult<String> {
        let mut content = String::new();
        for item in container.items() {
            let mut li_content = self.tag_for(item, None);

            if self.include_parent_menu_icon(item) {
                li_content.push_str(&self.render_parent_menu_icon_for(item));
            }
            if self.include_sub_navigation(item) {
                li_content.push_str(&self.render_sub_navigation_for(item)?);
            }

            content.push_str(
                &self
                    .adapter
                    .content_tag("li", &li_content, &item.dom_attributes()),
            );
        }
        Ok(content)
    }
}

impl Renderer for ListRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    fn name(&self) -> &'static str {
        "list"
    }

    fn render(&self, container: &ItemContainer) -> RenderResult<String> {
        if self.skip_if_empty() && container.is_empty() {
            return Ok(String::new());
        }

        let tag = if self.options.ordered { "ol" } else { "ul" };
        let content = self.list_content(container)?;
        Ok(self
            .adapter
            .content_tag(tag, &content, &container.dom_attributes()))
    }
}

/// A flat `div` of links for one level.
pub struct LinksRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl LinksRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }

    fn join_with(&self) -> &str {
        self.options.join_with.as_deref().unwrap_or("")
    }
}

impl Renderer for LinksRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    fn name(&self) -> &'static str {
        "links"
    }

    fn render(&self, container: &ItemContainer) -> RenderResult<String> {
        if self.skip_if_empty() && container.is_empty() {
            return Ok(String::new());
        }

        let tags: Vec<String> = container
            .items()
            .iter()
            .map(|item| self.tag_for(item, None))
            .collect();
        Ok(self
            .adapter
            .content_tag("div", &tags.join(self.join_with()), &container.dom_attributes()))
    }

    fn options_for(&self, item: &Item) -> Attributes {
        let mut options = Attributes::new();
        if let Some(method) = &item.method {
            options.insert("method".to_string(), method.clone());
        }
        options.extend(item.dom_attributes());
        options
    }
}

/// The selected chain as a trail of links.
pub struct BreadcrumbsRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl BreadcrumbsRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }

    fn join_with(&self) -> &str {
        self.options.join_with.as_deref().unwrap_or(" ")
    }

    fn crumbs(&self, container: &ItemContainer, trail: &mut Vec<String>) {
        for item in container.items().iter().filter(|item| item.selected) {
            trail.push(self.tag_for(item, None));

            if self.include_sub_navigation(item) {
                if let Some(sub) = &item.sub_navigation {
                    self.crumbs(sub, trail);
                }
            }
        }
    }
}

impl Renderer for BreadcrumbsRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    fn name(&self) -> &'static str {
        "breadcrumbs"
    }

    fn render(&self, container: &ItemContainer) -> RenderResult<String> {
        let mut trail = Vec::new();
        self.crumbs(container, &mut trail);
        let content = trail.join(self.join_with());

        if self.skip_if_empty() && content.is_empty() {
            return Ok(String::new());
        }

        let prefix = if content.is_empty() {
            ""
        } else {
            self.options.prefix.as_deref().unwrap_or("")
        };
        Ok(self.adapter.content_tag(
            "div",
            &format!("{}{}", text_markup(prefix), content),
            &container.dom_attributes(),
        ))
    }

    fn suppress_link(&self, item: &Item) -> bool {
        item.url.is_none() || (self.options.static_leaf && item.active_leaf_class().is_some())
    }

    fn options_for(&self, item: &Item) -> Attributes {
        let mut options = Attributes::new();
        if let Some(method) = &item.method {
            options.insert("method".to_string(), method.clone());
        }
        options.extend(
            item.dom_attributes()
                .into_iter()
                .filter(|(name, _)| name != "id" && name != "class"),
        );
        options
    }
}

/// Names of the selected chain as plain text.
pub struct TextRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl TextRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }

    fn names<'a>(&self, container: &'a ItemContainer, names: &mut Vec<&'a str>) {
        for item in container.items().iter().filter(|item| item.selected) {
            names.push(&item.name);

            if self.include_sub_navigation(item) {
                if let Some(sub) = &item.sub_navigation {
                    self.names(sub, names);
                }
            }
        }
    }
}

impl Renderer for TextRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, container: &ItemContainer) -> RenderResult<String> {
        let mut names = Vec::new();
        self.names(container, &mut names);
        Ok(names.join(self.options.join_with.as_deref().unwrap_or(" ")))
    }
}

/// JSON array of `{name, url, selected, items}` objects.
pub struct JsonRenderer {
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl JsonRenderer {
    pub fn new(options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self { options, adapter }
    }

    fn items_value(&self, container: &ItemContainer) -> Value {
        let items = container
            .items()
            .iter()
            .map(|item| {
                let mut value = json!({
                    "name": item.name,
                    "url": item.url,
                    "selected": item.selected,
                });
                if self.include_sub_navigation(item) {
                    if let Some(sub) = &item.sub_navigation {
                        value["items"] = self.items_value(sub);
                    }
                }
                value
            })
            .collect();
        Value::Array(items)
    }
}

impl Renderer for JsonRenderer {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, container: &ItemContainer) -> RenderResult<String> {
        Ok(serde_json::to_string(&self.items_value(container))?)
    }
}
