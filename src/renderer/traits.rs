use crate::parser::*;
use crate::renderer::components::*;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render is not implemented for the {renderer} renderer; use a concrete renderer")]
    NotImplemented { renderer: &'static str },
    #[error("failed to serialize navigation: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Tag-building primitives of the host templating environment
#[cfg_attr(test, mockall::automock)]
pub trait Adapter: Send + Sync {
    /// Builds a hyperlink. `text` is plain text and gets escaped.
    fn link_to(&self, text: &str, url: &str, attributes: &Attributes) -> String;

    /// Wraps already-built markup in `tag`.
    fn content_tag(&self, tag: &str, content: &str, attributes: &Attributes) -> String;
}

/// Shared policy for turning an item container into markup.
///
/// Concrete renderers supply `render` and may override `suppress_link` and
/// `options_for`. Every other method is policy common to all of them.
pub trait Renderer {
    fn options(&self) -> &RenderOptions;

    fn adapter(&self) -> &dyn Adapter;

    fn name(&self) -> &'static str {
        "base"
    }

    fn render(&self, _container: &ItemContainer) -> RenderResult<String> {
        Err(RenderError::NotImplemented {
            renderer: self.name(),
        })
    }

    fn expand_all(&self) -> bool {
        self.options().expand_all
    }

    fn level(&self) -> &Level {
        &self.options().level
    }

    fn skip_if_empty(&self) -> bool {
        self.options().skip_if_empty
    }

    /// A sub-level is rendered only if it lies within the configured depth
    /// bound and the item is selected (or everything is expanded).
    fn include_sub_navigation(&self, item: &Item) -> bool {
        let Some(sub) = &item.sub_navigation else {
            return false;
        };

        let within_level = match self.level() {
            Level::All => true,
            Level::Range(range) => sub.level() <= *range.end(),
        };
        let include = within_level && (self.expand_all() || item.selected);

        trace!(item = %item.key, level = sub.level(), include, "sub-navigation decision");
        include
    }

    /// Renders the sub-level with this same renderer and options.
    fn render_sub_navigation_for(&self, item: &Item) -> RenderResult<String> {
        match &item.sub_navigation {
            Some(sub) => self.render(sub),
            None => Ok(String::new()),
        }
    }

    fn include_parent_menu_icon(&self, item: &Item) -> bool {
        item.parent_menu.is_some()
    }

    fn render_parent_menu_icon_for(&self, item: &Item) -> String {
        let Some(parent_menu) = &item.parent_menu else {
            return String::new();
        };

        let icon = self
            .adapter()
            .content_tag("i", "", &class_attribute(&parent_menu.icon_class));
        self.adapter()
            .content_tag("span", &icon, &class_attribute(&parent_menu.class))
    }

    fn suppress_link(&self, item: &Item) -> bool {
        item.url.is_none()
    }

    /// Builds a link for the item, or an inert `span` when the link is
    /// suppressed. `added_name` is appended to the link text only.
    fn tag_for(&self, item: &Item, added_name: Option<&str>) -> String {
        match (self.suppress_link(item), item.url.as_deref()) {
            (false, Some(url)) => {
                let text = match added_name {
                    Some(suffix) => format!("{}{}", item.name, suffix),
                    None => item.name.clone(),
                };
                self.adapter().link_to(&text, url, &self.options_for(item))
            }
            _ => {
                let mut attributes = self.link_options_for(item);
                attributes.remove("method");
                self.adapter()
                    .content_tag("span", &text_markup(&item.name), &attributes)
            }
        }
    }

    fn options_for(&self, item: &Item) -> Attributes {
        self.link_options_for(item)
    }

    /// `method` and the selected class, overlaid with the item's link
    /// options. Classes from both sides are concatenated, not de-duplicated.
    fn link_options_for(&self, item: &Item) -> Attributes {
        let mut options = Attributes::new();
        if let Some(method) = &item.method {
            options.insert("method".to_string(), method.clone());
        }
        if let Some(class) = item.selected_class() {
            options.insert("class".to_string(), class.to_string());
        }

        let Some(link_html_options) = &item.link_html_options else {
            return options;
        };

        options.extend(link_html_options.clone());
        merge_classes(
            &mut options,
            link_html_options.get("class").map(String::as_str),
            item.selected_class(),
        );
        options
    }
}
