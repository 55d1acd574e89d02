use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::parser::types::*;

/// A loaded menu: the root container plus the options stored alongside it.
#[derive(Debug, Clone)]
pub struct Menu {
    pub root: ItemContainer,
    pub options: RenderOptions,
}

// Converts raw menu file entries into the navigation tree
pub struct MenuParser {
    selected_class: String,
}

impl MenuParser {
    pub fn new(selected_class: Option<&str>) -> Self {
        Self {
            selected_class: selected_class.unwrap_or(DEFAULT_SELECTED_CLASS).to_string(),
        }
    }

    pub fn parse_file(path: &Path) -> Result<Menu> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read menu file {}", path.display()))?;
        Self::parse_str(&content)
            .with_context(|| format!("Failed to parse menu file {}", path.display()))
    }

    pub fn parse_str(json: &str) -> Result<Menu> {
        let file: MenuFile = serde_json::from_str(json).context("Invalid menu JSON")?;
        let parser = MenuParser::new(file.selected_class.as_deref());

        let mut root = parser.parse_container(file.items, 1)?;
        root.dom_id = file.dom_id;
        root.dom_class = file.dom_class;

        debug!(items = root.items().len(), "parsed menu");
        Ok(Menu {
            root,
            options: file.options,
        })
    }

    fn parse_container(&self, items: Vec<RawItem>, level: usize) -> Result<ItemContainer> {
        let mut container =
            ItemContainer::new(level).with_selected_class(self.selected_class.as_str());
        for raw in items {
            container.push(self.parse_item(raw, level)?);
        }
        Ok(container)
    }

    fn parse_item(&self, raw: RawItem, level: usize) -> Result<Item> {
        let key = match raw.key {
            Some(key) => key,
            None => key_from_name(&raw.name),
        };
        if key.is_empty() {
            anyhow::bail!("Item '{}' at level {} has no usable key", raw.name, level);
        }

        let mut item = Item::new(key, raw.name).with_selected(raw.selected);
        item.url = raw.url;
        item.method = raw.method;
        item.html_options = raw.html_options;
        item.link_html_options = raw.link_html_options;
        item.parent_menu = raw.parent_menu;

        if let Some(children) = raw.items {
            let mut sub = self
                .parse_container(children, level + 1)
                .with_context(|| format!("In sub-navigation of '{}'", item.key))?;
            sub.dom_id = raw.dom_id;
            sub.dom_class = raw.dom_class;
            item.sub_navigation = Some(sub);
        }

        Ok(item)
    }
}

/// Derives a key like `about_us` from a display name like `About Us`.
fn key_from_name(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
