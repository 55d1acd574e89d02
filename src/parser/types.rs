use serde::Deserialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// HTML attributes keyed by name. Ordered so generated markup is stable.
pub type Attributes = BTreeMap<String, String>;

/// Sets `class` to the space-joined non-empty parts, or removes it when
/// there are none.
pub fn merge_classes(attributes: &mut Attributes, first: Option<&str>, second: Option<&str>) {
    let classes: Vec<&str> = [first, second]
        .into_iter()
        .flatten()
        .filter(|class| !class.is_empty())
        .collect();

    if classes.is_empty() {
        attributes.remove("class");
    } else {
        attributes.insert("class".to_string(), classes.join(" "));
    }
}

pub const DEFAULT_SELECTED_CLASS: &str = "selected";
pub const ACTIVE_LEAF_CLASS: &str = "simple-navigation-active-leaf";

// Raw structures as they appear in a menu file

#[derive(Debug, Deserialize)]
pub struct MenuFile {
    #[serde(default)]
    pub selected_class: Option<String>,
    #[serde(default)]
    pub dom_id: Option<String>,
    #[serde(default)]
    pub dom_class: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub options: RenderOptions,
}

#[derive(Debug, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub html_options: Attributes,
    #[serde(default)]
    pub link_html_options: Option<Attributes>,
    #[serde(default)]
    pub parent_menu: Option<ParentMenu>,
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
    #[serde(default)]
    pub dom_id: Option<String>,
    #[serde(default)]
    pub dom_class: Option<String>,
}

/// Icon shown next to an item whose children live in a collapsed menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParentMenu {
    pub icon_class: String,
    pub class: String,
}

/// One navigation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub key: String,
    pub name: String,
    /// `None` means the item is not clickable.
    pub url: Option<String>,
    /// HTTP verb override for the generated link.
    pub method: Option<String>,
    /// Set when this item or one of its descendants is the active one.
    pub selected: bool,
    /// Attributes of the element wrapping the item (`li` for lists).
    pub html_options: Attributes,
    /// Extra attributes for the link itself.
    pub link_html_options: Option<Attributes>,
    pub sub_navigation: Option<ItemContainer>,
    pub parent_menu: Option<ParentMenu>,
    highlight_class: String,
}

impl Item {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            url: None,
            method: None,
            selected: false,
            html_options: Attributes::new(),
            link_html_options: None,
            sub_navigation: None,
            parent_menu: None,
            highlight_class: DEFAULT_SELECTED_CLASS.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_html_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.html_options.insert(key.into(), value.into());
        self
    }

    pub fn with_link_html_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.link_html_options
            .get_or_insert_with(Attributes::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_parent_menu(mut self, icon_class: impl Into<String>, class: impl Into<String>) -> Self {
        self.parent_menu = Some(ParentMenu {
            icon_class: icon_class.into(),
            class: class.into(),
        });
        self
    }

    pub fn with_sub_navigation(mut self, container: ItemContainer) -> Self {
        self.sub_navigation = Some(container);
        self
    }

    /// The owning container's selected class, present only while selected.
    pub fn selected_class(&self) -> Option<&str> {
        if self.selected {
            Some(self.highlight_class.as_str())
        } else {
            None
        }
    }

    /// Marks the deepest selected item of a chain.
    pub fn active_leaf_class(&self) -> Option<&str> {
        let child_selected = self
            .sub_navigation
            .as_ref()
            .is_some_and(|sub| sub.selected_item().is_some());

        if self.selected && !child_selected {
            Some(ACTIVE_LEAF_CLASS)
        } else {
            None
        }
    }

    /// Attributes for the wrapping element: `id` falls back to the key and the
    /// selected class is appended to any configured `class`.
    pub fn dom_attributes(&self) -> Attributes {
        let mut attributes = self.html_options.clone();
        attributes
            .entry("id".to_string())
            .or_insert_with(|| self.key.clone());

        merge_classes(
            &mut attributes,
            self.html_options.get("class").map(String::as_str),
            self.selected_class(),
        );
        attributes
    }

    fn set_highlight_class(&mut self, class: &str) {
        self.highlight_class = class.to_string();
    }
}

/// An ordered group of items sharing one nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemContainer {
    level: usize,
    items: Vec<Item>,
    pub dom_id: Option<String>,
    pub dom_class: Option<String>,
    selected_class: String,
}

impl ItemContainer {
    pub fn new(level: usize) -> Self {
        Self {
            level,
            items: Vec::new(),
            dom_id: None,
            dom_class: None,
            selected_class: DEFAULT_SELECTED_CLASS.to_string(),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.push(item);
        self
    }

    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }

    pub fn with_dom_class(mut self, dom_class: impl Into<String>) -> Self {
        self.dom_class = Some(dom_class.into());
        self
    }

    pub fn with_selected_class(mut self, class: impl Into<String>) -> Self {
        self.selected_class = class.into();
        for item in &mut self.items {
            item.set_highlight_class(&self.selected_class);
        }
        self
    }

    pub fn push(&mut self, mut item: Item) {
        item.set_highlight_class(&self.selected_class);
        self.items.push(item);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_class(&self) -> &str {
        &self.selected_class
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.selected)
    }

    pub fn dom_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if let Some(id) = &self.dom_id {
            attributes.insert("id".to_string(), id.clone());
        }
        if let Some(class) = &self.dom_class {
            attributes.insert("class".to_string(), class.clone());
        }
        attributes
    }

    /// Finds the container at `level` along the selected chain.
    pub fn active_item_container_for(&self, level: usize) -> Option<&ItemContainer> {
        if self.level == level {
            return Some(self);
        }
        self.selected_item()
            .and_then(|item| item.sub_navigation.as_ref())
            .and_then(|sub| sub.active_item_container_for(level))
    }

    /// Selects every item whose url is `url`, together with its ancestors,
    /// and clears any earlier selection. Returns true if anything in this
    /// container ended up selected.
    pub fn select_current(&mut self, url: &str) -> bool {
        let mut any_selected = false;
        for item in &mut self.items {
            let child_selected = item
                .sub_navigation
                .as_mut()
                .is_some_and(|sub| sub.select_current(url));
            item.selected = child_selected || item.url.as_deref() == Some(url);
            any_selected |= item.selected;
        }
        any_selected
    }
}

/// Depth bound for rendering: every level, or an inclusive range of levels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "LevelRepr")]
pub enum Level {
    #[default]
    All,
    Range(RangeInclusive<usize>),
}

impl Level {
    pub fn range(min: usize, max: usize) -> Self {
        Level::Range(min..=max)
    }

    pub fn max(&self) -> Option<usize> {
        match self {
            Level::All => None,
            Level::Range(range) => Some(*range.end()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelParseError {
    #[error("invalid level '{0}': expected 'all', a depth, or a range like '1..2'")]
    Invalid(String),
    #[error("empty level range {min}..{max}")]
    EmptyRange { min: usize, max: usize },
}

fn checked_range(min: usize, max: usize) -> Result<Level, LevelParseError> {
    if min > max {
        Err(LevelParseError::EmptyRange { min, max })
    } else {
        Ok(Level::range(min, max))
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Level::All);
        }

        let invalid = || LevelParseError::Invalid(s.to_string());
        let bound = |part: &str| part.trim().parse::<usize>().map_err(|_| invalid());

        match s.split_once("..") {
            Some((min, max)) => {
                let max = max.strip_prefix('=').unwrap_or(max);
                checked_range(bound(min)?, bound(max)?)
            }
            None => {
                let depth = bound(s)?;
                Ok(Level::range(depth, depth))
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Depth(usize),
    Text(String),
    Bounds { min: usize, max: usize },
}

impl TryFrom<LevelRepr> for Level {
    type Error = LevelParseError;

    fn try_from(repr: LevelRepr) -> Result<Self, Self::Error> {
        match repr {
            LevelRepr::Depth(depth) => Ok(Level::range(depth, depth)),
            LevelRepr::Text(text) => text.parse(),
            LevelRepr::Bounds { min, max } => checked_range(min, max),
        }
    }
}

/// Options shared by every renderer and propagated unchanged into sub-levels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Render every sub-level regardless of selection.
    pub expand_all: bool,
    pub level: Level,
    /// Emit nothing for an empty container.
    pub skip_if_empty: bool,
    /// Lists only: `ol` instead of `ul`.
    pub ordered: bool,
    pub join_with: Option<String>,
    /// Breadcrumbs only.
    pub prefix: Option<String>,
    /// Breadcrumbs only: render the active leaf as plain text.
    pub static_leaf: bool,
}
