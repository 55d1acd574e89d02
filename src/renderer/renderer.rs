use crate::parser::*;
use crate::renderer::renders::*;
use crate::renderer::traits::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RendererKind {
    #[default]
    List,
    Links,
    Breadcrumbs,
    Text,
    Json,
}

impl RendererKind {
    pub const ALL: [RendererKind; 5] = [
        RendererKind::List,
        RendererKind::Links,
        RendererKind::Breadcrumbs,
        RendererKind::Text,
        RendererKind::Json,
    ];

    pub fn build(self, options: RenderOptions, adapter: Arc<dyn Adapter>) -> Box<dyn Renderer> {
        match self {
            RendererKind::List => Box::new(ListRenderer::new(options, adapter)),
            RendererKind::Links => Box::new(LinksRenderer::new(options, adapter)),
            RendererKind::Breadcrumbs => Box::new(BreadcrumbsRenderer::new(options, adapter)),
            RendererKind::Text => Box::new(TextRenderer::new(options, adapter)),
            RendererKind::Json => Box::new(JsonRenderer::new(options, adapter)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RendererKind::List => "list",
            RendererKind::Links => "links",
            RendererKind::Breadcrumbs => "breadcrumbs",
            RendererKind::Text => "text",
            RendererKind::Json => "json",
        }
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RendererKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RendererKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown renderer '{}'", s))
    }
}

/// Entry point: picks the container to start from and renders it.
pub struct Navigation {
    root: ItemContainer,
    options: RenderOptions,
    adapter: Arc<dyn Adapter>,
}

impl Navigation {
    pub fn new(root: ItemContainer, options: RenderOptions, adapter: Arc<dyn Adapter>) -> Self {
        Self {
            root,
            options,
            adapter,
        }
    }

    pub fn root(&self) -> &ItemContainer {
        &self.root
    }

    /// The root for `all`, otherwise the active container at the lowest
    /// requested level. `None` when the selection does not reach that deep.
    pub fn start_container(&self) -> Option<&ItemContainer> {
        match &self.options.level {
            Level::All => Some(&self.root),
            Level::Range(range) => self.root.active_item_container_for(*range.start()),
        }
    }

    pub fn render(&self, kind: RendererKind) -> RenderResult<String> {
        let Some(container) = self.start_container() else {
            debug!(renderer = %kind, level = ?self.options.level, "no active container at requested level");
            return Ok(String::new());
        };

        debug!(renderer = %kind, level = container.level(), items = container.items().len(), "rendering navigation");
        kind.build(self.options.clone(), Arc::clone(&self.adapter))
            .render(container)
    }
}
