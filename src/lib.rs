//! # navrender
//!
//! Renders hierarchical navigation menus into HTML (or text and JSON).
//!
//! A [`Renderer`] holds the shared policy: which sub-levels to expand,
//! whether an item becomes a link or an inert label, and which attributes
//! the link carries. Tag construction is delegated to an injected
//! [`Adapter`]; [`HtmlAdapter`] is the built-in one.

pub mod parser;
pub mod renderer;

pub use parser::*;
pub use renderer::*;
