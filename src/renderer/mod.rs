//! Document rendering pipeline.
//!
//! [`Renderer`] drives the full pass: comrak parsing, lowering into the owned
//! node tree, the collapsible-section rewrite, finalization (anchors, callout
//! classification, icon expansion) and HTML serialization.
mod collapse;
mod core;
mod html;

pub use self::core::{RenderOptions, Renderer, render_with_recovery};
