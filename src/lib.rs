//! Markdown rendering core for the documentation site.
//!
//! Turns article sources into HTML plus the structured metadata the site
//! chrome needs: heading records for the table of contents, a derived title,
//! and the intermediate node tree for callers that post-process.
//!
//! Authoring extensions on top of CommonMark + GFM:
//!
//! - `::name::` inline tokens render as icon placeholders, with forgiving
//!   name resolution and literal fallback for unknown names.
//! - A heading starting with `- ` becomes a collapsible section swallowing
//!   its following siblings up to the next heading of equal or shallower
//!   depth.
//! - Every blockquote renders as a callout; a leading bold label selects the
//!   preset (localized, matched across locales) and a `- ` marker collapses
//!   it.
//!
//! # Usage
//!
//! ```rust
//! use guida_commonmark::{RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(RenderOptions::default());
//! let result = renderer.render("# Ciao\n\n> **Info** Benvenuto.", "it");
//!
//! assert_eq!(result.headings[0].id, "ciao");
//! assert!(result.html.contains("callout callout-info"));
//! ```
pub mod callouts;
pub mod icons;
pub mod renderer;
pub mod slug;

mod types;
mod utils;

pub use callouts::{
  CalloutPreset,
  CalloutPresets,
  DEFAULT_LANGUAGE,
  classify_blockquote,
};
pub use icons::IconRegistry;
pub use renderer::{RenderOptions, Renderer, render_with_recovery};
pub use slug::{Slugger, extract_headings, normalize_heading_text};
pub use types::{Heading, Node, RenderResult, TableRow, plain_text};
