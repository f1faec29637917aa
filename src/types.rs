//! Types for the guida-commonmark public API.
use serde::{Deserialize, Serialize};

/// A heading record collected during rendering, in document order.
///
/// Consumed by the table of contents; `id` is a valid HTML fragment
/// identifier, unique within one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// Heading depth (1-4).
  pub depth: u8,
  /// Normalized display text (icon tokens and collapse markers stripped).
  pub text:  String,
  /// Generated anchor ID, unique within the document.
  pub id:    String,
}

/// Result of rendering one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResult {
  /// Rendered HTML output.
  pub html: String,

  /// Finalized renderable tree. The UI layer maps each node kind to
  /// presentation markup without altering text content, anchor IDs or
  /// callout/collapse classification.
  pub nodes: Vec<Node>,

  /// Extracted headings (for the table of contents, navigation, etc).
  pub headings: Vec<Heading>,

  /// Title of the document, if found (first H1).
  pub title: Option<String>,
}

/// A node of the renderable tree.
///
/// Carries its kind as a discriminant so no runtime shape-sniffing is ever
/// needed. Every parent exclusively owns its children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Node {
  /// Plain text run.
  Text(String),
  /// Hard line break.
  LineBreak,
  /// Inline icon placeholder produced from a `::name::` token. Resolution
  /// against the registry happens at serialization time.
  Icon { name: String },
  Emphasis(Vec<Node>),
  Strong(Vec<Node>),
  Strikethrough(Vec<Node>),
  /// Inline code span. Never icon-expanded.
  CodeInline(String),
  /// Raw inline HTML, passed through verbatim.
  HtmlInline(String),
  Link {
    url:      String,
    title:    Option<String>,
    children: Vec<Node>,
  },
  Image {
    url:   String,
    title: Option<String>,
    alt:   String,
  },
  Paragraph(Vec<Node>),
  Heading {
    depth:    u8,
    id:       String,
    children: Vec<Node>,
  },
  /// Blockquote as parsed. Only present before finalization; the callout
  /// classifier rewrites every one of these into [`Node::Callout`].
  BlockQuote(Vec<Node>),
  /// A classified callout. `kind` is the preset key ("info", "warning", ...,
  /// or "note" for the neutral fallback) and drives styling downstream.
  Callout {
    kind:      String,
    icon:      String,
    title:     String,
    collapsed: bool,
    children:  Vec<Node>,
  },
  /// Collapsible section produced from a `- `-marked heading.
  Details {
    summary: Vec<Node>,
    body:    Vec<Node>,
  },
  List {
    ordered: bool,
    start:   usize,
    items:   Vec<Vec<Node>>,
  },
  CodeBlock {
    language: Option<String>,
    code:     String,
  },
  Table { rows: Vec<TableRow> },
  /// Raw HTML block, passed through verbatim.
  HtmlBlock(String),
  /// Thematic break.
  Rule,
}

/// One table row; cells are inline subtrees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableRow {
  pub header: bool,
  pub cells:  Vec<Vec<Node>>,
}

/// Flatten the plain text of an inline subtree.
///
/// Recurses through emphasis, strong, strikethrough and links; includes code
/// literals; skips images, icons and raw HTML.
#[must_use]
pub fn plain_text(nodes: &[Node]) -> String {
  let mut text = String::new();
  collect_text(nodes, &mut text);
  text
}

fn collect_text(nodes: &[Node], out: &mut String) {
  for node in nodes {
    match node {
      Node::Text(text) | Node::CodeInline(text) => out.push_str(text),
      Node::LineBreak => out.push(' '),
      Node::Emphasis(children)
      | Node::Strong(children)
      | Node::Strikethrough(children)
      | Node::Link { children, .. } => collect_text(children, out),
      _ => {},
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_text_recurses_inline_containers() {
    let nodes = vec![
      Node::Text("a ".into()),
      Node::Strong(vec![Node::Text("b".into())]),
      Node::Link {
        url:      "x".into(),
        title:    None,
        children: vec![Node::CodeInline("c".into())],
      },
      Node::Icon { name: "zap".into() },
    ];
    assert_eq!(plain_text(&nodes), "a bc");
  }
}
