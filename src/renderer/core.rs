//! Core rendering pipeline: parse, lower, transform, finalize.
//!
//! Raw text goes through comrak, the arena AST is lowered into an owned
//! [`Node`] tree, the collapsible-section transform runs once, and a final
//! walk assigns heading anchors, classifies blockquotes into callouts and
//! expands inline icon tokens.
use comrak::{
  Arena,
  Options,
  nodes::{AstNode, ListType, NodeValue},
  parse_document,
};
use log::trace;

use super::{collapse, html};
use crate::{
  callouts::{CalloutPresets, DEFAULT_LANGUAGE, classify_blockquote},
  icons::{self, IconRegistry},
  slug::{Slugger, normalize_heading_text},
  types::{Heading, Node, RenderResult, TableRow, plain_text},
};

/// Options for configuring the renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
  /// Enable GitHub Flavored Markdown extensions (tables, strikethrough,
  /// autolinks).
  pub gfm: bool,

  /// Language used when a render call passes an empty language tag.
  pub default_language: String,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      gfm:              true,
      default_language: DEFAULT_LANGUAGE.to_string(),
    }
  }
}

/// Markdown renderer for documentation articles.
///
/// Holds the immutable preset and icon tables, so one instance can serve
/// concurrent renders; each call to [`Renderer::render`] owns its slug state
/// and duplicate counters never leak between documents.
pub struct Renderer {
  options: RenderOptions,
  presets: CalloutPresets,
  icons:   IconRegistry,
}

impl Renderer {
  /// Create a renderer with the default preset and icon tables.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    Self {
      options,
      presets: CalloutPresets::default(),
      icons: IconRegistry::default(),
    }
  }

  /// Replace the callout preset table.
  #[must_use]
  pub fn with_presets(mut self, presets: CalloutPresets) -> Self {
    self.presets = presets;
    self
  }

  /// Replace the icon registry.
  #[must_use]
  pub fn with_icons(mut self, icons: IconRegistry) -> Self {
    self.icons = icons;
    self
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Render one document.
  ///
  /// Returns the rendered HTML, the finalized tree and the heading records
  /// in traversal order.
  #[must_use]
  pub fn render(&self, markdown: &str, language: &str) -> RenderResult {
    let language = if language.is_empty() {
      self.options.default_language.as_str()
    } else {
      language
    };

    let arena = Arena::new();
    let options = self.comrak_options();
    let root = parse_document(&arena, markdown, &options);

    let lowered = lower_children(root);
    let sectioned = collapse::apply(lowered);

    let mut state = FinalizeState {
      slugger: Slugger::new(),
      headings: Vec::new(),
      title: None,
      language,
      presets: &self.presets,
    };
    let nodes = finalize(sectioned, &mut state);
    let html = html::document(&nodes, &self.icons);

    trace!(
      "rendered document ({language}): {} headings, {} bytes of html",
      state.headings.len(),
      html.len()
    );

    RenderResult {
      html,
      nodes,
      headings: state.headings,
      title: state.title,
    }
  }

  /// Build comrak options from the renderer configuration.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.autolink = true;
    }
    options.extension.header_ids = None;
    options
  }
}

/// Render with panic recovery.
///
/// A failure inside the pipeline must not take a whole site build down with
/// it; on panic this yields an error div and empty heading state instead.
#[must_use]
pub fn render_with_recovery(
  renderer: &Renderer,
  markdown: &str,
  language: &str,
) -> RenderResult {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    renderer.render(markdown, language)
  })) {
    Ok(result) => result,
    Err(panic_err) => {
      log::error!("panic during markdown rendering: {panic_err:?}");
      RenderResult {
        html: "<div class=\"error\">Critical error rendering document</div>"
          .to_string(),

        nodes:    Vec::new(),
        headings: Vec::new(),
        title:    None,
      }
    },
  }
}

struct FinalizeState<'a> {
  slugger:  Slugger,
  headings: Vec<Heading>,
  title:    Option<String>,
  language: &'a str,
  presets:  &'a CalloutPresets,
}

/// Finalize a transformed subtree: heading anchors and records, callout
/// classification, icon expansion.
fn finalize(nodes: Vec<Node>, state: &mut FinalizeState<'_>) -> Vec<Node> {
  let mut out = Vec::with_capacity(nodes.len());

  for node in nodes {
    match node {
      Node::Heading {
        depth, children, ..
      } => {
        let raw = plain_text(&children);
        let text = normalize_heading_text(&raw);
        let id = state.slugger.slug(&raw);
        if depth == 1 && state.title.is_none() && !text.is_empty() {
          state.title = Some(text.clone());
        }
        if depth <= 4 && !text.is_empty() {
          state.headings.push(Heading {
            depth,
            text,
            id: id.clone(),
          });
        }
        out.push(Node::Heading {
          depth,
          id,
          children: icons::expand_inline(children),
        });
      },
      Node::BlockQuote(children) => {
        match classify_blockquote(children, state.language, state.presets) {
          Node::Callout {
            kind,
            icon,
            title,
            collapsed,
            children,
          } => {
            out.push(Node::Callout {
              kind,
              icon,
              title,
              collapsed,
              children: finalize(children, state),
            });
          },
          other => out.push(other),
        }
      },
      Node::Callout {
        kind,
        icon,
        title,
        collapsed,
        children,
      } => {
        out.push(Node::Callout {
          kind,
          icon,
          title,
          collapsed,
          children: finalize(children, state),
        });
      },
      Node::Details { summary, body } => {
        out.push(Node::Details {
          summary: icons::expand_inline(summary),
          body:    finalize(body, state),
        });
      },
      Node::Paragraph(children) => {
        out.push(Node::Paragraph(icons::expand_inline(children)));
      },
      Node::List {
        ordered,
        start,
        items,
      } => {
        out.push(Node::List {
          ordered,
          start,
          items: items
            .into_iter()
            .map(|item| finalize(item, state))
            .collect(),
        });
      },
      Node::Table { rows } => {
        out.push(Node::Table {
          rows: rows
            .into_iter()
            .map(|row| {
              TableRow {
                header: row.header,
                cells:  row
                  .cells
                  .into_iter()
                  .map(icons::expand_inline)
                  .collect(),
              }
            })
            .collect(),
        });
      },
      other => out.push(other),
    }
  }

  out
}

/// Lower a comrak subtree into owned renderable nodes.
fn lower_children<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
  let mut out = Vec::new();
  for child in node.children() {
    lower_into(child, &mut out);
  }
  out
}

fn lower_into<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
  let data = node.data.borrow();
  match &data.value {
    NodeValue::Text(text) => out.push(Node::Text(text.to_string())),
    NodeValue::SoftBreak => out.push(Node::Text("\n".to_string())),
    NodeValue::LineBreak => out.push(Node::LineBreak),
    NodeValue::Code(code) => out.push(Node::CodeInline(code.literal.clone())),
    NodeValue::HtmlInline(html) => out.push(Node::HtmlInline(html.clone())),
    NodeValue::Emph => out.push(Node::Emphasis(lower_children(node))),
    NodeValue::Strong => out.push(Node::Strong(lower_children(node))),
    NodeValue::Strikethrough => {
      out.push(Node::Strikethrough(lower_children(node)));
    },
    NodeValue::Link(link) => {
      out.push(Node::Link {
        url:      link.url.clone(),
        title:    non_empty(&link.title),
        children: lower_children(node),
      });
    },
    NodeValue::Image(link) => {
      out.push(Node::Image {
        url:   link.url.clone(),
        title: non_empty(&link.title),
        alt:   plain_text(&lower_children(node)),
      });
    },
    NodeValue::Paragraph => out.push(Node::Paragraph(lower_children(node))),
    NodeValue::Heading(heading) => {
      out.push(Node::Heading {
        depth:    heading.level,
        id:       String::new(),
        children: lower_children(node),
      });
    },
    NodeValue::BlockQuote => out.push(Node::BlockQuote(lower_children(node))),
    NodeValue::List(list) => {
      let tight = list.tight;
      let items = node
        .children()
        .map(|item| {
          let children = lower_children(item);
          if tight {
            unwrap_tight_item(children)
          } else {
            children
          }
        })
        .collect();
      out.push(Node::List {
        ordered: list.list_type == ListType::Ordered,
        start: list.start,
        items,
      });
    },
    NodeValue::CodeBlock(block) => {
      let language = block.info.split_whitespace().next().map(str::to_string);
      out.push(Node::CodeBlock {
        language,
        code: block.literal.clone(),
      });
    },
    NodeValue::ThematicBreak => out.push(Node::Rule),
    NodeValue::HtmlBlock(block) => {
      out.push(Node::HtmlBlock(block.literal.clone()));
    },
    NodeValue::Table(_) => {
      let mut rows = Vec::new();
      for row in node.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cells = row.children().map(lower_children).collect();
        rows.push(TableRow { header, cells });
      }
      out.push(Node::Table { rows });
    },
    // Anything else flattens to its children; extensions that introduce
    // further node kinds (footnotes, task lists, ...) are not enabled.
    _ => out.extend(lower_children(node)),
  }
}

/// Tight list items render without paragraph wrappers.
fn unwrap_tight_item(children: Vec<Node>) -> Vec<Node> {
  children
    .into_iter()
    .flat_map(|node| {
      match node {
        Node::Paragraph(inline) => inline,
        other => vec![other],
      }
    })
    .collect()
}

fn non_empty(value: &str) -> Option<String> {
  if value.is_empty() {
    None
  } else {
    Some(value.to_string())
  }
}
