//! HTML serialization of the finalized node tree.
//!
//! Text is escaped on the way out; raw HTML nodes pass through verbatim, the
//! same trust model as the upstream parser. Icon placeholders resolve against
//! the registry here, so an unknown token degrades to its literal text.
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
  icons::{self, IconRegistry},
  types::{Node, TableRow},
};

/// Serialize a finalized document tree.
#[must_use]
pub(crate) fn document(nodes: &[Node], registry: &IconRegistry) -> String {
  render_nodes(nodes, registry)
}

fn render_nodes(nodes: &[Node], registry: &IconRegistry) -> String {
  let mut out = String::new();
  for node in nodes {
    out.push_str(&render_node(node, registry));
  }
  out
}

fn render_node(node: &Node, registry: &IconRegistry) -> String {
  match node {
    Node::Text(text) => encode_text(text).into_owned(),
    Node::LineBreak => "<br />".to_string(),
    Node::Icon { name } => render_icon(name, registry),
    Node::Emphasis(children) => wrap("em", children, registry),
    Node::Strong(children) => wrap("strong", children, registry),
    Node::Strikethrough(children) => wrap("del", children, registry),
    Node::CodeInline(code) => {
      format!("<code>{}</code>", encode_text(code))
    },
    Node::HtmlInline(html) | Node::HtmlBlock(html) => html.clone(),
    Node::Link {
      url,
      title,
      children,
    } => {
      let title_attr = title.as_ref().map_or_else(String::new, |title| {
        format!(" title=\"{}\"", encode_double_quoted_attribute(title))
      });
      format!(
        "<a href=\"{}\"{title_attr}>{}</a>",
        encode_double_quoted_attribute(url),
        render_nodes(children, registry)
      )
    },
    Node::Image { url, title, alt } => {
      let title_attr = title.as_ref().map_or_else(String::new, |title| {
        format!(" title=\"{}\"", encode_double_quoted_attribute(title))
      });
      format!(
        "<img src=\"{}\" alt=\"{}\"{title_attr} loading=\"lazy\" />",
        encode_double_quoted_attribute(url),
        encode_double_quoted_attribute(alt)
      )
    },
    Node::Paragraph(children) => {
      format!("<p>{}</p>\n", render_nodes(children, registry))
    },
    Node::Heading {
      depth,
      id,
      children,
    } => {
      let level = (*depth).clamp(1, 6);
      format!(
        "<h{level} id=\"{}\">{}</h{level}>\n",
        encode_double_quoted_attribute(id),
        render_nodes(children, registry)
      )
    },
    Node::BlockQuote(children) => {
      format!("<blockquote>{}</blockquote>\n", render_nodes(children, registry))
    },
    Node::Callout {
      kind,
      icon,
      title,
      collapsed,
      children,
    } => render_callout(kind, icon, title, *collapsed, children, registry),
    Node::Details { summary, body } => {
      format!(
        "<details class=\"collapsible\"><summary>{}</summary>\n<div \
         class=\"collapsible-body\">{}</div>\n</details>\n",
        render_nodes(summary, registry),
        render_nodes(body, registry)
      )
    },
    Node::List {
      ordered,
      start,
      items,
    } => {
      let tag = if *ordered { "ol" } else { "ul" };
      let start_attr = if *ordered && *start != 1 {
        format!(" start=\"{start}\"")
      } else {
        String::new()
      };
      let mut out = format!("<{tag}{start_attr}>\n");
      for item in items {
        out.push_str("<li>");
        out.push_str(&render_nodes(item, registry));
        out.push_str("</li>\n");
      }
      out.push_str(&format!("</{tag}>\n"));
      out
    },
    Node::CodeBlock { language, code } => {
      let class_attr = language.as_ref().map_or_else(String::new, |language| {
        format!(
          " class=\"language-{}\"",
          encode_double_quoted_attribute(language)
        )
      });
      format!(
        "<pre><code{class_attr}>{}</code></pre>\n",
        encode_text(code)
      )
    },
    Node::Table { rows } => render_table(rows, registry),
    Node::Rule => "<hr />\n".to_string(),
  }
}

fn wrap(tag: &str, children: &[Node], registry: &IconRegistry) -> String {
  format!("<{tag}>{}</{tag}>", render_nodes(children, registry))
}

/// Resolve and render one icon placeholder. Unknown names come back as the
/// literal token text so typos stay visible to authors.
fn render_icon(name: &str, registry: &IconRegistry) -> String {
  match registry.resolve(name) {
    Some(canonical) => icon_span(canonical),
    None => encode_text(&format!("::{name}::")).into_owned(),
  }
}

fn icon_span(name: &str) -> String {
  format!(
    "<span class=\"icon\" data-icon=\"{}\" aria-hidden=\"true\"></span>",
    encode_double_quoted_attribute(name)
  )
}

fn render_callout(
  kind: &str,
  icon: &str,
  title: &str,
  collapsed: bool,
  children: &[Node],
  registry: &IconRegistry,
) -> String {
  let class = format!("callout callout-{kind}");
  let title_html = render_title(icon, title, registry);
  let body = render_nodes(children, registry);

  if collapsed {
    format!(
      "<details class=\"{}\"><summary class=\"callout-title\">{title_html}</\
       summary>\n<div class=\"callout-body\">{body}</div>\n</details>\n",
      encode_double_quoted_attribute(&class)
    )
  } else {
    format!(
      "<div class=\"{}\"><div class=\"callout-title\">{title_html}</div>\n<div \
       class=\"callout-body\">{body}</div>\n</div>\n",
      encode_double_quoted_attribute(&class)
    )
  }
}

/// Title row: the preset icon followed by the display title. Titles may carry
/// their own `::icon::` tokens.
fn render_title(icon: &str, title: &str, registry: &IconRegistry) -> String {
  let mut out = icon_span(icon);
  out.push_str("<span>");
  out.push_str(&render_nodes(&icons::expand_text(title), registry));
  out.push_str("</span>");
  out
}

fn render_table(rows: &[TableRow], registry: &IconRegistry) -> String {
  let mut head = String::new();
  let mut body = String::new();

  for row in rows {
    let cell_tag = if row.header { "th" } else { "td" };
    let mut row_html = String::from("<tr>");
    for cell in &row.cells {
      row_html.push_str(&format!(
        "<{cell_tag}>{}</{cell_tag}>",
        render_nodes(cell, registry)
      ));
    }
    row_html.push_str("</tr>\n");
    if row.header {
      head.push_str(&row_html);
    } else {
      body.push_str(&row_html);
    }
  }

  let mut out = String::from("<table>\n");
  if !head.is_empty() {
    out.push_str(&format!("<thead>\n{head}</thead>\n"));
  }
  if !body.is_empty() {
    out.push_str(&format!("<tbody>\n{body}</tbody>\n"));
  }
  out.push_str("</table>\n");
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_is_escaped() {
    let registry = IconRegistry::default();
    let html =
      document(&[Node::Paragraph(vec![Node::Text("a < b".into())])], &registry);
    assert_eq!(html, "<p>a &lt; b</p>\n");
  }

  #[test]
  fn unknown_icons_render_as_literal_tokens() {
    let registry = IconRegistry::default();
    let html = document(
      &[Node::Icon {
        name: "doesnotexist".into(),
      }],
      &registry,
    );
    assert_eq!(html, "::doesnotexist::");
  }

  #[test]
  fn known_icons_render_as_spans() {
    let registry = IconRegistry::default();
    let html = document(
      &[Node::Icon {
        name: "bookOpen".into(),
      }],
      &registry,
    );
    assert!(html.contains("data-icon=\"BookOpen\""));
    assert!(html.contains("aria-hidden=\"true\""));
  }

  #[test]
  fn ordered_lists_carry_a_start_attribute() {
    let registry = IconRegistry::default();
    let html = document(
      &[Node::List {
        ordered: true,
        start:   3,
        items:   vec![vec![Node::Text("x".into())]],
      }],
      &registry,
    );
    assert!(html.starts_with("<ol start=\"3\">"));
  }
}
