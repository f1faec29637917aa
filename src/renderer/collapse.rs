//! Collapsible-section tree rewrite.
//!
//! A heading whose first inline child starts with a `- ` marker becomes a
//! disclosure: the heading's inline content turns into the summary and every
//! following sibling up to the next heading of equal-or-shallower depth is
//! collected into the body. Applied exactly once per render, before callout
//! classification.
//!
//! The rewrite consumes the child list through a cursor and builds a fresh
//! one instead of splicing in place.
use std::sync::LazyLock;

use regex::Regex;

use crate::{types::Node, utils::compile_regex};

static COLLAPSE_PREFIX_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^\s*-\s*"));

/// Rewrite marked headings into details nodes, at every nesting level.
#[must_use]
pub(crate) fn apply(nodes: Vec<Node>) -> Vec<Node> {
  let mut out = Vec::with_capacity(nodes.len());
  let mut nodes = nodes.into_iter().peekable();

  while let Some(node) = nodes.next() {
    match node {
      Node::Heading {
        depth,
        id,
        mut children,
      } => {
        if strip_marker(&mut children) {
          let mut body = Vec::new();
          while let Some(next) =
            nodes.next_if(|sibling| !ends_section(sibling, depth))
          {
            body.push(next);
          }
          out.push(Node::Details {
            summary: children,
            body:    apply(body),
          });
        } else {
          out.push(Node::Heading {
            depth,
            id,
            children,
          });
        }
      },
      other => out.push(descend(other)),
    }
  }

  out
}

/// True when a sibling terminates the collected span: a heading at the
/// trigger's depth or shallower.
fn ends_section(node: &Node, depth: u8) -> bool {
  matches!(node, Node::Heading { depth: sibling, .. } if *sibling <= depth)
}

/// Strip the collapse marker from the heading's first text child and report
/// whether the heading triggers a rewrite. An emptied text node is removed.
fn strip_marker(children: &mut Vec<Node>) -> bool {
  let stripped = match children.first() {
    Some(Node::Text(text)) if COLLAPSE_PREFIX_RE.is_match(text) => {
      COLLAPSE_PREFIX_RE.replace(text, "").into_owned()
    },
    _ => return false,
  };
  if stripped.is_empty() {
    children.remove(0);
  } else if let Some(first) = children.first_mut() {
    *first = Node::Text(stripped);
  }
  true
}

/// Recurse into block containers that can hold headings.
fn descend(node: Node) -> Node {
  match node {
    Node::BlockQuote(children) => Node::BlockQuote(apply(children)),
    Node::List {
      ordered,
      start,
      items,
    } => {
      Node::List {
        ordered,
        start,
        items: items.into_iter().map(apply).collect(),
      }
    },
    Node::Details { summary, body } => {
      Node::Details {
        summary,
        body: apply(body),
      }
    },
    other => other,
  }
}
