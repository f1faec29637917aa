//! Inline `::icon::` token expansion and icon name resolution.
//!
//! The expander rewrites text runs into [`Node::Icon`] placeholders; actual
//! resolution against the registry happens when the tree is serialized, so an
//! unresolvable token degrades to its literal text instead of disappearing.
use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use crate::{
  types::Node,
  utils::{capitalize_first, compile_regex},
};

static ICON_TOKEN_CAPTURE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"::([A-Za-z][A-Za-z0-9]*)::"));

/// Canonical names known to the default registry.
///
/// The lucide-style subset the site ships; kept alphabetical.
const DEFAULT_ICONS: &[&str] = &[
  "AlertCircle",
  "ArrowLeft",
  "ArrowRight",
  "BadgeCheck",
  "Bell",
  "Book",
  "BookOpen",
  "Bug",
  "Calendar",
  "Check",
  "CheckCircle2",
  "ChevronDown",
  "ChevronRight",
  "Clipboard",
  "Clock",
  "Cloud",
  "Compass",
  "Copy",
  "Download",
  "ExternalLink",
  "Eye",
  "FileText",
  "Flag",
  "FlaskConical",
  "Folder",
  "Globe",
  "HardDrive",
  "Headset",
  "Heart",
  "HelpCircle",
  "Home",
  "Image",
  "Info",
  "Keyboard",
  "Laptop",
  "Lightbulb",
  "Link",
  "Lock",
  "LogIn",
  "LogOut",
  "Mail",
  "Map",
  "Menu",
  "MessageCircle",
  "Monitor",
  "Moon",
  "MousePointer",
  "OctagonX",
  "Package",
  "Paperclip",
  "Pencil",
  "Phone",
  "Printer",
  "RefreshCw",
  "Rocket",
  "Save",
  "Search",
  "Settings",
  "Share2",
  "Shield",
  "Smartphone",
  "Star",
  "Sun",
  "Tag",
  "Terminal",
  "Trash2",
  "TriangleAlert",
  "Upload",
  "User",
  "Users",
  "Wifi",
  "Wrench",
  "X",
  "Zap",
];

/// Immutable lookup table of canonical icon names.
///
/// Built once at process start and shared by reference across renders; never
/// mutated afterwards, so concurrent reads need no locking.
#[derive(Debug, Clone)]
pub struct IconRegistry {
  names: HashSet<String>,
}

impl Default for IconRegistry {
  fn default() -> Self {
    Self::from_names(DEFAULT_ICONS.iter().copied())
  }
}

impl IconRegistry {
  /// Build a registry from canonical icon names.
  pub fn from_names<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
    }
  }

  /// Resolve an author-written icon name to its canonical registry entry.
  ///
  /// Tries the exact name, then a capitalized first letter, then a
  /// kebab/snake-case to PascalCase conversion. Returns `None` when no
  /// candidate is registered.
  #[must_use]
  pub fn resolve(&self, name: &str) -> Option<&str> {
    if name.is_empty() {
      return None;
    }
    if let Some(found) = self.names.get(name) {
      return Some(found.as_str());
    }
    let capitalized = capitalize_first(name);
    if let Some(found) = self.names.get(capitalized.as_str()) {
      return Some(found.as_str());
    }
    let pascal = to_pascal_case(&name.to_lowercase());
    self.names.get(pascal.as_str()).map(String::as_str)
  }
}

/// Convert kebab/snake/space separated words to PascalCase.
fn to_pascal_case(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut upper_next = true;
  for ch in value.chars() {
    if ch == '-' || ch == '_' || ch.is_whitespace() {
      upper_next = true;
      continue;
    }
    if upper_next {
      out.extend(ch.to_uppercase());
      upper_next = false;
    } else {
      out.push(ch);
    }
  }
  out
}

/// Expand `::name::` tokens in a plain text run.
///
/// Returns the spliced node sequence; text without tokens comes back as a
/// single unchanged text node.
#[must_use]
pub fn expand_text(text: &str) -> Vec<Node> {
  let mut out = Vec::new();
  let mut last = 0;

  for caps in ICON_TOKEN_CAPTURE_RE.captures_iter(text) {
    let Some(whole) = caps.get(0) else { continue };
    if whole.start() > last {
      out.push(Node::Text(text[last..whole.start()].to_string()));
    }
    out.push(Node::Icon {
      name: caps[1].to_string(),
    });
    last = whole.end();
  }

  if last < text.len() {
    out.push(Node::Text(text[last..].to_string()));
  }
  out
}

/// Recursively expand icon tokens across an inline subtree.
///
/// Composite inline nodes are rebuilt with transformed children; inline code
/// and everything non-textual passes through untouched.
#[must_use]
pub fn expand_inline(nodes: Vec<Node>) -> Vec<Node> {
  let mut out = Vec::with_capacity(nodes.len());
  for node in nodes {
    match node {
      Node::Text(text) => out.extend(expand_text(&text)),
      Node::Emphasis(children) => {
        out.push(Node::Emphasis(expand_inline(children)));
      },
      Node::Strong(children) => out.push(Node::Strong(expand_inline(children))),
      Node::Strikethrough(children) => {
        out.push(Node::Strikethrough(expand_inline(children)));
      },
      Node::Link {
        url,
        title,
        children,
      } => {
        out.push(Node::Link {
          url,
          title,
          children: expand_inline(children),
        });
      },
      other => out.push(other),
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::Node;

  #[test]
  fn plain_text_passes_through_unchanged() {
    let nodes = expand_text("no tokens here");
    assert_eq!(nodes, vec![Node::Text("no tokens here".into())]);
  }

  #[test]
  fn tokens_are_spliced_into_icons() {
    let nodes = expand_text("see ::bookOpen:: for details");
    assert_eq!(nodes, vec![
      Node::Text("see ".into()),
      Node::Icon {
        name: "bookOpen".into()
      },
      Node::Text(" for details".into()),
    ]);
  }

  #[test]
  fn malformed_tokens_stay_literal() {
    let nodes = expand_text("::1abc:: and ::unclosed");
    assert_eq!(nodes, vec![Node::Text("::1abc:: and ::unclosed".into())]);
  }

  #[test]
  fn resolution_candidate_order() {
    let registry = IconRegistry::default();
    assert_eq!(registry.resolve("BookOpen"), Some("BookOpen"));
    assert_eq!(registry.resolve("bookOpen"), Some("BookOpen"));
    assert_eq!(registry.resolve("book-open"), Some("BookOpen"));
    assert_eq!(registry.resolve("book_open"), Some("BookOpen"));
    assert_eq!(registry.resolve("doesnotexist"), None);
  }

  #[test]
  fn custom_registries_are_isolated() {
    let registry = IconRegistry::from_names(["Sparkles"]);
    assert_eq!(registry.resolve("sparkles"), Some("Sparkles"));
    assert_eq!(registry.resolve("BookOpen"), None);
  }

  #[test]
  fn expansion_recurses_into_inline_containers() {
    let nodes =
      expand_inline(vec![Node::Strong(vec![Node::Text("::zap:: fast".into())])]);
    assert_eq!(nodes, vec![Node::Strong(vec![
      Node::Icon { name: "zap".into() },
      Node::Text(" fast".into()),
    ])]);
  }
}
