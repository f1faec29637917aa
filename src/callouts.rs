//! Callout presets and blockquote classification.
//!
//! Every blockquote renders as a callout, never as a bare quote. A bolded
//! label at the start of the first paragraph selects the preset; labels are
//! matched case/whitespace-insensitively against the union of preset keys and
//! every locale's titles, so authors may write any locale's keyword no matter
//! which language the document is in.
use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::{
  types::{Node, plain_text},
  utils::compile_regex,
};

/// Language used when a document's language has no translation.
pub const DEFAULT_LANGUAGE: &str = "it";

static COLLAPSE_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^\s*-\s*"));
static LABEL_WHITESPACE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"\s+"));

/// One callout preset: icon plus per-locale display titles.
///
/// Style attributes (colors, borders) live in the UI layer, keyed by
/// [`CalloutPreset::key`].
#[derive(Debug, Clone)]
pub struct CalloutPreset {
  /// Stable kind key ("info", "warning", ...). Drives CSS classes.
  pub key: &'static str,
  /// Canonical icon name for the title row.
  pub icon: &'static str,
  /// `(language, title)` pairs; order decides the terminal fallback.
  pub translations: &'static [(&'static str, &'static str)],
}

impl CalloutPreset {
  /// Display title for a language, falling back to the default language,
  /// then the first available translation, then a generic "Nota".
  #[must_use]
  pub fn title(&self, language: &str) -> &'static str {
    self
      .translation(language)
      .or_else(|| self.translation(DEFAULT_LANGUAGE))
      .or_else(|| self.translations.first().map(|&(_, title)| title))
      .unwrap_or("Nota")
  }

  fn translation(&self, language: &str) -> Option<&'static str> {
    self
      .translations
      .iter()
      .find(|(lang, _)| lang.eq_ignore_ascii_case(language))
      .map(|&(_, title)| title)
  }
}

const PRESETS: &[CalloutPreset] = &[
  CalloutPreset {
    key:          "info",
    icon:         "Info",
    translations: &[("it", "Info"), ("en", "Info")],
  },
  CalloutPreset {
    key:          "warning",
    icon:         "TriangleAlert",
    translations: &[("it", "Attenzione"), ("en", "Warning")],
  },
  CalloutPreset {
    key:          "error",
    icon:         "OctagonX",
    translations: &[("it", "Errore"), ("en", "Error")],
  },
  CalloutPreset {
    key:          "tip",
    icon:         "Lightbulb",
    translations: &[("it", "Suggerimento"), ("en", "Tip")],
  },
  CalloutPreset {
    key:          "solution",
    icon:         "CheckCircle2",
    translations: &[("it", "Soluzione"), ("en", "Solution")],
  },
  CalloutPreset {
    key:          "bug",
    icon:         "Bug",
    translations: &[("it", "Bug"), ("en", "Bug")],
  },
  CalloutPreset {
    key:          "beta",
    icon:         "FlaskConical",
    translations: &[("it", "Funzionalità Beta"), ("en", "Beta Experiment")],
  },
];

const DEFAULT_PRESET: CalloutPreset = CalloutPreset {
  key:          "note",
  icon:         "Info",
  translations: &[("it", "Nota"), ("en", "Note")],
};

/// Immutable preset table plus its label lookup index.
///
/// Constructed once and shared by reference across renders; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct CalloutPresets {
  presets:        Vec<CalloutPreset>,
  default_preset: CalloutPreset,
  labels:         HashMap<String, usize>,
}

impl Default for CalloutPresets {
  fn default() -> Self {
    Self::from_presets(PRESETS.to_vec(), DEFAULT_PRESET)
  }
}

impl CalloutPresets {
  /// Build a table from presets and a neutral fallback preset.
  ///
  /// The fallback is not part of the label index, so its titles cannot be
  /// matched as labels; it only backstops unresolved ones.
  #[must_use]
  pub fn from_presets(
    presets: Vec<CalloutPreset>,
    default_preset: CalloutPreset,
  ) -> Self {
    let mut labels = HashMap::new();
    for (index, preset) in presets.iter().enumerate() {
      labels.insert(normalize_label(preset.key), index);
      for (_, title) in preset.translations {
        labels.insert(normalize_label(title), index);
      }
    }
    Self {
      presets,
      default_preset,
      labels,
    }
  }

  /// Resolve a label to its preset, case/whitespace-insensitively.
  #[must_use]
  pub fn resolve(&self, label: &str) -> Option<&CalloutPreset> {
    self
      .labels
      .get(&normalize_label(label))
      .and_then(|&index| self.presets.get(index))
  }

  /// Neutral preset used when no label resolves.
  #[must_use]
  pub const fn default_preset(&self) -> &CalloutPreset {
    &self.default_preset
  }
}

fn normalize_label(label: &str) -> String {
  LABEL_WHITESPACE_RE
    .replace_all(label.trim(), " ")
    .to_lowercase()
}

/// Classify a blockquote's children into a callout node.
///
/// Always yields [`Node::Callout`]; unresolved or missing labels fall back to
/// the neutral preset with a best-effort title. The returned children are not
/// yet finalized; the caller recurses into them.
#[must_use]
pub fn classify_blockquote(
  children: Vec<Node>,
  language: &str,
  presets: &CalloutPresets,
) -> Node {
  let mut children = children;
  let mut collapsed = false;
  let mut label: Option<String> = None;

  let paragraph_index = children
    .iter()
    .position(|node| matches!(node, Node::Paragraph(_)));

  let body = if let Some(index) = paragraph_index {
    let mut inline = match children.remove(index) {
      Node::Paragraph(inline) => inline,
      _ => Vec::new(),
    };

    // A leading `- ` text segment marks the callout collapsed.
    let leading_marker = match inline.first() {
      Some(Node::Text(text)) if text.trim_start().starts_with('-') => {
        Some(COLLAPSE_MARKER_RE.replace(text, "").into_owned())
      },
      _ => None,
    };
    if let Some(stripped) = leading_marker {
      collapsed = true;
      if stripped.is_empty() {
        inline.remove(0);
      } else if let Some(first) = inline.first_mut() {
        *first = Node::Text(stripped);
      }
    }

    let strong_index = inline
      .iter()
      .position(|node| matches!(node, Node::Strong(_)));
    if let Some(strong_at) = strong_index {
      let strong = inline.remove(strong_at);
      let mut text = match &strong {
        Node::Strong(strong_children) => plain_text(strong_children),
        _ => String::new(),
      }
      .trim()
      .to_string();

      // The marker may sit inside the bold to dodge list parsing: `**- Tip**`.
      if text.starts_with('-') {
        collapsed = true;
        text = COLLAPSE_MARKER_RE.replace(&text, "").into_owned();
      }
      label = Some(text);

      let rest: Vec<Node> =
        inline.into_iter().filter(|node| !is_blank(node)).collect();
      let mut body = Vec::new();
      if !rest.is_empty() {
        body.push(Node::Paragraph(rest));
      }
      body.extend(children.into_iter().filter(|node| !is_blank(node)));
      body
    } else {
      children.insert(index, Node::Paragraph(inline));
      children
    }
  } else {
    children
  };

  let preset = label
    .as_deref()
    .filter(|text| !text.is_empty())
    .and_then(|text| presets.resolve(text));

  let (kind, icon, title) = match preset {
    Some(preset) => (preset.key, preset.icon, preset.title(language).to_string()),
    None => {
      let fallback = presets.default_preset();
      let title = match label.as_deref() {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.title(language).to_string(),
      };
      (fallback.key, fallback.icon, title)
    },
  };

  Node::Callout {
    kind: kind.to_string(),
    icon: icon.to_string(),
    title,
    collapsed,
    children: body,
  }
}

fn is_blank(node: &Node) -> bool {
  matches!(node, Node::Text(text) if text.trim().is_empty())
}
