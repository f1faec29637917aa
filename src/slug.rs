//! Heading text normalization and anchor slug generation.
//!
//! Slugs are the in-page anchors the table of contents links to. Every
//! document render owns its own [`Slugger`], so duplicate counters never leak
//! across documents.
use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::{types::Heading, utils::compile_regex};

static ICON_TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"::[A-Za-z][A-Za-z0-9]*::"));
static WHITESPACE_RUN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"\s+"));
static LEADING_MARKER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^-+\s*"));
static NON_SLUG_CHAR_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"[^a-z0-9\s-]"));
static HEADING_LINE_RE: LazyLock<Regex> =
  LazyLock::new(|| compile_regex(r"^(#{1,4})\s+(.+)$"));

/// Normalize heading display text: drop `::icon::` tokens, collapse
/// whitespace runs, strip a leading collapse marker, trim.
#[must_use]
pub fn normalize_heading_text(value: &str) -> String {
  let without_icons = ICON_TOKEN_RE.replace_all(value, " ");
  let collapsed = WHITESPACE_RUN_RE.replace_all(&without_icons, " ");
  LEADING_MARKER_RE.replace(&collapsed, "").trim().to_string()
}

fn base_slug(value: &str) -> String {
  let lowered = value.to_lowercase();
  let stripped = NON_SLUG_CHAR_RE.replace_all(&lowered, "");
  WHITESPACE_RUN_RE
    .replace_all(stripped.trim(), "-")
    .to_string()
}

/// Stateful slug generator scoped to one document render.
///
/// The first occurrence of a base slug is returned bare; later duplicates get
/// `-1`, `-2`, ... suffixes in first-seen order. Published anchors depend on
/// this numbering starting at `-1`, not `-0`.
#[derive(Debug, Default)]
pub struct Slugger {
  counts: HashMap<String, usize>,
}

impl Slugger {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Map heading text to a unique, URL-safe anchor ID.
  pub fn slug(&mut self, value: &str) -> String {
    let mut base = base_slug(&normalize_heading_text(value));
    if base.is_empty() {
      base = "section".to_string();
    }
    let seen = self.counts.entry(base.clone()).or_insert(0);
    let current = *seen;
    *seen += 1;
    if current == 0 {
      base
    } else {
      format!("{base}-{current}")
    }
  }
}

/// Extract heading records from raw markdown without a full render.
///
/// Line-based scan for ATX headings of depth 1-4, the way the site's
/// navigation builds a table of contents from document sources. Headings
/// whose normalized text is empty are skipped.
#[must_use]
pub fn extract_headings(content: &str) -> Vec<Heading> {
  let mut slugger = Slugger::new();
  let mut headings = Vec::new();

  for line in content.lines() {
    let Some(caps) = HEADING_LINE_RE.captures(line.trim()) else {
      continue;
    };
    let depth = caps[1].len() as u8;
    let raw = &caps[2];
    let text = normalize_heading_text(raw);
    if text.is_empty() {
      continue;
    }
    let id = slugger.slug(raw);
    headings.push(Heading { depth, text, id });
  }

  headings
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duplicate_slugs_number_from_one() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("Setup"), "setup");
    assert_eq!(slugger.slug("Setup"), "setup-1");
    assert_eq!(slugger.slug("setup"), "setup-2");
  }

  #[test]
  fn icon_tokens_do_not_leak_into_slugs() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("::info:: Setup"), "setup");
  }

  #[test]
  fn slug_charset_is_restricted() {
    let mut slugger = Slugger::new();
    let slug = slugger.slug("  Héllo,  Wörld! 42 ");
    assert!(
      slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    );
    assert!(!slug.starts_with('-') && !slug.ends_with('-'));
  }

  #[test]
  fn empty_text_falls_back_to_section() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("::sparkles::"), "section");
    assert_eq!(slugger.slug("!!!"), "section-1");
  }

  #[test]
  fn collapse_marker_is_stripped() {
    assert_eq!(normalize_heading_text("- Advanced"), "Advanced");
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("- Advanced"), "advanced");
  }

  #[test]
  fn extract_headings_scans_raw_markdown() {
    let md = "# Title\n\nbody\n\n## ::bookOpen:: Setup\n\n##### too deep\n";
    let headings = extract_headings(md);
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[1], Heading {
      depth: 2,
      text:  "Setup".into(),
      id:    "setup".into(),
    });
  }
}
