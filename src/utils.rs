//! Small shared helpers.
use regex::Regex;

/// Compile a regex from a pattern literal.
pub(crate) fn compile_regex(pattern: &str) -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "callers pass literal patterns known to compile"
  )]
  Regex::new(pattern).expect("regex literal should compile")
}

/// Capitalize the first letter of a string.
pub(crate) fn capitalize_first(s: &str) -> String {
  let mut chars = s.chars();
  chars.next().map_or_else(String::new, |c| {
    c.to_uppercase().collect::<String>() + chars.as_str()
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn capitalize_first_leaves_the_rest_alone() {
    assert_eq!(capitalize_first("bookOpen"), "BookOpen");
    assert_eq!(capitalize_first(""), "");
  }
}
