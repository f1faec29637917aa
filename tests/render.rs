use guida_commonmark::{
  Heading,
  RenderOptions,
  Renderer,
  extract_headings,
  render_with_recovery,
};

fn renderer() -> Renderer {
  Renderer::new(RenderOptions::default())
}

#[test]
fn headings_are_recorded_in_order_with_the_title() {
  let result = renderer().render(
    "# Guida\n\nintro\n\n## Installazione\n\n### Requisiti\n",
    "it",
  );

  assert_eq!(result.title.as_deref(), Some("Guida"));
  let texts: Vec<&str> =
    result.headings.iter().map(|h| h.text.as_str()).collect();
  assert_eq!(texts, ["Guida", "Installazione", "Requisiti"]);
  let depths: Vec<u8> = result.headings.iter().map(|h| h.depth).collect();
  assert_eq!(depths, [1, 2, 3]);
}

#[test]
fn heading_icons_expand_but_stay_out_of_records() {
  let result = renderer().render("## ::bookOpen:: Setup\n", "en");

  assert_eq!(result.headings, vec![Heading {
    depth: 2,
    text:  "Setup".into(),
    id:    "setup".into(),
  }]);
  assert!(result.html.contains("<h2 id=\"setup\">"));
  assert!(result.html.contains("data-icon=\"BookOpen\""));
}

#[test]
fn duplicate_headings_get_numbered_anchors() {
  let result =
    renderer().render("## Setup\n\n## Setup\n\n## setup\n", "en");

  let ids: Vec<&str> = result.headings.iter().map(|h| h.id.as_str()).collect();
  assert_eq!(ids, ["setup", "setup-1", "setup-2"]);
  assert!(result.html.contains("id=\"setup-2\""));
}

#[test]
fn unknown_icon_tokens_stay_literal() {
  let result = renderer().render("Vedi ::doesnotexist:: qui.\n", "it");
  assert!(result.html.contains("::doesnotexist::"));
  assert!(!result.html.contains("data-icon=\"doesnotexist\""));
}

#[test]
fn collapsible_heading_swallows_its_section() {
  let md = "## - Avanzato\n\nuno\n\ndue\n\n## Next\n";
  let result = renderer().render(md, "it");

  assert!(result.html.contains("<details class=\"collapsible\">"));
  assert!(result.html.contains("<summary>Avanzato</summary>"));
  assert!(result.html.contains("<p>uno</p>"));
  assert!(result.html.contains("<h2 id=\"next\">Next</h2>"));

  // Headings hidden inside the disclosure produce no records.
  let texts: Vec<&str> =
    result.headings.iter().map(|h| h.text.as_str()).collect();
  assert_eq!(texts, ["Next"]);
}

#[test]
fn deeper_headings_inside_the_body_keep_their_records() {
  let md = "## - Outer\n\n### Inner\n\ntext\n\n## After\n";
  let result = renderer().render(md, "en");

  let texts: Vec<&str> =
    result.headings.iter().map(|h| h.text.as_str()).collect();
  assert_eq!(texts, ["Inner", "After"]);
  assert!(result.html.contains("<h3 id=\"inner\">Inner</h3>"));
}

#[test]
fn trailing_collapsible_heading_has_an_empty_body() {
  let result = renderer().render("## - Empty\n", "en");
  assert!(
    result
      .html
      .contains("<div class=\"collapsible-body\"></div>")
  );
  assert!(result.headings.is_empty());
}

#[test]
fn gfm_tables_render_with_head_and_body() {
  let md = "| a | b |\n|---|---|\n| 1 | 2 |\n";
  let result = renderer().render(md, "en");

  assert!(result.html.contains("<th>a</th>"));
  assert!(result.html.contains("<td>2</td>"));
  assert!(result.html.contains("<thead>"));
  assert!(result.html.contains("<tbody>"));
}

#[test]
fn heading_records_serialize_to_the_expected_shape() {
  let result = renderer().render("## Setup\n", "en");
  #[allow(clippy::expect_used)]
  let json = serde_json::to_value(&result.headings)
    .expect("heading records serialize");
  assert_eq!(
    json,
    serde_json::json!([{ "depth": 2, "text": "Setup", "id": "setup" }])
  );
}

#[test]
fn slug_state_does_not_leak_between_renders() {
  let renderer = renderer();
  let first = renderer.render("## Setup\n", "en");
  let second = renderer.render("## Setup\n", "en");
  assert_eq!(first.headings[0].id, "setup");
  assert_eq!(second.headings[0].id, "setup");
}

#[test]
fn extract_headings_matches_a_full_render() {
  let md = "# Guida\n\n## ::info:: Setup\n\n## Setup\n";
  let rendered = renderer().render(md, "it");
  assert_eq!(extract_headings(md), rendered.headings);
}

#[test]
fn recovery_wrapper_passes_successful_renders_through() {
  let renderer = renderer();
  let result = render_with_recovery(&renderer, "# Ok\n", "it");
  assert_eq!(result.title.as_deref(), Some("Ok"));
  assert!(!result.html.contains("Critical error"));
}
