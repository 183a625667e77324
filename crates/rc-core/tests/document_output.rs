//! Integration tests: build → serialize → persist for `rc-core` documents.

use pretty_assertions::assert_eq;
use rc_core::{Attrs, Container, Document, LookupError, PersistError};

fn viewbox_document() -> Document {
    Document::with_attrs(Attrs::new().with("viewBox", "0 0 100 100"))
}

// ─── Serialization ───────────────────────────────────────────────────────

#[test]
fn style_rule_and_rect_document() {
    let mut doc = viewbox_document();
    doc.add_style("circle", [("fill-opacity", "0.6")]);
    doc.rect(0.0, 0.0, 10.0, 10.0, Attrs::new());

    let expected = r#"<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg">
    <style>
        circle {
            fill-opacity: 0.6;
        }
    </style>
    <rect x="0" y="0" width="10" height="10"/>
</svg>"#;
    let output = doc.serialize();
    assert_eq!(output, expected);
    assert_eq!(output.matches("<style>").count(), 1);
}

#[test]
fn no_style_block_without_rules() {
    let mut doc = viewbox_document();
    doc.circle(5.0, 5.0, 2.0, Attrs::new());
    let output = doc.serialize();
    assert!(!output.contains("style"), "unexpected style block in:\n{output}");
}

#[test]
fn repeated_selector_renders_once_with_union() {
    let mut doc = viewbox_document();
    doc.add_style("text", [("font-size", "8px")]);
    doc.add_style("text", [("fill", "#555")]);
    let output = doc.serialize();
    assert_eq!(output.matches("text {").count(), 1);
    assert!(output.contains("font-size: 8px;"));
    assert!(output.contains("fill: #555;"));
}

#[test]
fn sections_fill_out_of_order_but_render_in_order() {
    let mut doc = viewbox_document();
    doc.add_section("section-1");
    doc.add_section("section-2");

    doc.get_section("section-2")
        .unwrap()
        .rect(50.0, 50.0, 80.0, 80.0, Attrs::new().with("fill", "green").with("opacity", 0.5));
    doc.get_section("section-1")
        .unwrap()
        .rect(0.0, 0.0, 100.0, 100.0, Attrs::new().with("fill", "red"));

    let output = doc.serialize();
    let red = output.find(r#"fill="red""#).unwrap();
    let green = output.find(r#"fill="green""#).unwrap();
    assert!(red < green, "section-1 must precede section-2:\n{output}");
}

#[test]
fn sections_follow_default_group() {
    let mut doc = viewbox_document();
    doc.add_section("late");
    doc.get_section("late").unwrap().add("g", Attrs::new().with("id", "late"));
    doc.add("g", Attrs::new().with("id", "early"));

    let output = doc.serialize();
    assert!(output.find("early").unwrap() < output.find("late").unwrap());
}

#[test]
fn section_children_match_direct_children() {
    let mut direct = viewbox_document();
    direct.add_style("rect", [("fill", "none")]);
    direct.add_text("text", Attrs::new().with("x", 1), "Jan");
    direct.rect(1.0, 1.0, 19.0, 19.0, Attrs::new().class("m1"));

    let mut sectioned = viewbox_document();
    sectioned.add_style("rect", [("fill", "none")]);
    let labels = sectioned.add_section("labels");
    labels.add_text("text", Attrs::new().with("x", 1), "Jan");
    labels.rect(1.0, 1.0, 19.0, 19.0, Attrs::new().class("m1"));

    assert_eq!(direct.serialize(), sectioned.serialize());
}

#[test]
fn nested_subtree_indents_one_level_per_element() {
    let mut doc = viewbox_document();
    doc.add("g", Attrs::new().with("id", "legend"))
        .add_text("text", Attrs::new(), "Pace");
    assert_eq!(
        doc.serialize(),
        r#"<svg viewBox="0 0 100 100" xmlns="http://www.w3.org/2000/svg">
    <g id="legend">
        <text>Pace</text>
    </g>
</svg>"#
    );
}

// ─── Errors ──────────────────────────────────────────────────────────────

#[test]
fn missing_section_lookup_fails() {
    let mut doc = Document::new();
    assert_eq!(
        doc.get_section("missing").unwrap_err(),
        LookupError::UnknownSection("missing".to_owned())
    );
}

// ─── Persistence ─────────────────────────────────────────────────────────

#[test]
fn persist_appends_extension_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Running 2022");
    std::fs::write(dir.path().join("Running 2022.svg"), "stale").unwrap();

    let mut doc = viewbox_document();
    doc.rect(0.0, 0.0, 10.0, 10.0, Attrs::new());
    let returned = doc.persist(Some(&target)).unwrap();
    assert!(returned.is_none());

    let written = std::fs::read_to_string(dir.path().join("Running 2022.svg")).unwrap();
    assert_eq!(written, doc.serialize());
}

#[test]
fn write_to_reports_final_path() {
    let dir = tempfile::tempdir().unwrap();
    let doc = Document::new();
    let path = doc.write_to(dir.path().join("chart.svg")).unwrap();
    assert_eq!(path, dir.path().join("chart.svg"));
}

#[test]
fn persist_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no-such-dir").join("chart");
    let err = Document::new().persist(Some(&target)).unwrap_err();
    let PersistError::Write { path, .. } = err;
    assert_eq!(path, dir.path().join("no-such-dir").join("chart.svg"));
}
