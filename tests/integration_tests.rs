//! Integration tests for the doc-forge pipeline.
//!
//! These tests validate:
//! - The sample stylesheet freezes against both presets
//! - The sample report resolves with a filled table of contents
//! - The sample deck reproduces the hand-computed card positions
//! - JSON packaging is stable across builds
//! - Failures abort the whole build

use doc_forge::content::DocumentBuilder;
use doc_forge::error::Error;
use doc_forge::grid::GridItem;
use doc_forge::layout_config::{DeckLayout, PlacedGroup, SlideNode};
use doc_forge::package::{JsonAdapter, PackagingAdapter};
use doc_forge::pipeline::{package_deck, package_report, render_deck, render_report, BuildConfig};
use doc_forge::report::{StyledDocument, StyledNode};
use doc_forge::slide::{CardTemplate, Deck, GridGroup, Slide, Slot};
use doc_forge::style::{Alignment, StyleRegistry, StyleResolver};
use doc_forge::templates;
use doc_forge::theme::Theme;
use sha2::{Digest, Sha256};

// =====================================================================
// Helpers
// =====================================================================

fn resolver(theme: &Theme) -> StyleResolver<'_> {
    templates::stylesheet()
        .expect("stylesheet parses")
        .freeze(theme)
        .expect("stylesheet freezes")
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn sample_report(theme: &Theme) -> StyledDocument {
    render_report(&templates::coursework_report().unwrap(), &resolver(theme)).unwrap()
}

fn sample_deck(theme: &Theme) -> DeckLayout {
    render_deck(
        &templates::cloudscript_deck(),
        &resolver(theme),
        &BuildConfig::default(),
    )
    .unwrap()
}

fn only_group(deck: &DeckLayout, slide: usize) -> &PlacedGroup {
    let mut groups = deck.slides[slide].groups();
    let group = groups.next().expect("slide has a grid");
    assert!(groups.next().is_none(), "slide {slide} has more than one grid");
    group
}

fn digest(json: &str) -> String {
    format!("{:x}", Sha256::digest(json.as_bytes()))
}

// =====================================================================
// Stylesheet
// =====================================================================

#[test]
fn stylesheet_freezes_against_every_preset() {
    for theme in [Theme::cloudscript(), Theme::print()] {
        let r = resolver(&theme);
        assert!(r.definition("Heading1").is_some());
        assert!(r.definition("CardText").is_some());
    }
}

#[test]
fn heading_styles_follow_the_chain() {
    let theme = Theme::cloudscript();
    let r = resolver(&theme);
    let h1 = r.resolve("Heading1", &Default::default()).unwrap();
    assert_eq!(h1.run.font, "Times New Roman");
    assert_eq!(h1.run.size_pt, 16.0);
    assert!(h1.run.bold);
    assert_eq!(h1.paragraph.alignment, Alignment::Center);
    assert_eq!(h1.paragraph.spacing_before_pt, 24.0);
    assert_eq!(h1.paragraph.outline_level, Some(0));

    let toc_heading = r.resolve("TOCHeading", &Default::default()).unwrap();
    assert_eq!(toc_heading.run, h1.run);
}

// =====================================================================
// Report
// =====================================================================

#[test]
fn report_toc_lists_every_outline_heading() {
    let theme = Theme::cloudscript();
    let doc = templates::coursework_report().unwrap();
    let styled = render_report(&doc, &resolver(&theme)).unwrap();

    let toc = styled
        .sections
        .iter()
        .flat_map(|s| &s.blocks)
        .find_map(|b| match b {
            StyledNode::TableOfContents(t) => Some(t),
            _ => None,
        })
        .expect("report has a table of contents");

    let outline = doc.outline();
    assert_eq!(toc.entries.len(), outline.len());
    for (entry, heading) in toc.entries.iter().zip(&outline) {
        assert_eq!(entry.text, heading.text);
        assert_eq!(entry.level, heading.level);
    }
    assert!(toc.entries[0].style.run.bold, "TOC1 entries are bold");
    assert!(!toc.entries[2].style.run.bold, "TOC2 entries are not");
    let title = toc.title.as_ref().expect("toc title");
    assert_eq!(title.style_id.as_deref(), Some("TOCHeading"));
    assert_eq!(styled.headings().len(), outline.len());
}

#[test]
fn report_lead_runs_keep_paragraph_style() {
    let theme = Theme::cloudscript();
    let styled = sample_report(&theme);
    let lead = styled
        .sections
        .iter()
        .flat_map(|s| &s.blocks)
        .find_map(|b| match b {
            StyledNode::Paragraph(p) if p.runs.len() == 2 => Some(p),
            _ => None,
        })
        .expect("a paragraph with a bold lead-in");
    assert!(lead.runs[0].style.run.bold);
    assert!(!lead.runs[1].style.run.bold);
    assert_eq!(lead.style.paragraph.alignment, Alignment::Justify);
    assert_eq!(lead.runs[1].style.run.font, "Times New Roman");
}

#[test]
fn report_table_resolves_shading_and_table_style() {
    let theme = Theme::cloudscript();
    let styled = sample_report(&theme);
    let table = styled
        .sections
        .iter()
        .flat_map(|s| &s.blocks)
        .find_map(|b| match b {
            StyledNode::Table(t) => Some(t),
            _ => None,
        })
        .expect("report has a table");
    assert_eq!(table.rows.len(), 5);
    assert!(table.rows[0].header);
    let head = &table.rows[0].cells[0];
    assert_eq!(head.shading.map(|c| c.to_hex()).as_deref(), Some("#F5F9FC"));
    let StyledNode::Paragraph(p) = &table.rows[1].cells[0].blocks[0] else {
        panic!("cell holds a paragraph");
    };
    assert_eq!(p.runs[0].style.run.size_pt, 11.0);
}

#[test]
fn skipped_heading_level_is_preserved() {
    let theme = Theme::cloudscript();
    let mut b = DocumentBuilder::new("skip");
    b.table_of_contents(Default::default())
        .heading(0, "Chapter")
        .heading(2, "Deep section");
    let styled = render_report(&b.finish().unwrap(), &resolver(&theme)).unwrap();
    assert_eq!(
        styled.headings(),
        vec![(0, "Chapter".to_string()), (2, "Deep section".to_string())]
    );
    let StyledNode::Heading { paragraph, .. } = &styled.sections[0].blocks[2] else {
        panic!("expected heading");
    };
    assert_eq!(paragraph.style.run.size_pt, 13.0);
}

// =====================================================================
// Deck
// =====================================================================

#[test]
fn deck_has_every_slide_sized_16x9() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    assert_eq!(deck.slides.len(), 10);
    assert_eq!(deck.title, "CloudScript");
    assert_eq!(deck.slide_width_in, 10.0);
    assert_eq!(deck.slide_height_in, 5.625);
    for (i, slide) in deck.slides.iter().enumerate() {
        assert_eq!(slide.index, i);
    }
    assert_eq!(
        deck.slides[0].background.map(|c| c.to_hex()).as_deref(),
        Some("#065A82")
    );
}

#[test]
fn services_grid_matches_hand_computed_positions() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    let group = only_group(&deck, 6);
    assert_eq!(group.cards.len(), 6);

    for (i, card) in group.cards.iter().enumerate() {
        let (col, row) = ((i % 3) as f32, (i / 3) as f32);
        let x = 1.0 + col * 2.8;
        let y = 1.7 + row * 1.6;
        assert!(close(card.item.x, x), "card {i}: x = {}", card.item.x);
        assert!(close(card.item.y, y), "card {i}: y = {}", card.item.y);

        let [bg, name, port] = card.shapes.as_slice() else {
            panic!("card {i} has {} shapes", card.shapes.len());
        };
        assert!(close(bg.w, 2.4) && close(bg.h, 1.0));
        assert_eq!(bg.fill.map(|c| c.to_hex()).as_deref(), Some("#00A896"));
        assert!(close(name.y, y + 0.2), "name y = {}", name.y);
        assert!(close(name.h, 0.4));
        assert!(close(port.y, y + 0.6), "port y = {}", port.y);
        assert_eq!(name.plain_text(), card.item.item.label);
        assert_eq!(port.plain_text(), format!("Port: 800{}", i + 1));

        let title = &name.text.as_ref().unwrap().runs[0].run;
        assert_eq!(title.size_pt, 13.0);
        assert!(title.bold);
        assert_eq!(title.font, "Arial");
        assert_eq!(title.color.to_hex(), "#FFFFFF");
    }
}

#[test]
fn architecture_stages_have_arrows_between_them() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    let group = only_group(&deck, 3);
    assert_eq!(group.cards.len(), 3);
    assert_eq!(group.connectors.len(), 2);
    for (arrow, card) in group.connectors.iter().zip(&group.cards) {
        assert!(close(arrow.x, card.item.x + 2.5));
        assert!(close(arrow.y, 3.0));
        assert_eq!(arrow.fill.map(|c| c.to_hex()).as_deref(), Some("#02C39A"));
    }
    let stage = &group.cards[1];
    let ys: Vec<f32> = stage.shapes[1..].iter().map(|s| s.y - stage.item.y).collect();
    assert!(close(ys[0], 0.3) && close(ys[1], 1.2) && close(ys[2], 1.7), "{ys:?}");
}

#[test]
fn stat_tiles_take_fill_from_item_role() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    let group = only_group(&deck, 8);
    let fills: Vec<String> = group
        .cards
        .iter()
        .map(|c| c.shapes[0].fill.map(|f| f.to_hex()).unwrap_or_default())
        .collect();
    assert_eq!(fills, ["#028090", "#00A896", "#02C39A"]);
    let value = &group.cards[0].shapes[1];
    assert!(close(value.y, 2.2 + 0.5));
    assert_eq!(value.plain_text(), "2000+");
    let label = &group.cards[0].shapes[2];
    assert!(close(label.y, 2.2 + 1.3));
}

#[test]
fn problem_rows_use_absolute_slots() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    let group = only_group(&deck, 1);
    for (i, card) in group.cards.iter().enumerate() {
        let y = 1.5 + i as f32 * 1.2;
        let [oval, _icon, title, desc] = card.shapes.as_slice() else {
            panic!("row {i} has {} shapes", card.shapes.len());
        };
        assert!(close(oval.x, 0.7) && close(oval.y, y));
        assert!(close(title.x, 1.4) && close(title.y, y));
        assert!(close(desc.y, y + 0.35));
        assert_eq!(desc.text.as_ref().unwrap().runs[0].run.color.to_hex(), "#7F8C8D");
    }
}

#[test]
fn header_frames_use_deck_header_style() {
    let theme = Theme::cloudscript();
    let deck = sample_deck(&theme);
    for slide in &deck.slides[1..9] {
        let SlideNode::Shape(header) = &slide.elements[0] else {
            panic!("slide {} starts with a header", slide.index);
        };
        let run = &header.text.as_ref().unwrap().runs[0].run;
        assert_eq!(run.font, "Arial Black");
        assert_eq!(run.size_pt, 28.0);
        assert_eq!(run.color.to_hex(), "#065A82");
    }
}

// =====================================================================
// Packaging
// =====================================================================

#[test]
fn json_package_is_parseable() {
    let theme = Theme::cloudscript();
    let r = resolver(&theme);
    let mut adapter = JsonAdapter::compact();
    let json = package_deck(
        &templates::cloudscript_deck(),
        &r,
        &BuildConfig::default(),
        &mut adapter,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["slides"].as_array().map(Vec::len), Some(10));
    assert_eq!(DeckLayout::from_json(&json).unwrap(), sample_deck(&theme));

    let doc = templates::coursework_report().unwrap();
    let report = package_report(&doc, &r, &mut adapter).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["theme"], "cloudscript");
    assert!(value["styles"].as_array().is_some_and(|s| !s.is_empty()));
}

#[test]
fn output_is_deterministic() {
    let theme = Theme::cloudscript();
    let first = JsonAdapter::pretty()
        .package_deck(&sample_deck(&theme))
        .unwrap();
    let second = JsonAdapter::pretty()
        .package_deck(&sample_deck(&theme))
        .unwrap();
    assert_eq!(digest(&first), digest(&second));

    let first = JsonAdapter::pretty()
        .package_report(&sample_report(&theme))
        .unwrap();
    let second = JsonAdapter::pretty()
        .package_report(&sample_report(&theme))
        .unwrap();
    assert_eq!(digest(&first), digest(&second));
}

#[test]
fn themes_change_colours_not_positions() {
    let teal = sample_deck(&Theme::cloudscript());
    let grey = sample_deck(&Theme::print());
    let a = only_group(&teal, 6);
    let b = only_group(&grey, 6);
    for (x, y) in a.cards.iter().zip(&b.cards) {
        assert_eq!(x.item, y.item);
        assert_ne!(x.shapes[0].fill, y.shapes[0].fill);
    }
}

// =====================================================================
// Failure handling
// =====================================================================

#[test]
fn missing_theme_role_fails_at_freeze() {
    let theme = Theme::from_json(
        r##"{
            "name": "partial",
            "colors": {
                "primary": "#028090", "secondary": "#00A896", "accent": "#02C39A",
                "dark": "#065A82", "white": "#FFFFFF", "background": "#F5F9FC",
                "text": "#2C3E50", "success": "#27AE60",
                "code_background": "#1E1E1E", "code_text": "#00FF00"
            },
            "fonts": { "heading": "Arial Black", "body": "Arial", "mono": "Courier New", "serif": "Times New Roman" }
        }"##,
    )
    .unwrap();
    let err = templates::stylesheet().unwrap().freeze(&theme).unwrap_err();
    assert!(matches!(&err, Error::UnknownRole(role) if role == "muted"), "{err}");
}

#[test]
fn cyclic_stylesheet_is_rejected() {
    let err = StyleRegistry::from_json(
        r#"{"styles": [
            {"id": "A", "based_on": "B"},
            {"id": "B", "based_on": "A"}
        ]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::CyclicInheritance { .. }), "{err}");
}

#[test]
fn unknown_slot_style_aborts_deck() {
    let theme = Theme::cloudscript();
    let group = GridGroup::new(
        vec![GridItem::new(0, "x")],
        templates::services_grid(),
        CardTemplate::new().slot(Slot::label(0.4).style("NoSuchStyle")),
    );
    let deck = Deck::new("bad")
        .slide(templates::cloudscript_deck().slides[0].clone())
        .slide(Slide::new().grid(group));
    let err = render_deck(&deck, &resolver(&theme), &BuildConfig::default()).unwrap_err();
    assert!(matches!(&err, Error::UnknownStyle(id) if id == "NoSuchStyle"), "{err}");
}

#[test]
fn zero_column_grid_aborts_deck() {
    let theme = Theme::cloudscript();
    let mut spec = templates::services_grid();
    spec.columns = 0;
    let group = GridGroup::new(templates::service_items(), spec, CardTemplate::new());
    let deck = Deck::new("bad").slide(Slide::new().grid(group));
    let err = render_deck(&deck, &resolver(&theme), &BuildConfig::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidGridSpec { field: "columns", .. }));
}
