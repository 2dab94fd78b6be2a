//! Pipeline – ties together style resolution, grid layout and packaging into
//! a single function call per artifact.

use crate::content::Document;
use crate::deck::build_deck_layout;
use crate::error::Result;
use crate::layout_config::DeckLayout;
use crate::package::PackagingAdapter;
use crate::report::{build_styled_document, StyledDocument};
use crate::slide::Deck;
use crate::style::StyleResolver;

/// Widescreen 16:9 slide width in inches.
pub const SLIDE_WIDTH_16X9: f32 = 10.0;
/// Widescreen 16:9 slide height in inches.
pub const SLIDE_HEIGHT_16X9: f32 = 5.625;

/// Configuration for a deck build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Title used when the deck has none (default: "doc-forge deck").
    pub title: String,
    /// Slide width in inches (default: 10).
    pub slide_width_in: f32,
    /// Slide height in inches (default: 5.625).
    pub slide_height_in: f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            title: "doc-forge deck".to_string(),
            slide_width_in: SLIDE_WIDTH_16X9,
            slide_height_in: SLIDE_HEIGHT_16X9,
        }
    }
}

impl BuildConfig {
    /// Classic 4:3 slides, 10 × 7.5 in.
    pub fn standard_4x3() -> Self {
        Self {
            slide_height_in: 7.5,
            ..Self::default()
        }
    }
}

/// Resolve every node of a report.
pub fn render_report(doc: &Document, resolver: &StyleResolver) -> Result<StyledDocument> {
    let styled = build_styled_document(doc, resolver)?;
    log::info!(
        "report '{}': {} sections, {} headings",
        styled.title,
        styled.sections.len(),
        styled.headings().len()
    );
    Ok(styled)
}

/// Position and resolve every slide of a deck.
pub fn render_deck(
    deck: &Deck,
    resolver: &StyleResolver,
    config: &BuildConfig,
) -> Result<DeckLayout> {
    let layout = build_deck_layout(deck, resolver, config)?;
    log::info!(
        "deck '{}': {} slides, {} shapes",
        layout.title,
        layout.slides.len(),
        layout.shape_count()
    );
    Ok(layout)
}

/// Full pipeline for a report: resolve, then hand to `adapter`.
pub fn package_report<A: PackagingAdapter>(
    doc: &Document,
    resolver: &StyleResolver,
    adapter: &mut A,
) -> Result<A::Output> {
    let styled = render_report(doc, resolver)?;
    adapter.package_report(&styled)
}

/// Full pipeline for a deck: lay out, then hand to `adapter`.
pub fn package_deck<A: PackagingAdapter>(
    deck: &Deck,
    resolver: &StyleResolver,
    config: &BuildConfig,
    adapter: &mut A,
) -> Result<A::Output> {
    let layout = render_deck(deck, resolver, config)?;
    adapter.package_deck(&layout)
}
