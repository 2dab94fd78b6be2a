//! # doc-forge – style cascade and grid layout for reports and slide decks
//!
//! This crate turns declaratively described documents into fully resolved
//! trees that a document writer can serialise without making any styling or
//! positioning decisions of its own. The stages are:
//!
//! 1. **Theme** – semantic colour and font roles ([`theme`])
//! 2. **Style** – named styles with `based_on` inheritance, frozen into a
//!    resolver ([`style`])
//! 3. **Report** – content tree ([`content`]) resolved node by node
//!    ([`report`])
//! 4. **Deck** – slide model ([`slide`]), grid placement ([`grid`]), card
//!    slot layout with Taffy ([`layout`]) and resolution ([`deck`]) into a
//!    frozen [`layout_config::DeckLayout`]
//! 5. **Package** – hand the result to a [`package::PackagingAdapter`]
//!
//! [`pipeline`] wires the stages together; [`templates`] holds sample
//! content.
//!
//! ```rust
//! use doc_forge::grid::{layout, GridItem, GridSpec};
//!
//! let spec = GridSpec::new(3, 2.4, 1.0).origin(1.0, 1.7).gaps(0.4, 0.6);
//! let placed = layout(GridItem::from_labels(["a", "b", "c", "d", "e"]), &spec).unwrap();
//! assert!((placed[4].x - 3.8).abs() < 1e-5);
//! assert!((placed[4].y - 3.3).abs() < 1e-5);
//! ```

pub mod content;
pub mod deck;
pub mod error;
pub mod grid;
pub mod layout;
pub mod layout_config;
pub mod package;
pub mod pipeline;
pub mod report;
pub mod slide;
pub mod style;
pub mod templates;
pub mod theme;

// Re-exports for convenience
pub use error::{Error, Result};
pub use pipeline::{render_deck, render_report, BuildConfig};
pub use style::{StyleRegistry, StyleResolver};
pub use theme::Theme;
