//! Error types for doc-forge.

use thiserror::Error;

/// Result type alias for doc-forge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a report or deck build.
///
/// None of these are transient. Each one names the identifier that caused
/// it so the caller can point at the offending style, role or grid field.
#[derive(Error, Debug)]
pub enum Error {
    /// A style with this id is already registered.
    #[error("duplicate style id: {0}")]
    DuplicateStyle(String),

    /// Following `based_on` links from `id` revisits a style on the chain.
    #[error("cyclic style inheritance at '{id}': {}", .chain.join(" -> "))]
    CyclicInheritance { id: String, chain: Vec<String> },

    /// A node or a `based_on` link names a style that is not registered.
    #[error("unknown style id: {0}")]
    UnknownStyle(String),

    /// The theme has no colour or font for this role.
    #[error("unknown theme role: {0}")]
    UnknownRole(String),

    /// A grid spec field is out of range.
    #[error("invalid grid spec: {field} {reason}")]
    InvalidGridSpec { field: &'static str, reason: String },

    /// A card template size, offset or padding is out of range.
    #[error("invalid card template: {field} {reason}")]
    InvalidCardTemplate { field: &'static str, reason: String },

    /// Headings go three levels deep (0, 1, 2).
    #[error("heading level {0} is outside 0..=2")]
    InvalidHeadingLevel(u8),

    /// The theme definition is inconsistent.
    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    /// A card slot references a field the grid item does not carry.
    #[error("grid item {index} has no field '{field}'")]
    MissingField { index: usize, field: String },

    /// Taffy rejected the card slot tree.
    #[error("card layout error: {0}")]
    CardLayout(#[from] taffy::TaffyError),

    /// Theme / stylesheet parsing or JSON packaging failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
