//! Packaging boundary – where resolved trees leave the engine.
//!
//! A concrete document writer (DOCX, PPTX, ...) implements
//! [`PackagingAdapter`]. The engine only ever calls the trait; it never
//! looks at what the adapter produces. [`JsonAdapter`] is the in-crate
//! implementation, used by the `forge` binary and by tests.

use crate::error::Result;
use crate::layout_config::DeckLayout;
use crate::report::StyledDocument;

/// Serialiser for the two outbound trees.
pub trait PackagingAdapter {
    type Output;

    fn package_report(&mut self, doc: &StyledDocument) -> Result<Self::Output>;

    fn package_deck(&mut self, deck: &DeckLayout) -> Result<Self::Output>;
}

/// Writes either tree as JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonAdapter {
    pub pretty: bool,
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonAdapter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn encode<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

impl PackagingAdapter for JsonAdapter {
    type Output = String;

    fn package_report(&mut self, doc: &StyledDocument) -> Result<String> {
        self.encode(doc)
    }

    fn package_deck(&mut self, deck: &DeckLayout) -> Result<String> {
        self.encode(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_has_no_newlines() {
        let deck = DeckLayout::new("d", 10.0, 5.625);
        let compact = JsonAdapter::compact().package_deck(&deck).unwrap();
        let pretty = JsonAdapter::default().package_deck(&deck).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(DeckLayout::from_json(&compact).unwrap(), deck);
    }

    #[test]
    fn adapters_are_interchangeable() {
        struct Counting(usize);
        impl PackagingAdapter for Counting {
            type Output = usize;
            fn package_report(&mut self, doc: &StyledDocument) -> Result<usize> {
                self.0 += 1;
                Ok(doc.sections.len())
            }
            fn package_deck(&mut self, deck: &DeckLayout) -> Result<usize> {
                self.0 += 1;
                Ok(deck.slides.len())
            }
        }
        let mut adapter = Counting(0);
        let n = adapter
            .package_deck(&DeckLayout::new("d", 10.0, 5.625))
            .unwrap();
        assert_eq!(n, 0);
        assert_eq!(adapter.0, 1);
    }
}
