//! Grid layout – places an ordered list of same-sized items into a
//! fixed-column grid.
//!
//! Items fill row by row: item `i` lands in column `i % columns`, row
//! `i / columns`. Anchors are top-left corners in the caller's unit
//! (inches for slides).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One entry of a repeated visual group (card, stat tile, service box).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    pub index: usize,
    pub label: String,
    /// Extra named values a card template can pull from.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl GridItem {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Number a list of labels in order.
    pub fn from_labels<I, S>(labels: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| Self::new(i, label))
            .collect()
    }
}

/// Geometry of a grid region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    #[serde(default)]
    pub col_gap: f32,
    #[serde(default)]
    pub row_gap: f32,
}

impl GridSpec {
    pub fn new(columns: usize, cell_width: f32, cell_height: f32) -> Self {
        Self {
            columns,
            cell_width,
            cell_height,
            origin_x: 0.0,
            origin_y: 0.0,
            col_gap: 0.0,
            row_gap: 0.0,
        }
    }

    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin_x = x;
        self.origin_y = y;
        self
    }

    pub fn gaps(mut self, col_gap: f32, row_gap: f32) -> Self {
        self.col_gap = col_gap;
        self.row_gap = row_gap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::InvalidGridSpec {
                field: "columns",
                reason: "must be greater than zero".to_string(),
            });
        }
        let non_negative = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("col_gap", self.col_gap),
            ("row_gap", self.row_gap),
        ];
        for (field, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidGridSpec {
                    field,
                    reason: format!("must be a non-negative number, got {v}"),
                });
            }
        }
        for (field, v) in [("origin_x", self.origin_x), ("origin_y", self.origin_y)] {
            if !v.is_finite() {
                return Err(Error::InvalidGridSpec {
                    field,
                    reason: format!("must be finite, got {v}"),
                });
            }
        }
        Ok(())
    }

    /// `(col, row)` of the item at position `i`.
    pub fn cell(&self, i: usize) -> (usize, usize) {
        (i % self.columns, i / self.columns)
    }

    /// Top-left anchor of the item at position `i`.
    pub fn anchor(&self, i: usize) -> (f32, f32) {
        let (col, row) = self.cell(i);
        (
            self.origin_x + col as f32 * (self.cell_width + self.col_gap),
            self.origin_y + row as f32 * (self.cell_height + self.row_gap),
        )
    }

    /// Rows needed for `count` items.
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }

    /// Width and height covered by `count` items, gaps between cells only.
    pub fn extent(&self, count: usize) -> (f32, f32) {
        if count == 0 {
            return (0.0, 0.0);
        }
        let cols = count.min(self.columns) as f32;
        let rows = self.rows_for(count) as f32;
        (
            cols * self.cell_width + (cols - 1.0) * self.col_gap,
            rows * self.cell_height + (rows - 1.0) * self.row_gap,
        )
    }
}

/// An item with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedItem<T = GridItem> {
    pub item: T,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Position every item. Output has the input's length and order; an empty
/// input gives an empty output.
pub fn layout<T, I>(items: I, spec: &GridSpec) -> Result<Vec<PositionedItem<T>>>
where
    I: IntoIterator<Item = T>,
{
    spec.validate()?;
    let placed: Vec<PositionedItem<T>> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let (x, y) = spec.anchor(i);
            PositionedItem {
                item,
                x,
                y,
                w: spec.cell_width,
                h: spec.cell_height,
            }
        })
        .collect();
    log::trace!(
        "grid layout: {} items in {} columns",
        placed.len(),
        spec.columns
    );
    Ok(placed)
}
