//! Deck layout – the frozen structure handed to a presentation writer.
//!
//! Everything here is absolute: positions in inches from the slide's
//! top-left corner, colours as RGBA, fonts as face names. A writer never
//! needs the theme or the stylesheet to draw it.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::PositionedItem;
use crate::slide::{Frame, ShapeKind, VerticalAlign};
use crate::style::{Alignment, EffectiveRun};
use crate::theme::Color;

/// A complete deck ready for packaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckLayout {
    #[serde(default = "DeckLayout::default_title")]
    pub title: String,
    pub slide_width_in: f32,
    pub slide_height_in: f32,
    pub slides: Vec<SlideLayout>,
}

/// One slide, elements in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayout {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    pub elements: Vec<SlideNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideNode {
    Shape(ShapeBox),
    Group(PlacedGroup),
}

/// Cards of one grid plus the connectors drawn between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedGroup {
    pub cards: Vec<PlacedCard>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connectors: Vec<ShapeBox>,
}

/// A positioned grid item and the shapes decorating it, background first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCard {
    pub item: PositionedItem,
    pub shapes: Vec<ShapeBox>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub width_pt: f32,
}

/// A positioned shape with optional text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub runs: Vec<TextSpan>,
    pub align: Alignment,
    pub valign: VerticalAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    #[serde(flatten)]
    pub run: EffectiveRun,
}

impl DeckLayout {
    pub fn new(title: impl Into<String>, slide_width_in: f32, slide_height_in: f32) -> Self {
        Self {
            title: title.into(),
            slide_width_in,
            slide_height_in,
            slides: Vec::new(),
        }
    }

    fn default_title() -> String {
        "doc-forge deck".to_string()
    }

    /// Every shape on every slide, cards and connectors included.
    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(SlideLayout::shape_count).sum()
    }

    /// Serialise to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl SlideLayout {
    pub fn shape_count(&self) -> usize {
        self.elements
            .iter()
            .map(|e| match e {
                SlideNode::Shape(_) => 1,
                SlideNode::Group(g) => {
                    g.connectors.len() + g.cards.iter().map(|c| c.shapes.len()).sum::<usize>()
                }
            })
            .sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &PlacedGroup> {
        self.elements.iter().filter_map(|e| match e {
            SlideNode::Group(g) => Some(g),
            SlideNode::Shape(_) => None,
        })
    }
}

impl ShapeBox {
    pub fn new(kind: ShapeKind, frame: Frame) -> Self {
        Self {
            x: frame.x,
            y: frame.y,
            w: frame.w,
            h: frame.h,
            kind,
            fill: None,
            line: None,
            text: None,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::new(self.x, self.y, self.w, self.h)
    }

    /// Concatenated text of all runs, empty for shapes without text.
    pub fn plain_text(&self) -> String {
        self.text
            .as_ref()
            .map(|t| t.runs.iter().map(|r| r.text.as_str()).collect())
            .unwrap_or_default()
    }
}
