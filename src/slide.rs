//! Slide deck model – what a deck says, before anything is positioned.
//!
//! Free elements carry their own frame in inches. Repeated blocks are
//! described once as a [`GridGroup`]: a list of items, a [`GridSpec`] and a
//! [`CardTemplate`] that decorates every cell the grid produces.

use serde::{Deserialize, Serialize};

use crate::content::Run;
use crate::error::{Error, Result};
use crate::grid::{GridItem, GridSpec};
use crate::style::StyleProps;
use crate::theme::ColorValue;

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Rectangle in inches, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    RoundedRectangle,
    Oval,
    RightArrow,
    TextBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Outline of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub color: ColorValue,
    pub width_pt: f32,
}

impl LineSpec {
    pub fn new(color: ColorValue, width_pt: f32) -> Self {
        Self { color, width_pt }
    }
}

// ---------------------------------------------------------------------------
// Free elements
// ---------------------------------------------------------------------------

/// A text box. Runs resolve against the frame's paragraph style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing_if = "StyleProps::is_empty")]
    pub overrides: StyleProps,
    pub runs: Vec<Run>,
    #[serde(default)]
    pub valign: VerticalAlign,
}

impl TextFrame {
    pub fn new(frame: Frame, style_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            frame,
            style_id: Some(style_id.into()),
            overrides: StyleProps::default(),
            runs: vec![Run::new(text)],
            valign: VerticalAlign::Top,
        }
    }

    /// A frame built from runs only, no paragraph style.
    pub fn rich(frame: Frame, runs: Vec<Run>) -> Self {
        Self {
            frame,
            style_id: None,
            overrides: StyleProps::default(),
            runs,
            valign: VerticalAlign::Top,
        }
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    pub fn with(mut self, overrides: StyleProps) -> Self {
        self.overrides.layer(&overrides);
        self
    }

    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSpec {
    pub frame: Frame,
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineSpec>,
}

impl ShapeSpec {
    pub fn new(kind: ShapeKind, frame: Frame) -> Self {
        Self {
            frame,
            kind,
            fill: None,
            line: None,
        }
    }

    pub fn fill(mut self, color: ColorValue) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn line(mut self, line: LineSpec) -> Self {
        self.line = Some(line);
        self
    }
}

// ---------------------------------------------------------------------------
// Card templates
// ---------------------------------------------------------------------------

/// Space between a card's edge and its flow slots, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub fn uniform(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// What a slot shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotContent {
    /// The item's label.
    Label,
    /// One of the item's fields, verbatim.
    Field { name: String },
    /// Fixed text, the same on every card.
    Literal { text: String },
    /// Text with `{field}` placeholders; `{label}` is the item label.
    Template { text: String },
    /// A decoration shape instead of text.
    Shape {
        kind: ShapeKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<ColorValue>,
    },
}

/// Where a slot sits inside its card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlotPlacement {
    /// Stacked below the previous flow slot.
    Flow {
        #[serde(default)]
        margin_top: f32,
    },
    /// Offset from the card's top-left corner, ignoring padding.
    Absolute { x: f32, y: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub content: SlotContent,
    pub placement: SlotPlacement,
    pub height: f32,
    /// Defaults to the remaining card width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing_if = "StyleProps::is_empty")]
    pub overrides: StyleProps,
    #[serde(default)]
    pub valign: VerticalAlign,
}

impl Slot {
    fn new(content: SlotContent, height: f32) -> Self {
        Self {
            content,
            placement: SlotPlacement::Flow { margin_top: 0.0 },
            height,
            width: None,
            style_id: None,
            overrides: StyleProps::default(),
            valign: VerticalAlign::Top,
        }
    }

    pub fn label(height: f32) -> Self {
        Self::new(SlotContent::Label, height)
    }

    pub fn field(name: impl Into<String>, height: f32) -> Self {
        Self::new(SlotContent::Field { name: name.into() }, height)
    }

    pub fn literal(text: impl Into<String>, height: f32) -> Self {
        Self::new(SlotContent::Literal { text: text.into() }, height)
    }

    pub fn template(text: impl Into<String>, height: f32) -> Self {
        Self::new(SlotContent::Template { text: text.into() }, height)
    }

    pub fn shape(kind: ShapeKind, fill: Option<ColorValue>, height: f32) -> Self {
        Self::new(SlotContent::Shape { kind, fill }, height)
    }

    pub fn margin_top(mut self, margin: f32) -> Self {
        self.placement = SlotPlacement::Flow { margin_top: margin };
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.placement = SlotPlacement::Absolute { x, y };
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    pub fn with(mut self, overrides: StyleProps) -> Self {
        self.overrides.layer(&overrides);
        self
    }

    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.valign = valign;
        self
    }

    /// Text this slot shows for `item`, or `None` for shape slots.
    pub fn text_for(&self, item: &GridItem) -> Result<Option<String>> {
        let text = match &self.content {
            SlotContent::Label => item.label.clone(),
            SlotContent::Field { name } => lookup(item, name)?.to_string(),
            SlotContent::Literal { text } => text.clone(),
            SlotContent::Template { text } => interpolate(text, item)?,
            SlotContent::Shape { .. } => return Ok(None),
        };
        Ok(Some(text))
    }
}

fn lookup<'a>(item: &'a GridItem, name: &str) -> Result<&'a str> {
    if name == "label" {
        return Ok(&item.label);
    }
    item.get(name).ok_or_else(|| Error::MissingField {
        index: item.index,
        field: name.to_string(),
    })
}

/// Replace every `{name}` in `template` with the item's value. An unclosed
/// brace is kept as literal text.
pub fn interpolate(template: &str, item: &GridItem) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(lookup(item, &after[..close])?);
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Shape drawn between neighbouring cards of one row, offset from the left card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub kind: ShapeKind,
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
}

/// Decoration applied to every cell of a grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Background shape filling the cell. Without one, a fill still draws a
    /// rectangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ColorValue>,
    /// Item field naming a theme colour role; wins over `fill`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<LineSpec>,
    #[serde(default)]
    pub padding: Insets,
    #[serde(default)]
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<Connector>,
}

impl CardTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, kind: ShapeKind, fill: ColorValue) -> Self {
        self.shape = Some(kind);
        self.fill = Some(fill);
        self
    }

    pub fn fill_from(mut self, field: impl Into<String>) -> Self {
        self.fill_field = Some(field.into());
        self
    }

    pub fn line(mut self, line: LineSpec) -> Self {
        self.line = Some(line);
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn connector(mut self, connector: Connector) -> Self {
        self.connector = Some(connector);
        self
    }
}

/// A repeated block: one card per item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGroup {
    pub items: Vec<GridItem>,
    pub spec: GridSpec,
    pub card: CardTemplate,
}

impl GridGroup {
    pub fn new(items: Vec<GridItem>, spec: GridSpec, card: CardTemplate) -> Self {
        Self { items, spec, card }
    }
}

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideElement {
    Text(TextFrame),
    Shape(ShapeSpec),
    Grid(GridGroup),
}

/// One slide. Elements are drawn in order, later ones on top.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ColorValue>,
    #[serde(default)]
    pub elements: Vec<SlideElement>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, color: ColorValue) -> Self {
        self.background = Some(color);
        self
    }

    pub fn text(mut self, frame: TextFrame) -> Self {
        self.elements.push(SlideElement::Text(frame));
        self
    }

    pub fn shape(mut self, shape: ShapeSpec) -> Self {
        self.elements.push(SlideElement::Shape(shape));
        self
    }

    pub fn grid(mut self, group: GridGroup) -> Self {
        self.elements.push(SlideElement::Grid(group));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GridItem {
        GridItem::new(2, "API Gateway").field("port", "8080")
    }

    #[test]
    fn template_fills_fields_and_label() {
        let text = interpolate("{label} on port {port}", &service()).unwrap();
        assert_eq!(text, "API Gateway on port 8080");
    }

    #[test]
    fn unclosed_brace_kept() {
        let text = interpolate("cost {", &service()).unwrap();
        assert_eq!(text, "cost {");
    }

    #[test]
    fn missing_field_names_item_and_field() {
        let err = Slot::field("replicas", 0.3).text_for(&service()).unwrap_err();
        match err {
            Error::MissingField { index, field } => {
                assert_eq!(index, 2);
                assert_eq!(field, "replicas");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shape_slot_has_no_text() {
        let slot = Slot::shape(ShapeKind::Oval, None, 0.6);
        assert_eq!(slot.text_for(&service()).unwrap(), None);
        assert_eq!(
            Slot::literal("fixed", 0.3).text_for(&service()).unwrap().as_deref(),
            Some("fixed")
        );
    }

    #[test]
    fn slide_element_json_is_tagged() {
        let slide = Slide::new().shape(ShapeSpec::new(
            ShapeKind::Oval,
            Frame::new(0.5, 0.5, 1.0, 1.0),
        ));
        let json = serde_json::to_string(&slide).unwrap();
        assert!(json.contains(r#""type":"shape""#), "{json}");
        let back: Slide = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slide);
    }
}
