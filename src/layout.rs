//! Card slot layout – uses Taffy to place a card template's slots inside one
//! grid cell.
//!
//! Every cell of a grid has the same size, so slot offsets are computed once
//! per template and then translated onto each [`PositionedItem`] the grid
//! engine produces. Flow slots stack in a flex column inside the card's
//! padding; absolute slots sit at a fixed offset from the card corner.
//!
//! [`PositionedItem`]: crate::grid::PositionedItem

use taffy::prelude::*;

use crate::error::{Error, Result};
use crate::slide::{CardTemplate, Frame, Slot, SlotPlacement};

fn slot_style(slot: &Slot, cell_width: f32) -> Style {
    match slot.placement {
        SlotPlacement::Flow { margin_top } => Style {
            size: Size {
                width: slot.width.map_or(Dimension::Auto, Dimension::Length),
                height: Dimension::Length(slot.height),
            },
            margin: Rect {
                top: LengthPercentageAuto::Length(margin_top),
                right: LengthPercentageAuto::Length(0.0),
                bottom: LengthPercentageAuto::Length(0.0),
                left: LengthPercentageAuto::Length(0.0),
            },
            // Overfull cards overflow at the bottom instead of squashing
            // slots.
            flex_shrink: 0.0,
            ..Default::default()
        },
        SlotPlacement::Absolute { x, y } => Style {
            position: Position::Absolute,
            inset: Rect {
                top: LengthPercentageAuto::Length(y),
                left: LengthPercentageAuto::Length(x),
                right: LengthPercentageAuto::Auto,
                bottom: LengthPercentageAuto::Auto,
            },
            size: Size {
                width: Dimension::Length(slot.width.unwrap_or((cell_width - x).max(0.0))),
                height: Dimension::Length(slot.height),
            },
            ..Default::default()
        },
    }
}

fn check(field: &'static str, slot: Option<usize>, v: f32, non_negative: bool) -> Result<()> {
    if v.is_finite() && (!non_negative || v >= 0.0) {
        return Ok(());
    }
    let want = if non_negative {
        "a non-negative number"
    } else {
        "finite"
    };
    let reason = match slot {
        Some(i) => format!("of slot {i} must be {want}, got {v}"),
        None => format!("must be {want}, got {v}"),
    };
    Err(Error::InvalidCardTemplate { field, reason })
}

/// Fails on negative or non-finite padding and slot sizes, and on
/// non-finite offsets.
pub fn validate_template(template: &CardTemplate) -> Result<()> {
    let pad = template.padding;
    for (field, v) in [
        ("padding.top", pad.top),
        ("padding.right", pad.right),
        ("padding.bottom", pad.bottom),
        ("padding.left", pad.left),
    ] {
        check(field, None, v, true)?;
    }
    for (i, slot) in template.slots.iter().enumerate() {
        check("height", Some(i), slot.height, true)?;
        if let Some(w) = slot.width {
            check("width", Some(i), w, true)?;
        }
        match slot.placement {
            SlotPlacement::Flow { margin_top } => check("margin_top", Some(i), margin_top, false)?,
            SlotPlacement::Absolute { x, y } => {
                check("x", Some(i), x, false)?;
                check("y", Some(i), y, false)?;
            }
        }
    }
    Ok(())
}

/// Frames of `template`'s slots relative to the top-left corner of a
/// `cell_width` × `cell_height` cell, in slot order.
pub fn compute_slot_frames(
    template: &CardTemplate,
    cell_width: f32,
    cell_height: f32,
) -> Result<Vec<Frame>> {
    validate_template(template)?;

    let mut taffy: TaffyTree<()> = TaffyTree::new();
    taffy.disable_rounding();

    let mut child_ids = Vec::with_capacity(template.slots.len());
    for slot in &template.slots {
        child_ids.push(taffy.new_leaf(slot_style(slot, cell_width))?);
    }

    let pad = template.padding;
    let card_style = Style {
        display: taffy::Display::Flex,
        flex_direction: taffy::FlexDirection::Column,
        size: Size {
            width: Dimension::Length(cell_width),
            height: Dimension::Length(cell_height),
        },
        padding: Rect {
            top: LengthPercentage::Length(pad.top),
            right: LengthPercentage::Length(pad.right),
            bottom: LengthPercentage::Length(pad.bottom),
            left: LengthPercentage::Length(pad.left),
        },
        align_items: Some(taffy::AlignItems::Stretch),
        ..Default::default()
    };
    let card = taffy.new_with_children(card_style, &child_ids)?;

    taffy.compute_layout(
        card,
        Size {
            width: AvailableSpace::Definite(cell_width),
            height: AvailableSpace::Definite(cell_height),
        },
    )?;

    let mut frames = Vec::with_capacity(child_ids.len());
    for id in child_ids {
        let l = taffy.layout(id)?;
        frames.push(Frame::new(l.location.x, l.location.y, l.size.width, l.size.height));
    }
    log::trace!(
        "card layout: {} slots in {cell_width} x {cell_height}",
        frames.len()
    );
    Ok(frames)
}

/// `frame` moved from cell-relative to slide coordinates.
pub fn translate(frame: Frame, x: f32, y: f32) -> Frame {
    Frame::new(frame.x + x, frame.y + y, frame.w, frame.h)
}
