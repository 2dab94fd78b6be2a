//! Deck resolution – turns a [`Deck`] into a [`DeckLayout`].
//!
//! Free shapes and text frames are copied with their colours and fonts
//! resolved. Each [`GridGroup`] goes through the grid engine, then every
//! positioned cell is decorated from the group's card template. Text in
//! frames and card slots resolves through the same [`StyleResolver`] as the
//! report, so a deck and a report built from one stylesheet agree on fonts,
//! sizes and colours.

use crate::content::Run;
use crate::error::{Error, Result};
use crate::grid::{self, GridItem, PositionedItem};
use crate::layout::{compute_slot_frames, translate};
use crate::layout_config::{
    DeckLayout, LineStyle, PlacedCard, PlacedGroup, ShapeBox, SlideLayout, SlideNode,
    TextContent, TextSpan,
};
use crate::pipeline::BuildConfig;
use crate::slide::{
    CardTemplate, Deck, Frame, GridGroup, LineSpec, ShapeKind, ShapeSpec, Slide, SlideElement,
    Slot, SlotContent, TextFrame, VerticalAlign,
};
use crate::style::{StyleProps, StyleResolver};
use crate::theme::{Color, ColorValue, Theme};

/// Resolve every slide of `deck`. Fails on the first unknown style, role or
/// item field; nothing is returned in that case.
pub fn build_deck_layout(
    deck: &Deck,
    resolver: &StyleResolver,
    config: &BuildConfig,
) -> Result<DeckLayout> {
    let title = if deck.title.is_empty() {
        config.title.clone()
    } else {
        deck.title.clone()
    };
    let mut out = DeckLayout::new(title, config.slide_width_in, config.slide_height_in);
    let builder = SlideBuilder { resolver };
    for (index, slide) in deck.slides.iter().enumerate() {
        let layout = builder.slide(index, slide)?;
        log::debug!(
            "slide {index}: {} elements, {} shapes",
            layout.elements.len(),
            layout.shape_count()
        );
        out.slides.push(layout);
    }
    Ok(out)
}

struct SlideBuilder<'r, 't> {
    resolver: &'r StyleResolver<'t>,
}

impl SlideBuilder<'_, '_> {
    fn theme(&self) -> &Theme {
        self.resolver.theme()
    }

    fn color(&self, value: Option<&ColorValue>) -> Result<Option<Color>> {
        value.map(|c| c.resolve(self.theme())).transpose()
    }

    fn line(&self, line: Option<&LineSpec>) -> Result<Option<LineStyle>> {
        line.map(|l| -> Result<LineStyle> {
            Ok(LineStyle {
                color: l.color.resolve(self.theme())?,
                width_pt: l.width_pt,
            })
        })
        .transpose()
    }

    fn slide(&self, index: usize, slide: &Slide) -> Result<SlideLayout> {
        let mut elements = Vec::with_capacity(slide.elements.len());
        for element in &slide.elements {
            elements.push(match element {
                SlideElement::Text(frame) => SlideNode::Shape(self.text_frame(frame)?),
                SlideElement::Shape(shape) => SlideNode::Shape(self.shape(shape)?),
                SlideElement::Grid(group) => SlideNode::Group(self.group(group)?),
            });
        }
        Ok(SlideLayout {
            index,
            background: self.color(slide.background.as_ref())?,
            elements,
        })
    }

    fn shape(&self, spec: &ShapeSpec) -> Result<ShapeBox> {
        let mut shape = ShapeBox::new(spec.kind, spec.frame);
        shape.fill = self.color(spec.fill.as_ref())?;
        shape.line = self.line(spec.line.as_ref())?;
        Ok(shape)
    }

    fn text(
        &self,
        style_id: Option<&str>,
        overrides: &StyleProps,
        runs: &[Run],
        valign: VerticalAlign,
    ) -> Result<TextContent> {
        let paragraph = self.resolver.cascade(style_id, overrides)?;
        let align = self.resolver.finish(&paragraph)?.paragraph.alignment;
        let mut spans = Vec::with_capacity(runs.len());
        for run in runs {
            let style = self
                .resolver
                .resolve_run(&paragraph, run.style_id.as_deref(), &run.overrides)?;
            spans.push(TextSpan {
                text: run.text.clone(),
                run: style.run,
            });
        }
        Ok(TextContent {
            runs: spans,
            align,
            valign,
        })
    }

    fn text_frame(&self, frame: &TextFrame) -> Result<ShapeBox> {
        let mut shape = ShapeBox::new(ShapeKind::TextBox, frame.frame);
        shape.text = Some(self.text(
            frame.style_id.as_deref(),
            &frame.overrides,
            &frame.runs,
            frame.valign,
        )?);
        Ok(shape)
    }

    fn group(&self, group: &GridGroup) -> Result<PlacedGroup> {
        let spec = &group.spec;
        let placed = grid::layout(group.items.iter().cloned(), spec)?;
        let slots = compute_slot_frames(&group.card, spec.cell_width, spec.cell_height)?;

        let mut cards = Vec::with_capacity(placed.len());
        for p in placed {
            let shapes = self.card_shapes(&group.card, &slots, &p)?;
            cards.push(PlacedCard { item: p, shapes });
        }

        let mut connectors = Vec::new();
        if let Some(connector) = &group.card.connector {
            let fill = self.color(connector.fill.as_ref())?;
            let last = cards.len().saturating_sub(1);
            for (i, card) in cards.iter().enumerate() {
                // arrows only join neighbours within a row
                if i == last || (i + 1) % spec.columns == 0 {
                    continue;
                }
                let mut shape = ShapeBox::new(
                    connector.kind,
                    translate(connector.frame, card.item.x, card.item.y),
                );
                shape.fill = fill;
                connectors.push(shape);
            }
        }

        log::debug!(
            "grid group: {} cards, {} slots per card, {} connectors",
            cards.len(),
            slots.len(),
            connectors.len()
        );
        Ok(PlacedGroup { cards, connectors })
    }

    fn card_fill(&self, card: &CardTemplate, item: &GridItem) -> Result<Option<Color>> {
        match &card.fill_field {
            Some(field) => {
                let role = item.get(field).ok_or_else(|| Error::MissingField {
                    index: item.index,
                    field: field.clone(),
                })?;
                Ok(Some(self.theme().color(role)?))
            }
            None => self.color(card.fill.as_ref()),
        }
    }

    fn card_shapes(
        &self,
        card: &CardTemplate,
        slots: &[Frame],
        p: &PositionedItem,
    ) -> Result<Vec<ShapeBox>> {
        let mut shapes = Vec::with_capacity(card.slots.len() + 1);

        let fill = self.card_fill(card, &p.item)?;
        let background = card
            .shape
            .or_else(|| fill.map(|_| ShapeKind::Rectangle));
        if let Some(kind) = background {
            let mut shape = ShapeBox::new(kind, Frame::new(p.x, p.y, p.w, p.h));
            shape.fill = fill;
            shape.line = self.line(card.line.as_ref())?;
            shapes.push(shape);
        }

        for (slot, frame) in card.slots.iter().zip(slots) {
            shapes.push(self.slot(slot, translate(*frame, p.x, p.y), &p.item)?);
        }
        Ok(shapes)
    }

    fn slot(&self, slot: &Slot, frame: Frame, item: &GridItem) -> Result<ShapeBox> {
        if let SlotContent::Shape { kind, fill } = &slot.content {
            let mut shape = ShapeBox::new(*kind, frame);
            shape.fill = self.color(fill.as_ref())?;
            return Ok(shape);
        }
        let text = slot.text_for(item)?.unwrap_or_default();
        let mut shape = ShapeBox::new(ShapeKind::TextBox, frame);
        shape.text = Some(self.text(
            slot.style_id.as_deref(),
            &slot.overrides,
            &[Run::new(text)],
            slot.valign,
        )?);
        Ok(shape)
    }
}
