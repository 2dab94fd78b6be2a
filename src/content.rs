//! Content tree – an ordered report of sections, blocks and inline runs.
//!
//! The tree records structure and style references only. Every visual
//! property is computed later by the [`crate::style::StyleResolver`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::style::{Alignment, StyleProps};
use crate::theme::ColorValue;

/// Deepest heading level the builder accepts.
pub const MAX_HEADING_LEVEL: u8 = 2;

/// Style id a heading at `level` refers to unless told otherwise
/// (`0` → `Heading1`).
pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", u32::from(level) + 1)
}

// ---------------------------------------------------------------------------
// Inline
// ---------------------------------------------------------------------------

/// A span of text sharing one set of character properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing_if = "StyleProps::is_empty")]
    pub overrides: StyleProps,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_id: None,
            overrides: StyleProps::default(),
        }
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    /// Layers `overrides` over the ones already set.
    pub fn with(mut self, overrides: StyleProps) -> Self {
        self.overrides.layer(&overrides);
        self
    }

    pub fn bold(mut self) -> Self {
        self.overrides = self.overrides.bold(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.overrides = self.overrides.italic(true);
        self
    }

    pub fn size(mut self, size_pt: f32) -> Self {
        self.overrides = self.overrides.size(size_pt);
        self
    }

    pub fn color_role(mut self, role: &str) -> Self {
        self.overrides = self.overrides.color_role(role);
        self
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing_if = "StyleProps::is_empty")]
    pub overrides: StyleProps,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().run(Run::new(text))
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    /// Layers `overrides` over the ones already set.
    pub fn with(mut self, overrides: StyleProps) -> Self {
        self.overrides.layer(&overrides);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.overrides = self.overrides.align(alignment);
        self
    }

    pub fn spacing(mut self, before_pt: f32, after_pt: f32) -> Self {
        self.overrides = self.overrides.spacing(before_pt, after_pt);
        self
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.run(Run::new(text))
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub blocks: Vec<ContentNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading: Option<ColorValue>,
}

impl TableCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new().block(ContentNode::Paragraph(Paragraph::with_text(text)))
    }

    pub fn block(mut self, node: ContentNode) -> Self {
        self.blocks.push(node);
        self
    }

    pub fn shading(mut self, color: ColorValue) -> Self {
        self.shading = Some(color);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Repeated at the top of each page by the packager.
    #[serde(default)]
    pub header: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            header: false,
        }
    }

    pub fn header(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            header: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, id: impl Into<String>) -> Self {
        self.style_id = Some(id.into());
        self
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }
}

/// Where a table of contents goes and which heading levels it lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocPlaceholder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub min_level: u8,
    pub max_level: u8,
    #[serde(default)]
    pub hyperlink: bool,
}

impl Default for TocPlaceholder {
    fn default() -> Self {
        Self {
            title: None,
            min_level: 0,
            max_level: 2,
            hyperlink: true,
        }
    }
}

impl TocPlaceholder {
    pub fn includes(&self, level: u8) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentNode {
    Heading { level: u8, paragraph: Paragraph },
    Paragraph(Paragraph),
    /// A run outside any paragraph; packaged as its own paragraph.
    Run(Run),
    Table(Table),
    PageBreak,
    TocPlaceholder(TocPlaceholder),
}

// ---------------------------------------------------------------------------
// Sections and document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Page geometry of a section, in twips (1/1440 inch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSetup {
    pub width_twips: u32,
    pub height_twips: u32,
    pub margins: Margins,
}

impl PageSetup {
    /// A4 portrait with one-inch margins.
    pub fn a4() -> Self {
        Self {
            width_twips: 11906,
            height_twips: 16838,
            margins: Margins {
                top: 1440,
                right: 1440,
                bottom: 1440,
                left: 1440,
            },
        }
    }

    pub fn a4_landscape() -> Self {
        let p = Self::a4();
        Self {
            width_twips: p.height_twips,
            height_twips: p.width_twips,
            ..p
        }
    }

    /// Width left for content between the side margins.
    pub fn content_width_twips(&self) -> u32 {
        self.width_twips
            .saturating_sub(self.margins.left + self.margins.right)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub page: PageSetup,
    pub blocks: Vec<ContentNode>,
}

/// One heading as listed in a table of contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: u8,
    pub text: String,
    pub section: usize,
    pub block: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// Top-level headings in document order, levels as declared.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        let mut entries = Vec::new();
        for (s, section) in self.sections.iter().enumerate() {
            for (b, node) in section.blocks.iter().enumerate() {
                if let ContentNode::Heading { level, paragraph } = node {
                    entries.push(OutlineEntry {
                        level: *level,
                        text: paragraph.plain_text(),
                        section: s,
                        block: b,
                    });
                }
            }
        }
        entries
    }

    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }
}

/// Ordered-append builder for a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    title: String,
    sections: Vec<Section>,
    last_heading: Option<u8>,
    error: Option<Error>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
            last_heading: None,
            error: None,
        }
    }

    /// Start a new section; following blocks go into it.
    pub fn section(&mut self, page: PageSetup) -> &mut Self {
        self.sections.push(Section {
            page,
            blocks: Vec::new(),
        });
        self
    }

    fn push(&mut self, node: ContentNode) -> &mut Self {
        if self.sections.is_empty() {
            self.section(PageSetup::default());
        }
        if let Some(section) = self.sections.last_mut() {
            section.blocks.push(node);
        }
        self
    }

    /// Heading with the default `Heading{level+1}` style.
    pub fn heading(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        let paragraph = Paragraph::with_text(text).style(heading_style_id(level));
        self.heading_paragraph(level, paragraph)
    }

    /// Heading with caller-supplied runs. Without a style id the default
    /// heading style is used.
    ///
    /// A level above [`MAX_HEADING_LEVEL`] is dropped and makes
    /// [`finish`](Self::finish) fail.
    pub fn heading_paragraph(&mut self, level: u8, mut paragraph: Paragraph) -> &mut Self {
        if level > MAX_HEADING_LEVEL {
            self.error.get_or_insert(Error::InvalidHeadingLevel(level));
            return self;
        }
        if paragraph.style_id.is_none() {
            paragraph.style_id = Some(heading_style_id(level));
        }
        if let Some(prev) = self.last_heading {
            if level > prev.saturating_add(1) {
                log::warn!("heading level {level} follows level {prev}; kept as declared");
            }
        }
        self.last_heading = Some(level);
        self.push(ContentNode::Heading { level, paragraph })
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.push(ContentNode::Paragraph(paragraph))
    }

    /// Plain paragraph of one unstyled run.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.paragraph(Paragraph::with_text(text))
    }

    pub fn run(&mut self, run: Run) -> &mut Self {
        self.push(ContentNode::Run(run))
    }

    pub fn table(&mut self, table: Table) -> &mut Self {
        self.push(ContentNode::Table(table))
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.push(ContentNode::PageBreak)
    }

    pub fn table_of_contents(&mut self, toc: TocPlaceholder) -> &mut Self {
        self.push(ContentNode::TocPlaceholder(toc))
    }

    /// The built document, or the first error recorded while appending.
    pub fn finish(self) -> Result<Document> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Document {
            title: self.title,
            sections: self.sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_keep_append_order() {
        let mut b = DocumentBuilder::new("t");
        b.heading(0, "Intro")
            .text("body")
            .page_break()
            .table_of_contents(TocPlaceholder::default());
        let doc = b.finish().unwrap();
        assert_eq!(doc.sections.len(), 1);
        let blocks = &doc.sections[0].blocks;
        assert!(matches!(blocks[0], ContentNode::Heading { level: 0, .. }));
        assert!(matches!(blocks[1], ContentNode::Paragraph(_)));
        assert!(matches!(blocks[2], ContentNode::PageBreak));
        assert!(matches!(blocks[3], ContentNode::TocPlaceholder(_)));
    }

    #[test]
    fn heading_gets_default_style_reference() {
        let mut b = DocumentBuilder::new("t");
        b.heading(1, "Sub")
            .heading_paragraph(0, Paragraph::with_text("Custom").style("Title"));
        let doc = b.finish().unwrap();
        match &doc.sections[0].blocks[0] {
            ContentNode::Heading { paragraph, .. } => {
                assert_eq!(paragraph.style_id.as_deref(), Some("Heading2"))
            }
            other => panic!("unexpected {other:?}"),
        }
        match &doc.sections[0].blocks[1] {
            ContentNode::Heading { paragraph, .. } => {
                assert_eq!(paragraph.style_id.as_deref(), Some("Title"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn skipped_levels_are_preserved() {
        let mut b = DocumentBuilder::new("t");
        b.heading(2, "Deep first").heading(0, "Top").heading(2, "Deep again");
        let levels: Vec<u8> = b.finish().unwrap().outline().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![2, 0, 2]);
    }

    #[test]
    fn heading_level_above_two_is_rejected() {
        let mut b = DocumentBuilder::new("t");
        b.heading(0, "Top").heading(7, "Too deep").heading(3, "Also too deep");
        let err = b.finish().unwrap_err();
        assert!(matches!(err, Error::InvalidHeadingLevel(7)), "{err}");
    }

    #[test]
    fn with_layers_over_earlier_overrides() {
        let run = Run::new("x").bold().with(StyleProps::new().size(14.0));
        assert_eq!(run.overrides.run.bold, Some(true));
        assert_eq!(run.overrides.run.size_pt, Some(14.0));

        let para = Paragraph::with_text("p")
            .align(Alignment::Center)
            .with(StyleProps::new().bold(true));
        assert_eq!(para.overrides.paragraph.alignment, Some(Alignment::Center));
        assert_eq!(para.overrides.run.bold, Some(true));
    }

    #[test]
    fn sections_split_blocks() {
        let mut b = DocumentBuilder::new("t");
        b.text("portrait")
            .section(PageSetup::a4_landscape())
            .text("landscape");
        let doc = b.finish().unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[1].page.width_twips, 16838);
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn outline_records_positions() {
        let mut b = DocumentBuilder::new("t");
        b.text("preface").heading(0, "One").text("x").heading(1, "One.One");
        let outline = b.finish().unwrap().outline();
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[1].text, "One.One");
        assert_eq!(outline[1].block, 3);
    }

    #[test]
    fn content_node_json_is_tagged() {
        let json = serde_json::to_string(&ContentNode::PageBreak).unwrap();
        assert_eq!(json, r#"{"type":"page_break"}"#);
    }

    #[test]
    fn a4_content_width() {
        assert_eq!(PageSetup::a4().content_width_twips(), 11906 - 2880);
    }
}
