//! Styled report – the content tree with a resolved [`EffectiveStyle`] on
//! every node, ready for a packaging adapter.

use serde::{Deserialize, Serialize};

use crate::content::{ContentNode, Document, OutlineEntry, PageSetup, Paragraph, Run, Table};
use crate::error::Result;
use crate::style::{EffectiveStyle, StyleDefinition, StyleProps, StyleResolver};
use crate::theme::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub style: EffectiveStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledParagraph {
    /// Declared style id, kept so the packager can reference its style table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    pub style: EffectiveStyle,
    pub runs: Vec<StyledRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledCell {
    pub blocks: Vec<StyledNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shading: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRow {
    pub cells: Vec<StyledCell>,
    pub header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledTable {
    pub rows: Vec<StyledRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub style: EffectiveStyle,
}

/// A table of contents with its entries filled in from the outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledToc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<StyledParagraph>,
    pub entries: Vec<TocEntry>,
    pub hyperlink: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StyledNode {
    Heading { level: u8, paragraph: StyledParagraph },
    Paragraph(StyledParagraph),
    Run(StyledRun),
    Table(StyledTable),
    PageBreak,
    TableOfContents(StyledToc),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSection {
    pub page: PageSetup,
    pub blocks: Vec<StyledNode>,
}

/// The outbound report tree. No style lookups are needed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledDocument {
    pub title: String,
    pub theme: String,
    /// The frozen style table, for packagers that emit named styles.
    pub styles: Vec<StyleDefinition>,
    pub sections: Vec<StyledSection>,
}

impl StyledDocument {
    /// Every heading, in order, with its level.
    pub fn headings(&self) -> Vec<(u8, String)> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter_map(|b| match b {
                StyledNode::Heading { level, paragraph } => Some((
                    *level,
                    paragraph.runs.iter().map(|r| r.text.as_str()).collect(),
                )),
                _ => None,
            })
            .collect()
    }
}

/// Style id used for table-of-contents entries at `level` (`0` → `TOC1`).
pub fn toc_style_id(level: u8) -> String {
    format!("TOC{}", u32::from(level) + 1)
}

/// Resolve the whole document. Fails on the first unresolvable node and
/// returns nothing partial.
pub fn build_styled_document(doc: &Document, resolver: &StyleResolver) -> Result<StyledDocument> {
    let builder = StyledTreeBuilder {
        resolver,
        outline: doc.outline(),
    };
    let base = StyleProps::default();
    let sections = doc
        .sections
        .iter()
        .map(|s| {
            Ok(StyledSection {
                page: s.page,
                blocks: builder.blocks(&s.blocks, &base)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StyledDocument {
        title: doc.title.clone(),
        theme: resolver.theme().name().to_string(),
        styles: resolver.definitions().cloned().collect(),
        sections,
    })
}

struct StyledTreeBuilder<'a, 't> {
    resolver: &'a StyleResolver<'t>,
    outline: Vec<OutlineEntry>,
}

impl StyledTreeBuilder<'_, '_> {
    // `base` is the cascade inherited from an enclosing table style.
    fn blocks(&self, nodes: &[ContentNode], base: &StyleProps) -> Result<Vec<StyledNode>> {
        nodes.iter().map(|n| self.node(n, base)).collect()
    }

    fn node(&self, node: &ContentNode, base: &StyleProps) -> Result<StyledNode> {
        Ok(match node {
            ContentNode::Heading { level, paragraph } => StyledNode::Heading {
                level: *level,
                paragraph: self.paragraph(paragraph, base)?,
            },
            ContentNode::Paragraph(p) => StyledNode::Paragraph(self.paragraph(p, base)?),
            ContentNode::Run(run) => StyledNode::Run(self.run(run, base)?),
            ContentNode::Table(t) => StyledNode::Table(self.table(t, base)?),
            ContentNode::PageBreak => StyledNode::PageBreak,
            ContentNode::TocPlaceholder(toc) => {
                let title = match &toc.title {
                    Some(text) => Some(self.paragraph(
                        &Paragraph {
                            style_id: self.existing("TOCHeading"),
                            ..Paragraph::with_text(text.clone())
                        },
                        base,
                    )?),
                    None => None,
                };
                let entries = self
                    .outline
                    .iter()
                    .filter(|e| toc.includes(e.level))
                    .map(|e| {
                        let id = self.existing(&toc_style_id(e.level));
                        Ok(TocEntry {
                            level: e.level,
                            text: e.text.clone(),
                            style: self.resolver.finish(
                                &self.resolver.cascade(id.as_deref(), &StyleProps::default())?,
                            )?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                StyledNode::TableOfContents(StyledToc {
                    title,
                    entries,
                    hyperlink: toc.hyperlink,
                })
            }
        })
    }

    fn existing(&self, id: &str) -> Option<String> {
        self.resolver.definition(id).map(|d| d.id.clone())
    }

    fn paragraph(&self, p: &Paragraph, base: &StyleProps) -> Result<StyledParagraph> {
        let mut cascaded = base.clone();
        cascaded.layer(&self.resolver.cascade(p.style_id.as_deref(), &p.overrides)?);
        let runs = p
            .runs
            .iter()
            .map(|r| self.run(r, &cascaded))
            .collect::<Result<Vec<_>>>()?;
        Ok(StyledParagraph {
            style_id: p.style_id.clone(),
            style: self.resolver.finish(&cascaded)?,
            runs,
        })
    }

    fn run(&self, run: &Run, paragraph: &StyleProps) -> Result<StyledRun> {
        Ok(StyledRun {
            text: run.text.clone(),
            style: self
                .resolver
                .resolve_run(paragraph, run.style_id.as_deref(), &run.overrides)?,
        })
    }

    fn table(&self, table: &Table, base: &StyleProps) -> Result<StyledTable> {
        let mut table_base = base.clone();
        table_base.layer(
            &self
                .resolver
                .cascade(table.style_id.as_deref(), &StyleProps::default())?,
        );
        let theme = self.resolver.theme();
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| {
                        Ok(StyledCell {
                            blocks: self.blocks(&cell.blocks, &table_base)?,
                            shading: cell.shading.as_ref().map(|c| c.resolve(theme)).transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(StyledRow {
                    cells,
                    header: row.header,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(StyledTable { rows })
    }
}
