//! Style cascade – named style definitions with `based_on` inheritance,
//! resolved against a [`Theme`] into a flat [`EffectiveStyle`].
//!
//! Registration and resolution are two separate phases. A [`StyleRegistry`]
//! accepts definitions; [`StyleRegistry::freeze`] checks every chain, merges
//! it once and hands back a read-only [`StyleResolver`]. Precedence, lowest
//! first:
//!
//! 1. base values (theme roles [`BASE_FONT_ROLE`] / [`BASE_COLOR_ROLE`], 12 pt)
//! 2. registry document defaults
//! 3. the `based_on` chain, root first, ending at the named style
//! 4. local overrides

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::theme::{Color, ColorValue, FontValue, Theme};

/// Theme font role used when no layer sets a font.
pub const BASE_FONT_ROLE: &str = "body";
/// Theme colour role used when no layer sets a colour.
pub const BASE_COLOR_ROLE: &str = "text";
/// Font size used when no layer sets one.
pub const BASE_SIZE_PT: f32 = 12.0;

// ---------------------------------------------------------------------------
// Declared properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Character-level properties. `None` falls through to the next layer down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<FontValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_pt: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
}

/// Paragraph-level properties. `None` falls through to the next layer down.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_before_pt: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_after_pt: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u8>,
}

// Each explicitly set field of the upper layer replaces the lower one.
macro_rules! layer_fields {
    ($lower:expr, $upper:expr, $($field:ident),+ $(,)?) => {
        $(
            if $upper.$field.is_some() {
                $lower.$field = $upper.$field.clone();
            }
        )+
    };
}

impl RunProps {
    pub fn layer(&mut self, upper: &RunProps) {
        layer_fields!(self, upper, font, size_pt, bold, italic, underline, color);
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ParagraphProps {
    pub fn layer(&mut self, upper: &ParagraphProps) {
        layer_fields!(
            self,
            upper,
            alignment,
            spacing_before_pt,
            spacing_after_pt,
            outline_level
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A full set of declared (possibly partial) properties. Used for style
/// bodies, document defaults and local overrides alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleProps {
    #[serde(skip_serializing_if = "RunProps::is_empty")]
    pub run: RunProps,
    #[serde(skip_serializing_if = "ParagraphProps::is_empty")]
    pub paragraph: ParagraphProps,
}

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `upper` on top of `self`; set fields in `upper` win.
    pub fn layer(&mut self, upper: &StyleProps) {
        self.run.layer(&upper.run);
        self.paragraph.layer(&upper.paragraph);
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty() && self.paragraph.is_empty()
    }

    pub fn font(mut self, font: FontValue) -> Self {
        self.run.font = Some(font);
        self
    }

    pub fn font_role(self, role: &str) -> Self {
        self.font(FontValue::role(role))
    }

    pub fn size(mut self, size_pt: f32) -> Self {
        self.run.size_pt = Some(size_pt);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.run.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.run.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.run.underline = Some(underline);
        self
    }

    pub fn color(mut self, color: ColorValue) -> Self {
        self.run.color = Some(color);
        self
    }

    pub fn color_role(self, role: &str) -> Self {
        self.color(ColorValue::role(role))
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.paragraph.alignment = Some(alignment);
        self
    }

    pub fn spacing_before(mut self, pt: f32) -> Self {
        self.paragraph.spacing_before_pt = Some(pt);
        self
    }

    pub fn spacing_after(mut self, pt: f32) -> Self {
        self.paragraph.spacing_after_pt = Some(pt);
        self
    }

    pub fn spacing(self, before_pt: f32, after_pt: f32) -> Self {
        self.spacing_before(before_pt).spacing_after(after_pt)
    }

    pub fn outline_level(mut self, level: u8) -> Self {
        self.paragraph.outline_level = Some(level);
        self
    }
}

/// A named style. `based_on` links form an acyclic chain ending at a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    pub id: String,
    /// Display name, passed through to packaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    /// Style the editor should switch to after this paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(flatten)]
    pub props: StyleProps,
}

impl StyleDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            based_on: None,
            next: None,
            props: StyleProps::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn based_on(mut self, parent: impl Into<String>) -> Self {
        self.based_on = Some(parent.into());
        self
    }

    pub fn next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn with(mut self, props: StyleProps) -> Self {
        self.props.layer(&props);
        self
    }
}

// ---------------------------------------------------------------------------
// Resolved properties
// ---------------------------------------------------------------------------

/// Fully resolved character properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveRun {
    pub font: String,
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Color,
}

/// Fully resolved paragraph properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveParagraph {
    pub alignment: Alignment,
    pub spacing_before_pt: f32,
    pub spacing_after_pt: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_level: Option<u8>,
}

/// Style with no unresolved references left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStyle {
    pub run: EffectiveRun,
    pub paragraph: EffectiveParagraph,
}

// ---------------------------------------------------------------------------
// Registry (write phase)
// ---------------------------------------------------------------------------

/// Style definitions under construction.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    styles: BTreeMap<String, StyleDefinition>,
    defaults: StyleProps,
}

/// JSON shape accepted by [`StyleRegistry::from_json`].
#[derive(Debug, Deserialize)]
struct StylesheetConfig {
    #[serde(default)]
    defaults: StyleProps,
    #[serde(default)]
    styles: Vec<StyleDefinition>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose document defaults sit below every named style.
    pub fn with_defaults(defaults: StyleProps) -> Self {
        Self {
            styles: BTreeMap::new(),
            defaults,
        }
    }

    /// Parse `{"defaults": {...}, "styles": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StylesheetConfig = serde_json::from_str(json)?;
        let mut registry = Self::with_defaults(config.defaults);
        registry.register_all(config.styles)?;
        Ok(registry)
    }

    pub fn defaults(&self) -> &StyleProps {
        &self.defaults
    }

    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.styles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Add a style. On error the registry is left unchanged.
    ///
    /// `based_on` may name a style that is registered later; dangling links
    /// are reported by [`StyleRegistry::freeze`].
    pub fn register(&mut self, style: StyleDefinition) -> Result<()> {
        if self.styles.contains_key(&style.id) {
            return Err(Error::DuplicateStyle(style.id));
        }
        self.check_cycle(&style)?;
        log::debug!(
            "registered style '{}' (based on {:?})",
            style.id,
            style.based_on
        );
        self.styles.insert(style.id.clone(), style);
        Ok(())
    }

    /// Register several styles; either all of them land or none do.
    pub fn register_all(
        &mut self,
        styles: impl IntoIterator<Item = StyleDefinition>,
    ) -> Result<()> {
        let mut scratch = self.clone();
        for style in styles {
            scratch.register(style)?;
        }
        *self = scratch;
        Ok(())
    }

    // The registered set is acyclic, so a new cycle has to pass through the
    // incoming style.
    fn check_cycle(&self, style: &StyleDefinition) -> Result<()> {
        let mut chain = vec![style.id.clone()];
        let mut seen: HashSet<&str> = HashSet::from([style.id.as_str()]);
        let mut next = style.based_on.as_deref();
        while let Some(parent) = next {
            chain.push(parent.to_string());
            if !seen.insert(parent) {
                return Err(Error::CyclicInheritance {
                    id: style.id.clone(),
                    chain,
                });
            }
            next = self.styles.get(parent).and_then(|s| s.based_on.as_deref());
        }
        Ok(())
    }

    /// Merge the chain ending at `id`, root first.
    fn merge_chain(&self, id: &str) -> Result<StyleProps> {
        let mut chain: Vec<&StyleDefinition> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !seen.insert(cur) {
                let mut ids: Vec<String> = chain.iter().map(|s| s.id.clone()).collect();
                ids.push(cur.to_string());
                return Err(Error::CyclicInheritance {
                    id: id.to_string(),
                    chain: ids,
                });
            }
            let def = self
                .styles
                .get(cur)
                .ok_or_else(|| Error::UnknownStyle(cur.to_string()))?;
            chain.push(def);
            current = def.based_on.as_deref();
        }

        let mut merged = StyleProps::default();
        for def in chain.iter().rev() {
            merged.layer(&def.props);
        }
        Ok(merged)
    }

    /// Close the registry for mutation.
    ///
    /// Every chain is merged once and every style is resolved once against
    /// `theme`, so dangling parents and unknown roles surface here rather
    /// than halfway through a document.
    pub fn freeze(self, theme: &Theme) -> Result<StyleResolver<'_>> {
        let mut chains = HashMap::with_capacity(self.styles.len());
        for id in self.styles.keys() {
            chains.insert(id.clone(), self.merge_chain(id)?);
        }

        let resolver = StyleResolver {
            theme,
            defaults: self.defaults,
            chains,
            definitions: self.styles,
        };

        resolver.finish(&StyleProps::default())?;
        for id in resolver.definitions.keys() {
            resolver.resolve(id, &StyleProps::default())?;
        }

        log::info!(
            "style registry frozen: {} styles against theme '{}'",
            resolver.definitions.len(),
            theme.name()
        );
        Ok(resolver)
    }
}

// ---------------------------------------------------------------------------
// Resolver (read phase)
// ---------------------------------------------------------------------------

/// Frozen registry bound to a theme. Holds each style's merged chain.
///
/// Resolution has no side effects; the same arguments always produce the
/// same [`EffectiveStyle`].
#[derive(Debug, Clone)]
pub struct StyleResolver<'t> {
    theme: &'t Theme,
    defaults: StyleProps,
    chains: HashMap<String, StyleProps>,
    definitions: BTreeMap<String, StyleDefinition>,
}

impl<'t> StyleResolver<'t> {
    pub fn theme(&self) -> &'t Theme {
        self.theme
    }

    pub fn definition(&self, id: &str) -> Option<&StyleDefinition> {
        self.definitions.get(id)
    }

    /// Definitions in id order.
    pub fn definitions(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.definitions.values()
    }

    /// Declared properties of `style_id`'s chain with `overrides` on top.
    /// Document defaults and base values are not included.
    pub fn cascade(&self, style_id: Option<&str>, overrides: &StyleProps) -> Result<StyleProps> {
        let mut props = match style_id {
            Some(id) => self
                .chains
                .get(id)
                .cloned()
                .ok_or_else(|| Error::UnknownStyle(id.to_string()))?,
            None => StyleProps::default(),
        };
        props.layer(overrides);
        Ok(props)
    }

    /// Fill every unset property from document defaults and base values and
    /// resolve theme roles.
    pub fn finish(&self, cascaded: &StyleProps) -> Result<EffectiveStyle> {
        let mut props = self.defaults.clone();
        props.layer(cascaded);

        let run = &props.run;
        let font = match &run.font {
            Some(f) => f.resolve(self.theme)?,
            None => self.theme.font(BASE_FONT_ROLE)?.to_string(),
        };
        let color = match &run.color {
            Some(c) => c.resolve(self.theme)?,
            None => self.theme.color(BASE_COLOR_ROLE)?,
        };

        let para = &props.paragraph;
        Ok(EffectiveStyle {
            run: EffectiveRun {
                font,
                size_pt: run.size_pt.unwrap_or(BASE_SIZE_PT),
                bold: run.bold.unwrap_or(false),
                italic: run.italic.unwrap_or(false),
                underline: run.underline.unwrap_or(false),
                color,
            },
            paragraph: EffectiveParagraph {
                alignment: para.alignment.unwrap_or_default(),
                spacing_before_pt: para.spacing_before_pt.unwrap_or(0.0),
                spacing_after_pt: para.spacing_after_pt.unwrap_or(0.0),
                outline_level: para.outline_level,
            },
        })
    }

    /// Resolve a named style with local overrides.
    pub fn resolve(&self, style_id: &str, overrides: &StyleProps) -> Result<EffectiveStyle> {
        self.finish(&self.cascade(Some(style_id), overrides)?)
    }

    /// Resolve a run inside a paragraph whose cascade is `paragraph`.
    pub fn resolve_run(
        &self,
        paragraph: &StyleProps,
        run_style: Option<&str>,
        run_overrides: &StyleProps,
    ) -> Result<EffectiveStyle> {
        let mut props = paragraph.clone();
        props.layer(&self.cascade(run_style, run_overrides)?);
        self.finish(&props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StyleRegistry {
        let mut r = StyleRegistry::with_defaults(StyleProps::new().font_role("serif").size(12.0));
        r.register(StyleDefinition::new("Normal").with(StyleProps::new().spacing(0.0, 6.0)))
            .unwrap();
        r.register(
            StyleDefinition::new("Heading1")
                .based_on("Normal")
                .next("Normal")
                .with(
                    StyleProps::new()
                        .size(16.0)
                        .bold(true)
                        .align(Alignment::Center)
                        .outline_level(0),
                ),
        )
        .unwrap();
        r.register(
            StyleDefinition::new("Chapter")
                .based_on("Heading1")
                .with(StyleProps::new().color_role("primary")),
        )
        .unwrap();
        r
    }

    #[test]
    fn nearest_set_value_wins() {
        let theme = Theme::cloudscript();
        let resolver = registry().freeze(&theme).unwrap();
        let s = resolver.resolve("Chapter", &StyleProps::default()).unwrap();
        assert_eq!(s.run.font, "Times New Roman");
        assert_eq!(s.run.size_pt, 16.0);
        assert!(s.run.bold);
        assert_eq!(s.run.color.to_hex(), "#028090");
        assert_eq!(s.paragraph.alignment, Alignment::Center);
        assert_eq!(s.paragraph.spacing_after_pt, 6.0);
        assert_eq!(s.paragraph.outline_level, Some(0));
    }

    #[test]
    fn local_override_beats_style() {
        let theme = Theme::cloudscript();
        let resolver = registry().freeze(&theme).unwrap();
        let s = resolver
            .resolve("Heading1", &StyleProps::new().bold(false))
            .unwrap();
        assert!(!s.run.bold);
        assert_eq!(s.run.size_pt, 16.0);
    }

    #[test]
    fn resolution_is_deterministic() {
        let theme = Theme::cloudscript();
        let resolver = registry().freeze(&theme).unwrap();
        let overrides = StyleProps::new().italic(true).spacing_before(12.0);
        let a = resolver.resolve("Chapter", &overrides).unwrap();
        let b = resolver.resolve("Chapter", &overrides).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn base_values_come_from_theme() {
        let theme = Theme::cloudscript();
        let resolver = StyleRegistry::new().freeze(&theme).unwrap();
        let s = resolver.finish(&StyleProps::default()).unwrap();
        assert_eq!(s.run.font, "Arial");
        assert_eq!(s.run.color.to_hex(), "#2C3E50");
        assert_eq!(s.run.size_pt, BASE_SIZE_PT);
        assert_eq!(s.paragraph.alignment, Alignment::Left);
    }

    #[test]
    fn two_style_cycle_is_rejected() {
        let mut r = StyleRegistry::new();
        r.register(StyleDefinition::new("A").based_on("B")).unwrap();
        match r.register(StyleDefinition::new("B").based_on("A")) {
            Err(Error::CyclicInheritance { id, chain }) => {
                assert_eq!(id, "B");
                assert_eq!(chain, vec!["B", "A", "B"]);
            }
            other => panic!("expected CyclicInheritance, got {other:?}"),
        }
        assert!(!r.contains("B"));
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut r = StyleRegistry::new();
        let err = r
            .register(StyleDefinition::new("Loop").based_on("Loop"))
            .unwrap_err();
        assert!(matches!(err, Error::CyclicInheritance { .. }));
        assert!(r.is_empty());
    }

    #[test]
    fn duplicate_leaves_registry_unchanged() {
        let mut r = registry();
        let before = r.get("Normal").cloned();
        let err = r
            .register(StyleDefinition::new("Normal").with(StyleProps::new().bold(true)))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateStyle(id) if id == "Normal"));
        assert_eq!(r.get("Normal").cloned(), before);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn register_all_is_atomic() {
        let mut r = registry();
        let err = r
            .register_all(vec![
                StyleDefinition::new("Quote"),
                StyleDefinition::new("Normal"),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateStyle(_)));
        assert!(!r.contains("Quote"));
    }

    #[test]
    fn unknown_style_id() {
        let theme = Theme::cloudscript();
        let resolver = registry().freeze(&theme).unwrap();
        let err = resolver.resolve("Nope", &StyleProps::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(id) if id == "Nope"));
    }

    #[test]
    fn dangling_parent_fails_at_freeze() {
        let theme = Theme::cloudscript();
        let mut r = StyleRegistry::new();
        r.register(StyleDefinition::new("Orphan").based_on("Missing"))
            .unwrap();
        let err = r.freeze(&theme).unwrap_err();
        assert!(matches!(err, Error::UnknownStyle(id) if id == "Missing"));
    }

    #[test]
    fn unknown_role_fails_at_freeze() {
        let theme = Theme::cloudscript();
        let mut r = StyleRegistry::new();
        r.register(StyleDefinition::new("Neon").with(StyleProps::new().color_role("neon")))
            .unwrap();
        let err = r.freeze(&theme).unwrap_err();
        assert!(matches!(err, Error::UnknownRole(role) if role == "neon"));
    }

    #[test]
    fn run_layers_over_paragraph() {
        let theme = Theme::cloudscript();
        let mut r = registry();
        r.register(StyleDefinition::new("Code").with(StyleProps::new().font_role("mono")))
            .unwrap();
        let resolver = r.freeze(&theme).unwrap();
        let para = resolver.cascade(Some("Heading1"), &StyleProps::default()).unwrap();
        let run = resolver
            .resolve_run(&para, Some("Code"), &StyleProps::new().italic(true))
            .unwrap();
        assert_eq!(run.run.font, "Courier New");
        assert!(run.run.bold);
        assert!(run.run.italic);
        assert_eq!(run.run.size_pt, 16.0);
    }

    #[test]
    fn stylesheet_from_json() {
        let json = r#"{
            "defaults": {"run": {"font": {"role": "serif"}}},
            "styles": [
                {"id": "Normal"},
                {"id": "Heading1", "based_on": "Normal",
                 "run": {"size_pt": 16.0, "bold": true},
                 "paragraph": {"outline_level": 0}}
            ]
        }"#;
        let r = StyleRegistry::from_json(json).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("Heading1").unwrap().props.run.bold, Some(true));
        assert_eq!(
            r.defaults().run.font,
            Some(FontValue::Role("serif".to_string()))
        );
    }
}
