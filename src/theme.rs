//! Theme provider – a closed mapping from semantic role names to concrete
//! colours and font faces.
//!
//! A theme is assembled with [`ThemeBuilder`] (or taken from a preset) and is
//! immutable afterwards. Styles and card templates refer to roles through
//! [`ColorValue`] / [`FontValue`]; they never embed literal values unless the
//! caller asks for one explicitly.
//!
//! # Example
//!
//! ```rust
//! use doc_forge::theme::{Theme, ThemeValue};
//!
//! let theme = Theme::cloudscript();
//! let primary = theme.color("primary").unwrap();
//! assert_eq!(primary.to_hex(), "#028090");
//! assert!(matches!(theme.lookup("mono").unwrap(), ThemeValue::Font(_)));
//! assert!(theme.lookup("sparkle").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// RGBA colour (0.0 – 1.0). Serialised as `#RRGGBB`, or `#RRGGBBAA` when
/// translucent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        if hex.len() == 6 || hex.len() == 8 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
            let a = match hex.get(6..8) {
                Some(a) => u8::from_str_radix(a, 16).ok()? as f32 / 255.0,
                None => 1.0,
            };
            Some(Self { r, g, b, a })
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()? as f32 / 255.0;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()? as f32 / 255.0;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()? as f32 / 255.0;
            Some(Self { r, g, b, a: 1.0 })
        } else {
            None
        }
    }

    /// `#RRGGBB`, upper case. Alpha is not encoded.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// `#RRGGBBAA`, upper case.
    pub fn to_hex_alpha(&self) -> String {
        format!("{}{:02X}", self.to_hex(), channel(self.a))
    }

    pub fn is_opaque(&self) -> bool {
        channel(self.a) == 255
    }
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex colour '{value}'"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        if color.is_opaque() {
            color.to_hex()
        } else {
            color.to_hex_alpha()
        }
    }
}

// ---------------------------------------------------------------------------
// Role references
// ---------------------------------------------------------------------------

/// A colour given either as a theme role or as a literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorValue {
    Role(String),
    Literal(Color),
}

impl ColorValue {
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role(role.into())
    }

    pub fn resolve(&self, theme: &Theme) -> Result<Color> {
        match self {
            Self::Role(role) => theme.color(role),
            Self::Literal(c) => Ok(*c),
        }
    }
}

impl From<Color> for ColorValue {
    fn from(color: Color) -> Self {
        Self::Literal(color)
    }
}

/// A font face given either as a theme role or as a literal face name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontValue {
    Role(String),
    Face(String),
}

impl FontValue {
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role(role.into())
    }

    pub fn resolve(&self, theme: &Theme) -> Result<String> {
        match self {
            Self::Role(role) => theme.font(role).map(str::to_string),
            Self::Face(face) => Ok(face.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Value bound to a theme role.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    Color(Color),
    Font(String),
}

/// Finalised theme. There are no mutators; build a new one to change it.
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    name: String,
    colors: BTreeMap<String, Color>,
    fonts: BTreeMap<String, String>,
}

impl Theme {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a role in the closed role set.
    pub fn lookup(&self, role: &str) -> Result<ThemeValue> {
        if let Some(c) = self.colors.get(role) {
            return Ok(ThemeValue::Color(*c));
        }
        if let Some(f) = self.fonts.get(role) {
            return Ok(ThemeValue::Font(f.clone()));
        }
        Err(Error::UnknownRole(role.to_string()))
    }

    pub fn color(&self, role: &str) -> Result<Color> {
        self.colors
            .get(role)
            .copied()
            .ok_or_else(|| Error::UnknownRole(role.to_string()))
    }

    pub fn font(&self, role: &str) -> Result<&str> {
        self.fonts
            .get(role)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownRole(role.to_string()))
    }

    /// All role names, colours first, each group sorted.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.colors
            .keys()
            .chain(self.fonts.keys())
            .map(String::as_str)
    }

    /// Parse and validate a theme from JSON:
    /// `{"name": "...", "colors": {"primary": "#028090"}, "fonts": {"body": "Arial"}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let builder: ThemeBuilder = serde_json::from_str(json)?;
        builder.build()
    }

    /// "Teal Trust" – the professional cloud palette of the CloudScript deck.
    pub fn cloudscript() -> Self {
        let colors = [
            ("primary", "028090"),
            ("secondary", "00A896"),
            ("accent", "02C39A"),
            ("dark", "065A82"),
            ("white", "FFFFFF"),
            ("background", "F5F9FC"),
            ("text", "2C3E50"),
            ("muted", "7F8C8D"),
            ("success", "27AE60"),
            ("code_background", "1E1E1E"),
            ("code_text", "00FF00"),
            ("ink", "000000"),
        ];
        let fonts = [
            ("heading", "Arial Black"),
            ("body", "Arial"),
            ("mono", "Courier New"),
            ("serif", "Times New Roman"),
        ];
        Self::from_tables("cloudscript", &colors, &fonts)
    }

    /// Greyscale palette for printed output. Same role set as
    /// [`Theme::cloudscript`], so either can drive the sample templates.
    pub fn print() -> Self {
        let colors = [
            ("primary", "333333"),
            ("secondary", "555555"),
            ("accent", "777777"),
            ("dark", "111111"),
            ("white", "FFFFFF"),
            ("background", "F2F2F2"),
            ("text", "000000"),
            ("muted", "666666"),
            ("success", "222222"),
            ("code_background", "FFFFFF"),
            ("code_text", "000000"),
            ("ink", "000000"),
        ];
        let fonts = [
            ("heading", "Times New Roman"),
            ("body", "Times New Roman"),
            ("mono", "Courier New"),
            ("serif", "Times New Roman"),
        ];
        Self::from_tables("print", &colors, &fonts)
    }

    // Preset tables are static and known to be valid hex.
    fn from_tables(name: &str, colors: &[(&str, &str)], fonts: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            colors: colors
                .iter()
                .filter_map(|(role, hex)| Color::from_hex(hex).map(|c| (role.to_string(), c)))
                .collect(),
            fonts: fonts
                .iter()
                .map(|(role, face)| (role.to_string(), face.to_string()))
                .collect(),
        }
    }
}

/// Look up a built-in theme by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "cloudscript" | "teal" => Some(Theme::cloudscript()),
        "print" => Some(Theme::print()),
        _ => None,
    }
}

/// Write phase of a theme. `build()` validates and freezes it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeBuilder {
    #[serde(default)]
    name: String,
    #[serde(default)]
    colors: BTreeMap<String, Color>,
    #[serde(default)]
    fonts: BTreeMap<String, String>,
}

impl ThemeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, role: impl Into<String>, color: Color) -> Self {
        self.colors.insert(role.into(), color);
        self
    }

    pub fn font(mut self, role: impl Into<String>, face: impl Into<String>) -> Self {
        self.fonts.insert(role.into(), face.into());
        self
    }

    pub fn build(self) -> Result<Theme> {
        for role in self.colors.keys().chain(self.fonts.keys()) {
            if role.trim().is_empty() {
                return Err(Error::InvalidTheme("empty role name".to_string()));
            }
        }
        if let Some(role) = self.colors.keys().find(|r| self.fonts.contains_key(*r)) {
            return Err(Error::InvalidTheme(format!(
                "role '{role}' is bound to both a colour and a font"
            )));
        }
        if let Some((role, _)) = self.fonts.iter().find(|(_, face)| face.trim().is_empty()) {
            return Err(Error::InvalidTheme(format!("font role '{role}' has an empty face")));
        }
        log::debug!(
            "theme '{}' frozen with {} colour and {} font roles",
            self.name,
            self.colors.len(),
            self.fonts.len()
        );
        Ok(Theme {
            name: self.name,
            colors: self.colors,
            fonts: self.fonts,
        })
    }
}
