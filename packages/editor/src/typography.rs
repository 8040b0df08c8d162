//! # Handwriting Style
//!
//! Font and spacing settings applied to every page, and the CSS the host
//! uses to render the preview region.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const FONT_SIZE_RANGE: RangeInclusive<f64> = 12.0..=40.0;
pub const LINE_HEIGHT_RANGE: RangeInclusive<f64> = 20.0..=60.0;
pub const LETTER_SPACING_RANGE: RangeInclusive<f64> = -1.0..=5.0;
pub const WORD_SPACING_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const TOP_PADDING_RANGE: RangeInclusive<f64> = 0.0..=200.0;

pub const DEFAULT_TEXT_COLOR: &str = "#1a237e";

/// Handwriting fonts the notebook ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFamily {
    #[default]
    Daniel,
    DancingScript,
    IndieFlower,
}

impl FontFamily {
    /// CSS `font-family` value, with the cursive fallback
    pub fn css_value(&self) -> &'static str {
        match self {
            FontFamily::Daniel => "Daniel, cursive",
            FontFamily::DancingScript => "'Dancing Script', cursive",
            FontFamily::IndieFlower => "'Indie Flower', cursive",
        }
    }
}

/// Session-wide text styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_family: FontFamily,
    /// `#rrggbb`
    pub color: String,
    pub font_size: f64,
    pub line_height: f64,
    pub letter_spacing: f64,
    pub word_spacing: f64,
    pub top_padding: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: FontFamily::Daniel,
            color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: 22.0,
            line_height: 30.0,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            top_padding: 40.0,
        }
    }
}

impl TextStyle {
    /// Copy with every value pulled into its slider range
    ///
    /// Non-finite numbers fall back to the default, as does a color that is
    /// not a `#rrggbb` hex triple.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();

        Self {
            font_family: self.font_family,
            color: if is_hex_color(&self.color) {
                self.color.to_ascii_lowercase()
            } else {
                defaults.color
            },
            font_size: clamp(self.font_size, FONT_SIZE_RANGE, defaults.font_size),
            line_height: clamp(self.line_height, LINE_HEIGHT_RANGE, defaults.line_height),
            letter_spacing: clamp(
                self.letter_spacing,
                LETTER_SPACING_RANGE,
                defaults.letter_spacing,
            ),
            word_spacing: clamp(self.word_spacing, WORD_SPACING_RANGE, defaults.word_spacing),
            top_padding: clamp(self.top_padding, TOP_PADDING_RANGE, defaults.top_padding),
        }
    }

    /// Ordered `(property, value)` pairs for the preview element
    ///
    /// Values are clamped first, so out-of-range fields never reach the CSS.
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let style = self.clamped();
        vec![
            ("font-family", style.font_family.css_value().to_string()),
            ("font-size", px(style.font_size)),
            ("line-height", px(style.line_height)),
            ("letter-spacing", px(style.letter_spacing)),
            ("word-spacing", px(style.word_spacing)),
            ("padding-top", px(style.top_padding)),
            ("color", style.color),
        ]
    }

    /// Inline `style` attribute value
    pub fn to_css(&self) -> String {
        self.css_declarations()
            .into_iter()
            .map(|(property, value)| format!("{}: {};", property, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn clamp(value: f64, range: RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

/// `22.0` renders as `22px`, `1.5` as `1.5px`
fn px(value: f64) -> String {
    format!("{}px", value)
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
