//! Text component.

use super::SceneBase;
use crate::color::RgbaColor;
use crate::error::{SceneError, SceneResult};
use serde::{Deserialize, Serialize};

/// Default font size for new text components.
pub const DEFAULT_FONT_SIZE: f64 = 48.0;

/// Default font family for new text components.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignVertical {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// Apply the transform to a string.
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for c in text.chars() {
                    if at_word_start && c.is_alphabetic() {
                        out.extend(c.to_uppercase());
                    } else {
                        out.push(c);
                    }
                    at_word_start = c.is_whitespace();
                }
                out
            }
        }
    }
}

/// A block of styled text placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneText {
    #[serde(flatten)]
    pub base: SceneBase,
    pub text: String,
    /// Font size in canvas pixels.
    pub font_size: f64,
    pub font_family: String,
    pub color: RgbaColor,
    pub background_color: RgbaColor,
    #[serde(default)]
    pub text_align: TextAlign,
    #[serde(default)]
    pub text_align_vertical: TextAlignVertical,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub text_transform: TextTransform,
}

impl SceneText {
    /// Black text on a transparent background with default font settings.
    pub fn new(base: SceneBase, text: impl Into<String>) -> Self {
        Self {
            base,
            text: text.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: RgbaColor::BLACK,
            background_color: RgbaColor::TRANSPARENT,
            text_align: TextAlign::default(),
            text_align_vertical: TextAlignVertical::default(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            text_transform: TextTransform::default(),
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    pub fn with_align(mut self, align: TextAlign, vertical: TextAlignVertical) -> Self {
        self.text_align = align;
        self.text_align_vertical = vertical;
        self
    }

    pub fn with_colors(mut self, color: RgbaColor, background_color: RgbaColor) -> Self {
        self.color = color;
        self.background_color = background_color;
        self
    }

    /// The text as it should be displayed, with `text_transform` applied.
    pub fn display_text(&self) -> String {
        self.text_transform.apply(&self.text)
    }

    pub(crate) fn validate(&self) -> SceneResult<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(SceneError::InvalidGeometry(format!(
                "component {} has font size {}",
                self.base.id, self.font_size
            )));
        }
        Ok(())
    }
}
