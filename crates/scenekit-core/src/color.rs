//! RGBA colors used by text components.

use crate::error::SceneError;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels and a fractional alpha (0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RgbaColor {
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` value.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 1.0)
    }

    /// CSS `rgba(r, g, b, a)` notation.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// `#RRGGBB` notation (alpha dropped), as shown in the picker's text input.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as an 8-bit channel.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for RgbaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<Color> for RgbaColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a as f32 / 255.0,
        }
    }
}

impl From<RgbaColor> for Color {
    fn from(color: RgbaColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.alpha_u8())
    }
}

impl FromStr for RgbaColor {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| SceneError::InvalidColor(s.to_string()));
        }
        let lower = input.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| SceneError::InvalidColor(s.to_string()))?;
        parse_functional(args).ok_or_else(|| SceneError::InvalidColor(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<RgbaColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut digits = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(RgbaColor::new(digits.next()??, digits.next()??, digits.next()??, 1.0))
        }
        6 => Some(RgbaColor::new(channel(0)?, channel(2)?, channel(4)?, 1.0)),
        8 => Some(RgbaColor::new(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)? as f32 / 255.0,
        )),
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<RgbaColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = match parts.get(3) {
        Some(a) => a.parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?,
        None => 1.0,
    };
    Some(RgbaColor::new(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_format() {
        assert_eq!(RgbaColor::new(255, 0, 0, 1.0).to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(RgbaColor::new(10, 20, 30, 0.5).to_string(), "rgba(10, 20, 30, 0.5)");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#fff".parse::<RgbaColor>().unwrap(), RgbaColor::WHITE);
        assert_eq!("#1E90FF".parse::<RgbaColor>().unwrap(), RgbaColor::new(30, 144, 255, 1.0));
        let translucent = "#00000080".parse::<RgbaColor>().unwrap();
        assert_eq!(translucent.alpha_u8(), 128);
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(
            "rgba(30, 144, 255, 0.5)".parse::<RgbaColor>().unwrap(),
            RgbaColor::new(30, 144, 255, 0.5)
        );
        assert_eq!("rgb(1,2,3)".parse::<RgbaColor>().unwrap(), RgbaColor::new(1, 2, 3, 1.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "#12", "#GGGGGG", "rgba(1,2)", "rgba(300,0,0,1)", "rgba(0,0,0,2)", "blue"] {
            assert!(
                matches!(input.parse::<RgbaColor>(), Err(SceneError::InvalidColor(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(RgbaColor::new(30, 144, 255, 0.2).to_hex(), "#1E90FF");
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = RgbaColor::new(30, 144, 255, 1.0).into();
        let back = RgbaColor::from(color);
        assert_eq!((back.r, back.g, back.b, back.alpha_u8()), (30, 144, 255, 255));
    }
}
