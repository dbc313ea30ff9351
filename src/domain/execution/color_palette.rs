//! Color palette: derive lighter, darker, complementary and triad variants.

use serde_json::json;
use std::fmt;

use super::{ComputationError, ExecutionInput, ToolOutcome};

const SHIFT: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb`, `rrggbb` or the `#rgb` shorthand, any case.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    pub fn lighter(self) -> Self {
        self.map(|c| c.saturating_add(SHIFT))
    }

    pub fn darker(self) -> Self {
        self.map(|c| c.saturating_sub(SHIFT))
    }

    pub fn complement(self) -> Self {
        self.map(|c| 255 - c)
    }

    /// (g, b, r)
    pub fn triad1(self) -> Self {
        Self {
            r: self.g,
            g: self.b,
            b: self.r,
        }
    }

    /// (b, r, g)
    pub fn triad2(self) -> Self {
        Self {
            r: self.b,
            g: self.r,
            b: self.g,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub fn execute(input: &ExecutionInput<'_>) -> ToolOutcome {
    let base = input.str_param("base_color")?.unwrap_or("");
    let rgb = Rgb::parse_hex(base).ok_or_else(|| {
        ComputationError::new("Invalid hex color. Use the #RRGGBB format.").with("base_color", base)
    })?;

    Ok(json!({
        "palette": {
            "primary": base,
            "lighter": rgb.lighter().to_string(),
            "darker": rgb.darker().to_string(),
            "complement": rgb.complement().to_string(),
            "triad1": rgb.triad1().to_string(),
            "triad2": rgb.triad2().to_string(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::playground::ToolSettings;
    use proptest::prelude::*;
    use serde_json::Value;

    fn run(params: Value) -> ToolOutcome {
        let settings = ToolSettings::default();
        execute(&ExecutionInput::new(&params, &settings))
    }

    #[test]
    fn red_palette() {
        let result = run(json!({"base_color": "#FF0000"})).unwrap();
        let palette = &result["palette"];
        assert_eq!(palette["primary"], "#FF0000");
        assert_eq!(palette["lighter"], "#ff2828");
        assert_eq!(palette["darker"], "#d70000");
        assert_eq!(palette["complement"], "#00ffff");
        assert_eq!(palette["triad1"], "#0000ff");
        assert_eq!(palette["triad2"], "#00ff00");
    }

    #[test]
    fn channels_are_zero_padded() {
        let rgb = Rgb::parse_hex("#010203").unwrap();
        assert_eq!(rgb.to_string(), "#010203");
        assert_eq!(rgb.darker().to_string(), "#000000");
    }

    #[test]
    fn accepts_shorthand_and_missing_hash() {
        assert_eq!(Rgb::parse_hex("f00"), Rgb::parse_hex("#FF0000"));
        assert_eq!(Rgb::parse_hex("00ff00"), Some(Rgb { r: 0, g: 255, b: 0 }));
    }

    #[test]
    fn rejects_invalid_colors() {
        for bad in ["", "#GG0000", "#12345", "red", "#ff00000"] {
            assert!(Rgb::parse_hex(bad).is_none(), "{bad:?} should be rejected");
        }
        let body = run(json!({"base_color": "blue"})).unwrap_err().into_value();
        assert!(body["error"].is_string());
    }

    proptest! {
        #[test]
        fn variants_stay_within_channel_bounds(r: u8, g: u8, b: u8) {
            let rgb = Rgb { r, g, b };
            prop_assert!(rgb.lighter().r >= r);
            prop_assert!(rgb.darker().g <= g);
            prop_assert_eq!(rgb.complement().complement(), rgb);
            prop_assert_eq!(rgb.triad1().triad2(), rgb);
            prop_assert_eq!(Rgb::parse_hex(&rgb.to_string()), Some(rgb));
        }
    }
}
