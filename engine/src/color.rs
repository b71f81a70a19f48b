//! Hex / RGB / HSL conversion and the fixed derivation formulas used to
//! compute the non-authored roles of a variant.
//!
//! Hue is expressed in degrees `[0, 360)`, saturation and lightness in
//! percent `[0, 100]`. The conversion follows the HLS model, with hue kept as
//! a fraction of a turn internally and scaled at the edges, so derived colors
//! are stable across runs down to the last rounded channel.

use crate::errors::{EngineError, EngineResult};

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRD: f64 = 2.0 / 3.0;

/// An 8-bit RGB triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A color in hue/saturation/lightness form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Degrees, `[0, 360)`
    pub hue: f64,
    /// Percent, `[0, 100]`
    pub saturation: f64,
    /// Percent, `[0, 100]`
    pub lightness: f64,
}

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb` (any case).
    pub fn from_hex(hex: &str) -> EngineResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 {
            return Err(EngineError::invalid_hex(hex, "expected 6 hex digits"));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EngineError::invalid_hex(hex, "contains non-hex characters"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| EngineError::invalid_hex(hex, &e.to_string()))
        };

        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let lightness = sum / 2.0;

        if min == max {
            return Hsl::new(0.0, 0.0, lightness * 100.0);
        }

        let saturation = if lightness <= 0.5 {
            range / sum
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let hue = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        let hue = (hue / 6.0).rem_euclid(1.0);

        Hsl::new(hue * 360.0, saturation * 100.0, lightness * 100.0)
    }
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn with_lightness(self, lightness: f64) -> Self {
        Self { lightness, ..self }
    }

    pub fn with_saturation(self, saturation: f64) -> Self {
        Self { saturation, ..self }
    }

    pub fn to_hex(self) -> String {
        let h = self.hue / 360.0;
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - (l * s) };
            let m1 = 2.0 * l - m2;
            (
                hue_to_channel(m1, m2, h + ONE_THIRD),
                hue_to_channel(m1, m2, h),
                hue_to_channel(m1, m2, h - ONE_THIRD),
            )
        };

        rgb_to_hex(r * 255.0, g * 255.0, b * 255.0)
    }
}

fn hue_to_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        return m1 + (m2 - m1) * hue * 6.0;
    }
    if hue < 0.5 {
        return m2;
    }
    if hue < TWO_THIRD {
        return m1 + (m2 - m1) * (TWO_THIRD - hue) * 6.0;
    }
    m1
}

/// Round half to even, then clamp into a byte.
fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

pub fn hex_to_rgb(hex: &str) -> EngineResult<Rgb> {
    Rgb::from_hex(hex)
}

/// Lowercase `#rrggbb` from fractional channels in `[0, 255]`.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb(to_channel(r), to_channel(g), to_channel(b)).to_hex()
}

pub fn hex_to_hsl(hex: &str) -> EngineResult<Hsl> {
    Ok(Rgb::from_hex(hex)?.to_hsl())
}

pub fn hsl_to_hex(hsl: Hsl) -> String {
    hsl.to_hex()
}

/// Keep hue and saturation, replace lightness with `target`.
pub fn set_lightness(hex: &str, target: f64) -> EngineResult<String> {
    Ok(hex_to_hsl(hex)?.with_lightness(target).to_hex())
}

/// Main foreground: a faint tint of the editor background at lightness 72.
pub fn derive_foreground_main(editor_bg: &str) -> EngineResult<String> {
    let hsl = hex_to_hsl(editor_bg)?;
    Ok(hsl
        .with_saturation((hsl.saturation * 0.20).max(8.0))
        .with_lightness(72.0)
        .to_hex())
}

/// Bright foreground: slightly more saturated than the main one, lightness 87.
pub fn derive_foreground_bright(editor_bg: &str) -> EngineResult<String> {
    let hsl = hex_to_hsl(editor_bg)?;
    Ok(hsl
        .with_saturation((hsl.saturation * 0.35).max(12.0))
        .with_lightness(87.0)
        .to_hex())
}

/// Shadow: half the saturation of the deep background, four points darker.
pub fn derive_shadow(deep_bg: &str) -> EngineResult<String> {
    let hsl = hex_to_hsl(deep_bg)?;
    Ok(hsl
        .with_saturation(hsl.saturation * 0.5)
        .with_lightness((hsl.lightness - 4.0).max(0.0))
        .to_hex())
}

pub fn derive_ansi_dim(editor_bg: &str) -> EngineResult<String> {
    let hsl = hex_to_hsl(editor_bg)?;
    Ok(hsl
        .with_saturation((hsl.saturation * 0.25).max(8.0))
        .with_lightness(28.0)
        .to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[test]
    fn test_hex_parsing() {
        assert_eq!(assert_ok!(hex_to_rgb("#582F0E")), Rgb(0x58, 0x2f, 0x0e));
        assert_eq!(assert_ok!(hex_to_rgb("ff4c5a")), Rgb(255, 76, 90));

        assert_err!(hex_to_rgb("#fff"));
        assert_err!(hex_to_rgb("#12345g"));
        assert_err!(hex_to_rgb("#ééé"));
        assert_err!(hex_to_rgb(""));
    }

    #[test]
    fn test_rgb_to_hex_rounds_half_to_even() {
        assert_eq!(rgb_to_hex(0.5, 1.5, 2.5), "#000202");
        assert_eq!(rgb_to_hex(254.6, -0.3, 300.0), "#ff00ff");
    }

    #[test]
    fn test_hex_to_hsl_primaries() {
        assert_eq!(assert_ok!(hex_to_hsl("#ff0000")), Hsl::new(0.0, 100.0, 50.0));
        assert_eq!(assert_ok!(hex_to_hsl("#00ff00")), Hsl::new(120.0, 100.0, 50.0));
        assert_eq!(assert_ok!(hex_to_hsl("#0000ff")), Hsl::new(240.0, 100.0, 50.0));

        let gray = assert_ok!(hex_to_hsl("#808080"));
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.lightness - 50.196).abs() < 0.001);
    }

    #[test]
    fn test_hsl_to_hex() {
        assert_eq!(hsl_to_hex(Hsl::new(210.0, 50.0, 50.0)), "#407fbf");
        assert_eq!(hsl_to_hex(Hsl::new(0.0, 0.0, 100.0)), "#ffffff");
        assert_eq!(hsl_to_hex(Hsl::new(0.0, 0.0, 0.0)), "#000000");
    }

    #[test]
    fn test_set_lightness() {
        assert_eq!(assert_ok!(set_lightness("#582F0E", 12.0)), "#351c08");
        assert_eq!(assert_ok!(set_lightness("#432818", 10.0)), "#26160d");
        assert_eq!(assert_ok!(set_lightness("#7F4F24", 14.0)), "#382310");
    }

    #[test]
    fn test_derivations_from_orange_backgrounds() {
        assert_eq!(assert_ok!(derive_foreground_main("#351c08")), "#c2b6ad");
        assert_eq!(assert_ok!(derive_foreground_bright("#351c08")), "#e6ddd5");
        assert_eq!(assert_ok!(derive_ansi_dim("#351c08")), "#55463a");
        assert_eq!(assert_ok!(derive_shadow("#26160d")), "#130e0c");
    }

    #[test]
    fn test_shadow_lightness_floors_at_zero() {
        assert_eq!(assert_ok!(derive_shadow("#000000")), "#000000");
        assert_eq!(assert_ok!(derive_shadow("#050505")), "#000000");
    }

    #[test]
    fn test_derivations_reject_bad_input() {
        assert_err!(derive_foreground_main("not-a-color"));
        assert_err!(derive_shadow("#12"));
    }
}
