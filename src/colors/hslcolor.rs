//! This module implements HSL, a cylindrical transform of RGB into hue, saturation, and lightness.
//! HSL "lightness" is just the midpoint of the largest and smallest channel, so a fully saturated
//! yellow and blue have the same lightness despite looking nothing alike in brightness. For
//! perceptual work, CIELCH is the better choice; HSL is here because people type colors in it.

use super::hsvcolor::rgb_hue;
use super::{check_values, normalize_hue, ColorSpace, ColorType, RGBColor, RGBProfile};
use crate::error::Result;

/// An HSL color, defining parameters for hue, saturation, and lightness from an RGB space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HSLColor {
    /// The hue, an angle in degrees between 0 and 360.
    pub h: f64,
    /// The saturation, between 0 (gray) and 1.
    pub s: f64,
    /// The lightness, between 0 (black) and 1 (white).
    pub l: f64,
}

impl HSLColor {
    /// Makes a new HSL color.
    pub fn new(h: f64, s: f64, l: f64) -> HSLColor {
        HSLColor { h, s, l }
    }

    /// Converts from RGB. The profile is not part of the HSL coordinates.
    pub fn from_rgb(rgb: &RGBColor) -> HSLColor {
        let max = rgb.r.max(rgb.g).max(rgb.b);
        let min = rgb.r.min(rgb.g).min(rgb.b);
        let chroma = max - min;
        let l = (max + min) / 2.0;
        let s = if chroma == 0.0 {
            0.0
        } else if l <= 0.5 {
            chroma / (2.0 * l)
        } else {
            chroma / (2.0 - 2.0 * l)
        };
        HSLColor {
            h: rgb_hue(rgb.r, rgb.g, rgb.b, max, min),
            s,
            l,
        }
    }

    /// Converts back to RGB in the given profile.
    pub fn to_rgb(&self, profile: RGBProfile) -> RGBColor {
        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;
        let h = normalize_hue(self.h) / 360.0;

        let component = |t: f64| {
            let t = if t < 0.0 {
                t + 1.0
            } else if t > 1.0 {
                t - 1.0
            } else {
                t
            };
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * 6.0 * (2.0 / 3.0 - t)
            } else {
                p
            }
        };
        RGBColor {
            r: component(h + 1.0 / 3.0),
            g: component(h),
            b: component(h - 1.0 / 3.0),
            profile,
        }
    }
}

impl ColorType for HSLColor {
    const SPACE: ColorSpace = ColorSpace::HSL;

    fn values(&self) -> Vec<f64> {
        vec![self.h, self.s, self.l]
    }

    fn from_values(values: &[f64]) -> Result<HSLColor> {
        check_values(Self::SPACE, values)?;
        Ok(HSLColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn assert_hsl(hsl: HSLColor, expected: (f64, f64, f64)) {
        assert!((hsl.h - expected.0).abs() <= 1e-3, "{:?}", hsl);
        assert!((hsl.s - expected.1).abs() <= 1e-3, "{:?}", hsl);
        assert!((hsl.l - expected.2).abs() <= 1e-3, "{:?}", hsl);
    }

    #[test]
    fn test_rgb_to_hsl() {
        assert_hsl(
            HSLColor::from_rgb(&RGBColor::new_upscaled(255, 123, 50)),
            (21.366, 1.0, 0.598),
        );
        assert_hsl(
            HSLColor::from_rgb(&RGBColor::new_upscaled(123, 255, 50)),
            (98.634, 1.0, 0.598),
        );
        assert_hsl(
            HSLColor::from_rgb(&RGBColor::new(0.482, 0.482, 1.0)),
            (240.0, 1.0, 0.741),
        );
        assert_hsl(
            HSLColor::from_rgb(&RGBColor::new(0.482, 0.482, 0.482)),
            (0.0, 0.0, 0.482),
        );
    }

    #[test]
    fn test_hsl_to_rgb() {
        let rgb = HSLColor::new(200.0, 0.4, 0.5).to_rgb(RGBProfile::SRGB);
        assert!((rgb.r - 0.3).abs() <= 1e-3);
        assert!((rgb.g - 0.567).abs() <= 1e-3);
        assert!((rgb.b - 0.7).abs() <= 1e-3);
    }

    #[test]
    fn test_hsl_rgb_round_trip() {
        let colors = [(0.9, 0.3, 0.1), (0.1, 0.7, 0.3), (0.5, 0.1, 0.8), (0.2, 0.2, 0.9)];
        for &(r, g, b) in colors.iter() {
            let rgb = RGBColor::new(r, g, b);
            let back = HSLColor::from_rgb(&rgb).to_rgb(RGBProfile::SRGB);
            assert!((rgb.r - back.r).abs() <= 1e-10, "{:?}", back);
            assert!((rgb.g - back.g).abs() <= 1e-10, "{:?}", back);
            assert!((rgb.b - back.b).abs() <= 1e-10, "{:?}", back);
        }
    }
}
