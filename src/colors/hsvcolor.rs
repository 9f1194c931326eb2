//! This module implements the HSV color space, a cousin of the HSL color space. The definition of
//! value differs from lightness: it goes from black to full saturation instead of black to
//! white. This makes value an extraordinarily poor analog of luminance (dark purple is the same
//! value as white, despite reflecting one-tenth the light), but does make the hue and saturation a
//! bit more meaningful than HSL.
//!
//! HSV is a transform of companded RGB, so it inherits a profile from the RGB color it came from.
//! The conversion engine remembers that profile for the trip back.

use super::{check_values, normalize_hue, ColorSpace, ColorType, RGBColor, RGBProfile};
use crate::error::Result;

/// An HSV color, defining parameters for hue, saturation, and value from an RGB space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HSVColor {
    /// The hue, described as an angle that ranges between 0 and 360 in degrees.
    pub h: f64,
    /// The saturation, the distance between the color and the equivalent-value grayscale. Ranges
    /// between 0 and 1.
    pub s: f64,
    /// The value, defined as the largest RGB primary value of a color.
    pub v: f64,
}

/// The hexagonal hue shared by HSV and HSL. Grays get a hue of 0.
pub(crate) fn rgb_hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let chroma = max - min;
    if chroma == 0.0 {
        0.0
    } else if max == r {
        (60.0 * (g - b) / chroma + 360.0) % 360.0
    } else if max == g {
        60.0 * (b - r) / chroma + 120.0
    } else {
        60.0 * (r - g) / chroma + 240.0
    }
}

impl HSVColor {
    /// Makes a new HSV color.
    pub fn new(h: f64, s: f64, v: f64) -> HSVColor {
        HSVColor { h, s, v }
    }

    /// Converts from RGB. The profile of the RGB color is not recorded here: HSV coordinates are the
    /// same for any profile.
    pub fn from_rgb(rgb: &RGBColor) -> HSVColor {
        let max = rgb.r.max(rgb.g).max(rgb.b);
        let min = rgb.r.min(rgb.g).min(rgb.b);
        let s = if max == 0.0 { 0.0 } else { 1.0 - min / max };
        HSVColor {
            h: rgb_hue(rgb.r, rgb.g, rgb.b, max, min),
            s,
            v: max,
        }
    }

    /// Converts back to RGB in the given profile.
    pub fn to_rgb(&self, profile: RGBProfile) -> RGBColor {
        let h = normalize_hue(self.h);
        let sector = (h / 60.0).floor();
        let f = h / 60.0 - sector;
        let v = self.v;
        let p = v * (1.0 - self.s);
        let q = v * (1.0 - f * self.s);
        let t = v * (1.0 - (1.0 - f) * self.s);
        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        RGBColor { r, g, b, profile }
    }
}

impl ColorType for HSVColor {
    const SPACE: ColorSpace = ColorSpace::HSV;

    fn values(&self) -> Vec<f64> {
        vec![self.h, self.s, self.v]
    }

    fn from_values(values: &[f64]) -> Result<HSVColor> {
        check_values(Self::SPACE, values)?;
        Ok(HSVColor::new(values[0], values[1], values[2]))
    }
}
