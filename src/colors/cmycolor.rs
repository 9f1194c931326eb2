//! Subtractive cyan, magenta, yellow: the naive complement of RGB. No ink model is involved, so
//! this is only as accurate as "cyan is 1 - red" ever is.

use super::{check_values, ColorSpace, ColorType, RGBColor, RGBProfile};
use crate::error::Result;

/// A color in CMY, each channel between 0 (no ink) and 1 (full coverage).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CMYColor {
    /// Cyan.
    pub c: f64,
    /// Magenta.
    pub m: f64,
    /// Yellow.
    pub y: f64,
}

impl CMYColor {
    /// Makes a new CMY color.
    pub fn new(c: f64, m: f64, y: f64) -> CMYColor {
        CMYColor { c, m, y }
    }

    /// Converts from RGB by complementing each channel.
    pub fn from_rgb(rgb: &RGBColor) -> CMYColor {
        CMYColor {
            c: 1.0 - rgb.r,
            m: 1.0 - rgb.g,
            y: 1.0 - rgb.b,
        }
    }

    /// Converts back to RGB in the given profile.
    pub fn to_rgb(&self, profile: RGBProfile) -> RGBColor {
        RGBColor {
            r: 1.0 - self.c,
            g: 1.0 - self.m,
            b: 1.0 - self.y,
            profile,
        }
    }
}

impl ColorType for CMYColor {
    const SPACE: ColorSpace = ColorSpace::CMY;

    fn values(&self) -> Vec<f64> {
        vec![self.c, self.m, self.y]
    }

    fn from_values(values: &[f64]) -> Result<CMYColor> {
        check_values(Self::SPACE, values)?;
        Ok(CMYColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_rgb_to_cmy() {
        let cmy = CMYColor::from_rgb(&RGBColor::new_upscaled(123, 200, 50));
        assert!((cmy.c - 0.518).abs() <= 1e-3);
        assert!((cmy.m - 0.216).abs() <= 1e-3);
        assert!((cmy.y - 0.804).abs() <= 1e-3);
        let rgb = cmy.to_rgb(RGBProfile::WideGamutRGB);
        assert!((rgb.r - 123.0 / 255.0).abs() <= 1e-12);
        assert_eq!(rgb.profile, RGBProfile::WideGamutRGB);
    }
}
