//! This module implements CIE xyY, which splits XYZ into a chromaticity (x, y) and a luminance
//! (Y). Chromaticity diagrams plot the first two coordinates.

use super::{check_values, ColorSpace, ColorType, XYZColor};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A color in the CIE xyY space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyYColor {
    /// The x chromaticity coordinate, X / (X + Y + Z).
    pub x: f64,
    /// The y chromaticity coordinate, Y / (X + Y + Z).
    pub y: f64,
    /// The luminance, identical to XYZ's Y.
    pub big_y: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

impl XyYColor {
    /// Makes a new xyY color relative to D50 and the 2° observer.
    pub fn new(x: f64, y: f64, big_y: f64) -> XyYColor {
        XyYColor {
            x,
            y,
            big_y,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> XyYColor {
        XyYColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> XyYColor {
        XyYColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Computes the chromaticity of an XYZ color. Black (X + Y + Z = 0) has no chromaticity, and is
    /// given x = y = 0.
    pub fn from_xyz(xyz: &XYZColor) -> XyYColor {
        let sum = xyz.x + xyz.y + xyz.z;
        let (x, y) = if sum == 0.0 {
            (0.0, 0.0)
        } else {
            (xyz.x / sum, xyz.y / sum)
        };
        XyYColor {
            x,
            y,
            big_y: xyz.y,
            illuminant: xyz.illuminant,
            observer: xyz.observer,
        }
    }

    /// Converts back to XYZ. A y chromaticity of 0 can only come from black, so it gives black.
    pub fn to_xyz(&self) -> XYZColor {
        let (x, z) = if self.y == 0.0 {
            (0.0, 0.0)
        } else {
            (
                self.x * self.big_y / self.y,
                (1.0 - self.x - self.y) * self.big_y / self.y,
            )
        };
        XYZColor {
            x,
            y: if self.y == 0.0 { 0.0 } else { self.big_y },
            z,
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }
}

impl ColorType for XyYColor {
    const SPACE: ColorSpace = ColorSpace::XyY;

    fn values(&self) -> Vec<f64> {
        vec![self.x, self.y, self.big_y]
    }

    fn from_values(values: &[f64]) -> Result<XyYColor> {
        check_values(Self::SPACE, values)?;
        Ok(XyYColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_xyz_to_xyy() {
        let xyy = XyYColor::from_xyz(&XYZColor::new(0.1, 0.2, 0.3));
        assert!((xyy.x - 0.1667).abs() <= 1e-4);
        assert!((xyy.y - 0.3333).abs() <= 1e-4);
        assert!((xyy.big_y - 0.2).abs() <= 1e-12);
    }

    #[test]
    fn test_round_trip() {
        let xyz = XYZColor::new(0.3, 0.53, 0.65).with_illuminant(Illuminant::D65);
        let back = XyYColor::from_xyz(&xyz).to_xyz();
        assert!(xyz.approx_equal(&back));
    }

    #[test]
    fn test_black() {
        let xyy = XyYColor::from_xyz(&XYZColor::new(0.0, 0.0, 0.0));
        assert_eq!((xyy.x, xyy.y), (0.0, 0.0));
        let xyz = xyy.to_xyz();
        assert_eq!((xyz.x, xyz.y, xyz.z), (0.0, 0.0, 0.0));
    }
}
