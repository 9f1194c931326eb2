//! This file implements the CIELCH(ab) color space, a cylindrical transformation of CIELAB that uses
//! chroma and hue instead of two opponent color axes. Be careful not to confuse it with
//! [`CIELCHuvColor`](../cielchuvcolor/struct.CIELCHuvColor.html), which is built on CIELUV.

use super::{check_values, CIELABColor, ColorSpace, ColorType};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A cylindrical form of CIELAB, analogous to the relationship between HSL and RGB.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELCHabColor {
    /// The luminance component, identical to CIELAB's. Ranges between 0 and 100.
    pub l: f64,
    /// The chroma component: the distance from the gray of the same luminance, i.e. the radius of
    /// the cylinder. Perceptually even, but not additive: mixing two colors of different hues does
    /// not add their chromas.
    pub c: f64,
    /// The hue component, in degrees from 0 to 360. 90 degrees is yellow, 180 green, 270 blue, and 0
    /// red.
    pub h: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

impl CIELCHabColor {
    /// Makes a new LCH(ab) color relative to D50 and the 2° observer.
    pub fn new(l: f64, c: f64, h: f64) -> CIELCHabColor {
        CIELCHabColor {
            l,
            c,
            h,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> CIELCHabColor {
        CIELCHabColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> CIELCHabColor {
        CIELCHabColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Converts from the cylinder back to the opponent axes: a = C cos h, b = C sin h.
    pub fn to_lab(&self) -> CIELABColor {
        let (sin, cos) = self.h.to_radians().sin_cos();
        CIELABColor {
            l: self.l,
            a: self.c * cos,
            b: self.c * sin,
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }
}

impl ColorType for CIELCHabColor {
    const SPACE: ColorSpace = ColorSpace::LCHab;

    fn values(&self) -> Vec<f64> {
        vec![self.l, self.c, self.h]
    }

    fn from_values(values: &[f64]) -> Result<CIELCHabColor> {
        check_values(Self::SPACE, values)?;
        Ok(CIELCHabColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_lch_lab_round_trip() {
        let lab = CIELABColor::new(45.0, -12.0, 30.0).with_illuminant(Illuminant::D65);
        let back = lab.to_lch().to_lab();
        assert!((lab.l - back.l).abs() <= 1e-10);
        assert!((lab.a - back.a).abs() <= 1e-10);
        assert!((lab.b - back.b).abs() <= 1e-10);
        assert_eq!(back.illuminant, Illuminant::D65);
    }

    #[test]
    fn test_hue_is_normalized() {
        // negative b gives a negative atan2, which should wrap around
        let lch = CIELABColor::new(50.0, 10.0, -10.0).to_lch();
        assert!((lch.h - 315.0).abs() <= 1e-10);
        let gray = CIELABColor::new(50.0, 0.0, 0.0).to_lch();
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.c, 0.0);
    }
}
