//! This module implements CIELCH(uv), the cylindrical version of CIELUV: lightness, chroma, and a hue
//! angle in place of the u\* and v\* axes. This is the space that HCL color pickers are built on.

use super::{check_values, CIELUVColor, ColorSpace, ColorType};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A color in the cylindrical form of CIELUV.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELCHuvColor {
    /// The lightness, identical to CIELUV's.
    pub l: f64,
    /// The chroma, the distance from the neutral axis.
    pub c: f64,
    /// The hue angle in degrees, from 0 to 360.
    pub h: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

impl CIELCHuvColor {
    /// Makes a new LCH(uv) color relative to D50 and the 2° observer.
    pub fn new(l: f64, c: f64, h: f64) -> CIELCHuvColor {
        CIELCHuvColor {
            l,
            c,
            h,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> CIELCHuvColor {
        CIELCHuvColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> CIELCHuvColor {
        CIELCHuvColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Converts back to CIELUV: u = C cos h, v = C sin h.
    pub fn to_luv(&self) -> CIELUVColor {
        let (sin, cos) = self.h.to_radians().sin_cos();
        CIELUVColor {
            l: self.l,
            u: self.c * cos,
            v: self.c * sin,
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }
}

impl ColorType for CIELCHuvColor {
    const SPACE: ColorSpace = ColorSpace::LCHuv;

    fn values(&self) -> Vec<f64> {
        vec![self.l, self.c, self.h]
    }

    fn from_values(values: &[f64]) -> Result<CIELCHuvColor> {
        check_values(Self::SPACE, values)?;
        Ok(CIELCHuvColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_lchuv_luv_round_trip() {
        let luv = CIELUVColor::new(60.0, 25.0, -40.0).with_observer(Observer::TenDegree);
        let lch = luv.to_lch();
        assert!(lch.h > 270.0 && lch.h < 360.0);
        let back = lch.to_luv();
        assert!((luv.u - back.u).abs() <= 1e-10);
        assert!((luv.v - back.v).abs() <= 1e-10);
        assert_eq!(back.observer, Observer::TenDegree);
    }
}
