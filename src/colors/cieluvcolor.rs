//! This module implements the CIELUV color space, the sibling of CIELAB built for additive light
//! sources. Lightness is the same as CIELAB's; the two chromatic axes come from the distance between
//! a color's (u′, v′) chromaticity and that of the reference white, scaled by lightness.

use super::{check_values, normalize_hue, CIELCHuvColor, ColorSpace, ColorType, XYZColor};
use crate::consts::{CIE_E, CIE_K};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A color in the CIELUV color space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELUVColor {
    /// The lightness, identical to CIELAB's L\*. Ranges from 0 to 100.
    pub l: f64,
    /// The u\* axis, roughly red (positive) to green (negative).
    pub u: f64,
    /// The v\* axis, roughly yellow (positive) to blue (negative).
    pub v: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

/// The (u′, v′) chromaticity of an XYZ triple. Black has no chromaticity and gets (0, 0).
fn uv_prime(x: f64, y: f64, z: f64) -> (f64, f64) {
    let denom = x + 15.0 * y + 3.0 * z;
    if denom == 0.0 {
        (0.0, 0.0)
    } else {
        (4.0 * x / denom, 9.0 * y / denom)
    }
}

impl CIELUVColor {
    /// Makes a new CIELUV color relative to D50 and the 2° observer.
    pub fn new(l: f64, u: f64, v: f64) -> CIELUVColor {
        CIELUVColor {
            l,
            u,
            v,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> CIELUVColor {
        CIELUVColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> CIELUVColor {
        CIELUVColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Converts a CIE XYZ color to CIELUV, relative to the XYZ color's own white point.
    pub fn from_xyz(xyz: &XYZColor) -> CIELUVColor {
        let white = xyz.white_point();
        let (u_p, v_p) = uv_prime(xyz.x, xyz.y, xyz.z);
        let (u_n, v_n) = uv_prime(white[0], white[1], white[2]);

        let y_r = xyz.y / white[1];
        let l = if y_r > CIE_E {
            116.0 * y_r.cbrt() - 16.0
        } else {
            CIE_K * y_r
        };
        CIELUVColor {
            l,
            u: 13.0 * l * (u_p - u_n),
            v: 13.0 * l * (v_p - v_n),
            illuminant: xyz.illuminant,
            observer: xyz.observer,
        }
    }

    /// Converts back to XYZ under the same illuminant and observer. Zero or negative lightness is
    /// black.
    pub fn to_xyz(&self) -> XYZColor {
        let white = self.white_point();
        let black = XYZColor {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            illuminant: self.illuminant,
            observer: self.observer,
        };
        if self.l <= 0.0 {
            return black;
        }
        let (u_n, v_n) = uv_prime(white[0], white[1], white[2]);
        let u_p = self.u / (13.0 * self.l) + u_n;
        let v_p = self.v / (13.0 * self.l) + v_n;
        if v_p == 0.0 {
            return black;
        }

        // relative luminance first, then scaled by the white's Y
        let y_r = if self.l > CIE_K * CIE_E {
            ((self.l + 16.0) / 116.0).powi(3)
        } else {
            self.l / CIE_K
        };
        let y = y_r * white[1];
        XYZColor {
            x: y * 9.0 * u_p / (4.0 * v_p),
            y,
            z: y * (12.0 - 3.0 * u_p - 20.0 * v_p) / (4.0 * v_p),
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }

    /// Converts to the cylindrical form, with hue in [0, 360).
    pub fn to_lch(&self) -> CIELCHuvColor {
        CIELCHuvColor {
            l: self.l,
            c: self.u.hypot(self.v),
            h: normalize_hue(self.v.atan2(self.u).to_degrees()),
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }
}

impl ColorType for CIELUVColor {
    const SPACE: ColorSpace = ColorSpace::Luv;

    fn values(&self) -> Vec<f64> {
        vec![self.l, self.u, self.v]
    }

    fn from_values(values: &[f64]) -> Result<CIELUVColor> {
        check_values(Self::SPACE, values)?;
        Ok(CIELUVColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_xyz_to_luv() {
        let luv = CIELUVColor::from_xyz(&XYZColor::new(0.1, 0.2, 0.3));
        assert!((luv.l - 1.807).abs() <= 1e-3);
        assert!((luv.u - -2.564).abs() <= 1e-3);
        assert!((luv.v - -0.894).abs() <= 1e-3);
    }

    #[test]
    fn test_luv_to_lch() {
        let lch = CIELUVColor::from_xyz(&XYZColor::new(0.1, 0.2, 0.3)).to_lch();
        assert!((lch.c - 2.715).abs() <= 1e-3);
        assert!((lch.h - 199.228).abs() <= 1e-3);
    }

    #[test]
    fn test_cieluv_xyz_round_trip() {
        for &(x, y, z) in &[(0.1, 0.2, 0.3), (40.0, 20.0, 60.0), (90.0, 95.0, 100.0)] {
            let xyz = XYZColor::new(x, y, z).with_illuminant(Illuminant::D65);
            let back = CIELUVColor::from_xyz(&xyz).to_xyz();
            assert!(xyz.approx_equal(&back), "{:?} {:?}", xyz, back);
        }
    }

    #[test]
    fn test_black() {
        let luv = CIELUVColor::from_xyz(&XYZColor::new(0.0, 0.0, 0.0));
        assert_eq!((luv.l, luv.u, luv.v), (0.0, 0.0, 0.0));
        let xyz = CIELUVColor::new(-5.0, 3.0, 3.0).to_xyz();
        assert_eq!((xyz.x, xyz.y, xyz.z), (0.0, 0.0, 0.0));
    }
}
