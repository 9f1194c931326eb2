//! A module that implements the [CIELAB color
//! space](https://en.wikipedia.org/wiki/Lab_color_space#CIELAB). The CIELAB color space is used as a
//! device-independent color space that has an L value for luminance and two opponent color axes for
//! chromaticity (loosely, hue). Formally, the three values that define a CIELAB color are called
//! L\*, a\*, and b\* to distinguish them from [generic
//! Lab](https://en.wikipedia.org/wiki/Lab_color_space), but for convenience they are just `l`, `a`,
//! and `b` in this module.
//!
//! Unlike some libraries, CIELAB here is not pinned to D50: a color is relative to whatever
//! illuminant and observer it carries, and the XYZ values it converts from are normalized by that
//! white point (with Y = 100).

use super::{check_values, normalize_hue, CIELCHabColor, ColorSpace, ColorType, XYZColor};
use crate::consts::{CIE_E, CIE_K};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A color in the CIELAB color space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELABColor {
    /// The luminance (loosely, brightness) of a given color. 0 is the lowest visible value and gives
    /// black, whereas 100 is the value of diffuse white.
    pub l: f64,
    /// The first opponent color axis: negative is green, positive is magenta. Most visible colors
    /// fall between -128 and 127, but nothing stops "imaginary" colors outside that range.
    pub a: f64,
    /// The second opponent color axis: negative is blue, positive is yellow.
    pub b: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

impl CIELABColor {
    /// Makes a new CIELAB color relative to D50 and the 2° observer.
    pub fn new(l: f64, a: f64, b: f64) -> CIELABColor {
        CIELABColor {
            l,
            a,
            b,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> CIELABColor {
        CIELABColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> CIELABColor {
        CIELABColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Converts a CIE XYZ color to CIELAB, relative to the XYZ color's own white point.
    pub fn from_xyz(xyz: &XYZColor) -> CIELABColor {
        // https://en.wikipedia.org/wiki/Lab_color_space#CIELAB-CIEXYZ_conversions
        let f = |t: f64| {
            if t > CIE_E {
                t.cbrt()
            } else {
                (CIE_K * t + 16.0) / 116.0
            }
        };
        let white = xyz.white_point();
        let f_x = f(xyz.x / white[0]);
        let f_y = f(xyz.y / white[1]);
        let f_z = f(xyz.z / white[2]);

        // the nonlinearity above models human vision, so the rest is linear
        // note how a and b are opponent color axes
        CIELABColor {
            l: 116.0 * f_y - 16.0,
            a: 500.0 * (f_x - f_y),
            b: 200.0 * (f_y - f_z),
            illuminant: xyz.illuminant,
            observer: xyz.observer,
        }
    }

    /// Returns the XYZ color that corresponds to this CIELAB color, under the same illuminant and
    /// observer.
    pub fn to_xyz(&self) -> XYZColor {
        // inverse of the nonlinearity in from_xyz
        let f_inv = |v: f64| {
            let cubed = v * v * v;
            if cubed > CIE_E {
                cubed
            } else {
                (v - 16.0 / 116.0) * 116.0 / CIE_K
            }
        };
        let f_y = (self.l + 16.0) / 116.0;
        let f_x = self.a / 500.0 + f_y;
        let f_z = f_y - self.b / 200.0;
        let white = self.white_point();
        XYZColor {
            x: white[0] * f_inv(f_x),
            y: white[1] * f_inv(f_y),
            z: white[2] * f_inv(f_z),
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }

    /// Converts to the cylindrical form, with hue in [0, 360).
    pub fn to_lch(&self) -> CIELCHabColor {
        CIELCHabColor {
            l: self.l,
            c: self.a.hypot(self.b),
            h: normalize_hue(self.b.atan2(self.a).to_degrees()),
            illuminant: self.illuminant,
            observer: self.observer,
        }
    }
}

impl ColorType for CIELABColor {
    const SPACE: ColorSpace = ColorSpace::Lab;

    fn values(&self) -> Vec<f64> {
        vec![self.l, self.a, self.b]
    }

    fn from_values(values: &[f64]) -> Result<CIELABColor> {
        check_values(Self::SPACE, values)?;
        Ok(CIELABColor::new(values[0], values[1], values[2]))
    }
}
