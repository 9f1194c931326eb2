//! This module implements the CIE 1931 XYZ color space, the hub that every other space in the crate
//! is ultimately defined against. XYZ values are only meaningful relative to the illuminant they
//! were measured or computed under and the standard observer whose color matching functions define
//! them, so an [`XYZColor`](struct.XYZColor.html) carries both.
//!
//! Values here are on the 0-1 scale: a perfect diffuse reflector has Y = 1. The reference white
//! points, on the other hand, are tabulated with Y = 100, so the CIELAB and CIELUV conversions
//! (which divide by the white) treat their XYZ input on the 0-100 scale. RGB conversions and
//! spectral integration produce and consume the 0-1 scale.

use float_cmp::approx_eq;

use super::{check_values, ColorSpace, ColorType};
use crate::chromatic_adaptation::{adapt, AdaptationMethod};
use crate::error::Result;
use crate::illuminants::{Illuminant, Observer};

/// A point in the CIE 1931 XYZ color space, along with the illuminant and observer it is relative
/// to.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XYZColor {
    /// The X axis, a mix of cone responses chosen to be nonnegative.
    pub x: f64,
    /// The Y axis, luminance.
    pub y: f64,
    /// The Z axis, roughly the short-wavelength (blue) cone response.
    pub z: f64,
    /// The illuminant the values are relative to.
    pub illuminant: Illuminant,
    /// The standard observer the values are relative to.
    pub observer: Observer,
}

impl XYZColor {
    /// Makes a new XYZ color relative to D50 and the 2° observer.
    pub fn new(x: f64, y: f64, z: f64) -> XYZColor {
        XYZColor {
            x,
            y,
            z,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        }
    }

    /// Returns the same values, relabeled as relative to the given illuminant. No adaptation is done:
    /// use [`apply_adaptation`](#method.apply_adaptation) for that.
    pub fn with_illuminant(self, illuminant: Illuminant) -> XYZColor {
        XYZColor { illuminant, ..self }
    }

    /// Returns the same values, relabeled as relative to the given observer.
    pub fn with_observer(self, observer: Observer) -> XYZColor {
        XYZColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// Chromatically adapts the color to a different illuminant, returning a new color labeled with
    /// that illuminant. The observer is unchanged.
    pub fn apply_adaptation(&self, target: Illuminant, method: AdaptationMethod) -> XYZColor {
        let [x, y, z] = adapt(
            [self.x, self.y, self.z],
            self.illuminant,
            target,
            self.observer,
            method,
        );
        XYZColor {
            x,
            y,
            z,
            illuminant: target,
            observer: self.observer,
        }
    }

    /// Returns `true` if the two colors have the same illuminant and observer and coordinates within
    /// a small tolerance of each other.
    pub fn approx_equal(&self, other: &XYZColor) -> bool {
        self.illuminant == other.illuminant
            && self.observer == other.observer
            && approx_eq!(f64, self.x, other.x, epsilon = 1e-8)
            && approx_eq!(f64, self.y, other.y, epsilon = 1e-8)
            && approx_eq!(f64, self.z, other.z, epsilon = 1e-8)
    }
}

impl ColorType for XYZColor {
    const SPACE: ColorSpace = ColorSpace::XYZ;

    fn values(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }

    fn from_values(values: &[f64]) -> Result<XYZColor> {
        check_values(Self::SPACE, values)?;
        Ok(XYZColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_adaptation_relabels() {
        let xyz = XYZColor::new(0.5, 0.4, 0.1).with_illuminant(Illuminant::C);
        let adapted = xyz.apply_adaptation(Illuminant::D65, AdaptationMethod::Bradford);
        assert_eq!(adapted.illuminant, Illuminant::D65);
        assert!((adapted.x - 0.491).abs() <= 1e-3);
        // the original is untouched
        assert_eq!(xyz.illuminant, Illuminant::C);
    }

    #[test]
    fn test_adaptation_round_trip() {
        let xyz = XYZColor::new(0.2, 0.3, 0.4).with_observer(Observer::TenDegree);
        let back = xyz
            .apply_adaptation(Illuminant::F11, AdaptationMethod::VonKries)
            .apply_adaptation(Illuminant::D50, AdaptationMethod::VonKries);
        assert!(xyz.approx_equal(&back));
    }

    #[test]
    fn test_white_point() {
        let xyz = XYZColor::new(0.0, 0.0, 0.0).with_illuminant(Illuminant::D65);
        assert_eq!(xyz.white_point(), [95.047, 100.0, 108.883]);
    }
}
