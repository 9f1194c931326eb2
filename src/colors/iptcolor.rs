//! This module implements IPT, the opponent color space of Ebner and Fairchild (1998). It was fitted
//! to make hue lines straight, so constant-hue gradients stay the same perceived hue better than in
//! CIELAB. I is lightness, P is the red-green axis, and T the yellow-blue axis.
//!
//! IPT is only defined for D65 with the 2° observer. Convert or adapt to that first.

use rulinalg::matrix::Matrix;

use super::{check_values, normalize_hue, ColorSpace, ColorType, XYZColor};
use crate::consts::{inv, mul3};
use crate::error::{ColorError, Result};
use crate::illuminants::{Illuminant, Observer};

lazy_static! {
    static ref XYZ_TO_LMS: Matrix<f64> = matrix![
        0.4002, 0.7075, -0.0807;
        -0.2280, 1.1500, 0.0612;
        0.0, 0.0, 0.9184
    ];
    static ref LMS_TO_IPT: Matrix<f64> = matrix![
        0.4000, 0.4000, 0.2000;
        4.4550, -4.8510, 0.3960;
        0.8056, 0.3572, -1.1628
    ];
    static ref LMS_TO_XYZ: Matrix<f64> = inv(&XYZ_TO_LMS);
    static ref IPT_TO_LMS: Matrix<f64> = inv(&LMS_TO_IPT);
}

/// The compressive nonlinearity applied to cone responses.
const IPT_EXPONENT: f64 = 0.43;

fn signed_pow(v: f64, exponent: f64) -> f64 {
    v.signum() * v.abs().powf(exponent)
}

/// A color in IPT.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct IPTColor {
    /// Lightness, 0 to 1 for colors within the diffuse white.
    pub i: f64,
    /// The protan (red-green) axis.
    pub p: f64,
    /// The tritan (yellow-blue) axis.
    pub t: f64,
}

impl IPTColor {
    /// Makes a new IPT color.
    pub fn new(i: f64, p: f64, t: f64) -> IPTColor {
        IPTColor { i, p, t }
    }

    /// Converts from XYZ (white Y = 1), which must be relative to D65 and the 2° observer.
    pub fn from_xyz(xyz: &XYZColor) -> Result<IPTColor> {
        if xyz.illuminant != Illuminant::D65 || xyz.observer != Observer::TwoDegree {
            return Err(ColorError::InvalidIlluminant(format!(
                "IPT needs XYZ relative to d65 and the 2° observer, got {} and {}°",
                xyz.illuminant, xyz.observer
            )));
        }
        let lms = mul3(&XYZ_TO_LMS, [xyz.x, xyz.y, xyz.z]);
        let lms_prime = [
            signed_pow(lms[0], IPT_EXPONENT),
            signed_pow(lms[1], IPT_EXPONENT),
            signed_pow(lms[2], IPT_EXPONENT),
        ];
        let [i, p, t] = mul3(&LMS_TO_IPT, lms_prime);
        Ok(IPTColor { i, p, t })
    }

    /// Converts back to XYZ, relative to D65 and the 2° observer.
    pub fn to_xyz(&self) -> XYZColor {
        let lms_prime = mul3(&IPT_TO_LMS, [self.i, self.p, self.t]);
        let lms = [
            signed_pow(lms_prime[0], 1.0 / IPT_EXPONENT),
            signed_pow(lms_prime[1], 1.0 / IPT_EXPONENT),
            signed_pow(lms_prime[2], 1.0 / IPT_EXPONENT),
        ];
        let [x, y, z] = mul3(&LMS_TO_XYZ, lms);
        XYZColor {
            x,
            y,
            z,
            illuminant: Illuminant::D65,
            observer: Observer::TwoDegree,
        }
    }

    /// The hue angle in degrees, in [0, 360).
    pub fn hue_angle(&self) -> f64 {
        normalize_hue(self.t.atan2(self.p).to_degrees())
    }

    /// The distance from the neutral axis.
    pub fn saturation(&self) -> f64 {
        self.p.hypot(self.t)
    }
}

impl ColorType for IPTColor {
    const SPACE: ColorSpace = ColorSpace::IPT;

    fn values(&self) -> Vec<f64> {
        vec![self.i, self.p, self.t]
    }

    fn from_values(values: &[f64]) -> Result<IPTColor> {
        check_values(Self::SPACE, values)?;
        Ok(IPTColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn d65(x: f64, y: f64, z: f64) -> XYZColor {
        XYZColor::new(x, y, z).with_illuminant(Illuminant::D65)
    }

    #[test]
    fn test_white_is_neutral() {
        let ipt = IPTColor::from_xyz(&d65(0.95047, 1.0, 1.08883)).unwrap();
        assert!((ipt.i - 1.0).abs() <= 1e-4);
        assert!(ipt.saturation() <= 1e-3);
    }

    #[test]
    fn test_xyz_to_ipt() {
        let ipt = IPTColor::from_xyz(&d65(0.2, 0.1, 0.4)).unwrap();
        assert!((ipt.i - 0.434528).abs() <= 1e-5);
        assert!((ipt.p - 0.283996).abs() <= 1e-5);
        assert!((ipt.t - -0.304812).abs() <= 1e-5);
        assert!((ipt.hue_angle() - 312.9753).abs() <= 1e-3);
        assert!((ipt.saturation() - 0.416610).abs() <= 1e-5);
    }

    #[test]
    fn test_round_trip() {
        let xyz = d65(0.294, 0.457, 0.103);
        let back = IPTColor::from_xyz(&xyz).unwrap().to_xyz();
        assert!(xyz.approx_equal(&back));
    }

    #[test]
    fn test_wrong_illuminant() {
        match IPTColor::from_xyz(&XYZColor::new(0.2, 0.1, 0.4)) {
            Err(ColorError::InvalidIlluminant(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        let ten = d65(0.2, 0.1, 0.4).with_observer(Observer::TenDegree);
        assert!(IPTColor::from_xyz(&ten).is_err());
    }
}
