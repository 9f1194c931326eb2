//! Chromatic adaptation: predicting how a color seen under one illuminant would need to be specified
//! to look the same under another. Every method here is a von Kries-style transform. XYZ is moved
//! into a "cone response" space by a fixed matrix, each channel is scaled by the ratio of the two
//! white points' responses, and the result is moved back. The methods differ only in the cone
//! matrix they use.
//!
//! Bradford is the default everywhere in the crate, as it is in most color management software.

use std::fmt;
use std::str::FromStr;

use rulinalg::matrix::Matrix;
use tracing::debug;

use crate::consts::{
    inv, mul3, BRADFORD_TRANSFORM_MAT, VON_KRIES_TRANSFORM_MAT, XYZ_SCALING_TRANSFORM_MAT,
};
use crate::error::{ColorError, Result};
use crate::illuminants::{Illuminant, Observer};

/// The cone response matrix used to adapt between white points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdaptationMethod {
    /// The Bradford transform, as used by ICC profiles. The default.
    Bradford,
    /// The original von Kries transform, using the Hunt-Pointer-Estévez cone fundamentals.
    VonKries,
    /// Scaling XYZ directly. The crudest option, kept for comparison.
    XyzScaling,
}

impl AdaptationMethod {
    /// The matrix taking XYZ to this method's cone response space.
    pub fn cone_matrix(self) -> &'static Matrix<f64> {
        match self {
            AdaptationMethod::Bradford => &BRADFORD_TRANSFORM_MAT,
            AdaptationMethod::VonKries => &VON_KRIES_TRANSFORM_MAT,
            AdaptationMethod::XyzScaling => &XYZ_SCALING_TRANSFORM_MAT,
        }
    }

    /// The snake-case name of the method, e.g. `"von_kries"`.
    pub fn name(self) -> &'static str {
        match self {
            AdaptationMethod::Bradford => "bradford",
            AdaptationMethod::VonKries => "von_kries",
            AdaptationMethod::XyzScaling => "xyz_scaling",
        }
    }
}

impl Default for AdaptationMethod {
    fn default() -> AdaptationMethod {
        AdaptationMethod::Bradford
    }
}

impl fmt::Display for AdaptationMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AdaptationMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<AdaptationMethod> {
        match s.trim().to_lowercase().as_str() {
            "bradford" => Ok(AdaptationMethod::Bradford),
            "von_kries" | "vonkries" => Ok(AdaptationMethod::VonKries),
            "xyz_scaling" | "xyz" => Ok(AdaptationMethod::XyzScaling),
            _ => Err(ColorError::Format(format!(
                "unknown chromatic adaptation method {:?}",
                s
            ))),
        }
    }
}

/// Builds the 3x3 matrix that adapts XYZ values from one white point to another: M⁻¹ · diag(ρ'/ρ) ·
/// M, where ρ and ρ' are the cone responses of the two whites.
pub fn adaptation_matrix(
    source_white: [f64; 3],
    target_white: [f64; 3],
    method: AdaptationMethod,
) -> Matrix<f64> {
    let cone = method.cone_matrix();
    let source = mul3(cone, source_white);
    let target = mul3(cone, target_white);
    let scale = Matrix::from_diag(&[
        target[0] / source[0],
        target[1] / source[1],
        target[2] / source[2],
    ]);
    inv(cone) * scale * cone
}

/// Adapts a triple of XYZ values from one illuminant to another, both seen by the same observer.
/// Adapting to the same illuminant returns the input unchanged.
pub fn adapt(
    xyz: [f64; 3],
    source: Illuminant,
    target: Illuminant,
    observer: Observer,
    method: AdaptationMethod,
) -> [f64; 3] {
    if source == target {
        return xyz;
    }
    debug!(%source, %target, %method, "chromatic adaptation");
    let m = adaptation_matrix(
        source.white_point(observer),
        target.white_point(observer),
        method,
    );
    mul3(&m, xyz)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_adapt_c_to_d65() {
        let out = adapt(
            [0.5, 0.4, 0.1],
            Illuminant::C,
            Illuminant::D65,
            Observer::TwoDegree,
            AdaptationMethod::Bradford,
        );
        assert!((out[0] - 0.491).abs() <= 1e-3);
        assert!((out[1] - 0.400).abs() <= 1e-3);
        assert!((out[2] - 0.093).abs() <= 1e-3);
    }

    #[test]
    fn test_white_maps_to_white() {
        let d65 = Illuminant::D65.white_point(Observer::TwoDegree);
        let a = Illuminant::A.white_point(Observer::TwoDegree);
        for method in &[
            AdaptationMethod::Bradford,
            AdaptationMethod::VonKries,
            AdaptationMethod::XyzScaling,
        ] {
            let out = adapt(d65, Illuminant::D65, Illuminant::A, Observer::TwoDegree, *method);
            for i in 0..3 {
                assert!((out[i] - a[i]).abs() <= 1e-9, "{} {:?}", method, out);
            }
        }
    }

    #[test]
    fn test_same_illuminant_is_identity() {
        let xyz = [0.2, 0.3, 0.4];
        let out = adapt(
            xyz,
            Illuminant::D50,
            Illuminant::D50,
            Observer::TenDegree,
            AdaptationMethod::VonKries,
        );
        assert_eq!(out, xyz);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "Von_Kries".parse::<AdaptationMethod>().unwrap(),
            AdaptationMethod::VonKries
        );
        assert!("cat16".parse::<AdaptationMethod>().is_err());
    }
}
