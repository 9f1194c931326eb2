//! RLAB (Fairchild, 1996): CIELAB computed after a more careful chromatic adaptation, with the
//! cube root replaced by an exponent that depends on the surround.

use rulinalg::matrix::Matrix;
use tracing::trace;

use super::{check_correlates, check_finite, check_positive, xyz_inputs, HPE_TRANSFORM_MAT};
use crate::consts::mul3;
use crate::error::Result;

const MODEL: &str = "RLAB";

lazy_static! {
    /// Takes adapted cone responses to reference XYZ.
    static ref RLAB_R: Matrix<f64> = matrix![
        1.9569, -1.1882, 0.2313;
        0.3612, 0.6388, 0.0;
        0.0, 0.0, 1.0
    ];
}

/// The correlates predicted by RLAB.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rlab {
    /// Lightness L^R.
    pub lightness: f64,
    /// Red-green opponent coordinate a^R.
    pub a: f64,
    /// Yellow-blue opponent coordinate b^R.
    pub b: f64,
    /// Hue angle h^R in degrees, in [0, 360).
    pub hue_angle: f64,
    /// Chroma C^R.
    pub chroma: f64,
    /// Saturation s^R.
    pub saturation: f64,
}

impl Rlab {
    /// The surround exponent for an average surround, 1/2.3.
    pub const SIGMA_AVERAGE: f64 = 1.0 / 2.3;
    /// The surround exponent for a dim surround, 1/2.9.
    pub const SIGMA_DIM: f64 = 1.0 / 2.9;
    /// The surround exponent for a dark surround, 1/3.5.
    pub const SIGMA_DARK: f64 = 1.0 / 3.5;

    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_n`: the reference white;
    /// - `y_n_abs`: the absolute luminance of a white object, in cd/m²;
    /// - `sigma`: the surround exponent (see the `SIGMA_*` constants);
    /// - `d`: the degree of adaptation, 0 for none and 1 for complete discounting of the
    ///   illuminant.
    pub fn new(xyz: [f64; 3], xyz_n: [f64; 3], y_n_abs: f64, sigma: f64, d: f64) -> Result<Rlab> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_n", "y_n", "z_n"], xyz_n))?;
        check_finite(MODEL, &[("d", d)])?;
        check_positive(MODEL, "y_n_abs", y_n_abs)?;
        check_positive(MODEL, "sigma", sigma)?;
        check_positive(MODEL, "y_n", xyz_n[1])?;

        let lms = mul3(&HPE_TRANSFORM_MAT, xyz);
        let lms_n = mul3(&HPE_TRANSFORM_MAT, xyz_n);
        let sum_n: f64 = lms_n.iter().sum();
        let cube_root = y_n_abs.cbrt();

        let mut adapted = [0.0; 3];
        for i in 0..3 {
            let e = 3.0 * lms_n[i] / sum_n;
            let p = (1.0 + cube_root + e) / (1.0 + cube_root + 1.0 / e);
            adapted[i] = (p + d * (1.0 - p)) / lms_n[i] * lms[i];
        }
        let [x_ref, y_ref, z_ref] = mul3(&RLAB_R, adapted);
        trace!(x_ref, y_ref, z_ref, "reference tristimulus values");

        let lightness = 100.0 * y_ref.powf(sigma);
        let a = 430.0 * (x_ref.powf(sigma) - y_ref.powf(sigma));
        let b = 170.0 * (y_ref.powf(sigma) - z_ref.powf(sigma));
        let hue_angle = b.atan2(a).to_degrees().rem_euclid(360.0);
        let chroma = a.hypot(b);
        let saturation = chroma / lightness;

        check_correlates(MODEL, &[("lightness", lightness), ("a", a), ("b", b)])?;
        Ok(Rlab {
            lightness,
            a,
            b,
            hue_angle,
            chroma,
            saturation,
        })
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_fairchild_example() {
        let m = Rlab::new(
            [19.01, 20.0, 21.78],
            [95.05, 100.0, 108.88],
            318.31,
            0.4347,
            0.0,
        )
        .unwrap();
        assert!((m.hue_angle - 213.80078391547212).abs() <= 1e-6);
        assert!((m.chroma - 1.2828900167824993).abs() <= 1e-8);
        assert!((m.saturation - 0.02588923828283586).abs() <= 1e-9);
        assert!((m.lightness - 49.55302287255915).abs() <= 1e-8);
        assert!((m.a - -1.0660519153211467).abs() <= 1e-8);
        assert!((m.b - -0.7136806771941606).abs() <= 1e-8);
    }

    #[test]
    fn test_white_is_neutral_when_fully_adapted() {
        let m = Rlab::new(
            [95.05, 100.0, 108.88],
            [95.05, 100.0, 108.88],
            318.31,
            Rlab::SIGMA_AVERAGE,
            1.0,
        )
        .unwrap();
        assert!((m.lightness - 100.0).abs() <= 0.5);
        assert!(m.chroma <= 1.0);
    }

    #[test]
    fn test_zero_luminance_rejected() {
        assert!(Rlab::new([1.0; 3], [95.05, 100.0, 108.88], 0.0, 0.4347, 0.0).is_err());
    }
}
