//! Color appearance models. A colorimetric description says whether two stimuli match under the
//! same conditions; an appearance model goes further and predicts what a stimulus *looks like*
//! given how bright the scene is, what surrounds the stimulus, and what white the eye has adapted
//! to. The results are perceptual correlates: lightness, brightness, chroma, colorfulness,
//! saturation, and hue.
//!
//! Every model here is a plain struct of correlates built by a `new` constructor from tristimulus
//! values and viewing conditions. The constructors check their inputs and fail with
//! [`ColorError::Domain`](../error/enum.ColorError.html#variant.Domain) instead of producing NaN.
//!
//! Tristimulus inputs are on the 0-100 scale, with the reference white's Y typically 100.

mod atd95;
mod ciecam02;
mod hunt;
mod llab;
mod nayatani95;
mod rlab;

pub use self::atd95::Atd95;
pub use self::ciecam02::{Ciecam02, Surround, SurroundParams};
pub use self::hunt::{Hunt, HuntOptions};
pub use self::llab::Llab;
pub use self::nayatani95::Nayatani95;
pub use self::rlab::Rlab;

use rulinalg::matrix::Matrix;

use crate::error::{ColorError, Result};

lazy_static! {
    /// The Hunt-Pointer-Estévez cone fundamentals, normalized to equal-energy white.
    pub(crate) static ref HPE_TRANSFORM_MAT: Matrix<f64> = matrix![
        0.38971, 0.68898, -0.07868;
        -0.22981, 1.18340, 0.04641;
        0.0, 0.0, 1.0
    ];
}

/// Fails unless every named input is finite.
pub(crate) fn check_finite(model: &'static str, inputs: &[(&str, f64)]) -> Result<()> {
    match inputs.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(ColorError::domain(
            model,
            format!("{} must be finite, got {}", name, v),
        )),
        None => Ok(()),
    }
}

/// Fails unless the named input is finite and strictly positive.
pub(crate) fn check_positive(model: &'static str, name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ColorError::domain(
            model,
            format!("{} must be positive, got {}", name, value),
        ))
    }
}

/// Checks the computed correlates. A NaN here means the inputs were outside the region the model
/// is defined on, even though each one passed on its own.
pub(crate) fn check_correlates(model: &'static str, correlates: &[(&str, f64)]) -> Result<()> {
    match correlates.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, _)) => Err(ColorError::domain(
            model,
            format!("{} is undefined for these inputs", name),
        )),
        None => Ok(()),
    }
}

/// Every coordinate of a tristimulus triple, for `check_finite`.
pub(crate) fn xyz_inputs<'a>(name: [&'a str; 3], xyz: [f64; 3]) -> [(&'a str, f64); 3] {
    [(name[0], xyz[0]), (name[1], xyz[1]), (name[2], xyz[2])]
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_checks() {
        assert!(check_finite("test", &[("x", 1.0), ("y", -3.0)]).is_ok());
        match check_finite("test", &[("x", 1.0), ("y", std::f64::NAN)]) {
            Err(ColorError::Domain { model, reason }) => {
                assert_eq!(model, "test");
                assert!(reason.starts_with("y "));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(check_positive("test", "l_a", 0.0).is_err());
        assert!(check_positive("test", "l_a", std::f64::INFINITY).is_err());
        assert!(check_positive("test", "l_a", 1e-9).is_ok());
        assert!(check_correlates("test", &[("hue", std::f64::NAN)]).is_err());
    }
}
