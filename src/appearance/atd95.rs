//! The ATD95 model of Guth (1995), a zone model: cone responses with gain control feed two
//! stages of opponent channels, achromatic (A), tritan (T), and deuteran (D). It predicts
//! brightness, saturation, and a hue *ratio* rather than an angle.

use tracing::trace;

use super::{check_correlates, check_finite, check_positive, xyz_inputs};
use crate::error::Result;

const MODEL: &str = "ATD95";

/// The correlates predicted by ATD95, along with the final opponent responses.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atd95 {
    /// Hue, as the ratio T_2 / D_2.
    pub hue: f64,
    /// Brightness Br.
    pub brightness: f64,
    /// Saturation C.
    pub saturation: f64,
    /// First-stage achromatic response.
    pub a_1: f64,
    /// First-stage tritan response.
    pub t_1: f64,
    /// First-stage deuteran response.
    pub d_1: f64,
    /// Second-stage achromatic response.
    pub a_2: f64,
    /// Second-stage tritan response.
    pub t_2: f64,
    /// Second-stage deuteran response.
    pub d_2: f64,
}

/// Converts relative tristimulus values to the model's absolute scale.
fn scale_to_luminance(xyz: [f64; 3], y_0_abs: f64) -> [f64; 3] {
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = 18.0 * (y_0_abs * xyz[i] / 100.0).powf(0.8);
    }
    out
}

fn xyz_to_lms([x, y, z]: [f64; 3]) -> [f64; 3] {
    [
        (0.66 * (0.2435 * x + 0.8524 * y - 0.0516 * z)).powf(0.7) + 0.024,
        (-0.3954 * x + 1.1642 * y + 0.0837 * z).powf(0.7) + 0.036,
        (0.43 * (0.04 * y + 0.6225 * z)).powf(0.7) + 0.31,
    ]
}

fn final_response(value: f64) -> f64 {
    value / (200.0 + value.abs())
}

impl Atd95 {
    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_0`: the reference white;
    /// - `y_0_abs`: the absolute adapting luminance, in cd/m²;
    /// - `k_1`, `k_2`: the weights of the stimulus itself and of the white in the adapting
    ///   signal. Guth suggests 0 and 50 for most purposes;
    /// - `sigma`: the gain-control constant, 300 by Guth's recommendation.
    pub fn new(
        xyz: [f64; 3],
        xyz_0: [f64; 3],
        y_0_abs: f64,
        k_1: f64,
        k_2: f64,
        sigma: f64,
    ) -> Result<Atd95> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_0", "y_0", "z_0"], xyz_0))?;
        check_finite(MODEL, &[("k_1", k_1), ("k_2", k_2)])?;
        check_positive(MODEL, "y_0_abs", y_0_abs)?;
        check_positive(MODEL, "sigma", sigma)?;

        let xyz = scale_to_luminance(xyz, y_0_abs);
        let xyz_0 = scale_to_luminance(xyz_0, y_0_abs);

        let lms = xyz_to_lms(xyz);
        let mut xyz_a = [0.0; 3];
        for i in 0..3 {
            xyz_a[i] = k_1 * xyz[i] + k_2 * xyz_0[i];
        }
        let lms_a = xyz_to_lms(xyz_a);

        let gain = |i: usize| lms[i] * (sigma / (sigma + lms_a[i]));
        let (l_g, m_g, s_g) = (gain(0), gain(1), gain(2));
        trace!(l_g, m_g, s_g, "gain-controlled cone responses");

        let a_1i = 3.57 * l_g + 2.64 * m_g;
        let t_1i = 7.18 * l_g - 6.21 * m_g;
        let d_1i = -0.7 * l_g + 0.085 * m_g + s_g;
        let a_2i = 0.09 * a_1i;
        let t_2i = 0.43 * t_1i + 0.76 * d_1i;
        let d_2i = d_1i;

        let a_1 = final_response(a_1i);
        let t_1 = final_response(t_1i);
        let d_1 = final_response(d_1i);
        let a_2 = final_response(a_2i);
        let t_2 = final_response(t_2i);
        let d_2 = final_response(d_2i);

        let brightness = (a_1.powi(2) + t_1.powi(2) + d_1.powi(2)).sqrt();
        let saturation = t_2.hypot(d_2) / a_2;
        let hue = t_2 / d_2;

        check_correlates(
            MODEL,
            &[
                ("brightness", brightness),
                ("saturation", saturation),
                ("hue", hue),
            ],
        )?;
        Ok(Atd95 {
            hue,
            brightness,
            saturation,
            a_1,
            t_1,
            d_1,
            a_2,
            t_2,
            d_2,
        })
    }
}
