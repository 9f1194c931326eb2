//! LLAB (Luo, Lo & Kuo, 1996): a CIELAB-like space computed after BFD (Bradford) adaptation to
//! D65, with surround-dependent exponents and a chroma scale fitted to the LUTCHI data.

use rulinalg::matrix::Matrix;
use tracing::trace;

use super::{check_correlates, check_finite, check_positive, xyz_inputs};
use crate::consts::{mul3, BRADFORD_TRANSFORM_MAT};
use crate::error::Result;

const MODEL: &str = "LLAB";

/// The reference white everything is adapted to.
const REFERENCE_WHITE: [f64; 3] = [95.05, 100.0, 108.88];

lazy_static! {
    /// The published inverse of the Bradford matrix, rounded as in the model's definition.
    static ref LLAB_RGB_TO_XYZ: Matrix<f64> = matrix![
        0.987, -0.1471, 0.16;
        0.4323, 0.5184, 0.0493;
        -0.0085, 0.04, 0.9685
    ];
}

/// The correlates predicted by LLAB.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Llab {
    /// Lightness L_L.
    pub lightness: f64,
    /// Chroma Ch_L.
    pub chroma: f64,
    /// Saturation s_L.
    pub saturation: f64,
    /// Hue angle h_L in degrees, in [0, 360).
    pub hue_angle: f64,
    /// Red-green opponent coordinate A_L.
    pub a_l: f64,
    /// Yellow-blue opponent coordinate B_L.
    pub b_l: f64,
}

/// Normalized cone responses: Bradford RGB of the tristimulus values divided by their Y.
fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    mul3(
        &BRADFORD_TRANSFORM_MAT,
        [xyz[0] / xyz[1], 1.0, xyz[2] / xyz[1]],
    )
}

impl Llab {
    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_0`: the reference white;
    /// - `y_b`: the luminance factor of the background, in percent;
    /// - `f_s`: the surround induction factor;
    /// - `f_l`: the lightness induction factor;
    /// - `f_c`: the chroma induction factor;
    /// - `l`: the absolute luminance of the reference white, in cd/m²;
    /// - `d`: the degree of adaptation, usually 1.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        xyz: [f64; 3],
        xyz_0: [f64; 3],
        y_b: f64,
        f_s: f64,
        f_l: f64,
        f_c: f64,
        l: f64,
        d: f64,
    ) -> Result<Llab> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_0", "y_0", "z_0"], xyz_0))?;
        check_finite(MODEL, &[("f_l", f_l), ("f_c", f_c), ("d", d)])?;
        check_positive(MODEL, "y", xyz[1])?;
        check_positive(MODEL, "y_0", xyz_0[1])?;
        check_positive(MODEL, "y_b", y_b)?;
        check_positive(MODEL, "f_s", f_s)?;
        check_positive(MODEL, "l", l)?;

        let [r, g, b] = xyz_to_rgb(xyz);
        let [r_0, g_0, b_0] = xyz_to_rgb(xyz_0);
        let [r_0r, g_0r, b_0r] = xyz_to_rgb(REFERENCE_WHITE);

        // the blue channel adapts nonlinearly
        let beta = (b_0 / b_0r).powf(0.0834);
        let rgb_r = [
            (d * (r_0r / r_0) + 1.0 - d) * r,
            (d * (g_0r / g_0) + 1.0 - d) * g,
            (d * (b_0r / b_0.powf(beta)) + 1.0 - d) * b.abs().powf(beta),
        ];
        let y = xyz[1];
        let [x_r, y_r, z_r] = mul3(
            &LLAB_RGB_TO_XYZ,
            [rgb_r[0] * y, rgb_r[1] * y, rgb_r[2] * y],
        );
        trace!(x_r, y_r, z_r, "adapted tristimulus values");

        let f = |w: f64| -> f64 {
            if w > 0.008856 {
                w.powf(1.0 / f_s)
            } else {
                (0.008856f64.powf(1.0 / f_s) - 16.0 / 116.0) / 0.008856 * w + 16.0 / 116.0
            }
        };

        let z = 1.0 + f_l * (y_b / 100.0).sqrt();
        let f_x = f(x_r / REFERENCE_WHITE[0]);
        let f_y = f(y_r / REFERENCE_WHITE[1]);
        let f_z = f(z_r / REFERENCE_WHITE[2]);
        let lightness = 116.0 * f_y.powf(z) - 16.0;
        let a = 500.0 * (f_x - f_y);
        let b = 200.0 * (f_y - f_z);

        let chroma = 25.0 * (1.0 + 0.05 * a.hypot(b)).ln();
        let s_c = 1.0 + 0.47 * l.log10() - 0.057 * l.log10().powi(2);
        let s_m = 0.7 + 0.02 * lightness - 0.0002 * lightness.powi(2);
        let c_l = chroma * s_m * s_c * f_c;

        let saturation = chroma / lightness;
        let hue_rad = b.atan2(a);
        let hue_angle = hue_rad.to_degrees().rem_euclid(360.0);
        let a_l = c_l * hue_rad.cos();
        let b_l = c_l * hue_rad.sin();

        check_correlates(
            MODEL,
            &[
                ("lightness", lightness),
                ("chroma", chroma),
                ("saturation", saturation),
            ],
        )?;
        Ok(Llab {
            lightness,
            chroma,
            saturation,
            hue_angle,
            a_l,
            b_l,
        })
    }
}
