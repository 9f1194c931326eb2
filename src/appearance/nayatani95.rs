//! The Nayatani et al. (1995) model, a nonlinear extension of von Kries adaptation that predicts
//! the Helmholtz-Kohlrausch effect and the growth of colorfulness with illuminance.

use std::f64::consts::PI;

use tracing::trace;

use super::{check_correlates, check_finite, check_positive, xyz_inputs};
use crate::consts::{mul3, VON_KRIES_TRANSFORM_MAT};
use crate::error::{ColorError, Result};

const MODEL: &str = "Nayatani95";

fn beta_1(x: f64) -> f64 {
    (6.469 + 6.362 * x.powf(0.4495)) / (6.469 + x.powf(0.4495))
}

fn beta_2(x: f64) -> f64 {
    0.7844 * (8.414 + 8.091 * x.powf(0.5128)) / (8.414 + x.powf(0.5128))
}

/// How strongly a hue is perceived, as a function of the hue angle in radians.
fn chromatic_strength(angle: f64) -> f64 {
    0.9394 - 0.2478 * angle.sin() - 0.0743 * (2.0 * angle).sin() + 0.0666 * (3.0 * angle).sin()
        - 0.0186 * (4.0 * angle).sin()
        - 0.0055 * angle.cos()
        - 0.0521 * (2.0 * angle).cos()
        - 0.0573 * (3.0 * angle).cos()
        - 0.0061 * (4.0 * angle).cos()
}

/// The correlates predicted by the Nayatani95 model.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nayatani95 {
    /// Achromatic lightness L*_P.
    pub lightness_achromatic: f64,
    /// Normalized achromatic lightness L*_N, relative to the brightness of an ideal white.
    pub lightness_achromatic_normalized: f64,
    /// Hue angle θ in degrees, in [0, 360).
    pub hue_angle: f64,
    /// Chroma C.
    pub chroma: f64,
    /// Saturation S.
    pub saturation: f64,
    /// Brightness B_r.
    pub brightness: f64,
    /// The brightness of an ideal white under the same conditions.
    pub brightness_ideal_white: f64,
    /// Colorfulness M.
    pub colorfulness: f64,
}

impl Nayatani95 {
    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_n`: the reference white;
    /// - `y_ob`: the luminance factor of the achromatic background, in percent. Must be above 0.18;
    /// - `e_o`: the illuminance of the viewing field, in lux;
    /// - `e_or`: the normalizing illuminance, in lux;
    /// - `n`: the noise term, usually 1.
    pub fn new(
        xyz: [f64; 3],
        xyz_n: [f64; 3],
        y_ob: f64,
        e_o: f64,
        e_or: f64,
        n: f64,
    ) -> Result<Nayatani95> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_n", "y_n", "z_n"], xyz_n))?;
        check_finite(MODEL, &[("n", n)])?;
        if !(y_ob > 0.18) {
            return Err(ColorError::domain(
                MODEL,
                format!("y_ob must be greater than 0.18, got {}", y_ob),
            ));
        }
        check_positive(MODEL, "e_o", e_o)?;
        check_positive(MODEL, "e_or", e_or)?;
        check_positive(MODEL, "y_n", xyz_n[1])?;

        let l_or = y_ob * e_or / (100.0 * PI);

        let sum_n = xyz_n[0] + xyz_n[1] + xyz_n[2];
        let x_o = xyz_n[0] / sum_n;
        let y_o = xyz_n[1] / sum_n;
        let xi = (0.48105 * x_o + 0.78841 * y_o - 0.08081) / y_o;
        let eta = (-0.27200 * x_o + 1.11962 * y_o + 0.04570) / y_o;
        let zeta = 0.91822 * (1.0 - x_o - y_o) / y_o;

        // cone responses of the adapting field
        let field = y_ob * e_o / (100.0 * PI);
        let (r_0, g_0, b_0) = (field * xi, field * eta, field * zeta);
        let [r, g, b] = mul3(&VON_KRIES_TRANSFORM_MAT, xyz);
        trace!(r, g, b, r_0, g_0, b_0, "cone responses");

        let e_r = if r >= 20.0 * xi { 1.758 } else { 1.0 };
        let e_g = if g >= 20.0 * eta { 1.758 } else { 1.0 };

        let beta_r = beta_1(r_0);
        let beta_g = beta_1(g_0);
        let beta_b = beta_2(b_0);
        let beta_l = beta_1(l_or);
        trace!(beta_r, beta_g, beta_b, beta_l, "exponents");

        let log_r = ((r + n) / (20.0 * xi + n)).log10();
        let log_g = ((g + n) / (20.0 * eta + n)).log10();
        let log_b = ((b + n) / (20.0 * zeta + n)).log10();

        // opponent dimensions
        let achromatic = (2.0 / 3.0 * beta_r * e_r * log_r + 1.0 / 3.0 * beta_g * e_g * log_g)
            * 41.69
            / beta_l;
        let tritanopic = beta_r * log_r - 12.0 / 11.0 * beta_g * log_g + 1.0 / 11.0 * beta_b * log_b;
        let protanopic =
            1.0 / 9.0 * beta_r * log_r + 1.0 / 9.0 * beta_g * log_g - 2.0 / 9.0 * beta_b * log_b;
        trace!(achromatic, tritanopic, protanopic, "opponent responses");

        let brightness = 50.0 / beta_l * (2.0 / 3.0 * beta_r + 1.0 / 3.0 * beta_g) + achromatic;
        let brightness_ideal_white = (2.0 / 3.0
            * beta_r
            * 1.758
            * ((100.0 * xi + n) / (20.0 * xi + n)).log10()
            + 1.0 / 3.0 * beta_g * 1.758 * ((100.0 * eta + n) / (20.0 * eta + n)).log10())
            * 41.69
            / beta_l
            + 50.0 / beta_l * 2.0 / 3.0 * beta_r
            + 50.0 / beta_l * 1.0 / 3.0 * beta_g;

        let lightness_achromatic = achromatic + 50.0;
        let lightness_achromatic_normalized = 100.0 * brightness / brightness_ideal_white;

        let hue_rad = protanopic.atan2(tritanopic);
        let hue_angle = hue_rad.to_degrees().rem_euclid(360.0);

        let e_s = chromatic_strength(hue_rad);
        let saturation_rg = 488.93 / beta_l * e_s * tritanopic;
        let saturation_yb = 488.93 / beta_l * e_s * protanopic;
        let saturation = saturation_rg.hypot(saturation_yb);

        let chroma = (lightness_achromatic / 50.0).powf(0.7) * saturation;
        let colorfulness = chroma * brightness_ideal_white / 100.0;

        check_correlates(
            MODEL,
            &[
                ("lightness", lightness_achromatic),
                ("brightness", brightness),
                ("chroma", chroma),
                ("colorfulness", colorfulness),
            ],
        )?;
        Ok(Nayatani95 {
            lightness_achromatic,
            lightness_achromatic_normalized,
            hue_angle,
            chroma,
            saturation,
            brightness,
            brightness_ideal_white,
            colorfulness,
        })
    }
}
