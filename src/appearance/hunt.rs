//! Hunt's model, the most complete of the classic appearance models. It accounts for the
//! background, the proxima field, rod (scotopic) responses, and incomplete adaptation, at the
//! price of a lot of inputs. Most of them are optional here and estimated when missing, with a
//! `debug!` line recording each estimate.

use tracing::{debug, trace};

use super::{check_correlates, check_finite, check_positive, xyz_inputs, HPE_TRANSFORM_MAT};
use crate::consts::mul3;
use crate::error::{ColorError, Result};

const MODEL: &str = "Hunt";

/// The optional inputs of the Hunt model. Everything left as `None` is estimated from the required
/// inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuntOptions {
    /// Scotopic luminance of the illuminant. Estimated from the adapting luminance and `cct_w`.
    pub l_as: Option<f64>,
    /// Correlated color temperature of the illuminant, in kelvin. Estimated from the white.
    pub cct_w: Option<f64>,
    /// Chromatic background induction factor. Estimated from the white and background Y.
    pub n_cb: Option<f64>,
    /// Brightness background induction factor. Estimated from the white and background Y.
    pub n_bb: Option<f64>,
    /// The proxima field. Taken to be the background if not given.
    pub xyz_p: Option<[f64; 3]>,
    /// Simultaneous contrast (positive) or assimilation (negative) parameter. Without it the model
    /// ignores simultaneous contrast.
    pub p: Option<f64>,
    /// Whether to model the Helson-Judd effect.
    pub helson_judd: bool,
    /// Whether the observer discounts the illuminant, as for surface colors.
    pub discount_illuminant: bool,
    /// Scotopic response to the stimulus. Must be given together with `s_w`.
    pub s: Option<f64>,
    /// Scotopic response to the reference white. Must be given together with `s`.
    pub s_w: Option<f64>,
}

impl Default for HuntOptions {
    fn default() -> HuntOptions {
        HuntOptions {
            l_as: None,
            cct_w: None,
            n_cb: None,
            n_bb: None,
            xyz_p: None,
            p: None,
            helson_judd: false,
            discount_illuminant: true,
            s: None,
            s_w: None,
        }
    }
}

/// The correlates predicted by the Hunt model.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hunt {
    /// Hue angle h_s in degrees, in [0, 360).
    pub hue_angle: f64,
    /// Chroma C_94.
    pub chroma: f64,
    /// Saturation s.
    pub saturation: f64,
    /// Brightness Q.
    pub brightness: f64,
    /// Colorfulness M_94.
    pub colorfulness: f64,
    /// Lightness J.
    pub lightness: f64,
}

/// The cone response compression.
fn f_n(i: f64) -> f64 {
    40.0 * (i.powf(0.73) / (i.powf(0.73) + 2.0))
}

/// Estimates correlated color temperature from a white's tristimulus values, using the
/// exponential fit of Hernández-Andrés, Lee & Romero (1999).
pub(crate) fn estimate_cct(xyz_w: [f64; 3]) -> f64 {
    let sum = xyz_w[0] + xyz_w[1] + xyz_w[2];
    let x = xyz_w[0] / sum;
    let y = xyz_w[1] / sum;
    let n = (x - 0.3320) / (y - 0.1858);
    -949.86315
        + 6253.80338 * (-n / 0.92159).exp()
        + 28.70599 * (-n / 0.20039).exp()
        + 0.00004 * (-n / 0.07125).exp()
}

/// Adjusts the cone responses of the white for simultaneous chromatic contrast induced by the
/// proxima field `rgb_p` against the background `rgb_b`.
pub(crate) fn adjust_white_for_scc(
    rgb_p: [f64; 3],
    rgb_b: [f64; 3],
    rgb_w: [f64; 3],
    p: f64,
) -> [f64; 3] {
    let mut out = [0.0; 3];
    for i in 0..3 {
        let ratio = rgb_p[i] / rgb_b[i];
        out[i] = rgb_w[i] * ((1.0 - p) * ratio + (1.0 + p) / ratio).sqrt()
            / ((1.0 + p) * ratio + (1.0 - p) / ratio).sqrt();
    }
    out
}

/// Interpolates the eccentricity factor e_s for a hue angle in degrees.
fn eccentricity(hue: f64) -> f64 {
    const HUES: [f64; 4] = [20.14, 90.0, 164.25, 237.53];
    const FACTORS: [f64; 4] = [0.8, 0.7, 1.0, 1.2];
    if hue < HUES[0] {
        return 0.856 - hue / HUES[0] * 0.056;
    }
    if hue > HUES[3] {
        return 0.856 + 0.344 * (360.0 - hue) / (360.0 - HUES[3]);
    }
    let i = HUES.windows(2).position(|w| hue <= w[1]).unwrap_or(2);
    let t = (hue - HUES[i]) / (HUES[i + 1] - HUES[i]);
    FACTORS[i] + t * (FACTORS[i + 1] - FACTORS[i])
}

/// The viewing conditions shared by the stimulus and the white during adaptation.
struct Adaptation {
    f_l: f64,
    l_a: f64,
    xyz_w: [f64; 3],
    xyz_b: [f64; 3],
    xyz_p: [f64; 3],
    p: Option<f64>,
    helson_judd: bool,
    discount_illuminant: bool,
}

impl Adaptation {
    /// The adapted cone responses of `xyz`.
    fn adapt(&self, xyz: [f64; 3]) -> [f64; 3] {
        let rgb = mul3(&HPE_TRANSFORM_MAT, xyz);
        let mut rgb_w = mul3(&HPE_TRANSFORM_MAT, self.xyz_w);
        let y_ratio = self.xyz_b[1] / self.xyz_w[1];
        let sum_w: f64 = rgb_w.iter().sum();
        let cube_root = self.l_a.cbrt();

        let mut f_rgb = [1.0; 3];
        if !self.discount_illuminant {
            for i in 0..3 {
                let h = 3.0 * rgb_w[i] / sum_w;
                f_rgb[i] = (1.0 + cube_root + h) / (1.0 + cube_root + 1.0 / h);
            }
        }

        let mut d_rgb = [0.0; 3];
        if self.helson_judd {
            let green = f_n(y_ratio * self.f_l * f_rgb[1]);
            for i in 0..3 {
                d_rgb[i] = green - f_n(y_ratio * self.f_l * f_rgb[i]);
            }
        }

        // cone bleaching
        let mut rgb_b = [0.0; 3];
        for i in 0..3 {
            rgb_b[i] = 1e7 / (1e7 + 5.0 * self.l_a * (rgb_w[i] / 100.0));
        }

        if let Some(p) = self.p {
            let rgb_p = mul3(&HPE_TRANSFORM_MAT, self.xyz_p);
            rgb_w = adjust_white_for_scc(rgb_p, rgb_b, rgb_w, p);
        }

        let mut rgb_a = [0.0; 3];
        for i in 0..3 {
            rgb_a[i] = 1.0 + rgb_b[i] * (f_n(self.f_l * f_rgb[i] * rgb[i] / rgb_w[i]) + d_rgb[i]);
        }
        trace!(?rgb, ?f_rgb, ?rgb_b, ?rgb_a, "hunt adaptation");
        rgb_a
    }
}

/// The achromatic signal, combining the cone signal `a_a` with the scotopic response.
fn achromatic_signal(l_as: f64, s: f64, s_w: f64, n_bb: f64, a_a: f64) -> f64 {
    let scotopic = 5.0 * l_as / 2.26;
    let j = 0.00001 / (scotopic + 0.00001);
    let f_ls = 3800.0 * j.powi(2) * scotopic
        + 0.2 * (1.0 - j.powi(2)).powf(0.4) * scotopic.powf(1.0 / 6.0);
    let b_s = 0.5 / (1.0 + 0.3 * (scotopic * (s / s_w)).powf(0.3)) + 0.5 / (1.0 + 5.0 * scotopic);
    let a_s = f_n(f_ls * s / s_w) * 3.05 * b_s + 0.3;
    n_bb * (a_a - 1.0 + a_s - 0.3 + (1.0f64 + 0.3 * 0.3).sqrt())
}

/// The hue angle, in degrees, from the adapted cone responses, together with the yellow-blue and
/// red-green opponent signals it came from.
fn opponent([r_a, g_a, b_a]: [f64; 3]) -> (f64, f64, f64) {
    let c1 = r_a - g_a;
    let c2 = g_a - b_a;
    let c3 = b_a - r_a;
    let yb = 0.5 * (c2 - c3) / 4.5;
    let rg = c1 - c2 / 11.0;
    (yb.atan2(rg).to_degrees().rem_euclid(360.0), yb, rg)
}

impl Hunt {
    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_b`: the background;
    /// - `xyz_w`: the reference white;
    /// - `l_a`: the adapting luminance, in cd/m²;
    /// - `n_c`: the chromatic surround induction factor;
    /// - `n_b`: the brightness surround induction factor;
    /// - `options`: everything else, estimated when absent.
    pub fn new(
        xyz: [f64; 3],
        xyz_b: [f64; 3],
        xyz_w: [f64; 3],
        l_a: f64,
        n_c: f64,
        n_b: f64,
        options: &HuntOptions,
    ) -> Result<Hunt> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_b", "y_b", "z_b"], xyz_b))?;
        check_finite(MODEL, &xyz_inputs(["x_w", "y_w", "z_w"], xyz_w))?;
        check_finite(MODEL, &[("n_c", n_c)])?;
        check_positive(MODEL, "l_a", l_a)?;
        check_positive(MODEL, "n_b", n_b)?;
        check_positive(MODEL, "y_w", xyz_w[1])?;
        check_positive(MODEL, "y_b", xyz_b[1])?;

        let y_w = xyz_w[1];
        let y_b = xyz_b[1];

        let (s, s_w) = match (options.s, options.s_w) {
            (Some(s), Some(s_w)) => (s, s_w),
            (None, None) => {
                debug!("approximated scotopic responses with photopic luminance");
                (xyz[1], y_w)
            }
            _ => {
                return Err(ColorError::domain(
                    MODEL,
                    "either both scotopic responses (s, s_w) must be given or neither",
                ))
            }
        };
        check_positive(MODEL, "s_w", s_w)?;

        let xyz_p = match options.xyz_p {
            Some(xyz_p) => xyz_p,
            None => {
                debug!("approximated proxima field with background");
                xyz_b
            }
        };

        let induction = 0.725 * (y_w / y_b).powf(0.2);
        let n_cb = options.n_cb.unwrap_or_else(|| {
            debug!(n_cb = induction, "approximated chromatic background induction");
            induction
        });
        let n_bb = options.n_bb.unwrap_or_else(|| {
            debug!(n_bb = induction, "approximated brightness background induction");
            induction
        });

        let l_as = match options.l_as {
            Some(l_as) => l_as,
            None => {
                let cct_w = match options.cct_w {
                    Some(cct) => cct,
                    None => {
                        let cct = estimate_cct(xyz_w);
                        debug!(cct_w = cct, "approximated correlated color temperature");
                        cct
                    }
                };
                let l_as = 2.26 * l_a * (cct_w / 4000.0 - 0.4).cbrt();
                debug!(l_as, "approximated scotopic luminance");
                l_as
            }
        };
        check_positive(MODEL, "l_as", l_as)?;

        if options.p.is_none() {
            debug!("no p given: simultaneous chromatic contrast is ignored");
        }

        let k = 1.0 / (5.0 * l_a + 1.0);
        let f_l = 0.2 * k.powi(4) * (5.0 * l_a) + 0.1 * (1.0 - k.powi(4)).powi(2) * (5.0 * l_a).cbrt();
        trace!(k, f_l, "luminance adaptation");

        let adaptation = Adaptation {
            f_l,
            l_a,
            xyz_w,
            xyz_b,
            xyz_p,
            p: options.p,
            helson_judd: options.helson_judd,
            discount_illuminant: options.discount_illuminant,
        };
        let rgb_a = adaptation.adapt(xyz);
        let rgb_aw = adaptation.adapt(xyz_w);

        let a_a = 2.0 * rgb_a[0] + rgb_a[1] + rgb_a[2] / 20.0 - 3.05 + 1.0;
        let a_aw = 2.0 * rgb_aw[0] + rgb_aw[1] + rgb_aw[2] / 20.0 - 3.05 + 1.0;

        let (hue_angle, yb, rg) = opponent(rgb_a);
        let (hue_angle_w, yb_w, rg_w) = opponent(rgb_aw);

        let f_t = l_a / (l_a + 0.1);
        let colorfulness_of = |hue: f64, yb: f64, rg: f64| -> f64 {
            let e_s = eccentricity(hue);
            let m_yb = 100.0 * yb * (e_s * (10.0 / 13.0) * n_c * n_cb * f_t);
            let m_rg = 100.0 * rg * (e_s * (10.0 / 13.0) * n_c * n_cb);
            m_rg.hypot(m_yb)
        };
        let m = colorfulness_of(hue_angle, yb, rg);
        let m_w = colorfulness_of(hue_angle_w, yb_w, rg_w);

        let saturation = 50.0 * m / (rgb_a[0] + rgb_a[1] + rgb_a[2]);

        let a = achromatic_signal(l_as, s, s_w, n_bb, a_a);
        let a_w = achromatic_signal(l_as, s_w, s_w, n_bb, a_aw);
        trace!(a, a_w, "achromatic signals");

        let n1 = (7.0 * a_w).sqrt() / (5.33 * n_b.powf(0.13));
        let n2 = 7.0 * a_w * n_b.powf(0.362) / 200.0;
        let brightness = (7.0 * (a + m / 100.0)).powf(0.6) * n1 - n2;
        let brightness_w = (7.0 * (a_w + m_w / 100.0)).powf(0.6) * n1 - n2;

        let z = 1.0 + (y_b / y_w).sqrt();
        let lightness = 100.0 * (brightness / brightness_w).powf(z);

        let chroma = 2.44
            * saturation.powf(0.69)
            * (brightness / brightness_w).powf(y_b / y_w)
            * (1.64 - 0.29f64.powf(y_b / y_w));
        let colorfulness = f_l.powf(0.15) * chroma;

        check_correlates(
            MODEL,
            &[
                ("brightness", brightness),
                ("lightness", lightness),
                ("chroma", chroma),
                ("colorfulness", colorfulness),
            ],
        )?;
        Ok(Hunt {
            hue_angle,
            chroma,
            saturation,
            brightness,
            colorfulness,
            lightness,
        })
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn evaluate(options: &HuntOptions) -> Result<Hunt> {
        Hunt::new(
            [19.01, 20.0, 21.78],
            [95.05, 20.0, 108.88],
            [95.05, 100.0, 108.88],
            318.31,
            1.0,
            75.0,
            options,
        )
    }

    #[test]
    fn test_fairchild_example() {
        let options = HuntOptions {
            cct_w: Some(6504.0),
            ..HuntOptions::default()
        };
        let m = evaluate(&options).unwrap();
        assert!((m.hue_angle - 269.2737594461446).abs() <= 1e-6);
        assert!((m.chroma - 0.15576020036099678).abs() <= 1e-8);
        assert!((m.saturation - 0.027469480299594867).abs() <= 1e-8);
        assert!((m.brightness - 31.915199822022984).abs() <= 1e-6);
        assert!((m.colorfulness - 0.15942172774297325).abs() <= 1e-8);
        assert!((m.lightness - 42.12373685449783).abs() <= 1e-6);
    }

    #[test]
    fn test_one_scotopic_response_is_an_error() {
        let options = HuntOptions {
            s: Some(20.0),
            ..HuntOptions::default()
        };
        match evaluate(&options) {
            Err(ColorError::Domain { model, .. }) => assert_eq!(model, "Hunt"),
            other => panic!("unexpected {:?}", other),
        }
        let both = HuntOptions {
            s: Some(20.0),
            s_w: Some(100.0),
            cct_w: Some(6504.0),
            ..HuntOptions::default()
        };
        // equal to the photopic defaults, so the result is unchanged
        let explicit = evaluate(&both).unwrap();
        let implicit = evaluate(&HuntOptions {
            cct_w: Some(6504.0),
            ..HuntOptions::default()
        })
        .unwrap();
        assert_eq!(explicit, implicit);
    }

    #[test]
    fn test_estimated_cct() {
        // the fit puts D65 a little under its nominal 6504 K
        let cct = estimate_cct([95.047, 100.0, 108.883]);
        assert!((cct - 6343.331).abs() <= 1e-2);
        assert!(evaluate(&HuntOptions::default()).is_ok());
    }

    #[test]
    fn test_eccentricity_is_continuous() {
        for &h in &[20.14, 90.0, 164.25, 237.53] {
            assert!((eccentricity(h - 1e-9) - eccentricity(h + 1e-9)).abs() <= 1e-6);
        }
        assert!((eccentricity(90.0) - 0.7).abs() <= 1e-12);
        // the two ends of the table meet at 0°/360°
        assert!((eccentricity(0.0) - eccentricity(360.0)).abs() <= 1e-12);
    }

    #[test]
    fn test_nonpositive_adapting_luminance() {
        let err = Hunt::new(
            [19.01, 20.0, 21.78],
            [95.05, 20.0, 108.88],
            [95.05, 100.0, 108.88],
            0.0,
            1.0,
            75.0,
            &HuntOptions::default(),
        );
        assert!(err.is_err());
    }
}
