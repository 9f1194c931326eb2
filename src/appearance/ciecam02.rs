//! CIECAM02, the CIE's recommended color appearance model (CIE 159:2004), and the modification of
//! Fairchild & Kuo (2007) that brings in Hunt's simultaneous contrast term.
//!
//! # Example
//!
//! ```
//! # use colorimetry::appearance::{Ciecam02, Surround};
//! let cam = Ciecam02::new(
//!     [19.01, 20.0, 21.78],
//!     [95.05, 100.0, 108.88],
//!     20.0,
//!     318.31,
//!     Surround::Average,
//!     false,
//! )
//! .unwrap();
//! assert!((cam.lightness - 41.731).abs() <= 1e-3);
//! ```

use rulinalg::matrix::Matrix;
use tracing::trace;

use super::hunt::adjust_white_for_scc;
use super::{check_correlates, check_finite, check_positive, xyz_inputs, HPE_TRANSFORM_MAT};
use crate::consts::{inv, mul3};
use crate::error::Result;

const MODEL: &str = "CIECAM02";

lazy_static! {
    /// The CAT02 chromatic adaptation transform.
    static ref CAT02_TRANSFORM_MAT: Matrix<f64> = matrix![
        0.7328, 0.4296, -0.1624;
        -0.7036, 1.6975, 0.0061;
        0.0030, 0.0136, 0.9834
    ];
    /// Takes CAT02 responses to Hunt-Pointer-Estévez fundamentals.
    static ref CAT02_TO_HPE: Matrix<f64> = &*HPE_TRANSFORM_MAT * &inv(&CAT02_TRANSFORM_MAT);
}

/// The viewing surround, which fixes the three surround parameters of the model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surround {
    /// Surface colors viewed in a lit room.
    Average,
    /// Television or a monitor in a dim room.
    Dim,
    /// Projection in a dark room.
    Dark,
}

/// The surround parameters themselves, for surrounds between the three standard ones.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurroundParams {
    /// The exponential nonlinearity c.
    pub c: f64,
    /// The chromatic induction factor N_c.
    pub n_c: f64,
    /// The maximum degree of adaptation F.
    pub f: f64,
}

impl From<Surround> for SurroundParams {
    fn from(surround: Surround) -> SurroundParams {
        match surround {
            Surround::Average => SurroundParams {
                c: 0.69,
                n_c: 1.0,
                f: 1.0,
            },
            Surround::Dim => SurroundParams {
                c: 0.59,
                n_c: 0.9,
                f: 0.9,
            },
            Surround::Dark => SurroundParams {
                c: 0.525,
                n_c: 0.8,
                f: 0.8,
            },
        }
    }
}

/// The correlates predicted by CIECAM02.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ciecam02 {
    /// Lightness J.
    pub lightness: f64,
    /// Brightness Q.
    pub brightness: f64,
    /// Chroma C.
    pub chroma: f64,
    /// Colorfulness M.
    pub colorfulness: f64,
    /// Saturation s.
    pub saturation: f64,
    /// Hue angle h in degrees, in [0, 360).
    pub hue_angle: f64,
    /// The red-green opponent signal a.
    pub a: f64,
    /// The yellow-blue opponent signal b.
    pub b: f64,
    /// Chroma, in cartesian form.
    pub a_c: f64,
    /// Chroma, in cartesian form.
    pub b_c: f64,
    /// Colorfulness, in cartesian form.
    pub a_m: f64,
    /// Colorfulness, in cartesian form.
    pub b_m: f64,
    /// Saturation, in cartesian form.
    pub a_s: f64,
    /// Saturation, in cartesian form.
    pub b_s: f64,
}

/// The post-adaptation compression, applied symmetrically to negative responses.
fn compress(f_l: f64, v: f64) -> f64 {
    let x = (f_l * v.abs() / 100.0).powf(0.42);
    v.signum() * 400.0 * x / (27.13 + x) + 0.1
}

fn achromatic_response([r, g, b]: [f64; 3], n_bb: f64) -> f64 {
    (2.0 * r + g + b / 20.0 - 0.305) * n_bb
}

impl Ciecam02 {
    /// Evaluates the model.
    ///
    /// - `xyz`: the test sample;
    /// - `xyz_w`: the adopted white;
    /// - `y_b`: the luminance factor of the background, relative to the white's Y;
    /// - `l_a`: the adapting luminance in cd/m², often a fifth of the white's;
    /// - `surround`: a [`Surround`](enum.Surround.html) or explicit
    ///   [`SurroundParams`](struct.SurroundParams.html);
    /// - `discount_illuminant`: whether the illuminant is fully discounted, forcing complete
    ///   adaptation.
    pub fn new<S: Into<SurroundParams>>(
        xyz: [f64; 3],
        xyz_w: [f64; 3],
        y_b: f64,
        l_a: f64,
        surround: S,
        discount_illuminant: bool,
    ) -> Result<Ciecam02> {
        Ciecam02::evaluate(
            xyz,
            xyz_w,
            y_b,
            l_a,
            surround.into(),
            discount_illuminant,
            None,
        )
    }

    /// Evaluates CIECAM02 with the white point first adjusted for simultaneous chromatic contrast
    /// between the stimulus and the background `xyz_b`, with strength `p` (see
    /// [`HuntOptions::p`](struct.HuntOptions.html#structfield.p)). The background's Y doubles as
    /// the background luminance factor.
    pub fn new_m1<S: Into<SurroundParams>>(
        xyz: [f64; 3],
        xyz_w: [f64; 3],
        xyz_b: [f64; 3],
        l_a: f64,
        surround: S,
        discount_illuminant: bool,
        p: f64,
    ) -> Result<Ciecam02> {
        check_finite(MODEL, &xyz_inputs(["x_b", "y_b", "z_b"], xyz_b))?;
        check_finite(MODEL, &[("p", p)])?;
        Ciecam02::evaluate(
            xyz,
            xyz_w,
            xyz_b[1],
            l_a,
            surround.into(),
            discount_illuminant,
            Some((xyz_b, p)),
        )
    }

    fn evaluate(
        xyz: [f64; 3],
        xyz_w: [f64; 3],
        y_b: f64,
        l_a: f64,
        surround: SurroundParams,
        discount_illuminant: bool,
        contrast: Option<([f64; 3], f64)>,
    ) -> Result<Ciecam02> {
        check_finite(MODEL, &xyz_inputs(["x", "y", "z"], xyz))?;
        check_finite(MODEL, &xyz_inputs(["x_w", "y_w", "z_w"], xyz_w))?;
        check_positive(MODEL, "y_w", xyz_w[1])?;
        check_positive(MODEL, "y_b", y_b)?;
        check_positive(MODEL, "l_a", l_a)?;
        check_positive(MODEL, "c", surround.c)?;
        check_finite(MODEL, &[("n_c", surround.n_c), ("f", surround.f)])?;

        let d = if discount_illuminant {
            1.0
        } else {
            surround.f * (1.0 - (1.0 / 3.6) * ((-l_a - 42.0) / 92.0).exp())
        };

        let k = 1.0 / (5.0 * l_a + 1.0);
        let f_l = 0.2 * k.powi(4) * 5.0 * l_a + 0.1 * (1.0 - k.powi(4)).powi(2) * (5.0 * l_a).cbrt();
        let n = y_b / xyz_w[1];
        let n_bb = 0.725 * n.powf(-0.2);
        let n_cb = n_bb;
        let z = 1.48 + n.sqrt();
        trace!(d, f_l, n, n_bb, z, "viewing condition parameters");

        let rgb = mul3(&CAT02_TRANSFORM_MAT, xyz);
        let mut rgb_w = mul3(&CAT02_TRANSFORM_MAT, xyz_w);
        if let Some((xyz_b, p)) = contrast {
            let rgb_b = mul3(&CAT02_TRANSFORM_MAT, xyz_b);
            rgb_w = adjust_white_for_scc(rgb, rgb_b, rgb_w, p);
        }

        let adapt = |v: [f64; 3]| -> [f64; 3] {
            let mut c = [0.0; 3];
            for i in 0..3 {
                c[i] = (100.0 * d / rgb_w[i] + 1.0 - d) * v[i];
            }
            let hpe = mul3(&CAT02_TO_HPE, c);
            [
                compress(f_l, hpe[0]),
                compress(f_l, hpe[1]),
                compress(f_l, hpe[2]),
            ]
        };
        let rgb_a = adapt(rgb);
        let rgb_aw = adapt(rgb_w);
        trace!(?rgb_a, ?rgb_aw, "post-adaptation responses");

        let [r_a, g_a, b_a] = rgb_a;
        let a = r_a - 12.0 * g_a / 11.0 + b_a / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;

        let hue_angle = b.atan2(a).to_degrees().rem_euclid(360.0);
        let e_t = 0.25 * ((hue_angle.to_radians() + 2.0).cos() + 3.8);

        let achromatic = achromatic_response(rgb_a, n_bb);
        let achromatic_w = achromatic_response(rgb_aw, n_bb);
        let lightness = 100.0 * (achromatic / achromatic_w).powf(surround.c * z);
        let brightness =
            (4.0 / surround.c) * (lightness / 100.0).sqrt() * (achromatic_w + 4.0) * f_l.powf(0.25);

        let t = (50000.0 / 13.0) * surround.n_c * n_cb * e_t * a.hypot(b)
            / (r_a + g_a + 21.0 / 20.0 * b_a);
        let chroma = t.powf(0.9) * (lightness / 100.0).sqrt() * (1.64 - 0.29f64.powf(n)).powf(0.73);
        let colorfulness = chroma * f_l.powf(0.25);
        let saturation = 100.0 * (colorfulness / brightness).sqrt();

        check_correlates(
            MODEL,
            &[
                ("lightness", lightness),
                ("brightness", brightness),
                ("chroma", chroma),
                ("saturation", saturation),
            ],
        )?;

        let (sin_h, cos_h) = hue_angle.to_radians().sin_cos();
        Ok(Ciecam02 {
            lightness,
            brightness,
            chroma,
            colorfulness,
            saturation,
            hue_angle,
            a,
            b,
            a_c: chroma * cos_h,
            b_c: chroma * sin_h,
            a_m: colorfulness * cos_h,
            b_m: colorfulness * sin_h,
            a_s: saturation * cos_h,
            b_s: saturation * sin_h,
        })
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use crate::error::ColorError;

    #[test]
    fn test_first_example() {
        let cam = Ciecam02::new(
            [19.31, 23.93, 10.14],
            [98.88, 90.0, 32.03],
            18.0,
            200.0,
            Surround::Average,
            false,
        )
        .unwrap();
        assert!((cam.lightness - 48.07369348682226).abs() <= 1e-6);
        assert!((cam.brightness - 190.35171067121723).abs() <= 1e-6);
        assert!((cam.chroma - 38.82780730063953).abs() <= 1e-6);
        assert!((cam.colorfulness - 38.82780730255383).abs() <= 1e-6);
        assert!((cam.saturation - 45.16406676517355).abs() <= 1e-6);
        assert!((cam.hue_angle - 191.12789768038678).abs() <= 1e-6);
        assert!((cam.a - -0.60243870702776).abs() <= 1e-8);
        assert!((cam.b - -0.11849842635478008).abs() <= 1e-8);
    }

    #[test]
    fn test_second_example() {
        let cam = Ciecam02::new(
            [19.01, 20.0, 21.78],
            [95.05, 100.0, 108.88],
            20.0,
            318.31,
            Surround::Average,
            false,
        )
        .unwrap();
        assert!((cam.lightness - 41.73109113251392).abs() <= 1e-6);
        assert!((cam.brightness - 195.3713259660767).abs() <= 1e-6);
        assert!((cam.chroma - 0.10470775717111917).abs() <= 1e-6);
        assert!((cam.colorfulness - 0.10884217566924054).abs() <= 1e-6);
        assert!((cam.saturation - 2.360305373920601).abs() <= 1e-6);
        assert!((cam.hue_angle - 219.04843265830374).abs() <= 1e-4);
    }

    #[test]
    fn test_cartesian_forms_agree() {
        let cam = Ciecam02::new(
            [19.31, 23.93, 10.14],
            [98.88, 90.0, 32.03],
            18.0,
            200.0,
            Surround::Dim,
            true,
        )
        .unwrap();
        assert!((cam.a_c.hypot(cam.b_c) - cam.chroma).abs() <= 1e-9);
        assert!((cam.a_m.hypot(cam.b_m) - cam.colorfulness).abs() <= 1e-9);
        assert!((cam.a_s.hypot(cam.b_s) - cam.saturation).abs() <= 1e-9);
        let h = cam.b_c.atan2(cam.a_c).to_degrees().rem_euclid(360.0);
        assert!((h - cam.hue_angle).abs() <= 1e-9);
    }

    #[test]
    fn test_white_has_full_lightness() {
        let white = [95.05, 100.0, 108.88];
        let cam = Ciecam02::new(white, white, 20.0, 64.0, Surround::Average, true).unwrap();
        assert!((cam.lightness - 100.0).abs() <= 1e-9);
        // not exactly neutral: the first HPE row sums to 1.00001
        assert!(cam.chroma <= 0.01);
    }

    #[test]
    fn test_explicit_params_match_preset() {
        let xyz = [19.01, 20.0, 21.78];
        let white = [95.05, 100.0, 108.88];
        let preset = Ciecam02::new(xyz, white, 20.0, 318.31, Surround::Dark, false).unwrap();
        let explicit = SurroundParams {
            c: 0.525,
            n_c: 0.8,
            f: 0.8,
        };
        let manual = Ciecam02::new(xyz, white, 20.0, 318.31, explicit, false).unwrap();
        assert_eq!(preset, manual);
    }

    #[test]
    fn test_m1() {
        let cam = Ciecam02::new_m1(
            [19.31, 23.93, 10.14],
            [98.88, 90.0, 32.03],
            [18.0, 18.0, 18.0],
            200.0,
            Surround::Average,
            false,
            0.5,
        )
        .unwrap();
        assert!((cam.hue_angle - 167.58383509735194).abs() <= 1e-6);
        assert!((cam.chroma - 49.96140147358369).abs() <= 1e-6);
        assert!((cam.saturation - 50.38854790508886).abs() <= 1e-6);
        assert!((cam.lightness - 51.45871672769733).abs() <= 1e-6);
        assert!((cam.brightness - 196.775455430132).abs() <= 1e-6);
        assert!((cam.colorfulness - 49.96140147604691).abs() <= 1e-6);
    }

    #[test]
    fn test_bad_viewing_conditions() {
        let white = [95.05, 100.0, 108.88];
        for &(y_b, l_a) in &[(0.0, 318.31), (20.0, 0.0), (20.0, std::f64::NAN)] {
            match Ciecam02::new([19.01, 20.0, 21.78], white, y_b, l_a, Surround::Average, false) {
                Err(ColorError::Domain { model, .. }) => assert_eq!(model, "CIECAM02"),
                other => panic!("unexpected {:?}", other),
            }
        }
    }
}
