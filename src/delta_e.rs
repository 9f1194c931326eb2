//! Color difference formulas. Each takes two colors in CIELAB and returns a single non-negative
//! number, "Delta E", where roughly 1 is the smallest difference a trained observer can see. The
//! formulas get progressively better at matching perception, and progressively more involved:
//!
//! - CIE 1976 is plain Euclidean distance in CIELAB;
//! - CIE 1994 weights chroma and hue differences by the chroma of the reference color;
//! - CIEDE2000 adds lightness weighting, a hue-dependent term, and a correction for blues;
//! - CMC l:c, from the Society of Dyers and Colourists, is the textile industry's standard.
//!
//! CIE 1994 and CMC are not symmetric: the first argument is the reference (or standard) color and
//! the second the sample being compared against it.

use std::fmt;
use std::str::FromStr;

use crate::colors::{CIELABColor, Color};
use crate::error::{ColorError, Result};

/// The parametric factors of CIE 1994. The defaults are the graphic arts values.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cie1994Weights {
    /// Lightness weighting.
    pub k_l: f64,
    /// Chroma weighting.
    pub k_c: f64,
    /// Hue weighting.
    pub k_h: f64,
    /// How strongly the chroma term scales with the reference chroma.
    pub k_1: f64,
    /// How strongly the hue term scales with the reference chroma.
    pub k_2: f64,
}

impl Default for Cie1994Weights {
    fn default() -> Cie1994Weights {
        Cie1994Weights {
            k_l: 1.0,
            k_c: 1.0,
            k_h: 1.0,
            k_1: 0.045,
            k_2: 0.015,
        }
    }
}

impl Cie1994Weights {
    /// The weights recommended for textiles.
    pub fn textiles() -> Cie1994Weights {
        Cie1994Weights {
            k_l: 2.0,
            k_1: 0.048,
            k_2: 0.014,
            ..Cie1994Weights::default()
        }
    }
}

/// The parametric factors of CIEDE2000, all 1 by default.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cie2000Weights {
    /// Lightness weighting.
    pub k_l: f64,
    /// Chroma weighting.
    pub k_c: f64,
    /// Hue weighting.
    pub k_h: f64,
}

impl Default for Cie2000Weights {
    fn default() -> Cie2000Weights {
        Cie2000Weights {
            k_l: 1.0,
            k_c: 1.0,
            k_h: 1.0,
        }
    }
}

/// The l:c ratio of CMC. The default 2:1 is used for acceptability; 1:1 is used for
/// perceptibility.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmcWeights {
    /// Lightness weighting.
    pub pl: f64,
    /// Chroma weighting.
    pub pc: f64,
}

impl Default for CmcWeights {
    fn default() -> CmcWeights {
        CmcWeights { pl: 2.0, pc: 1.0 }
    }
}

impl CmcWeights {
    /// CMC 1:1.
    pub fn perceptibility() -> CmcWeights {
        CmcWeights { pl: 1.0, pc: 1.0 }
    }
}

/// Weight overrides for the formulas picked at runtime. Each formula reads only its own field, so
/// one value can be reused across modes.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaEWeights {
    /// Used by [`DeltaEMode::Cie1994`](enum.DeltaEMode.html#variant.Cie1994).
    pub cie1994: Cie1994Weights,
    /// Used by [`DeltaEMode::Cie2000`](enum.DeltaEMode.html#variant.Cie2000).
    pub cie2000: Cie2000Weights,
    /// Used by [`DeltaEMode::Cmc`](enum.DeltaEMode.html#variant.Cmc).
    pub cmc: CmcWeights,
}

impl DeltaEWeights {
    /// Replaces the CIE 1994 weights.
    pub fn with_cie1994(mut self, weights: Cie1994Weights) -> DeltaEWeights {
        self.cie1994 = weights;
        self
    }

    /// Replaces the CIEDE2000 weights.
    pub fn with_cie2000(mut self, weights: Cie2000Weights) -> DeltaEWeights {
        self.cie2000 = weights;
        self
    }

    /// Replaces the CMC l:c ratio.
    pub fn with_cmc(mut self, weights: CmcWeights) -> DeltaEWeights {
        self.cmc = weights;
        self
    }
}

/// Which formula to use when the choice is made at runtime. Weights other than the defaults are
/// passed separately, as [`DeltaEWeights`](struct.DeltaEWeights.html).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeltaEMode {
    /// CIE 1976.
    Cie1976,
    /// CIE 1994.
    Cie1994,
    /// CIEDE2000.
    Cie2000,
    /// CMC l:c.
    Cmc,
}

impl DeltaEMode {
    /// The lowercase name, as accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            DeltaEMode::Cie1976 => "cie1976",
            DeltaEMode::Cie1994 => "cie1994",
            DeltaEMode::Cie2000 => "cie2000",
            DeltaEMode::Cmc => "cmc",
        }
    }

    /// Evaluates the formula with its default weights.
    pub fn eval(self, reference: &CIELABColor, sample: &CIELABColor) -> f64 {
        self.eval_with(reference, sample, &DeltaEWeights::default())
    }

    /// Evaluates the formula with the matching weights from `weights`.
    pub fn eval_with(
        self,
        reference: &CIELABColor,
        sample: &CIELABColor,
        weights: &DeltaEWeights,
    ) -> f64 {
        match self {
            DeltaEMode::Cie1976 => delta_e_cie1976(reference, sample),
            DeltaEMode::Cie1994 => delta_e_cie1994(reference, sample, weights.cie1994),
            DeltaEMode::Cie2000 => delta_e_cie2000(reference, sample, weights.cie2000),
            DeltaEMode::Cmc => delta_e_cmc(reference, sample, weights.cmc),
        }
    }
}

impl fmt::Display for DeltaEMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DeltaEMode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<DeltaEMode> {
        match s.trim().to_lowercase().as_str() {
            "cie1976" => Ok(DeltaEMode::Cie1976),
            "cie1994" => Ok(DeltaEMode::Cie1994),
            "cie2000" => Ok(DeltaEMode::Cie2000),
            "cmc" => Ok(DeltaEMode::Cmc),
            _ => Err(ColorError::InvalidDeltaEMode(s.to_string())),
        }
    }
}

/// The hue difference ΔH from the a, b and chroma differences. Rounding can push the radicand just
/// below zero for nearly identical hues, which counts as no hue difference.
fn hue_difference(delta_a: f64, delta_b: f64, delta_c: f64) -> f64 {
    (delta_a.powi(2) + delta_b.powi(2) - delta_c.powi(2))
        .max(0.0)
        .sqrt()
}

/// The hue angle of (a, b) in degrees, in [0, 360). The neutral axis has hue 0.
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

/// CIE 1976: Euclidean distance in CIELAB.
pub fn delta_e_cie1976(c1: &CIELABColor, c2: &CIELABColor) -> f64 {
    ((c1.l - c2.l).powi(2) + (c1.a - c2.a).powi(2) + (c1.b - c2.b).powi(2)).sqrt()
}

/// CIE 1994, with `c1` as the reference color.
pub fn delta_e_cie1994(c1: &CIELABColor, c2: &CIELABColor, weights: Cie1994Weights) -> f64 {
    let c_1 = c1.a.hypot(c1.b);
    let c_2 = c2.a.hypot(c2.b);

    let s_l = 1.0;
    let s_c = 1.0 + weights.k_1 * c_1;
    let s_h = 1.0 + weights.k_2 * c_1;

    let delta_l = c1.l - c2.l;
    let delta_c = c_1 - c_2;
    let delta_h = hue_difference(c1.a - c2.a, c1.b - c2.b, delta_c);

    ((delta_l / (weights.k_l * s_l)).powi(2)
        + (delta_c / (weights.k_c * s_c)).powi(2)
        + (delta_h / (weights.k_h * s_h)).powi(2))
    .sqrt()
}

/// CIEDE2000. Symmetric in its arguments.
pub fn delta_e_cie2000(c1: &CIELABColor, c2: &CIELABColor, weights: Cie2000Weights) -> f64 {
    // 25^7
    const POW25_7: f64 = 6_103_515_625.0;

    let c_mean = (c1.a.hypot(c1.b) + c2.a.hypot(c2.b)) / 2.0;
    let g = 0.5 * (1.0 - (c_mean.powi(7) / (c_mean.powi(7) + POW25_7)).sqrt());

    let a1p = (1.0 + g) * c1.a;
    let a2p = (1.0 + g) * c2.a;
    let c1p = a1p.hypot(c1.b);
    let c2p = a2p.hypot(c2.b);
    let h1p = hue_angle(a1p, c1.b);
    let h2p = hue_angle(a2p, c2.b);
    let achromatic = c1p * c2p == 0.0;

    let delta_hp = if achromatic {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };

    let delta_lp = c2.l - c1.l;
    let delta_cp = c2p - c1p;
    let delta_big_hp = 2.0 * (c1p * c2p).sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let l_mean = (c1.l + c2.l) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;
    let hp_mean = if achromatic {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (hp_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_mean).to_radians().cos()
        + 0.32 * (3.0 * hp_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_mean - 63.0).to_radians().cos();

    let l_dev = (l_mean - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_dev / (20.0 + l_dev).sqrt();
    let s_c = 1.0 + 0.045 * cp_mean;
    let s_h = 1.0 + 0.015 * cp_mean * t;

    // the rotation term, which only matters for blues
    let delta_theta = 30.0 * (-((hp_mean - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * (cp_mean.powi(7) / (cp_mean.powi(7) + POW25_7)).sqrt();
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let term_l = delta_lp / (weights.k_l * s_l);
    let term_c = delta_cp / (weights.k_c * s_c);
    let term_h = delta_big_hp / (weights.k_h * s_h);
    (term_l.powi(2) + term_c.powi(2) + term_h.powi(2) + r_t * term_c * term_h).sqrt()
}

/// CMC l:c, with `c1` as the standard color.
pub fn delta_e_cmc(c1: &CIELABColor, c2: &CIELABColor, weights: CmcWeights) -> f64 {
    let c_1 = c1.a.hypot(c1.b);
    let c_2 = c2.a.hypot(c2.b);
    let h_1 = c1.b.atan2(c1.a).to_degrees().rem_euclid(360.0);

    let f = (c_1.powi(4) / (c_1.powi(4) + 1900.0)).sqrt();
    let t = if (164.0..=345.0).contains(&h_1) {
        0.56 + (0.2 * (h_1 + 168.0).to_radians().cos()).abs()
    } else {
        0.36 + (0.4 * (h_1 + 35.0).to_radians().cos()).abs()
    };

    let s_l = if c1.l < 16.0 {
        0.511
    } else {
        0.040975 * c1.l / (1.0 + 0.01765 * c1.l)
    };
    let s_c = 0.0638 * c_1 / (1.0 + 0.0131 * c_1) + 0.638;
    let s_h = s_c * (f * t + 1.0 - f);

    let delta_l = c1.l - c2.l;
    let delta_c = c_1 - c_2;
    let delta_h = hue_difference(c1.a - c2.a, c1.b - c2.b, delta_c);

    ((delta_l / (weights.pl * s_l)).powi(2)
        + (delta_c / (weights.pc * s_c)).powi(2)
        + (delta_h / s_h).powi(2))
    .sqrt()
}

/// The difference between two dynamically typed colors, which must both be CIELAB. Convert them
/// first if they aren't.
pub fn delta_e(reference: &Color, sample: &Color, mode: DeltaEMode) -> Result<f64> {
    delta_e_with(reference, sample, mode, &DeltaEWeights::default())
}

/// Like [`delta_e`](fn.delta_e.html), with weights other than the defaults.
pub fn delta_e_with(
    reference: &Color,
    sample: &Color,
    mode: DeltaEMode,
    weights: &DeltaEWeights,
) -> Result<f64> {
    let reference: &CIELABColor = reference.get()?;
    let sample: &CIELABColor = sample.get()?;
    Ok(mode.eval_with(reference, sample, weights))
}
