//! This module implements spectral colors: a measurement of how much light a surface reflects (or
//! transmits) at each wavelength, as a spectrophotometer reports it. Every other color space is a
//! summary of this one, and going from spectral to XYZ is the only conversion that needs no
//! assumptions beyond the illuminant and observer.
//!
//! Samples are taken from 340 nm to 830 nm in 10 nm steps, 50 in all. Instruments that only
//! measure 380-730 nm leave the outer bands at zero.

use super::{check_values, ColorSpace, ColorType, XYZColor};
use crate::density::{ansi_density, auto_density, DensityStandard};
use crate::error::{ColorError, Result};
use crate::illuminants::{Illuminant, Observer};
use crate::spectral_data::{
    band_of, color_matching_functions, reference_illuminant, SPECTRAL_BANDS,
};

/// A spectral reflectance or transmittance curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralColor {
    /// One value per band, nominally between 0 and 1, starting at 340 nm.
    pub samples: Vec<f64>,
    /// The illuminant to integrate under.
    pub illuminant: Illuminant,
    /// The observer to integrate with.
    pub observer: Observer,
}

impl SpectralColor {
    /// Makes a new spectral color from 50 samples, integrated under D50 with the 2° observer by
    /// default.
    pub fn new(samples: Vec<f64>) -> Result<SpectralColor> {
        check_values(ColorSpace::Spectral, &samples)?;
        Ok(SpectralColor {
            samples,
            illuminant: Illuminant::default(),
            observer: Observer::default(),
        })
    }

    /// Returns the same curve, to be integrated under the given illuminant.
    pub fn with_illuminant(self, illuminant: Illuminant) -> SpectralColor {
        SpectralColor { illuminant, ..self }
    }

    /// Returns the same curve, to be integrated with the given observer.
    pub fn with_observer(self, observer: Observer) -> SpectralColor {
        SpectralColor { observer, ..self }
    }

    /// The white point of this color's illuminant and observer, with Y = 100.
    pub fn white_point(&self) -> [f64; 3] {
        self.illuminant.white_point(self.observer)
    }

    /// The sample at the given wavelength in nanometers, if it is one of the 50 measured bands.
    pub fn sample(&self, wavelength: u16) -> Option<f64> {
        band_of(wavelength).and_then(|band| self.samples.get(band).copied())
    }

    /// Integrates the curve against the observer's color matching functions under the color's
    /// illuminant, or under `illuminant_override` if one is given. The result is on the 0-1 scale
    /// (a perfect reflector has Y = 1) and keeps the color's illuminant and observer labels.
    ///
    /// Only illuminants with a tabulated spectral power distribution can be integrated under
    /// without an override; any other fails with `InvalidIlluminant`.
    pub fn to_xyz(&self, illuminant_override: Option<&[f64]>) -> Result<XYZColor> {
        check_values(ColorSpace::Spectral, &self.samples)?;
        let spd = match illuminant_override {
            Some(spd) if spd.len() == SPECTRAL_BANDS => spd,
            Some(spd) => {
                return Err(ColorError::InvalidIlluminant(format!(
                    "illuminant override has {} bands, expected {}",
                    spd.len(),
                    SPECTRAL_BANDS
                )))
            }
            None => reference_illuminant(self.illuminant)?,
        };
        let cmf = color_matching_functions(self.observer);

        // the normalizing denominator is shared by all three coordinates
        let denom: f64 = cmf.y.iter().zip(spd).map(|(y, i)| y * i).sum();
        let integrate = |bar: &[f64]| -> f64 {
            self.samples
                .iter()
                .zip(spd)
                .zip(bar)
                .map(|((s, i), b)| s * i * b)
                .sum::<f64>()
                / denom
        };
        Ok(XYZColor {
            x: integrate(&cmf.x),
            y: integrate(&cmf.y),
            z: integrate(&cmf.z),
            illuminant: self.illuminant,
            observer: self.observer,
        })
    }

    /// The density of the sample, choosing between the ISO visual and ANSI Status T responses the
    /// way a densitometer's automatic mode does.
    pub fn density(&self) -> Result<f64> {
        auto_density(self)
    }

    /// The density of the sample under a specific density standard.
    pub fn density_with(&self, standard: &DensityStandard) -> Result<f64> {
        ansi_density(self, standard)
    }
}

impl ColorType for SpectralColor {
    const SPACE: ColorSpace = ColorSpace::Spectral;

    fn values(&self) -> Vec<f64> {
        self.samples.clone()
    }

    fn from_values(values: &[f64]) -> Result<SpectralColor> {
        SpectralColor::new(values.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #[allow(unused_imports)]
    use super::*;

    /// A real measurement of a tan-ish surface, 380-730 nm.
    pub(crate) fn reference_sample() -> SpectralColor {
        let measured = [
            0.0600, 0.0600, 0.0641, 0.0654, 0.0645, 0.0605, 0.0562, 0.0543, 0.0537, 0.0541, 0.0559,
            0.0603, 0.0651, 0.0680, 0.0705, 0.0736, 0.0772, 0.0809, 0.0870, 0.0990, 0.1128, 0.1251,
            0.1360, 0.1439, 0.1511, 0.1590, 0.1688, 0.1828, 0.1996, 0.2187, 0.2397, 0.2618, 0.2852,
            0.2500, 0.2400, 0.2300,
        ];
        let mut samples = vec![0.0; SPECTRAL_BANDS];
        samples[4..40].copy_from_slice(&measured);
        SpectralColor::new(samples).unwrap()
    }

    #[test]
    fn test_spectral_to_xyz() {
        let xyz = reference_sample().to_xyz(None).unwrap();
        assert!((xyz.x - 0.11519).abs() <= 1e-3);
        assert!((xyz.y - 0.09947).abs() <= 1e-3);
        assert!((xyz.z - 0.04706).abs() <= 1e-3);
        assert_eq!(xyz.illuminant, Illuminant::D50);
    }

    #[test]
    fn test_perfect_reflector_is_white() {
        let white = SpectralColor::new(vec![1.0; SPECTRAL_BANDS])
            .unwrap()
            .with_illuminant(Illuminant::D65)
            .with_observer(Observer::TenDegree);
        let xyz = white.to_xyz(None).unwrap();
        let expected = white.white_point();
        assert!((xyz.y - 1.0).abs() <= 1e-12);
        assert!((xyz.x * 100.0 - expected[0]).abs() <= 0.15);
        assert!((xyz.z * 100.0 - expected[2]).abs() <= 0.15);
    }

    #[test]
    fn test_untabulated_illuminant() {
        let sample = reference_sample().with_illuminant(Illuminant::F2);
        match sample.to_xyz(None) {
            Err(ColorError::InvalidIlluminant(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        // an override makes it work, and keeps the label
        let flat = vec![100.0; SPECTRAL_BANDS];
        let xyz = sample.to_xyz(Some(flat.as_slice())).unwrap();
        assert_eq!(xyz.illuminant, Illuminant::F2);
        assert!(sample.to_xyz(Some(&flat[..10])).is_err());
    }

    #[test]
    fn test_sample_lookup() {
        let sample = reference_sample();
        assert_eq!(sample.sample(380), Some(0.0600));
        assert_eq!(sample.sample(730), Some(0.2300));
        assert_eq!(sample.sample(385), None);
        assert_eq!(sample.sample(900), None);
    }

    #[test]
    fn test_wrong_band_count() {
        match SpectralColor::from_values(&[0.5; 10]) {
            Err(ColorError::MissingValue {
                expected, found, ..
            }) => assert_eq!((expected, found), (50, 10)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_deserialized_short_curve() {
        let json = r#"{"samples": [0.5, 0.5], "illuminant": "D65", "observer": "TwoDegree"}"#;
        let short: SpectralColor = serde_json::from_str(json).unwrap();
        assert_eq!(short.sample(830), None);
        match short.to_xyz(None) {
            Err(ColorError::MissingValue { found, .. }) => assert_eq!(found, 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
