//! Optical density of spectral samples, as measured by a densitometer. Density is the negative
//! base-10 logarithm of reflectance, weighted by the spectral response of one of the standard
//! filters: ANSI Status T red, green, and blue for color work, or the ISO visual response for
//! neutrals. The response tables cover 380 nm to 730 nm, 36 bands of the 50 a
//! [`SpectralColor`](../colors/spectralcolor/struct.SpectralColor.html) carries.

use crate::colors::{check_values, ColorSpace, SpectralColor};
use crate::error::Result;
use crate::spectral_data::wavelength_of;

/// If the spread between the Status T red, green, and blue densities is at most this, the sample is
/// treated as a neutral and read with the visual response.
pub const VISUAL_DENSITY_THRESH: f64 = 0.08;

/// The number of bands the density responses cover.
pub const DENSITY_BANDS: usize = 36;

static DENSITY_CSV: &str = include_str!("../data/density_standards.csv");

#[derive(Debug, Serialize, Deserialize)]
struct DensityRecord {
    wavelength: u16,
    ansi_t_red: f64,
    ansi_t_green: f64,
    ansi_t_blue: f64,
    iso_visual: f64,
}

/// A densitometer response: a name and one weight per band from 380 nm to 730 nm.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityStandard {
    /// A short name for the response, e.g. `"ansi_t_red"`.
    pub name: &'static str,
    /// The weights, starting at 380 nm.
    pub weights: Vec<f64>,
}

fn read_density_standards() -> [DensityStandard; 4] {
    let mut columns = [vec![], vec![], vec![], vec![]];
    let mut reader = csv::Reader::from_reader(DENSITY_CSV.as_bytes());
    for (i, result) in reader.deserialize().enumerate() {
        // we should panic on bad data: these files are supplied by us!
        let record: DensityRecord = match result {
            Ok(record) => record,
            Err(e) => panic!("density standard table could not be read: {}", e),
        };
        if record.wavelength != wavelength_of(FIRST_DENSITY_BAND + i) {
            panic!(
                "density standard table is corrupt: row {} has wavelength {}",
                i, record.wavelength
            );
        }
        columns[0].push(record.ansi_t_red);
        columns[1].push(record.ansi_t_green);
        columns[2].push(record.ansi_t_blue);
        columns[3].push(record.iso_visual);
    }
    let [red, green, blue, visual] = columns;
    [
        DensityStandard {
            name: "ansi_t_red",
            weights: red,
        },
        DensityStandard {
            name: "ansi_t_green",
            weights: green,
        },
        DensityStandard {
            name: "ansi_t_blue",
            weights: blue,
        },
        DensityStandard {
            name: "iso_visual",
            weights: visual,
        },
    ]
}

/// The band index of 380 nm.
const FIRST_DENSITY_BAND: usize = 4;

lazy_static! {
    static ref DENSITY_STANDARDS: [DensityStandard; 4] = read_density_standards();
    /// ANSI Status T, red filter.
    pub static ref ANSI_STATUS_T_RED: DensityStandard = DENSITY_STANDARDS[0].clone();
    /// ANSI Status T, green filter.
    pub static ref ANSI_STATUS_T_GREEN: DensityStandard = DENSITY_STANDARDS[1].clone();
    /// ANSI Status T, blue filter.
    pub static ref ANSI_STATUS_T_BLUE: DensityStandard = DENSITY_STANDARDS[2].clone();
    /// The ISO visual response.
    pub static ref ISO_VISUAL: DensityStandard = DENSITY_STANDARDS[3].clone();
}

/// The density of a sample under one response: -log10(Σ sample · weight / Σ weight). Fails if the
/// sample doesn't have exactly one finite value per band.
pub fn ansi_density(color: &SpectralColor, standard: &DensityStandard) -> Result<f64> {
    check_values(ColorSpace::Spectral, &color.samples)?;
    let samples = &color.samples[FIRST_DENSITY_BAND..FIRST_DENSITY_BAND + DENSITY_BANDS];
    let weighted: f64 = samples
        .iter()
        .zip(&standard.weights)
        .map(|(s, w)| s * w)
        .sum();
    let total: f64 = standard.weights.iter().sum();
    Ok(-(weighted / total).log10())
}

/// The density an automatic densitometer would report: the visual density for near-neutral samples,
/// otherwise the largest of the Status T red, green, and blue densities.
pub fn auto_density(color: &SpectralColor) -> Result<f64> {
    let red = ansi_density(color, &ANSI_STATUS_T_RED)?;
    let green = ansi_density(color, &ANSI_STATUS_T_GREEN)?;
    let blue = ansi_density(color, &ANSI_STATUS_T_BLUE)?;
    let max = red.max(green).max(blue);
    let min = red.min(green).min(blue);
    if max - min <= VISUAL_DENSITY_THRESH {
        ansi_density(color, &ISO_VISUAL)
    } else {
        Ok(max)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use crate::colors::spectralcolor::tests::reference_sample;
    use crate::spectral_data::SPECTRAL_BANDS;

    #[test]
    fn test_tables_cover_visible_range() {
        for standard in &[&*ANSI_STATUS_T_RED, &*ISO_VISUAL] {
            assert_eq!(standard.weights.len(), DENSITY_BANDS);
        }
        assert_eq!(ANSI_STATUS_T_BLUE.name, "ansi_t_blue");
    }

    #[test]
    fn test_status_t_densities() {
        let sample = reference_sample();
        assert!((ansi_density(&sample, &ANSI_STATUS_T_RED).unwrap() - 0.84186).abs() <= 1e-4);
        assert!((ansi_density(&sample, &ANSI_STATUS_T_GREEN).unwrap() - 1.11705).abs() <= 1e-4);
        assert!((ansi_density(&sample, &ANSI_STATUS_T_BLUE).unwrap() - 1.23872).abs() <= 1e-4);
        assert!((sample.density_with(&ISO_VISUAL).unwrap() - 0.97877).abs() <= 1e-4);
    }

    #[test]
    fn test_auto_density_picks_max_for_colors() {
        // the spread here is far above the threshold, so blue wins
        assert!((reference_sample().density().unwrap() - 1.23872).abs() <= 1e-4);
    }

    #[test]
    fn test_auto_density_uses_visual_for_neutrals() {
        let gray = SpectralColor::new(vec![0.1; SPECTRAL_BANDS]).unwrap();
        // a flat 10% reflector is density 1 through any filter
        let density = gray.density().unwrap();
        assert!((density - 1.0).abs() <= 1e-9);
        assert!((density - gray.density_with(&ISO_VISUAL).unwrap()).abs() <= 1e-12);
    }

    #[test]
    fn test_short_sample_is_rejected() {
        let short = SpectralColor {
            samples: vec![0.5; 20],
            illuminant: Default::default(),
            observer: Default::default(),
        };
        assert!(short.density().is_err());
        assert!(ansi_density(&short, &ISO_VISUAL).is_err());
    }
}
