//! This module provides an enum of the CIE standard illuminants supported by the crate, an enum of
//! the two CIE standard observers, and a table of white point values for every combination of the
//! two. The values come from the ASTM E308 tables, which are copied from the CIE standard itself.
//! They are normalized so that the Y (luminance) value is 100: every formula that divides by a
//! reference white (CIELAB, CIELUV, chromatic adaptation) uses this scale.

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, Result};

/// A listing of the supported CIE standard illuminants, standards that describe a particular set of
/// lighting conditions. The most common ones for computers are D50 and D65, differing kinds of
/// daylight; A is incandescent light, E is the equal-energy illuminant, and the F series are
/// fluorescent lamps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Illuminant {
    /// Incandescent (tungsten) light, 2856 K.
    A,
    /// Direct noon sunlight, now deprecated by the CIE.
    B,
    /// Average daylight, deprecated in favor of D65.
    C,
    /// Horizon light, 5003 K. The graphic arts standard.
    D50,
    /// Mid-morning or mid-afternoon daylight, 5503 K.
    D55,
    /// Noon daylight, 6504 K. The white point of sRGB and most displays.
    D65,
    /// North sky daylight, 7504 K.
    D75,
    /// The equal-energy illuminant.
    E,
    /// Cool white fluorescent.
    F2,
    /// Broadband daylight fluorescent.
    F7,
    /// Narrow tri-band fluorescent.
    F11,
}

/// An array of illuminants, in the same order as the enum definition and the white point table.
pub static ILLUMINANTS: [Illuminant; 11] = [
    Illuminant::A,
    Illuminant::B,
    Illuminant::C,
    Illuminant::D50,
    Illuminant::D55,
    Illuminant::D65,
    Illuminant::D75,
    Illuminant::E,
    Illuminant::F2,
    Illuminant::F7,
    Illuminant::F11,
];

/// The CIE standard observers: the color matching functions were measured once with a 2° field of
/// view (1931) and again with a 10° field (1964). The choice changes both the white points and the
/// spectral integration tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observer {
    /// The CIE 1931 2° standard observer.
    TwoDegree,
    /// The CIE 1964 10° supplementary standard observer.
    TenDegree,
}

/// White points under the 2° observer, in the order of [`ILLUMINANTS`](static.ILLUMINANTS.html).
pub static WHITE_POINTS_2: [[f64; 3]; 11] = [
    [109.850, 100.000, 35.585],
    [99.072, 100.000, 85.223],
    [98.074, 100.000, 118.232],
    [96.422, 100.000, 82.521],
    [95.682, 100.000, 92.149],
    [95.047, 100.000, 108.883],
    [94.972, 100.000, 122.638],
    [100.000, 100.000, 100.000],
    [99.186, 100.000, 67.393],
    [95.041, 100.000, 108.747],
    [100.962, 100.000, 64.350],
];

/// White points under the 10° observer, in the order of [`ILLUMINANTS`](static.ILLUMINANTS.html).
pub static WHITE_POINTS_10: [[f64; 3]; 11] = [
    [111.144, 100.000, 35.200],
    [99.178, 100.000, 84.349],
    [97.285, 100.000, 116.145],
    [96.720, 100.000, 81.427],
    [95.799, 100.000, 90.926],
    [94.811, 100.000, 107.304],
    [94.416, 100.000, 120.641],
    [100.000, 100.000, 100.000],
    [103.279, 100.000, 69.027],
    [95.792, 100.000, 107.686],
    [103.863, 100.000, 65.607],
];

impl Illuminant {
    fn index(self) -> usize {
        match self {
            Illuminant::A => 0,
            Illuminant::B => 1,
            Illuminant::C => 2,
            Illuminant::D50 => 3,
            Illuminant::D55 => 4,
            Illuminant::D65 => 5,
            Illuminant::D75 => 6,
            Illuminant::E => 7,
            Illuminant::F2 => 8,
            Illuminant::F7 => 9,
            Illuminant::F11 => 10,
        }
    }

    /// Gets the XYZ coordinates of the white point of the illuminant as seen by the given observer,
    /// normalized so that Y is 100.
    pub fn white_point(self, observer: Observer) -> [f64; 3] {
        match observer {
            Observer::TwoDegree => WHITE_POINTS_2[self.index()],
            Observer::TenDegree => WHITE_POINTS_10[self.index()],
        }
    }

    /// The lowercase short code of the illuminant, e.g. `"d65"`.
    pub fn name(self) -> &'static str {
        match self {
            Illuminant::A => "a",
            Illuminant::B => "b",
            Illuminant::C => "c",
            Illuminant::D50 => "d50",
            Illuminant::D55 => "d55",
            Illuminant::D65 => "d65",
            Illuminant::D75 => "d75",
            Illuminant::E => "e",
            Illuminant::F2 => "f2",
            Illuminant::F7 => "f7",
            Illuminant::F11 => "f11",
        }
    }
}

impl Default for Illuminant {
    fn default() -> Illuminant {
        Illuminant::D50
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Illuminant {
    type Err = ColorError;

    /// Parses an illuminant code, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Illuminant> {
        let lowered = s.trim().to_lowercase();
        ILLUMINANTS
            .iter()
            .cloned()
            .find(|illuminant| illuminant.name() == lowered)
            .ok_or_else(|| ColorError::InvalidIlluminant(s.to_string()))
    }
}

impl Observer {
    /// The field of view in degrees.
    pub fn degrees(self) -> u8 {
        match self {
            Observer::TwoDegree => 2,
            Observer::TenDegree => 10,
        }
    }
}

impl Default for Observer {
    fn default() -> Observer {
        Observer::TwoDegree
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for Observer {
    type Err = ColorError;

    /// Parses `"2"` or `"10"`, optionally followed by a degree sign.
    fn from_str(s: &str) -> Result<Observer> {
        match s.trim().trim_end_matches('°') {
            "2" => Ok(Observer::TwoDegree),
            "10" => Ok(Observer::TenDegree),
            _ => Err(ColorError::InvalidObserver(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_illuminant_parsing() {
        assert_eq!("d65".parse::<Illuminant>().unwrap(), Illuminant::D65);
        assert_eq!("D50".parse::<Illuminant>().unwrap(), Illuminant::D50);
        assert_eq!(" f11 ".parse::<Illuminant>().unwrap(), Illuminant::F11);
        assert_eq!(
            "d66".parse::<Illuminant>(),
            Err(ColorError::InvalidIlluminant("d66".to_string()))
        );
    }

    #[test]
    fn test_illuminant_names_round_trip() {
        for illuminant in ILLUMINANTS.iter() {
            assert_eq!(
                illuminant.to_string().parse::<Illuminant>().unwrap(),
                *illuminant
            );
        }
    }

    #[test]
    fn test_observer_parsing() {
        assert_eq!("2".parse::<Observer>().unwrap(), Observer::TwoDegree);
        assert_eq!("10°".parse::<Observer>().unwrap(), Observer::TenDegree);
        assert!("5".parse::<Observer>().is_err());
    }

    #[test]
    fn test_white_points_normalized() {
        for illuminant in ILLUMINANTS.iter() {
            assert_eq!(illuminant.white_point(Observer::TwoDegree)[1], 100.0);
            assert_eq!(illuminant.white_point(Observer::TenDegree)[1], 100.0);
        }
        assert_eq!(
            Illuminant::D65.white_point(Observer::TwoDegree),
            [95.047, 100.0, 108.883]
        );
    }
}
