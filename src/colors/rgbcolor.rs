//! This module implements companded RGB in a choice of working spaces ("profiles"). An RGB triple
//! on its own is meaningless: the same numbers are different colors in sRGB and in Adobe RGB. So an
//! [`RGBColor`](struct.RGBColor.html) carries its [`RGBProfile`](enum.RGBProfile.html), and the
//! profile supplies the three things needed to reach XYZ: the companding (gamma) curve, the
//! primaries as an RGB → XYZ matrix, and the native white point those primaries are relative to.
//!
//! Linear RGB here is on the 0-1 scale and maps to XYZ with white at Y = 1.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use rulinalg::matrix::Matrix;

use super::{check_values, ColorSpace, ColorType, XYZColor};
use crate::chromatic_adaptation::AdaptationMethod;
use crate::consts::{inv, mul3};
use crate::error::{ColorError, Result};
use crate::illuminants::{Illuminant, Observer};

/// An RGB working space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RGBProfile {
    /// IEC 61966-2-1 sRGB, the default for everything on the web.
    SRGB,
    /// Adobe RGB (1998), with a wider green primary than sRGB.
    AdobeRGB,
    /// The original Apple RGB, gamma 1.8.
    AppleRGB,
    /// Adobe Wide Gamut RGB, with spectral primaries and a D50 white.
    WideGamutRGB,
    /// ITU-R BT.2020, the UHDTV working space.
    BT2020,
}

/// Every profile, in declaration order.
pub static RGB_PROFILES: [RGBProfile; 5] = [
    RGBProfile::SRGB,
    RGBProfile::AdobeRGB,
    RGBProfile::AppleRGB,
    RGBProfile::WideGamutRGB,
    RGBProfile::BT2020,
];

lazy_static! {
    static ref SRGB_TO_XYZ: Matrix<f64> = matrix![
        0.412424, 0.357579, 0.180464;
        0.212656, 0.715158, 0.0721856;
        0.0193324, 0.119193, 0.950444
    ];
    static ref ADOBE_RGB_TO_XYZ: Matrix<f64> = matrix![
        0.5767, 0.185556, 0.188212;
        0.297361, 0.627355, 0.0752847;
        0.0270328, 0.0706879, 0.991248
    ];
    static ref APPLE_RGB_TO_XYZ: Matrix<f64> = matrix![
        0.4497288, 0.3162486, 0.1844926;
        0.2446525, 0.6720283, 0.0833192;
        0.0251848, 0.1411824, 0.9224628
    ];
    static ref WIDE_GAMUT_RGB_TO_XYZ: Matrix<f64> = matrix![
        0.716105, 0.100930, 0.147186;
        0.258187, 0.724938, 0.0168748;
        0.0, 0.0517813, 0.773429
    ];
    static ref BT2020_TO_XYZ: Matrix<f64> = matrix![
        0.636958, 0.144617, 0.168881;
        0.262700, 0.677998, 0.059302;
        0.0, 0.028073, 1.060985
    ];

    // computed, not copied: see consts
    static ref XYZ_TO_SRGB: Matrix<f64> = inv(&SRGB_TO_XYZ);
    static ref XYZ_TO_ADOBE_RGB: Matrix<f64> = inv(&ADOBE_RGB_TO_XYZ);
    static ref XYZ_TO_APPLE_RGB: Matrix<f64> = inv(&APPLE_RGB_TO_XYZ);
    static ref XYZ_TO_WIDE_GAMUT_RGB: Matrix<f64> = inv(&WIDE_GAMUT_RGB_TO_XYZ);
    static ref XYZ_TO_BT2020: Matrix<f64> = inv(&BT2020_TO_XYZ);

    static ref PROFILE_NAMES: HashMap<&'static str, RGBProfile> = hashmap! {
        "srgb" => RGBProfile::SRGB,
        "adobe_rgb" => RGBProfile::AdobeRGB,
        "adobergb" => RGBProfile::AdobeRGB,
        "apple_rgb" => RGBProfile::AppleRGB,
        "applergb" => RGBProfile::AppleRGB,
        "wide_gamut_rgb" => RGBProfile::WideGamutRGB,
        "widegamutrgb" => RGBProfile::WideGamutRGB,
        "bt2020" => RGBProfile::BT2020,
        "bt.2020" => RGBProfile::BT2020,
    };

    static ref HEX_RE: Regex = match Regex::new(r"^#?([0-9a-fA-F]{6})$") {
        Ok(re) => re,
        Err(e) => panic!("hex color pattern does not compile: {}", e),
    };
}

/// The BT.2020 transfer function constants (α, β): the 12-bit pair is more precise.
fn bt2020_constants(twelve_bit: bool) -> (f64, f64) {
    if twelve_bit {
        (1.0993, 0.0181)
    } else {
        (1.099, 0.018)
    }
}

impl RGBProfile {
    /// The white point the profile's primaries are defined against.
    pub fn native_illuminant(self) -> Illuminant {
        match self {
            RGBProfile::WideGamutRGB => Illuminant::D50,
            _ => Illuminant::D65,
        }
    }

    /// The matrix from linear RGB to XYZ (white Y = 1), relative to the native white.
    pub fn rgb_to_xyz(self) -> &'static Matrix<f64> {
        match self {
            RGBProfile::SRGB => &SRGB_TO_XYZ,
            RGBProfile::AdobeRGB => &ADOBE_RGB_TO_XYZ,
            RGBProfile::AppleRGB => &APPLE_RGB_TO_XYZ,
            RGBProfile::WideGamutRGB => &WIDE_GAMUT_RGB_TO_XYZ,
            RGBProfile::BT2020 => &BT2020_TO_XYZ,
        }
    }

    /// The inverse of [`rgb_to_xyz`](#method.rgb_to_xyz).
    pub fn xyz_to_rgb(self) -> &'static Matrix<f64> {
        match self {
            RGBProfile::SRGB => &XYZ_TO_SRGB,
            RGBProfile::AdobeRGB => &XYZ_TO_ADOBE_RGB,
            RGBProfile::AppleRGB => &XYZ_TO_APPLE_RGB,
            RGBProfile::WideGamutRGB => &XYZ_TO_WIDE_GAMUT_RGB,
            RGBProfile::BT2020 => &XYZ_TO_BT2020,
        }
    }

    /// The canonical lowercase name of the profile.
    pub fn name(self) -> &'static str {
        match self {
            RGBProfile::SRGB => "srgb",
            RGBProfile::AdobeRGB => "adobe_rgb",
            RGBProfile::AppleRGB => "apple_rgb",
            RGBProfile::WideGamutRGB => "wide_gamut_rgb",
            RGBProfile::BT2020 => "bt2020",
        }
    }

    /// The pure-gamma exponent of the profile, for the profiles that use one.
    fn gamma(self) -> Option<f64> {
        match self {
            RGBProfile::AdobeRGB | RGBProfile::WideGamutRGB => Some(2.2),
            RGBProfile::AppleRGB => Some(1.8),
            RGBProfile::SRGB | RGBProfile::BT2020 => None,
        }
    }

    /// Applies the companding curve: linear light to encoded value. `twelve_bit` only matters for
    /// BT.2020.
    pub fn compand(self, linear: f64, twelve_bit: bool) -> f64 {
        match self {
            RGBProfile::SRGB => {
                if linear <= 0.0031308 {
                    linear * 12.92
                } else {
                    1.055 * linear.powf(1.0 / 2.4) - 0.055
                }
            }
            RGBProfile::BT2020 => {
                let (a, b) = bt2020_constants(twelve_bit);
                if linear < b {
                    linear * 4.5
                } else {
                    a * linear.powf(0.45) - (a - 1.0)
                }
            }
            _ => {
                // sign-preserving, so out-of-gamut negatives survive a round trip
                let gamma = self.gamma().unwrap_or(1.0);
                linear.signum() * linear.abs().powf(1.0 / gamma)
            }
        }
    }

    /// Inverts [`compand`](#method.compand): encoded value to linear light.
    pub fn linearize(self, encoded: f64, twelve_bit: bool) -> f64 {
        match self {
            RGBProfile::SRGB => {
                if encoded <= 0.04045 {
                    encoded / 12.92
                } else {
                    ((encoded + 0.055) / 1.055).powf(2.4)
                }
            }
            RGBProfile::BT2020 => {
                let (a, b) = bt2020_constants(twelve_bit);
                if encoded < b * 4.5 {
                    encoded / 4.5
                } else {
                    ((encoded + a - 1.0) / a).powf(1.0 / 0.45)
                }
            }
            _ => {
                let gamma = self.gamma().unwrap_or(1.0);
                encoded.signum() * encoded.abs().powf(gamma)
            }
        }
    }
}

impl Default for RGBProfile {
    fn default() -> RGBProfile {
        RGBProfile::SRGB
    }
}

impl fmt::Display for RGBProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RGBProfile {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<RGBProfile> {
        let lowered = s.trim().to_lowercase().replace(' ', "_");
        PROFILE_NAMES
            .get(lowered.as_str())
            .cloned()
            .ok_or_else(|| ColorError::Format(format!("unknown RGB profile {:?}", s)))
    }
}

/// A color in some RGB working space. Each channel is a floating point number, nominally between 0
/// and 1: values outside that range are out of the profile's gamut, and are kept as is until the
/// color is [clamped](#method.clamped) or exported to 8-bit.
/// # Example
///
/// ```
/// # use colorimetry::prelude::*;
/// let green = RGBColor::from_hex("#7BC832").unwrap();
/// assert_eq!(green.upscaled(), (123, 200, 50));
/// assert_eq!(green.to_hex(), "#7bc832");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red channel.
    pub r: f64,
    /// The green channel.
    pub g: f64,
    /// The blue channel.
    pub b: f64,
    /// The working space the channels are encoded in.
    pub profile: RGBProfile,
}

impl RGBColor {
    /// Makes a new sRGB color from channels in the range 0-1.
    pub fn new(r: f64, g: f64, b: f64) -> RGBColor {
        RGBColor {
            r,
            g,
            b,
            profile: RGBProfile::SRGB,
        }
    }

    /// Makes a new sRGB color from 8-bit channels.
    pub fn new_upscaled(r: u8, g: u8, b: u8) -> RGBColor {
        RGBColor::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Returns the same channels, relabeled as belonging to the given profile.
    pub fn with_profile(self, profile: RGBProfile) -> RGBColor {
        RGBColor { profile, ..self }
    }

    /// The channels scaled to 8 bits, rounding halves up and clamping to 0-255.
    pub fn upscaled(&self) -> (u8, u8, u8) {
        let scale = |v: f64| num::clamp((0.5 + v * 255.0).floor(), 0.0, 255.0) as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }

    /// Clamps every channel into the range 0-1.
    pub fn clamped(&self) -> RGBColor {
        RGBColor {
            r: num::clamp(self.r, 0.0, 1.0),
            g: num::clamp(self.g, 0.0, 1.0),
            b: num::clamp(self.b, 0.0, 1.0),
            profile: self.profile,
        }
    }

    /// Parses a six-digit hex code, with or without a leading `#`, in either case. The result is
    /// sRGB.
    pub fn from_hex(hex: &str) -> Result<RGBColor> {
        let digits = HEX_RE
            .captures(hex.trim())
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| ColorError::Format(format!("{:?} is not a hex color", hex)))?
            .as_str();
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ColorError::Format(format!("{:?}: {}", hex, e)))
        };
        Ok(RGBColor::new_upscaled(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Formats the color as a lowercase `#rrggbb` hex code. Out-of-gamut channels are clamped.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.upscaled();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Converts an XYZ color (white Y = 1) into the given profile, chromatically adapting it to the
    /// profile's native white first.
    pub fn from_xyz(
        xyz: &XYZColor,
        profile: RGBProfile,
        adaptation: AdaptationMethod,
        bt2020_12bit: bool,
    ) -> RGBColor {
        let adapted = xyz.apply_adaptation(profile.native_illuminant(), adaptation);
        let [r, g, b] = mul3(profile.xyz_to_rgb(), [adapted.x, adapted.y, adapted.z]);
        RGBColor {
            r: profile.compand(r, bt2020_12bit),
            g: profile.compand(g, bt2020_12bit),
            b: profile.compand(b, bt2020_12bit),
            profile,
        }
    }

    /// Converts to XYZ (white Y = 1). The result is relative to the profile's native white unless a
    /// target illuminant is given, in which case it is adapted to that.
    pub fn to_xyz(
        &self,
        target_illuminant: Option<Illuminant>,
        adaptation: AdaptationMethod,
        bt2020_12bit: bool,
    ) -> XYZColor {
        let profile = self.profile;
        let linear = [
            profile.linearize(self.r, bt2020_12bit),
            profile.linearize(self.g, bt2020_12bit),
            profile.linearize(self.b, bt2020_12bit),
        ];
        let [x, y, z] = mul3(profile.rgb_to_xyz(), linear);
        let xyz = XYZColor {
            x,
            y,
            z,
            illuminant: profile.native_illuminant(),
            observer: Observer::TwoDegree,
        };
        match target_illuminant {
            Some(target) => xyz.apply_adaptation(target, adaptation),
            None => xyz,
        }
    }
}

impl FromStr for RGBColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<RGBColor> {
        RGBColor::from_hex(s)
    }
}

impl ColorType for RGBColor {
    const SPACE: ColorSpace = ColorSpace::RGB;

    fn values(&self) -> Vec<f64> {
        vec![self.r, self.g, self.b]
    }

    fn from_values(values: &[f64]) -> Result<RGBColor> {
        check_values(Self::SPACE, values)?;
        Ok(RGBColor::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    fn assert_xyz(xyz: &XYZColor, expected: [f64; 3]) {
        assert!((xyz.x - expected[0]).abs() <= 1e-3, "{:?}", xyz);
        assert!((xyz.y - expected[1]).abs() <= 1e-3, "{:?}", xyz);
        assert!((xyz.z - expected[2]).abs() <= 1e-3, "{:?}", xyz);
    }

    #[test]
    fn test_srgb_to_xyz() {
        let rgb = RGBColor::new_upscaled(123, 200, 50);
        let xyz = rgb.to_xyz(None, AdaptationMethod::Bradford, false);
        assert_eq!(xyz.illuminant, Illuminant::D65);
        assert_xyz(&xyz, [0.294, 0.457, 0.103]);
        let xyz_d50 = rgb.to_xyz(Some(Illuminant::D50), AdaptationMethod::Bradford, false);
        assert_eq!(xyz_d50.illuminant, Illuminant::D50);
        assert_xyz(&xyz_d50, [0.313, 0.460, 0.082]);
    }

    #[test]
    fn test_adobe_rgb_to_xyz() {
        let rgb = RGBColor::new_upscaled(123, 200, 50).with_profile(RGBProfile::AdobeRGB);
        assert_xyz(
            &rgb.to_xyz(None, AdaptationMethod::Bradford, false),
            [0.230, 0.429, 0.074],
        );
        assert_xyz(
            &rgb.to_xyz(Some(Illuminant::D50), AdaptationMethod::Bradford, false),
            [0.247, 0.431, 0.060],
        );
    }

    #[test]
    fn test_rgb_xyz_round_trip() {
        for profile in RGB_PROFILES.iter() {
            for &twelve_bit in &[false, true] {
                let rgb = RGBColor::new(0.2, 0.7, 0.05).with_profile(*profile);
                let xyz = rgb.to_xyz(Some(Illuminant::D50), AdaptationMethod::Bradford, twelve_bit);
                let back = RGBColor::from_xyz(&xyz, *profile, AdaptationMethod::Bradford, twelve_bit);
                assert_eq!(back.profile, *profile);
                assert!((rgb.r - back.r).abs() <= 1e-9, "{} {:?}", profile, back);
                assert!((rgb.g - back.g).abs() <= 1e-9, "{} {:?}", profile, back);
                assert!((rgb.b - back.b).abs() <= 1e-9, "{} {:?}", profile, back);
            }
        }
    }

    #[test]
    fn test_negative_gamma_round_trip() {
        let profile = RGBProfile::AdobeRGB;
        let encoded = profile.compand(-0.25, false);
        assert!(encoded < 0.0);
        assert!((profile.linearize(encoded, false) - -0.25).abs() <= 1e-12);
    }

    #[test]
    fn test_hex() {
        let rgb = RGBColor::new_upscaled(123, 200, 50);
        assert_eq!(rgb.to_hex(), "#7bc832");
        assert_eq!(RGBColor::from_hex("7BC832").unwrap(), rgb);
        assert_eq!(" #7bc832 ".parse::<RGBColor>().unwrap(), rgb);
        assert!(RGBColor::from_hex("#7bc83").is_err());
        assert!(RGBColor::from_hex("#7bc8321").is_err());
        assert!(RGBColor::from_hex("#7bg832").is_err());
    }

    #[test]
    fn test_upscaling_clamps() {
        let rgb = RGBColor::new(-0.2, 0.5, 1.3);
        assert_eq!(rgb.upscaled(), (0, 128, 255));
        assert_eq!(rgb.to_hex(), "#0080ff");
        let clamped = rgb.clamped();
        assert_eq!((clamped.r, clamped.g, clamped.b), (0.0, 0.5, 1.0));
    }

    #[test]
    fn test_profile_names() {
        assert_eq!("sRGB".parse::<RGBProfile>().unwrap(), RGBProfile::SRGB);
        assert_eq!("Adobe RGB".parse::<RGBProfile>().unwrap(), RGBProfile::AdobeRGB);
        for profile in RGB_PROFILES.iter() {
            assert_eq!(profile.name().parse::<RGBProfile>().unwrap(), *profile);
        }
        assert!("cmyk".parse::<RGBProfile>().is_err());
    }
}
