//! This module contains one module per supported color space, each defining a plain value type for
//! colors in that space. For convenience, each main type is imported into this module's namespace
//! directly.
//!
//! The value types are tied together by three things defined here:
//!
//! - [`ColorSpace`], a tag naming each space. The conversion graph uses it as its node identity.
//! - [`ColorType`], the trait every value type implements: its space tag, its ordered coordinates,
//!   and validated construction from raw coordinates.
//! - [`Color`], a dynamically-typed color: any one of the value types, plus the memory of which RGB
//!   profile it was last converted through.
//!
//! [`ColorSpace`]: enum.ColorSpace.html
//! [`ColorType`]: trait.ColorType.html
//! [`Color`]: struct.Color.html

pub mod cielabcolor;
pub mod cielchabcolor;
pub mod cielchuvcolor;
pub mod cieluvcolor;
pub mod cmycolor;
pub mod cmykcolor;
pub mod hslcolor;
pub mod hsvcolor;
pub mod iptcolor;
pub mod rgbcolor;
pub mod spectralcolor;
pub mod xyycolor;
pub mod xyzcolor;

// for convenience, use this namespace for the color objects
pub use self::cielabcolor::CIELABColor;
pub use self::cielchabcolor::CIELCHabColor;
pub use self::cielchuvcolor::CIELCHuvColor;
pub use self::cieluvcolor::CIELUVColor;
pub use self::cmycolor::CMYColor;
pub use self::cmykcolor::CMYKColor;
pub use self::hslcolor::HSLColor;
pub use self::hsvcolor::HSVColor;
pub use self::iptcolor::IPTColor;
pub use self::rgbcolor::{RGBColor, RGBProfile};
pub use self::spectralcolor::SpectralColor;
pub use self::xyycolor::XyYColor;
pub use self::xyzcolor::XYZColor;

use std::convert::TryFrom;
use std::fmt;

use crate::error::{ColorError, Result};
use crate::spectral_data::SPECTRAL_BANDS;

/// A tag for each supported color space. All RGB profiles share the single `RGB` tag: the profile is
/// data carried by [`RGBColor`](rgbcolor/struct.RGBColor.html), not a separate space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorSpace {
    /// Reflectance or transmittance sampled at 50 wavelengths.
    Spectral,
    /// CIE 1931 XYZ tristimulus values.
    XYZ,
    /// CIE xyY chromaticity plus luminance.
    XyY,
    /// CIE 1976 L\*a\*b\*.
    Lab,
    /// CIE 1976 L\*u\*v\*.
    Luv,
    /// The cylindrical form of L\*a\*b\*.
    LCHab,
    /// The cylindrical form of L\*u\*v\*.
    LCHuv,
    /// Companded RGB in some [`RGBProfile`](rgbcolor/enum.RGBProfile.html).
    RGB,
    /// Hue, saturation, lightness.
    HSL,
    /// Hue, saturation, value.
    HSV,
    /// Subtractive cyan, magenta, yellow.
    CMY,
    /// CMY with a black component.
    CMYK,
    /// The IPT opponent space of Ebner and Fairchild.
    IPT,
}

/// Every color space, in declaration order.
pub static COLOR_SPACES: [ColorSpace; 13] = [
    ColorSpace::Spectral,
    ColorSpace::XYZ,
    ColorSpace::XyY,
    ColorSpace::Lab,
    ColorSpace::Luv,
    ColorSpace::LCHab,
    ColorSpace::LCHuv,
    ColorSpace::RGB,
    ColorSpace::HSL,
    ColorSpace::HSV,
    ColorSpace::CMY,
    ColorSpace::CMYK,
    ColorSpace::IPT,
];

impl ColorSpace {
    /// The number of coordinates a color in this space has.
    pub fn arity(self) -> usize {
        match self {
            ColorSpace::Spectral => SPECTRAL_BANDS,
            ColorSpace::CMYK => 4,
            _ => 3,
        }
    }

    /// The name of the value type for this space, used in diagnostics.
    pub fn type_name(self) -> &'static str {
        match self {
            ColorSpace::Spectral => "SpectralColor",
            ColorSpace::XYZ => "XYZColor",
            ColorSpace::XyY => "xyYColor",
            ColorSpace::Lab => "LabColor",
            ColorSpace::Luv => "LuvColor",
            ColorSpace::LCHab => "LCHabColor",
            ColorSpace::LCHuv => "LCHuvColor",
            ColorSpace::RGB => "RGBColor",
            ColorSpace::HSL => "HSLColor",
            ColorSpace::HSV => "HSVColor",
            ColorSpace::CMY => "CMYColor",
            ColorSpace::CMYK => "CMYKColor",
            ColorSpace::IPT => "IPTColor",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// A trait implemented by the value type of every color space.
pub trait ColorType: Clone + Into<Color> + TryFrom<Color, Error = ColorError> {
    /// The tag of the space this type represents.
    const SPACE: ColorSpace;

    /// The coordinates of the color, in their conventional order (e.g. L, a, b).
    fn values(&self) -> Vec<f64>;

    /// Builds a color from its coordinates, using the default metadata for the space (D50 and the
    /// 2° observer for CIE spaces, sRGB for RGB). Fails if there are too few or too many
    /// coordinates, or if any is not finite.
    fn from_values(values: &[f64]) -> Result<Self>;
}

/// Checks that a coordinate slice is usable for the given space.
pub(crate) fn check_values(space: ColorSpace, values: &[f64]) -> Result<()> {
    let expected = space.arity();
    if values.len() < expected {
        return Err(ColorError::MissingValue {
            space,
            expected,
            found: values.len(),
        });
    }
    if values.len() > expected {
        return Err(ColorError::InvalidValue {
            space,
            reason: format!("expected {} coordinates, got {}", expected, values.len()),
        });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ColorError::InvalidValue {
            space,
            reason: format!("{} is not a finite number", bad),
        });
    }
    Ok(())
}

/// Wraps an angle in degrees into [0, 360).
pub(crate) fn normalize_hue(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

macro_rules! color_value_types {
    ($($variant:ident => $ty:ident),* $(,)*) => {
        /// A color in any one of the supported spaces.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum ColorValue {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )*
        }

        impl ColorValue {
            /// The space this color belongs to.
            pub fn space(&self) -> ColorSpace {
                match self {
                    $(ColorValue::$variant(_) => ColorSpace::$variant,)*
                }
            }

            /// The ordered coordinates of the color.
            pub fn values(&self) -> Vec<f64> {
                match self {
                    $(ColorValue::$variant(c) => c.values(),)*
                }
            }

            /// Builds a color of the given space from raw coordinates, with default metadata.
            pub fn from_values(space: ColorSpace, values: &[f64]) -> Result<ColorValue> {
                match space {
                    $(ColorSpace::$variant => Ok(ColorValue::$variant($ty::from_values(values)?)),)*
                }
            }
        }

        $(
            impl From<$ty> for ColorValue {
                fn from(c: $ty) -> ColorValue {
                    ColorValue::$variant(c)
                }
            }

            impl From<$ty> for Color {
                fn from(c: $ty) -> Color {
                    Color::new(ColorValue::$variant(c))
                }
            }

            impl TryFrom<ColorValue> for $ty {
                type Error = ColorError;
                fn try_from(value: ColorValue) -> Result<$ty> {
                    match value {
                        ColorValue::$variant(c) => Ok(c),
                        other => Err(ColorError::WrongColorSpace {
                            expected: ColorSpace::$variant,
                            found: other.space(),
                        }),
                    }
                }
            }

            impl TryFrom<Color> for $ty {
                type Error = ColorError;
                fn try_from(color: Color) -> Result<$ty> {
                    $ty::try_from(color.value)
                }
            }

            impl<'a> TryFrom<&'a ColorValue> for &'a $ty {
                type Error = ColorError;
                fn try_from(value: &'a ColorValue) -> Result<&'a $ty> {
                    match value {
                        ColorValue::$variant(c) => Ok(c),
                        other => Err(ColorError::WrongColorSpace {
                            expected: ColorSpace::$variant,
                            found: other.space(),
                        }),
                    }
                }
            }
        )*
    };
}

color_value_types! {
    Spectral => SpectralColor,
    XYZ => XYZColor,
    XyY => XyYColor,
    Lab => CIELABColor,
    Luv => CIELUVColor,
    LCHab => CIELCHabColor,
    LCHuv => CIELCHuvColor,
    RGB => RGBColor,
    HSL => HSLColor,
    HSV => HSVColor,
    CMY => CMYColor,
    CMYK => CMYKColor,
    IPT => IPTColor,
}

impl ColorValue {
    /// Borrows the color as the given value type, or fails naming both spaces.
    pub fn get<'a, T>(&'a self) -> Result<&'a T>
    where
        &'a T: TryFrom<&'a ColorValue, Error = ColorError>,
    {
        <&T>::try_from(self)
    }
}

/// A dynamically-typed color: a value in some space, plus the RGB profile it was converted through
/// if that profile was anything other than sRGB. Converting the color onward through RGB again uses
/// the remembered profile unless the caller asks for another, so chains like XYZ → (Adobe RGB) →
/// HSL → XYZ come back to where they started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    value: ColorValue,
    through_rgb: Option<RGBProfile>,
}

impl Color {
    /// Wraps a value with no RGB profile memory.
    pub fn new(value: ColorValue) -> Color {
        Color {
            value,
            through_rgb: None,
        }
    }

    /// Builds a color of the given space from raw coordinates, with default metadata. Too few
    /// coordinates fail with `MissingValue`; too many or non-finite ones with `InvalidValue`.
    pub fn from_values(space: ColorSpace, values: &[f64]) -> Result<Color> {
        Ok(Color::new(ColorValue::from_values(space, values)?))
    }

    /// Like [`from_values`](#method.from_values), but parses each coordinate from text first. Text
    /// that isn't a number fails with `InvalidValue`.
    pub fn from_strs(space: ColorSpace, values: &[&str]) -> Result<Color> {
        let mut parsed = Vec::with_capacity(values.len());
        for value in values {
            match value.trim().parse::<f64>() {
                Ok(v) => parsed.push(v),
                Err(_) => {
                    return Err(ColorError::InvalidValue {
                        space,
                        reason: format!("{:?} is not a number", value),
                    })
                }
            }
        }
        Color::from_values(space, &parsed)
    }

    /// The space this color belongs to.
    pub fn space(&self) -> ColorSpace {
        self.value.space()
    }

    /// The ordered coordinates of the color.
    pub fn values(&self) -> Vec<f64> {
        self.value.values()
    }

    /// The wrapped value.
    pub fn value(&self) -> &ColorValue {
        &self.value
    }

    /// Unwraps the value, dropping the profile memory.
    pub fn into_value(self) -> ColorValue {
        self.value
    }

    /// The RGB profile this color was last converted through, if it wasn't sRGB.
    pub fn through_rgb(&self) -> Option<RGBProfile> {
        self.through_rgb
    }

    /// Returns the same color, remembering the given RGB profile. sRGB is the default and is never
    /// remembered.
    pub fn with_through_rgb(mut self, profile: RGBProfile) -> Color {
        self.through_rgb = if profile == RGBProfile::SRGB {
            None
        } else {
            Some(profile)
        };
        self
    }

    /// Borrows the color as the given value type, or fails naming both spaces.
    pub fn get<'a, T>(&'a self) -> Result<&'a T>
    where
        &'a T: TryFrom<&'a ColorValue, Error = ColorError>,
    {
        self.value.get()
    }
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Color {
        Color::new(value)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_missing_coordinate() {
        let err = Color::from_values(ColorSpace::Lab, &[50.0, 10.0]).unwrap_err();
        assert_eq!(
            err,
            ColorError::MissingValue {
                space: ColorSpace::Lab,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_non_numeric_coordinate() {
        match Color::from_strs(ColorSpace::XYZ, &["0.1", "zero", "0.3"]) {
            Err(ColorError::InvalidValue { space, .. }) => assert_eq!(space, ColorSpace::XYZ),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Color::from_values(ColorSpace::HSV, &[1.0, std::f64::NAN, 0.5]).is_err());
        assert!(Color::from_values(ColorSpace::CMY, &[0.1, 0.2, 0.3, 0.4]).is_err());
    }

    #[test]
    fn test_dynamic_construction() {
        let color = Color::from_strs(ColorSpace::CMYK, &["0.1", "0.2", "0.3", "0.4"]).unwrap();
        assert_eq!(color.space(), ColorSpace::CMYK);
        assert_eq!(color.values(), vec![0.1, 0.2, 0.3, 0.4]);
        let cmyk: &CMYKColor = color.get().unwrap();
        assert_eq!(cmyk.k, 0.4);
    }

    #[test]
    fn test_wrong_space_extraction() {
        let color: Color = XYZColor::new(0.1, 0.2, 0.3).into();
        let err = CIELABColor::try_from(color).unwrap_err();
        assert_eq!(
            err,
            ColorError::WrongColorSpace {
                expected: ColorSpace::Lab,
                found: ColorSpace::XYZ
            }
        );
    }

    #[test]
    fn test_srgb_is_never_remembered() {
        let color: Color = HSLColor::new(120.0, 0.5, 0.5).into();
        assert_eq!(color.clone().with_through_rgb(RGBProfile::SRGB).through_rgb(), None);
        assert_eq!(
            color.with_through_rgb(RGBProfile::AdobeRGB).through_rgb(),
            Some(RGBProfile::AdobeRGB)
        );
    }

    #[test]
    fn test_arity() {
        for space in COLOR_SPACES.iter() {
            let zeros = vec![0.0; space.arity()];
            let color = Color::from_values(*space, &zeros).unwrap();
            assert_eq!(color.values().len(), space.arity());
        }
    }
}
