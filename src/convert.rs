//! The conversion engine: the default set of direct conversions between color spaces, and the
//! executor that chains them together.
//!
//! Every conversion goes through [`convert`](fn.convert.html) (or
//! [`convert_with`](fn.convert_with.html) for a custom registry). It asks the registry for the
//! shortest chain of direct conversions and runs the color through each in turn, handing every one
//! the same [`ConversionContext`](struct.ConversionContext.html).
//!
//! # RGB profile memory
//! HSL, HSV, CMY, and CMYK are transforms of *companded* RGB, so their coordinates only mean
//! something relative to an RGB profile. The executor picks one "working" profile per call, in this
//! order:
//!
//! 1. `through_rgb` in the options, if set;
//! 2. the profile of the color being converted, if it is RGB;
//! 3. the profile the color was last converted through, if any;
//! 4. sRGB.
//!
//! When a chain passes through RGB with a profile other than sRGB, the result remembers that
//! profile, so converting it back later without naming a profile lands where it started.
//!
//! # XYZ scale
//! CIELAB and CIELUV read and write XYZ relative to a white with Y = 100, while RGB, IPT, and
//! spectral integration work with a white of Y = 1. An XYZ color handed to `convert` is taken at
//! face value by whichever conversion reads it, but when a chain passes *through* XYZ from one
//! family to the other (Lab to RGB, say) the executor rescales it on the way.
//!
//! # Example
//!
//! ```
//! # use colorimetry::prelude::*;
//! let xyz: Color = XYZColor::new(0.1, 0.2, 0.3).into();
//! let lab: CIELABColor = convert_color(&xyz, &ConvertOptions::default()).unwrap();
//! assert!((lab.l - 1.807).abs() <= 1e-3);
//! ```

use tracing::debug;

use crate::chromatic_adaptation::AdaptationMethod;
use crate::colors::{
    check_values, CIELABColor, CIELCHabColor, CIELCHuvColor, CIELUVColor, CMYColor, CMYKColor,
    Color, ColorSpace, ColorType, ColorValue, HSLColor, HSVColor, IPTColor, RGBColor, RGBProfile,
    SpectralColor, XYZColor, XyYColor,
};
use crate::error::Result;
use crate::graph::ConversionRegistry;
use crate::illuminants::Illuminant;

/// Options for a single conversion call. Everything is optional: the defaults convert through
/// sRGB, leave RGB output at the profile's native white, and adapt with Bradford.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// The RGB profile to use for any step that produces RGB. Overrides any profile the color
    /// remembers.
    pub through_rgb: Option<RGBProfile>,
    /// The illuminant XYZ produced from RGB should be adapted to. Unset leaves it at the profile's
    /// native white.
    pub target_illuminant: Option<Illuminant>,
    /// The chromatic adaptation method used by every adapting step.
    pub adaptation: AdaptationMethod,
    /// A 50-band spectral power distribution to integrate spectral colors under, in place of
    /// their illuminant's.
    pub illuminant_override: Option<Vec<f64>>,
    /// Use the 12-bit BT.2020 companding constants instead of the 10-bit ones.
    pub bt2020_12bit: bool,
}

impl ConvertOptions {
    /// Sets the RGB profile to convert through.
    pub fn with_through_rgb(mut self, profile: RGBProfile) -> ConvertOptions {
        self.through_rgb = Some(profile);
        self
    }

    /// Sets the illuminant for XYZ produced from RGB.
    pub fn with_target_illuminant(mut self, illuminant: Illuminant) -> ConvertOptions {
        self.target_illuminant = Some(illuminant);
        self
    }

    /// Sets the chromatic adaptation method.
    pub fn with_adaptation(mut self, method: AdaptationMethod) -> ConvertOptions {
        self.adaptation = method;
        self
    }

    /// Sets a spectral power distribution for spectral integration.
    pub fn with_illuminant_override(mut self, spd: Vec<f64>) -> ConvertOptions {
        self.illuminant_override = Some(spd);
        self
    }

    /// Switches BT.2020 companding to the 12-bit constants.
    pub fn with_bt2020_12bit(mut self, twelve_bit: bool) -> ConvertOptions {
        self.bt2020_12bit = twelve_bit;
        self
    }
}

/// What every direct conversion receives besides the color itself. Built once per
/// [`convert`](fn.convert.html) call from the options and the working RGB profile.
#[derive(Debug, Copy, Clone, Default)]
pub struct ConversionContext<'a> {
    /// The profile for any step that produces RGB.
    pub target_rgb: RGBProfile,
    /// See [`ConvertOptions::target_illuminant`](struct.ConvertOptions.html#structfield.target_illuminant).
    pub target_illuminant: Option<Illuminant>,
    /// See [`ConvertOptions::adaptation`](struct.ConvertOptions.html#structfield.adaptation).
    pub adaptation: AdaptationMethod,
    /// See [`ConvertOptions::illuminant_override`](struct.ConvertOptions.html#structfield.illuminant_override).
    pub illuminant_override: Option<&'a [f64]>,
    /// See [`ConvertOptions::bt2020_12bit`](struct.ConvertOptions.html#structfield.bt2020_12bit).
    pub bt2020_12bit: bool,
}

fn spectral_to_xyz(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let spectral: &SpectralColor = color.get()?;
    Ok(spectral.to_xyz(ctx.illuminant_override)?.into())
}

fn lab_to_lchab(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let lab: &CIELABColor = color.get()?;
    Ok(lab.to_lch().into())
}

fn lchab_to_lab(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let lch: &CIELCHabColor = color.get()?;
    Ok(lch.to_lab().into())
}

fn lab_to_xyz(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let lab: &CIELABColor = color.get()?;
    Ok(lab.to_xyz().into())
}

fn xyz_to_lab(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let xyz: &XYZColor = color.get()?;
    Ok(CIELABColor::from_xyz(xyz).into())
}

fn luv_to_lchuv(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let luv: &CIELUVColor = color.get()?;
    Ok(luv.to_lch().into())
}

fn lchuv_to_luv(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let lch: &CIELCHuvColor = color.get()?;
    Ok(lch.to_luv().into())
}

fn luv_to_xyz(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let luv: &CIELUVColor = color.get()?;
    Ok(luv.to_xyz().into())
}

fn xyz_to_luv(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let xyz: &XYZColor = color.get()?;
    Ok(CIELUVColor::from_xyz(xyz).into())
}

fn xyz_to_xyy(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let xyz: &XYZColor = color.get()?;
    Ok(XyYColor::from_xyz(xyz).into())
}

fn xyy_to_xyz(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let xyy: &XyYColor = color.get()?;
    Ok(xyy.to_xyz().into())
}

fn xyz_to_rgb(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let xyz: &XYZColor = color.get()?;
    Ok(RGBColor::from_xyz(xyz, ctx.target_rgb, ctx.adaptation, ctx.bt2020_12bit).into())
}

fn rgb_to_xyz(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let rgb: &RGBColor = color.get()?;
    Ok(rgb
        .to_xyz(ctx.target_illuminant, ctx.adaptation, ctx.bt2020_12bit)
        .into())
}

fn rgb_to_hsv(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let rgb: &RGBColor = color.get()?;
    Ok(HSVColor::from_rgb(rgb).into())
}

fn hsv_to_rgb(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let hsv: &HSVColor = color.get()?;
    Ok(hsv.to_rgb(ctx.target_rgb).into())
}

fn rgb_to_hsl(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let rgb: &RGBColor = color.get()?;
    Ok(HSLColor::from_rgb(rgb).into())
}

fn hsl_to_rgb(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let hsl: &HSLColor = color.get()?;
    Ok(hsl.to_rgb(ctx.target_rgb).into())
}

fn rgb_to_cmy(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let rgb: &RGBColor = color.get()?;
    Ok(CMYColor::from_rgb(rgb).into())
}

fn cmy_to_rgb(color: &ColorValue, ctx: &ConversionContext) -> Result<ColorValue> {
    let cmy: &CMYColor = color.get()?;
    Ok(cmy.to_rgb(ctx.target_rgb).into())
}

fn cmy_to_cmyk(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let cmy: &CMYColor = color.get()?;
    Ok(CMYKColor::from_cmy(cmy).into())
}

fn cmyk_to_cmy(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let cmyk: &CMYKColor = color.get()?;
    Ok(cmyk.to_cmy().into())
}

fn xyz_to_ipt(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let xyz: &XYZColor = color.get()?;
    Ok(IPTColor::from_xyz(xyz)?.into())
}

fn ipt_to_xyz(color: &ColorValue, _ctx: &ConversionContext) -> Result<ColorValue> {
    let ipt: &IPTColor = color.get()?;
    Ok(ipt.to_xyz().into())
}

/// The white luminance a space's conversions to and from XYZ assume.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum XyzScale {
    Unit,
    Percent,
}

fn xyz_scale(space: ColorSpace) -> Option<XyzScale> {
    match space {
        ColorSpace::Lab | ColorSpace::Luv => Some(XyzScale::Percent),
        ColorSpace::RGB | ColorSpace::IPT | ColorSpace::Spectral => Some(XyzScale::Unit),
        // xyY keeps whatever Y it is given
        _ => None,
    }
}

fn rescale_xyz(value: &ColorValue, from: XyzScale, to: XyzScale) -> Result<ColorValue> {
    let xyz: &XYZColor = value.get()?;
    let factor = match (from, to) {
        (XyzScale::Unit, XyzScale::Percent) => 100.0,
        (XyzScale::Percent, XyzScale::Unit) => 0.01,
        _ => 1.0,
    };
    Ok(XYZColor {
        x: xyz.x * factor,
        y: xyz.y * factor,
        z: xyz.z * factor,
        ..*xyz
    }
    .into())
}

/// Builds a registry holding every conversion the crate implements. The registration order fixes
/// which path wins when two are equally short.
pub fn default_registry() -> ConversionRegistry {
    use crate::colors::ColorSpace::*;

    let mut registry = ConversionRegistry::new();
    registry.register(Spectral, XYZ, "spectral_to_xyz", spectral_to_xyz);
    registry.register(Lab, LCHab, "lab_to_lchab", lab_to_lchab);
    registry.register(LCHab, Lab, "lchab_to_lab", lchab_to_lab);
    registry.register(Lab, XYZ, "lab_to_xyz", lab_to_xyz);
    registry.register(XYZ, Lab, "xyz_to_lab", xyz_to_lab);
    registry.register(Luv, LCHuv, "luv_to_lchuv", luv_to_lchuv);
    registry.register(LCHuv, Luv, "lchuv_to_luv", lchuv_to_luv);
    registry.register(Luv, XYZ, "luv_to_xyz", luv_to_xyz);
    registry.register(XYZ, Luv, "xyz_to_luv", xyz_to_luv);
    registry.register(XYZ, XyY, "xyz_to_xyy", xyz_to_xyy);
    registry.register(XyY, XYZ, "xyy_to_xyz", xyy_to_xyz);
    registry.register(XYZ, RGB, "xyz_to_rgb", xyz_to_rgb);
    registry.register(RGB, XYZ, "rgb_to_xyz", rgb_to_xyz);
    registry.register(RGB, HSV, "rgb_to_hsv", rgb_to_hsv);
    registry.register(HSV, RGB, "hsv_to_rgb", hsv_to_rgb);
    registry.register(RGB, HSL, "rgb_to_hsl", rgb_to_hsl);
    registry.register(HSL, RGB, "hsl_to_rgb", hsl_to_rgb);
    registry.register(RGB, CMY, "rgb_to_cmy", rgb_to_cmy);
    registry.register(CMY, RGB, "cmy_to_rgb", cmy_to_rgb);
    registry.register(CMY, CMYK, "cmy_to_cmyk", cmy_to_cmyk);
    registry.register(CMYK, CMY, "cmyk_to_cmy", cmyk_to_cmy);
    registry.register(XYZ, IPT, "xyz_to_ipt", xyz_to_ipt);
    registry.register(IPT, XYZ, "ipt_to_xyz", ipt_to_xyz);
    registry
}

lazy_static! {
    /// The registry [`convert`](fn.convert.html) uses, built on first use and never changed.
    pub static ref DEFAULT_REGISTRY: ConversionRegistry = default_registry();
}

/// Converts a color to another space using the default registry.
pub fn convert(color: &Color, target: ColorSpace, options: &ConvertOptions) -> Result<Color> {
    convert_with(&DEFAULT_REGISTRY, color, target, options)
}

/// Converts a color to another space using the given registry. Converting to the color's own space
/// returns an equal color without running anything.
///
/// The color's coordinates are checked first: a wrong number of them fails with `MissingValue` or
/// `InvalidValue`, and so does any that isn't finite.
pub fn convert_with(
    registry: &ConversionRegistry,
    color: &Color,
    target: ColorSpace,
    options: &ConvertOptions,
) -> Result<Color> {
    let source = color.space();
    check_values(source, &color.values())?;
    let path = registry.resolve(source, target)?;
    debug!(
        from = %source,
        to = %target,
        path = ?path.iter().map(|e| e.name).collect::<Vec<_>>(),
        "resolved conversion path"
    );
    if path.is_empty() {
        return Ok(color.clone());
    }

    let working_rgb = options
        .through_rgb
        .or_else(|| match color.value() {
            ColorValue::RGB(rgb) => Some(rgb.profile),
            _ => None,
        })
        .or_else(|| color.through_rgb())
        .unwrap_or_default();
    let ctx = ConversionContext {
        target_rgb: working_rgb,
        target_illuminant: options.target_illuminant,
        adaptation: options.adaptation,
        illuminant_override: options.illuminant_override.as_ref().map(|v| v.as_slice()),
        bt2020_12bit: options.bt2020_12bit,
    };

    let mut value = color.value().clone();
    // the scale of the XYZ value in hand, if the previous step produced one
    let mut scale = None;
    for edge in &path {
        if edge.source == ColorSpace::XYZ {
            if let (Some(have), Some(want)) = (scale, xyz_scale(edge.target)) {
                if have != want {
                    value = rescale_xyz(&value, have, want)?;
                }
            }
        }
        value = (edge.func)(&value, &ctx)?;
        scale = if edge.target == ColorSpace::XYZ {
            xyz_scale(edge.source)
        } else {
            None
        };
    }

    let through_rgb = source == ColorSpace::RGB || path.iter().any(|e| e.target == ColorSpace::RGB);
    let converted = Color::new(value);
    Ok(if through_rgb {
        converted.with_through_rgb(working_rgb)
    } else {
        match color.through_rgb() {
            Some(profile) => converted.with_through_rgb(profile),
            None => converted,
        }
    })
}

/// Converts a color to the given value type using the default registry.
pub fn convert_color<T: ColorType>(color: &Color, options: &ConvertOptions) -> Result<T> {
    T::try_from(convert(color, T::SPACE, options)?)
}
