//! Round trips and path determinism over random inputs.

extern crate colorimetry;
#[macro_use]
extern crate proptest;

use proptest::prelude::*;

use colorimetry::colors::{CIELUVColor, RGBProfile, COLOR_SPACES};
use colorimetry::convert::{default_registry, DEFAULT_REGISTRY};
use colorimetry::delta_e::{delta_e_cie1976, delta_e_cie2000, Cie2000Weights};
use colorimetry::prelude::*;

fn unit() -> impl Strategy<Value = f64> {
    0.0_f64..=1.0
}

fn profile() -> impl Strategy<Value = RGBProfile> {
    prop_oneof![
        Just(RGBProfile::SRGB),
        Just(RGBProfile::AdobeRGB),
        Just(RGBProfile::AppleRGB),
        Just(RGBProfile::WideGamutRGB),
        Just(RGBProfile::BT2020),
    ]
}

fn space() -> impl Strategy<Value = ColorSpace> {
    (0..COLOR_SPACES.len()).prop_map(|i| COLOR_SPACES[i])
}

fn lab() -> impl Strategy<Value = CIELABColor> {
    (0.0_f64..100.0, -100.0_f64..100.0, -100.0_f64..100.0)
        .prop_map(|(l, a, b)| CIELABColor::new(l, a, b))
}

fn round_trip(color: &Color, via: ColorSpace, opts: &ConvertOptions) -> Color {
    let there = convert(color, via, opts).unwrap();
    convert(&there, color.space(), opts).unwrap()
}

fn assert_close(
    actual: &[f64],
    expected: &[f64],
    tol: f64,
) -> std::result::Result<(), TestCaseError> {
    for (a, e) in actual.iter().zip(expected) {
        prop_assert!((a - e).abs() <= tol, "{:?} != {:?}", actual, expected);
    }
    Ok(())
}

proptest! {
    #[test]
    fn lab_round_trips_through_xyz(lab in lab()) {
        let color: Color = lab.into();
        let back = round_trip(&color, ColorSpace::XYZ, &ConvertOptions::default());
        assert_close(&back.values(), &color.values(), 1e-8)?;
    }

    #[test]
    fn lab_round_trips_through_lch(lab in lab()) {
        let color: Color = lab.into();
        let back = round_trip(&color, ColorSpace::LCHab, &ConvertOptions::default());
        assert_close(&back.values(), &color.values(), 1e-8)?;
    }

    #[test]
    fn xyz_round_trips_through_luv(x in 1.0_f64..100.0, y in 1.0_f64..100.0, z in 1.0_f64..100.0) {
        let color: Color = XYZColor::new(x, y, z).into();
        let luv: CIELUVColor = convert_color(&color, &ConvertOptions::default()).unwrap();
        let back = convert(&luv.into(), ColorSpace::XYZ, &ConvertOptions::default()).unwrap();
        assert_close(&back.values(), &[x, y, z], 1e-8)?;
    }

    #[test]
    fn rgb_round_trips_through_xyz(r in unit(), g in unit(), b in unit(), profile in profile()) {
        let color: Color = RGBColor::new(r, g, b).with_profile(profile).into();
        let back = round_trip(&color, ColorSpace::XYZ, &ConvertOptions::default());
        let rgb: &RGBColor = back.get().unwrap();
        prop_assert_eq!(rgb.profile, profile);
        assert_close(&rgb.values(), &[r, g, b], 1e-8)?;
    }

    #[test]
    fn rgb_round_trips_through_derived_spaces(
        r in unit(),
        g in unit(),
        b in unit(),
        via in prop_oneof![
            Just(ColorSpace::HSL),
            Just(ColorSpace::HSV),
            Just(ColorSpace::CMY),
            Just(ColorSpace::CMYK),
        ],
    ) {
        let color: Color = RGBColor::new(r, g, b).into();
        let back = round_trip(&color, via, &ConvertOptions::default());
        assert_close(&back.values(), &[r, g, b], 1e-9)?;
    }

    #[test]
    fn profile_memory_survives_round_trips(r in unit(), g in unit(), b in unit(), profile in profile()) {
        let opts = ConvertOptions::default().with_through_rgb(profile);
        let xyz: Color = XYZColor::new(r, g, b).with_illuminant(Illuminant::D65).into();
        let hsl = convert(&xyz, ColorSpace::HSL, &opts).unwrap();
        let back = convert(&hsl, ColorSpace::XYZ, &ConvertOptions::default()).unwrap();
        let back: &XYZColor = back.get().unwrap();
        // Wide Gamut RGB is D50, so XYZ comes back at its native white
        if profile == RGBProfile::WideGamutRGB {
            prop_assert_eq!(back.illuminant, Illuminant::D50);
        } else {
            assert_close(&[back.x, back.y, back.z], &[r, g, b], 1e-8)?;
        }
    }

    #[test]
    fn paths_are_deterministic(from in space(), to in space()) {
        let fresh = default_registry();
        let first = DEFAULT_REGISTRY.resolve(from, to);
        let second = fresh.resolve(from, to);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn paths_are_shortest(from in space(), mid in space(), to in space()) {
        // no path is longer than a detour through any other space
        if let (Ok(direct), Ok(a), Ok(b)) = (
            DEFAULT_REGISTRY.resolve(from, to),
            DEFAULT_REGISTRY.resolve(from, mid),
            DEFAULT_REGISTRY.resolve(mid, to),
        ) {
            prop_assert!(direct.len() <= a.len() + b.len());
        }
    }

    #[test]
    fn delta_e_is_symmetric(a in lab(), b in lab()) {
        let forward = delta_e_cie2000(&a, &b, Cie2000Weights::default());
        let backward = delta_e_cie2000(&b, &a, Cie2000Weights::default());
        prop_assert!((forward - backward).abs() <= 1e-9);
        prop_assert!(forward >= 0.0);
        prop_assert!((delta_e_cie1976(&a, &b) - delta_e_cie1976(&b, &a)).abs() <= 1e-12);
    }

    #[test]
    fn delta_e_of_a_color_with_itself_is_zero(a in lab()) {
        let color: Color = a.into();
        for &mode in &[DeltaEMode::Cie1976, DeltaEMode::Cie1994, DeltaEMode::Cie2000, DeltaEMode::Cmc] {
            prop_assert!(delta_e(&color, &color, mode).unwrap().abs() <= 1e-12);
        }
    }
}
