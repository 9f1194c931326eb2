//! Appearance models fed by the conversion engine.

extern crate colorimetry;

use colorimetry::appearance::{Ciecam02, Rlab, Surround};
use colorimetry::prelude::*;

fn xyz_100(rgb: RGBColor) -> [f64; 3] {
    let xyz: XYZColor = convert_color(&rgb.into(), &ConvertOptions::default()).unwrap();
    [xyz.x * 100.0, xyz.y * 100.0, xyz.z * 100.0]
}

#[test]
fn display_white_is_white() {
    let white = xyz_100(RGBColor::new(1.0, 1.0, 1.0));
    let d65 = Illuminant::D65.white_point(Observer::TwoDegree);
    let cam = Ciecam02::new(white, d65, 20.0, 64.0, Surround::Average, true).unwrap();
    assert!((cam.lightness - 100.0).abs() <= 0.1, "{:?}", cam);
    assert!(cam.chroma <= 0.1, "{:?}", cam);
}

#[test]
fn lighter_is_lighter() {
    let d65 = Illuminant::D65.white_point(Observer::TwoDegree);
    let dark = xyz_100(RGBColor::new(0.2, 0.3, 0.4));
    let light = xyz_100(RGBColor::new(0.4, 0.5, 0.6));
    let dark_cam = Ciecam02::new(dark, d65, 20.0, 64.0, Surround::Dim, true).unwrap();
    let light_cam = Ciecam02::new(light, d65, 20.0, 64.0, Surround::Dim, true).unwrap();
    assert!(dark_cam.lightness < light_cam.lightness);
    assert!(dark_cam.brightness < light_cam.brightness);

    let dark_rlab = Rlab::new(dark, d65, 64.0, Rlab::SIGMA_DIM, 1.0).unwrap();
    let light_rlab = Rlab::new(light, d65, 64.0, Rlab::SIGMA_DIM, 1.0).unwrap();
    assert!(dark_rlab.lightness < light_rlab.lightness);
}

#[test]
fn hue_follows_the_primary() {
    let d65 = Illuminant::D65.white_point(Observer::TwoDegree);
    let red = xyz_100(RGBColor::new(1.0, 0.0, 0.0));
    let blue = xyz_100(RGBColor::new(0.0, 0.0, 1.0));
    let red_cam = Ciecam02::new(red, d65, 20.0, 64.0, Surround::Average, true).unwrap();
    let blue_cam = Ciecam02::new(blue, d65, 20.0, 64.0, Surround::Average, true).unwrap();
    // unique red sits near 20°, unique blue near 238°
    assert!(red_cam.hue_angle < 60.0 || red_cam.hue_angle > 340.0, "{:?}", red_cam);
    assert!(blue_cam.hue_angle > 200.0 && blue_cam.hue_angle < 300.0, "{:?}", blue_cam);
}
