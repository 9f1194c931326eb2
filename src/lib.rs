//! Colorimetry is a library for converting colors between the spaces color science actually works
//! in: spectral reflectance, CIE XYZ and its derivatives, the device RGB profiles, and the
//! cylindrical and subtractive models built on top of RGB. Every space is a node in a conversion
//! graph; asking for a conversion finds the shortest chain of registered primitives and runs it,
//! carrying chromatic adaptation and RGB profile choices along the way. On top of the conversions
//! sit the color difference formulas (CIE 1976, CIE 1994, CIEDE2000 and CMC), six color
//! appearance models, and densitometry of spectral samples.

#![doc(html_root_url = "https://docs.rs/colorimetry/0.1.0")]
// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

extern crate csv;
extern crate num;
extern crate regex;
#[macro_use]
extern crate rulinalg;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate maplit;

pub mod appearance;
pub mod chromatic_adaptation;
pub mod colors;
mod consts;
pub mod convert;
pub mod delta_e;
pub mod delta_e_matrix;
pub mod density;
pub mod error;
pub mod graph;
pub mod illuminants;
pub mod prelude;
pub mod spectral_data;
