//! This module simply brings the most common functionality under a single namespace, to prevent
//! excessive imports. The prelude includes the dynamic [`Color`] with its [`ColorSpace`] tag and
//! the [`ColorType`] trait, the two color types nearly every workflow touches ([`RGBColor`] and
//! [`XYZColor`], plus [`CIELABColor`] for color difference), the conversion entry points, the
//! [`Illuminant`] and [`Observer`] metadata, and the error type. The other color types live in
//! [`colors`], and the appearance models in [`appearance`].
//!
//! [`Color`]: ../colors/struct.Color.html
//! [`ColorSpace`]: ../colors/enum.ColorSpace.html
//! [`ColorType`]: ../colors/trait.ColorType.html
//! [`RGBColor`]: ../colors/rgbcolor/struct.RGBColor.html
//! [`XYZColor`]: ../colors/xyzcolor/struct.XYZColor.html
//! [`CIELABColor`]: ../colors/cielabcolor/struct.CIELABColor.html
//! [`Illuminant`]: ../illuminants/enum.Illuminant.html
//! [`Observer`]: ../illuminants/enum.Observer.html
//! [`colors`]: ../colors/index.html
//! [`appearance`]: ../appearance/index.html

pub use crate::chromatic_adaptation::AdaptationMethod;
pub use crate::colors::{CIELABColor, Color, ColorSpace, ColorType, RGBColor, RGBProfile, XYZColor};
pub use crate::convert::{convert, convert_color, ConvertOptions};
pub use crate::delta_e::{delta_e, delta_e_with, DeltaEMode, DeltaEWeights};
pub use crate::error::{ColorError, Result};
pub use crate::illuminants::{Illuminant, Observer};
