//! CMY with black ink pulled out: as much of the three colored inks as they have in common is
//! replaced by K, the key plate.

use super::{check_values, CMYColor, ColorSpace, ColorType};
use crate::error::Result;

/// A color in CMYK, each channel between 0 and 1.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CMYKColor {
    /// Cyan.
    pub c: f64,
    /// Magenta.
    pub m: f64,
    /// Yellow.
    pub y: f64,
    /// Black.
    pub k: f64,
}

impl CMYKColor {
    /// Makes a new CMYK color.
    pub fn new(c: f64, m: f64, y: f64, k: f64) -> CMYKColor {
        CMYKColor { c, m, y, k }
    }

    /// Pulls the shared component of the three inks out into black. Pure black has no color ink
    /// left at all.
    pub fn from_cmy(cmy: &CMYColor) -> CMYKColor {
        let k = cmy.c.min(cmy.m).min(cmy.y).min(1.0);
        if k == 1.0 {
            return CMYKColor::new(0.0, 0.0, 0.0, 1.0);
        }
        CMYKColor {
            c: (cmy.c - k) / (1.0 - k),
            m: (cmy.m - k) / (1.0 - k),
            y: (cmy.y - k) / (1.0 - k),
            k,
        }
    }

    /// Folds black back into the three inks.
    pub fn to_cmy(&self) -> CMYColor {
        CMYColor {
            c: self.c * (1.0 - self.k) + self.k,
            m: self.m * (1.0 - self.k) + self.k,
            y: self.y * (1.0 - self.k) + self.k,
        }
    }
}

impl ColorType for CMYKColor {
    const SPACE: ColorSpace = ColorSpace::CMYK;

    fn values(&self) -> Vec<f64> {
        vec![self.c, self.m, self.y, self.k]
    }

    fn from_values(values: &[f64]) -> Result<CMYKColor> {
        check_values(Self::SPACE, values)?;
        Ok(CMYKColor::new(values[0], values[1], values[2], values[3]))
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_cmy_to_cmyk() {
        let cmyk = CMYKColor::from_cmy(&CMYColor::new(0.518, 0.216, 0.804));
        assert!((cmyk.c - 0.385).abs() <= 1e-3);
        assert!(cmyk.m.abs() <= 1e-12);
        assert!((cmyk.y - 0.750).abs() <= 1e-3);
        assert!((cmyk.k - 0.216).abs() <= 1e-12);
    }

    #[test]
    fn test_black() {
        let cmyk = CMYKColor::from_cmy(&CMYColor::new(1.0, 1.0, 1.0));
        assert_eq!(cmyk, CMYKColor::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(cmyk.to_cmy(), CMYColor::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_round_trip() {
        let cmy = CMYColor::new(0.3, 0.6, 0.45);
        let back = CMYKColor::from_cmy(&cmy).to_cmy();
        assert!((cmy.c - back.c).abs() <= 1e-12);
        assert!((cmy.m - back.m).abs() <= 1e-12);
        assert!((cmy.y - back.y).abs() <= 1e-12);
    }
}
