//! This file provides constants that are used for matrix multiplication and color space conversion,
//! along with a function for computing inverses. The reason for this method of doing things instead
//! of writing out the inverse transforms by hand is that hand-copied inverses are slightly off,
//! allowing errors to slowly creep in even when doing things that should not change the result at
//! all, e.g., converting to an illuminant and back again. Computing every inverse from its forward
//! matrix keeps round trips exact up to floating point.

use rulinalg::matrix::Matrix;
use rulinalg::vector::Vector;

/// The CIE threshold between the linear and cube-root segments of the CIELAB companding function,
/// (6/29)^3.
pub const CIE_E: f64 = 216.0 / 24389.0;

/// The slope of the linear segment of the CIELAB lightness function, (29/3)^3.
pub const CIE_K: f64 = 24389.0 / 27.0;

/// Not safe for general use: this panics on singular matrices! The only reason this is here is to
/// calculate the inverse of constant matrices, which are known to be invertible.
pub fn inv(m: &Matrix<f64>) -> Matrix<f64> {
    match m.clone().inverse() {
        Ok(inverse) => inverse,
        Err(e) => panic!("Constant matrix not invertible: {}", e),
    }
}

/// Multiplies a 3x3 matrix by a column vector given as an array.
pub fn mul3(m: &Matrix<f64>, v: [f64; 3]) -> [f64; 3] {
    let out = m * &Vector::new(v.to_vec());
    [out[0], out[1], out[2]]
}

lazy_static! {
    /// The Bradford cone response matrix, the default for chromatic adaptation.
    pub static ref BRADFORD_TRANSFORM_MAT: Matrix<f64> = matrix![
        0.8951, 0.2664, -0.1614;
        -0.7502, 1.7135, 0.0367;
        0.0389, -0.0685, 1.0296
    ];

    /// The von Kries cone response matrix (Hunt-Pointer-Estévez, normalized to D65).
    pub static ref VON_KRIES_TRANSFORM_MAT: Matrix<f64> = matrix![
        0.40024, 0.70760, -0.08081;
        -0.22630, 1.16532, 0.04570;
        0.0, 0.0, 0.91822
    ];

    /// Plain XYZ scaling: the "cone space" is XYZ itself.
    pub static ref XYZ_SCALING_TRANSFORM_MAT: Matrix<f64> = Matrix::identity(3);
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_inverse_round_trip() {
        let m = &*BRADFORD_TRANSFORM_MAT;
        let v = [0.3, 0.53, 0.65];
        let back = mul3(&inv(m), mul3(m, v));
        for i in 0..3 {
            assert!((back[i] - v[i]).abs() <= 1e-12);
        }
    }

    #[test]
    fn test_cie_constants() {
        // the two segments meet at L* = 8
        assert!((CIE_E * CIE_K - 8.0).abs() <= 1e-12);
    }
}
