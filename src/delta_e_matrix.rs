//! Delta E against many colors at once. The samples are the rows of an N×3 matrix of L*, a*, b*
//! values, which is how batches of measurements usually arrive, and the result is a vector with one
//! difference per row.

use rulinalg::matrix::{BaseMatrix, Matrix};
use rulinalg::vector::Vector;

use crate::colors::{CIELABColor, ColorSpace};
use crate::delta_e::{DeltaEMode, DeltaEWeights};
use crate::error::{ColorError, Result};

/// Computes the difference between `reference` and every row of `samples`, using the default
/// weights of the chosen formula. The reference's illuminant and observer are assumed for every
/// row. Fails with `InvalidValue` unless the matrix has exactly 3 columns.
pub fn delta_e_matrix(
    reference: &CIELABColor,
    samples: &Matrix<f64>,
    mode: DeltaEMode,
) -> Result<Vector<f64>> {
    delta_e_matrix_with(reference, samples, mode, &DeltaEWeights::default())
}

/// Like [`delta_e_matrix`](fn.delta_e_matrix.html), with weights other than the defaults.
pub fn delta_e_matrix_with(
    reference: &CIELABColor,
    samples: &Matrix<f64>,
    mode: DeltaEMode,
    weights: &DeltaEWeights,
) -> Result<Vector<f64>> {
    if samples.cols() != 3 {
        return Err(ColorError::InvalidValue {
            space: ColorSpace::Lab,
            reason: format!(
                "expected a matrix with 3 columns (L*, a*, b*), got {}",
                samples.cols()
            ),
        });
    }
    let diffs: Vec<f64> = samples
        .data()
        .chunks(3)
        .map(|row| {
            let sample = CIELABColor {
                l: row[0],
                a: row[1],
                b: row[2],
                ..*reference
            };
            mode.eval_with(reference, &sample, weights)
        })
        .collect();
    Ok(Vector::new(diffs))
}
