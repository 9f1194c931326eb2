//! The errors that can occur when building colors, converting between color spaces, or evaluating
//! color difference and color appearance formulas. Every fallible function in this crate returns
//! [`Result`](type.Result.html), and every failure is one of the variants of
//! [`ColorError`](enum.ColorError.html).
//!
//! The variants fall into three groups. Validation errors (`MissingValue`, `InvalidValue`,
//! `InvalidIlluminant`, `InvalidObserver`) come from constructing a color from untrusted input.
//! Path errors (`UndefinedConversion`) come from asking for a conversion that the registry cannot
//! build. Domain errors (`Format`, `InvalidDeltaEMode`, `Domain`, `WrongColorSpace`) come from
//! violating the precondition of a specific formula.

use thiserror::Error;

use crate::colors::ColorSpace;

/// A failure anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// Fewer coordinates were supplied than the color space needs.
    #[error("{space} needs {expected} coordinates, but only {found} were given")]
    MissingValue {
        /// The color space being constructed.
        space: ColorSpace,
        /// The arity of that space.
        expected: usize,
        /// How many coordinates were actually supplied.
        found: usize,
    },
    /// A coordinate was present but unusable: too many of them, text that isn't a number, or a
    /// value that isn't finite.
    #[error("invalid value for {space}: {reason}")]
    InvalidValue {
        /// The color space being constructed.
        space: ColorSpace,
        /// What was wrong with the value.
        reason: String,
    },
    /// The illuminant named is not one of the supported CIE illuminants, or an operation needs data
    /// for an illuminant that isn't available.
    #[error("invalid illuminant: {0}")]
    InvalidIlluminant(String),
    /// The observer named is neither the 2° nor the 10° standard observer.
    #[error("invalid observer: {0} (expected 2 or 10)")]
    InvalidObserver(String),
    /// There is no chain of registered conversions from one space to the other.
    #[error("no conversion defined from {from} to {to}")]
    UndefinedConversion {
        /// The source color space.
        from: ColorSpace,
        /// The requested target color space.
        to: ColorSpace,
    },
    /// A value of one color space was handed to something that only accepts another.
    #[error("expected a {expected} value, got a {found} value")]
    WrongColorSpace {
        /// The color space required.
        expected: ColorSpace,
        /// The color space actually supplied.
        found: ColorSpace,
    },
    /// A string representation of a color could not be parsed.
    #[error("format error: {0}")]
    Format(String),
    /// The Delta E formula name is not one of `cie1976`, `cie1994`, `cie2000`, `cmc`.
    #[error("invalid delta E mode: {0}")]
    InvalidDeltaEMode(String),
    /// A formula precondition was violated, such as a viewing condition outside the range a color
    /// appearance model is defined on.
    #[error("{model}: {reason}")]
    Domain {
        /// The model or formula that rejected its input.
        model: &'static str,
        /// What was wrong with the input.
        reason: String,
    },
}

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ColorError>;

impl ColorError {
    /// Shorthand for a `Domain` error.
    pub(crate) fn domain<S: Into<String>>(model: &'static str, reason: S) -> ColorError {
        ColorError::Domain {
            model,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_error_messages_name_both_spaces() {
        let err = ColorError::UndefinedConversion {
            from: ColorSpace::XYZ,
            to: ColorSpace::Spectral,
        };
        let msg = err.to_string();
        assert!(msg.contains("XYZColor"));
        assert!(msg.contains("SpectralColor"));
    }

    #[test]
    fn test_missing_value_message() {
        let err = ColorError::MissingValue {
            space: ColorSpace::Lab,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "LabColor needs 3 coordinates, but only 2 were given"
        );
    }
}
