//! Errors raised while building ramps and reading colors.

use std::fmt;

/// An error preventing the computation of a ramp.
///
/// In a batch of ramps, the error only concerns the ramp it was
/// returned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampError {
    /// No base color was supplied.  At least one is needed.
    InsufficientInput,

    /// The base colors are not sorted by ascending lightness.  Only
    /// [`interpolate_at`](crate::interpolate_at) reports it, all other
    /// functions sort the base colors first.
    UnsortedInput,
}

impl fmt::Display for RampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use RampError::*;

        match self {
            InsufficientInput => f.write_str("at least one base color is required"),
            UnsortedInput => f.write_str(
                "base colors must be sorted by lightness, from 0 to 1"),
        }
    }
}

impl std::error::Error for RampError {}

// ====================================================================

/// An erroneous hexadecimal color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseColorError {
    /// Nothing but an optional `#`.
    Empty,

    /// A character that is not a hexadecimal digit, as in `#12g`.
    UnexpectedCharacters,

    /// A number of digits other than 3, 4, 6, or 8.
    WrongLength(usize),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseColorError::*;

        match *self {
            Empty => f.write_str("empty color"),
            UnexpectedCharacters => {
                f.write_str("color should only contain hexadecimal digits")
            }
            WrongLength(n) => write!(
                f, "color should have 3, 4, 6, or 8 hexadecimal digits, not {n}"),
        }
    }
}

impl std::error::Error for ParseColorError {}
