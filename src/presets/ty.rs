use crate::{Oklch, Ramp, RampError};

/// A named list of base colors.
///
/// Only the base colors take part in ramp computations; the name is
/// for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRamp {
    /// Display name.
    pub name: String,
    /// Base colors, in any order.
    #[cfg_attr(feature = "serde",
               serde(rename = "baseColors", alias = "base_colors"))]
    pub base_colors: Vec<Oklch>,
}

impl NamedRamp {
    /// Create a named ramp.
    pub fn new(name: impl Into<String>, base_colors: Vec<Oklch>) -> Self {
        NamedRamp { name: name.into(), base_colors }
    }

    /// Return the [`Ramp`] of the base colors.  `self` is not
    /// reordered.
    pub fn ramp(&self) -> Result<Ramp, RampError> {
        Ramp::new(self.base_colors.as_slice())
    }

    /// Return the shades for the lightnesses `targets`, in order.
    pub fn shades(&self, targets: &[f64]) -> Result<Vec<Oklch>, RampError> {
        Ok(self.ramp()?.shades(targets))
    }
}
