//! Built-in ramps.

use lazy_static::lazy_static;
pub(crate) mod ty;
use ty::NamedRamp;
use crate::Oklch;

/// Default lightness stops: 30%, 42%, 47%, 56%, 65%, 78%, 90%, 95%, 98%.
pub const DEFAULT_LIGHTNESSES: [f64; 9] =
    [0.30, 0.42, 0.47, 0.56, 0.65, 0.78, 0.90, 0.95, 0.98];

lazy_static! {
  /// Hand-picked ramps: Blue, Red, Ocean, Bloom, Gold and Grey.
  ///
  /// The Ocean ramp goes from royal blue to seafoam green; its lightest
  /// shades fall outside of the sRGB gamut.
  pub static ref DEFAULT_RAMPS: Vec<NamedRamp> = {
    vec![
      NamedRamp::new("Blue", vec![
        Oklch::new(0.975, 0.006, 240.),
        Oklch::new(0.570, 0.124, 248.),
        Oklch::new(0.345, 0.140, 278.)]),
      NamedRamp::new("Red", vec![
        Oklch::new(0.344, 0.091, 13.5),
        Oklch::new(0.570, 0.200, 21.),
        Oklch::new(0.952, 0.018, 30.)]),
      NamedRamp::new("Ocean", vec![
        Oklch::new(0.20, 0.124, 250.),
        Oklch::new(1.00, 0.050, 160.)]),
      NamedRamp::new("Bloom", vec![
        Oklch::new(0.344, 0.091, 13.5),
        Oklch::new(0.737, 0.188, 337.),
        Oklch::new(0.980, 0.014, 337.)]),
      NamedRamp::new("Gold", vec![
        Oklch::new(0.919, 0.192, 102.),
        Oklch::new(0.662, 0.205, 70.)]),
      NamedRamp::new("Grey", vec![
        Oklch::new(0.50, 0.001, 180.)]),
    ]
  };
}
