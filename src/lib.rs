//! Perceptually uniform color ramps in OKLCH.
//!
//! A ramp is described by a handful of *base colors*.  Shades are
//! produced at requested lightness values by interpolating between
//! the two base colors bracketing each lightness, so that a 30% shade
//! of a blue ramp looks as bright as the 30% shade of a red ramp.
//!
//! - [`build_ramp`] and [`interpolate_at`] for one-shot computations,
//! - [`Ramp`] to keep sorted base colors around, together with an
//!   optional [`GamutMap`] applied to every shade,
//! - [`Stops`] to sample a ramp uniformly.
//!
//! Built-in ramps are provided in [`struct@DEFAULT_RAMPS`].

use std::fmt;

pub mod convert;
pub mod error;
pub mod parse;
mod presets;

pub use convert::RGBColor;
pub use error::{ParseColorError, RampError};
pub use presets::ty::NamedRamp;
pub use presets::{DEFAULT_LIGHTNESSES, DEFAULT_RAMPS};

/// A color in the OKLCH color space with an optional alpha component.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Oklch {
    /// Perceived lightness, 0. for black and 1. for white.
    pub lightness: f64,
    /// Colorfulness, non-negative and rarely above 0.4.
    pub chroma: f64,
    /// Hue angle in degrees.  It is not normalized to \[0, 360).
    pub hue: f64,
    /// Opacity in \[0, 1\].  `None` means fully opaque.
    #[cfg_attr(feature = "serde",
               serde(default, skip_serializing_if = "Option::is_none"))]
    pub alpha: Option<f64>,
}

impl Oklch {
    /// Create an opaque color.
    #[inline]
    pub const fn new(lightness: f64, chroma: f64, hue: f64) -> Self {
        Oklch { lightness, chroma, hue, alpha: None }
    }

    /// Return the same color with the given alpha.
    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Oklch { alpha: Some(alpha), ..self }
    }

    /// Return the alpha component, a missing alpha being 1.
    #[inline]
    pub fn opacity(&self) -> f64 { self.alpha.unwrap_or(1.) }

    #[inline]
    fn with_lightness(self, lightness: f64) -> Self {
        Oklch { lightness, ..self }
    }
}

/// Format the color as a CSS `oklch()` function, the lightness being
/// expressed as a percentage rounded to one decimal.
impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = (self.lightness * 1000.).round() / 10.;
        write!(f, "oklch({l}% {} {}deg", self.chroma, self.hue)?;
        match self.alpha {
            Some(a) if a != 1. => write!(f, " / {a})"),
            _ => f.write_str(")"),
        }
    }
}

/// Post-processing applied to every interpolated shade to bring it
/// into a displayable gamut.
///
/// Only the chroma of the returned color is used: lightness, hue and
/// alpha of the interpolated color are kept as they are.  Any
/// `Fn(Oklch) -> Oklch` closure is a `GamutMap`.
pub trait GamutMap {
    /// Return `color` with its chroma reduced so it is displayable.
    fn map_to_gamut(&self, color: Oklch) -> Oklch;
}

/// The gamut map leaving colors untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGamutMap;

impl GamutMap for NoGamutMap {
    #[inline]
    fn map_to_gamut(&self, color: Oklch) -> Oklch { color }
}

impl<F> GamutMap for F where F: Fn(Oklch) -> Oklch {
    #[inline]
    fn map_to_gamut(&self, color: Oklch) -> Oklch { self(color) }
}

/// Replace the chroma of `color` by the one chosen by `gamut`.
#[inline]
fn map_chroma<M: GamutMap>(gamut: &M, color: Oklch) -> Oklch {
    Oklch { chroma: gamut.map_to_gamut(color).chroma, ..color }
}

/// Stable sort by ascending lightness.  NaN lightnesses go to the
/// ends instead of panicking.
fn sort_by_lightness(colors: &mut [Oklch]) {
    colors.sort_by(|c0, c1| c0.lightness.total_cmp(&c1.lightness));
}

/// Interpolate along the shorter arc between the angles `h0` and `h1`
/// (in degrees).  The result is not normalized.
#[inline]
fn lerp_hue(h0: f64, h1: f64, p: f64) -> f64 {
    let d = h1 - h0;
    let h0 = if d > 180. { h0 + 360. } else { h0 };
    let h1 = if d < -180. { h1 + 360. } else { h1 };
    h0 * (1. - p) + h1 * p
}

/// Return the shade of lightness `t`.  `sorted` must be non-empty and
/// sorted by lightness.
fn shade(sorted: &[Oklch], t: f64) -> Oklch {
    let n = sorted.len();
    let first = sorted[0];
    let last = sorted[n - 1];
    if n == 1 || t <= first.lightness {
        return first.with_lightness(t)
    }
    if t >= last.lightness {
        return last.with_lightness(t)
    }
    // first.lightness < t < last.lightness (or `t` is NaN).
    let i = sorted.iter().position(|c| c.lightness > t)
        .map_or(n - 1, |i| i.max(1));
    let prev = &sorted[i - 1];
    let next = &sorted[i];
    let p = (t - prev.lightness) / (next.lightness - prev.lightness);
    log::trace!("lightness {t} between base colors {} and {i}, p = {p}",
                i - 1);
    Oklch {
        lightness: t,
        chroma: prev.chroma * (1. - p) + next.chroma * p,
        hue: lerp_hue(prev.hue, next.hue, p),
        alpha: Some(prev.opacity() * (1. - p) + next.opacity() * p),
    }
}

/// Return the color of lightness `t` of the ramp with base colors
/// `sorted` (which must be sorted by ascending lightness).
///
/// Below the darkest base color (resp. above the lightest one), the
/// chroma, hue and alpha of that base color are used.  In between,
/// they are interpolated linearly between the two closest base colors,
/// the hue going along the shorter arc.  The lightness of the result
/// is always exactly `t`.
///
/// # Example
///
/// ```
/// use oklch_ramps::{interpolate_at, Oklch};
/// let base = [Oklch::new(0.2, 0.1, 350.), Oklch::new(0.6, 0.2, 10.)];
/// let c = interpolate_at(&base, 0.4).unwrap();
/// assert_eq!(c.lightness, 0.4);
/// assert!((c.hue - 360.).abs() < 1e-9);
/// ```
pub fn interpolate_at(sorted: &[Oklch], t: f64) -> Result<Oklch, RampError> {
    match sorted {
        [] => return Err(RampError::InsufficientInput),
        [first, .., last] if first.lightness > last.lightness => {
            return Err(RampError::UnsortedInput)
        }
        _ => (),
    }
    Ok(shade(sorted, t))
}

/// Sort `base_colors` by lightness (in place) and return one shade for
/// each lightness in `targets`, in the same order.
///
/// # Example
///
/// ```
/// use oklch_ramps::{build_ramp, Oklch};
/// let mut base = [Oklch::new(0.5, 0.1, 200.)];
/// let shades = build_ramp(&mut base, &[0.1, 0.9]).unwrap();
/// assert_eq!(shades[0], Oklch::new(0.1, 0.1, 200.));
/// assert_eq!(shades[1], Oklch::new(0.9, 0.1, 200.));
/// ```
pub fn build_ramp(base_colors: &mut [Oklch], targets: &[f64])
                  -> Result<Vec<Oklch>, RampError> {
    build_ramp_with(base_colors, targets, &NoGamutMap)
}

/// Same as [`build_ramp`] but every shade goes through `gamut`.
pub fn build_ramp_with<M>(
    base_colors: &mut [Oklch], targets: &[f64], gamut: &M,
) -> Result<Vec<Oklch>, RampError>
where M: GamutMap {
    if base_colors.is_empty() {
        return Err(RampError::InsufficientInput)
    }
    sort_by_lightness(base_colors);
    log::debug!("building {} shades from {} base colors",
                targets.len(), base_colors.len());
    Ok(targets.iter().map(|&t| map_chroma(gamut, shade(base_colors, t)))
       .collect())
}

/// Build the shades of each named ramp.
///
/// Each ramp gets its own result so that an invalid ramp does not
/// prevent the others from being computed.  The ramps themselves are
/// left untouched.
pub fn build_ramps<'a>(ramps: &'a [NamedRamp], targets: &[f64])
                       -> Vec<(&'a str, Result<Vec<Oklch>, RampError>)> {
    ramps.iter().map(|r| (r.name.as_str(), r.shades(targets))).collect()
}

/// A ramp: base colors sorted by lightness and a [`GamutMap`].
#[derive(Clone, Debug)]
pub struct Ramp<M = NoGamutMap> {
    colors: Vec<Oklch>, // Invariant: non-empty and sorted by lightness
    gamut: M,
}

impl Ramp {
    /// Create a ramp from its base colors, in any order.
    ///
    /// Fails with [`RampError::InsufficientInput`] if `colors` is empty.
    pub fn new(colors: impl Into<Vec<Oklch>>) -> Result<Self, RampError> {
        let mut colors = colors.into();
        if colors.is_empty() {
            return Err(RampError::InsufficientInput)
        }
        sort_by_lightness(&mut colors);
        Ok(Ramp { colors, gamut: NoGamutMap })
    }
}

impl<M> Ramp<M> where M: GamutMap {
    /// Return the same ramp with its shades post-processed by `gamut`.
    ///
    /// # Example
    ///
    /// ```
    /// use oklch_ramps::{Oklch, Ramp};
    /// let ramp = Ramp::new(vec![Oklch::new(0.5, 0.3, 40.)]).unwrap()
    ///     .with_gamut_map(|c: Oklch| Oklch { chroma: c.chroma.min(0.1), ..c });
    /// assert_eq!(ramp.color_at(0.9).chroma, 0.1);
    /// ```
    pub fn with_gamut_map<N: GamutMap>(self, gamut: N) -> Ramp<N> {
        Ramp { colors: self.colors, gamut }
    }

    /// The base colors, sorted by ascending lightness.
    pub fn base_colors(&self) -> &[Oklch] { &self.colors }

    /// Return the shade of lightness `t`.  See [`interpolate_at`].
    pub fn color_at(&self, t: f64) -> Oklch {
        map_chroma(&self.gamut, shade(&self.colors, t))
    }

    /// Return the shades for the lightnesses `targets`, in order.
    pub fn shades(&self, targets: &[f64]) -> Vec<Oklch> {
        targets.iter().map(|&t| self.color_at(t)).collect()
    }

    /// Return an iterator yielding `n` uniformly spaced lightnesses
    /// between `a` and `b` (both included) together with their shades.
    /// It is not required that `a <= b`.
    pub fn stops(&self, mut a: f64, mut b: f64, n: usize) -> Stops<'_, M> {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        if n == 0 {
            Stops { ramp: self, a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Stops { ramp: self, a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding lightnesses in a given range together with
/// the shades of a [`Ramp`].
///
/// Created by [`Ramp::stops`].
#[derive(Clone, Debug)]
pub struct Stops<'a, M> {
    ramp: &'a Ramp<M>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<M> Stops<'_, M> where M: GamutMap {
    /// Return the lightness and shade of position `k` (assuming it is
    /// in the range `0 ..= self.last`).
    fn stop(&self, k: usize) -> (f64, Oklch) {
        let x = if k == 0 {
            self.a
        } else if k == self.last {
            self.b
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                let t = beta / self.flast;
                (1. - t) * self.a + t * self.b
            } else { x }
        };
        (x, self.ramp.color_at(x))
    }

    #[inline]
    fn remaining(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<M> Iterator for Stops<'_, M> where M: GamutMap {
    type Item = (f64, Oklch);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.stop(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }
}

impl<M> ExactSizeIterator for Stops<'_, M> where M: GamutMap {
    fn len(&self) -> usize { self.remaining() }
}

impl<M> DoubleEndedIterator for Stops<'_, M> where M: GamutMap {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.stop(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;

    fn blue() -> Vec<Oklch> {
        vec![Oklch::new(0.975, 0.006, 240.),
             Oklch::new(0.570, 0.124, 248.),
             Oklch::new(0.345, 0.140, 278.)]
    }

    #[test]
    fn single_base_color() {
        let mut base = [Oklch::new(0.5, 0.1, 200.)];
        let shades = build_ramp(&mut base, &[0.1, 0.9]).unwrap();
        assert_eq!(shades, vec![Oklch::new(0.1, 0.1, 200.),
                                Oklch::new(0.9, 0.1, 200.)]);
    }

    #[test]
    fn empty_base_colors() {
        assert_eq!(build_ramp(&mut [], &[0.5]),
                   Err(RampError::InsufficientInput));
        assert_eq!(interpolate_at(&[], 0.5),
                   Err(RampError::InsufficientInput));
        assert_eq!(Ramp::new(Vec::<Oklch>::new()).err(),
                   Some(RampError::InsufficientInput));
    }

    #[test]
    fn unsorted_base_colors() {
        assert_eq!(interpolate_at(&blue(), 0.5), Err(RampError::UnsortedInput));
    }

    #[test]
    fn sorts_in_place() {
        let mut base = blue();
        build_ramp(&mut base, &[]).unwrap();
        let l: Vec<f64> = base.iter().map(|c| c.lightness).collect();
        assert_eq!(l, vec![0.345, 0.570, 0.975]);
    }

    #[test]
    fn boundary_clamp() {
        let mut base = blue();
        let shades = build_ramp(&mut base, &[0.1, 0.345, 0.975, 1.]).unwrap();
        assert_eq!(shades[0], Oklch::new(0.1, 0.140, 278.));
        assert_eq!(shades[1], Oklch::new(0.345, 0.140, 278.));
        assert_eq!(shades[2], Oklch::new(0.975, 0.006, 240.));
        assert_eq!(shades[3], Oklch::new(1., 0.006, 240.));
        // Missing alpha stays missing when clamping.
        assert!(shades.iter().all(|c| c.alpha.is_none()));
    }

    #[test]
    fn boundary_clamp_keeps_alpha() {
        let ramp = Ramp::new(vec![Oklch::new(0.8, 0.05, 90.).with_alpha(0.9),
                                  Oklch::new(0.5, 0.1, 60.),
                                  Oklch::new(0.2, 0.2, 30.).with_alpha(0.4)])
            .unwrap();
        let shades = ramp.shades(&[0., 0.2, 0.8, 1.]);
        assert_eq!(shades[0], Oklch::new(0., 0.2, 30.).with_alpha(0.4));
        assert_eq!(shades[1].alpha, Some(0.4));
        assert_eq!(shades[2].alpha, Some(0.9));
        assert_eq!(shades[3], Oklch::new(1., 0.05, 90.).with_alpha(0.9));
    }

    #[test]
    fn between_base_colors() {
        let mut base = blue();
        let c = build_ramp(&mut base, &[0.47]).unwrap()[0];
        assert_eq!(c.lightness, 0.47);
        assert_approx_eq!(c.chroma, 0.1311111, 1e-6);
        assert_approx_eq!(c.hue, 261.3333333, 1e-6);
        assert_approx_eq!(c.alpha.unwrap(), 1.);
    }

    #[test]
    fn order_preserved() {
        let mut base = blue();
        let targets = [0.9, 0.3, 0.65, 0.42, 0.98];
        let shades = build_ramp(&mut base, &targets).unwrap();
        assert_eq!(shades.len(), targets.len());
        for (c, t) in shades.iter().zip(targets) {
            assert_eq!(c.lightness, t);
        }
    }

    #[test]
    fn exact_lightness() {
        let mut rng = rand::thread_rng();
        let ramp = Ramp::new(blue()).unwrap();
        for _ in 0 .. 1000 {
            let t: f64 = rng.gen_range(-0.5 .. 1.5);
            assert_eq!(ramp.color_at(t).lightness.to_bits(), t.to_bits());
        }
    }

    #[test]
    fn hue_shorter_arc() {
        let c = interpolate_at(&[Oklch::new(0., 0.1, 350.),
                                 Oklch::new(1., 0.1, 10.)], 0.5).unwrap();
        assert_approx_eq!(c.hue, 360.);
        let c = interpolate_at(&[Oklch::new(0., 0.1, 10.),
                                 Oklch::new(1., 0.1, 350.)], 0.5).unwrap();
        assert_approx_eq!(c.hue, 360.);
        let c = interpolate_at(&[Oklch::new(0., 0.1, 100.),
                                 Oklch::new(1., 0.1, 200.)], 0.25).unwrap();
        assert_approx_eq!(c.hue, 125.);
    }

    #[test]
    fn hue_path_never_exceeds_half_turn() {
        let mut rng = rand::thread_rng();
        for _ in 0 .. 1000 {
            let h0: f64 = rng.gen_range(0. .. 360.);
            let h1: f64 = rng.gen_range(0. .. 360.);
            let h = lerp_hue(h0, h1, 1.);
            let h_start = lerp_hue(h0, h1, 0.);
            assert!((h - h_start).abs() <= 180. + 1e-9,
                    "{h0} → {h1}: {h_start} → {h}");
            assert_approx_eq!(h.rem_euclid(360.), h1, 1e-9);
        }
    }

    #[test]
    fn alpha_defaults_to_opaque() {
        let base = [Oklch::new(0.2, 0.1, 30.),
                    Oklch::new(0.8, 0.1, 30.).with_alpha(0.5)];
        let c = interpolate_at(&base, 0.5).unwrap();
        assert_approx_eq!(c.alpha.unwrap(), 0.75);
    }

    #[test]
    fn idempotent() {
        let mut base = blue();
        let targets = DEFAULT_LIGHTNESSES;
        let s0 = build_ramp(&mut base, &targets).unwrap();
        let s1 = build_ramp(&mut base, &targets).unwrap();
        assert_eq!(s0, s1);
    }

    #[test]
    fn equal_lightnesses() {
        let base = vec![Oklch::new(0.2, 0.1, 30.),
                        Oklch::new(0.5, 0.2, 60.),
                        Oklch::new(0.5, 0.3, 90.),
                        Oklch::new(0.8, 0.1, 120.)];
        let ramp = Ramp::new(base).unwrap();
        assert_eq!(ramp.color_at(0.5).lightness, 0.5);
        let c = ramp.color_at(0.65);
        assert_approx_eq!(c.chroma, 0.2);
        assert_approx_eq!(c.hue, 105.);
    }

    #[test]
    fn nan_propagates() {
        let ramp = Ramp::new(blue()).unwrap();
        assert!(ramp.color_at(f64::NAN).chroma.is_nan());
        let ramp = Ramp::new(vec![Oklch::new(f64::NAN, 0.1, 0.),
                                  Oklch::new(0.5, 0.1, 0.)]).unwrap();
        let _ = ramp.shades(&[0., 0.5, 1.]);
    }

    #[test]
    fn gamut_map_changes_chroma_only() {
        let halve = |c: Oklch| Oklch::new(0., c.chroma / 2., 0.).with_alpha(0.);
        let mut base = blue();
        let plain = build_ramp(&mut base, &DEFAULT_LIGHTNESSES).unwrap();
        let mapped = build_ramp_with(&mut base, &DEFAULT_LIGHTNESSES, &halve)
            .unwrap();
        for (p, m) in plain.iter().zip(&mapped) {
            assert_eq!(m.lightness, p.lightness);
            assert_eq!(m.hue, p.hue);
            assert_eq!(m.alpha, p.alpha);
            assert_eq!(m.chroma, p.chroma / 2.);
        }
        let ramp = Ramp::new(blue()).unwrap().with_gamut_map(halve);
        assert_eq!(ramp.shades(&DEFAULT_LIGHTNESSES), mapped);
    }

    #[test]
    fn stops_range() {
        let ramp = Ramp::new(blue()).unwrap();
        for (i, (x, c)) in ramp.stops(0., 1., 11).enumerate() {
            assert!((x - 0.1 * i as f64).abs() <= 1e-15,
                    "{} ≉ {}", x, 0.1 * i as f64);
            assert_eq!(ramp.color_at(x), c);
        }
        assert_eq!(ramp.stops(0., 1., 0).count(), 0);
        assert_eq!(ramp.stops(0.3, 1., 1).map(|(x, _)| x).collect::<Vec<_>>(),
                   vec![0.3]);
        let mut stops = ramp.stops(1., 0., 5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops.next_back().map(|(x, _)| x), Some(0.));
        assert_eq!(stops.next().map(|(x, _)| x), Some(1.));
        assert_eq!(stops.len(), 3);
        let rest: Vec<f64> = stops.rev().map(|(x, _)| x).collect();
        assert_eq!(rest, vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn css() {
        assert_eq!(Oklch::new(0.5, 0.1, 200.).to_string(),
                   "oklch(50% 0.1 200deg)");
        assert_eq!(Oklch::new(0.975, 0.006, 240.).with_alpha(1.).to_string(),
                   "oklch(97.5% 0.006 240deg)");
        assert_eq!(Oklch::new(0.3, 0.2, 13.5).with_alpha(0.5).to_string(),
                   "oklch(30% 0.2 13.5deg / 0.5)");
    }

    #[test]
    fn thread_safe() {
        fn is_send_sync<T: Send + Sync>() {}
        is_send_sync::<Oklch>();
        is_send_sync::<Ramp>();
        is_send_sync::<NamedRamp>();
    }
}
