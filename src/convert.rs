//! Conversions between [`Oklch`] and sRGB.
//!
//! Only what is needed at the boundary of ramp computations is
//! provided: reading colors typed as hexadecimal sRGB, writing shades
//! back as sRGB, and telling whether a shade can be displayed on an
//! sRGB screen.  Conversions go through linear sRGB and Oklab, see
//! [Björn Ottosson's post](https://bottosson.github.io/posts/oklab/).

use rgb::{RGBA, RGB8, RGBA8};
use crate::{Oklch, ParseColorError};

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green, blue and alpha components of the color
    /// (in \[0, 255\]).
    fn to_rgba(&self) -> RGBA<f64>;

    /// Create a color from its RGBA components (in \[0, 255\]).
    fn from_rgba(rgba: RGBA<f64>) -> Self;
}

impl RGBColor for RGBA<f64> {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> { *self }

    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64, a: 255. }
    }

    /// Components are rounded and clamped to \[0, 255\].
    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgba(&self) -> RGBA<f64> {
        RGBA{ r: self.r as f64, g: self.g as f64, b: self.b as f64,
              a: self.a as f64 }
    }

    /// Components are rounded and clamped to \[0, 255\].
    #[inline]
    fn from_rgba(c: RGBA<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: c.a.round() as u8 }
    }
}

/// Tolerance on linear sRGB components for the gamut test.
const GAMUT_EPS: f64 = 1e-5;

fn srgb_to_linear(x: f64) -> f64 {
    if x > 0.04045 { ((x + 0.055) / 1.055).powf(2.4) } else { x / 12.92 }
}

fn linear_to_srgb(x: f64) -> f64 {
    if x > 0.0031308 { 1.055 * x.powf(1. / 2.4) - 0.055 } else { 12.92 * x }
}

/// Linear sRGB → Oklab.
fn linear_srgb_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;
    let (l, m, s) = (l.cbrt(), m.cbrt(), s.cbrt());
    [0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
     1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
     0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s]
}

/// Oklab → linear sRGB.
fn oklab_to_linear_srgb([l, a, b]: [f64; 3]) -> [f64; 3] {
    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;
    let (l, m, s) = (l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_);
    [4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
     -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
     -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s]
}

impl Oklch {
    /// Convert an sRGB color.  The hue is in \[0, 360) and the alpha
    /// is `None` for opaque colors.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use oklch_ramps::Oklch;
    /// let white = Oklch::from_rgb(&RGB8::new(255, 255, 255));
    /// assert!((white.lightness - 1.).abs() < 1e-6);
    /// ```
    pub fn from_rgb<C: RGBColor>(c: &C) -> Oklch {
        let RGBA { r, g, b, a } = c.to_rgba();
        let [l, a_, b_] = linear_srgb_to_oklab(
            [srgb_to_linear(r / 255.), srgb_to_linear(g / 255.),
             srgb_to_linear(b / 255.)]);
        let hue = { let h = b_.atan2(a_).to_degrees();
                    if h < 0. { h + 360. } else { h } };
        let alpha = if a >= 255. { None } else { Some(a / 255.) };
        Oklch { lightness: l, chroma: a_.hypot(b_), hue, alpha }
    }

    fn to_linear_srgb(&self) -> [f64; 3] {
        let h = self.hue.to_radians();
        oklab_to_linear_srgb([self.lightness, self.chroma * h.cos(),
                              self.chroma * h.sin()])
    }

    /// Convert to sRGB.  Colors outside of the sRGB gamut have
    /// components outside of \[0, 255\], which 8 bits encodings clamp.
    pub fn to_rgb<C: RGBColor>(&self) -> C {
        let [r, g, b] = self.to_linear_srgb();
        C::from_rgba(RGBA { r: 255. * linear_to_srgb(r),
                            g: 255. * linear_to_srgb(g),
                            b: 255. * linear_to_srgb(b),
                            a: 255. * self.opacity() })
    }

    /// Says whether the color can be displayed on an sRGB screen.
    pub fn in_srgb_gamut(&self) -> bool {
        self.to_linear_srgb().iter()
            .all(|x| (-GAMUT_EPS ..= 1. + GAMUT_EPS).contains(x))
    }

    /// Read a hexadecimal sRGB color: `rgb`, `rgba`, `rrggbb` or
    /// `rrggbbaa`, optionally preceded by `#`.
    ///
    /// # Example
    ///
    /// ```
    /// use oklch_ramps::Oklch;
    /// let c = Oklch::from_hex("#1234ab").unwrap();
    /// assert_eq!(c.to_hex(), "#1234ab");
    /// ```
    pub fn from_hex(s: &str) -> Result<Oklch, ParseColorError> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseColorError::Empty)
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::UnexpectedCharacters)
        }
        let channels: Vec<u8> = match digits.len() {
            3 | 4 => digits.chars()
                .map(|c| c.to_digit(16).map_or(0, |d| 17 * d as u8))
                .collect(),
            6 | 8 => (0 .. digits.len()).step_by(2)
                .map(|i| u8::from_str_radix(&digits[i .. i + 2], 16))
                .collect::<Result<_, _>>()
                .map_err(|_| ParseColorError::UnexpectedCharacters)?,
            n => return Err(ParseColorError::WrongLength(n)),
        };
        let a = channels.get(3).copied().unwrap_or(255);
        Ok(Oklch::from_rgb(&RGBA8::new(channels[0], channels[1], channels[2], a)))
    }

    /// Return the `#rrggbb` notation of the color, clamped to sRGB.
    pub fn to_hex(&self) -> String {
        let c: RGB8 = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}
