//! Reading user-typed lists of lightnesses and colors.
//!
//! Both lists are comma separated.  Entries that cannot be read are
//! skipped (and logged) rather than rejecting the whole list, so that
//! a half-typed list is still usable.

use crate::Oklch;

/// Lightness used when no percentage could be read.
const FALLBACK_LIGHTNESS: f64 = 0.5;

fn parse_percent(s: &str) -> Option<f64> {
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    s.parse::<f64>().ok().filter(|p| !p.is_nan())
}

/// Read comma-separated percentages such as `"30%, 42.5, 90%"` and
/// return the corresponding lightnesses in \[0, 1\], sorted.
///
/// Percentages below 0 (resp. above 100) are clamped to 0 (resp. 1).
/// If no percentage is found, `[0.5]` is returned.
///
/// # Example
///
/// ```
/// use oklch_ramps::parse::parse_lightnesses;
/// assert_eq!(parse_lightnesses("90%, 30%, 150"), vec![0.3, 0.9, 1.]);
/// assert_eq!(parse_lightnesses(""), vec![0.5]);
/// ```
pub fn parse_lightnesses(input: &str) -> Vec<f64> {
    let mut lightnesses: Vec<f64> = input.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| {
            let p = parse_percent(s);
            if p.is_none() { log::warn!("ignoring lightness “{s}”") }
            p })
        .map(|p| if p < 0. { 0. } else if p > 100. { 1. } else { p / 100. })
        .collect();
    if lightnesses.is_empty() {
        return vec![FALLBACK_LIGHTNESS]
    }
    lightnesses.sort_by(f64::total_cmp);
    lightnesses
}

/// Read comma-separated hexadecimal colors such as `"1234ab, #fc0"`.
/// Invalid colors are skipped.
pub fn parse_colors(input: &str) -> Vec<Oklch> {
    input.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match Oklch::from_hex(s) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("ignoring color “{s}”: {e}");
                None
            }
        })
        .collect()
}
