/*!
Conversions from raw browser readings to whole pixels.

Readings the browser cannot supply, or supplies as garbage (negative, NaN,
infinite), collapse to 0 px; a missing pixel ratio collapses to 1.0.
*/

/// Round a CSS pixel length to whole pixels, clamped to `0..=u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn css_px(value: f64) -> u32 {
  if value.is_finite() && value > 0.0 {
    value.round().min(f64::from(u32::MAX)) as u32
  } else {
    0
  }
}

/// Integer pixel reading; absent or negative reads as 0.
pub(crate) fn int_px(value: Option<i32>) -> u32 {
  value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

pub(crate) fn pixel_ratio(value: Option<f64>) -> f64 {
  value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(1.0)
}
