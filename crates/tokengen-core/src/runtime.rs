//! The operations generated code expects from the theming runtime.
//!
//! Nothing in the compiler calls these. The emitted `init` function is
//! generic over a [`ThemeRuntime`], and applications implement it on top of
//! their toolkit's appearance, scaling and font APIs.

/// CSS pixels are 1/96 in; runtime pixel counts are in points (1/72 in).
const POINTS_PER_CSS_PIXEL: f64 = 72.0 / 96.0;

/// Services a generated token module needs at initialization time.
pub trait ThemeRuntime {
    /// Handle returned by [`ThemeRuntime::get_or_create_font`].
    type Font: Clone;

    /// Whether dark appearance is active. Read once per `init` call.
    fn dark_mode(&self) -> bool;

    /// Convert CSS pixels to device pixels for the current display.
    fn scale_pixel(&self, px: i64) -> i64;

    /// Look up a font by family, point size and boldness, creating it on
    /// first use.
    fn get_or_create_font(&mut self, family: &str, size: f64, bold: bool) -> Self::Font;
}

/// `floor(scale_factor * px * 72 / 96)`, for runtimes that only know their
/// display scale factor.
pub fn scale_pixel_with(scale_factor: f64, px: i64) -> i64 {
    (scale_factor * px as f64 * POINTS_PER_CSS_PIXEL).floor() as i64
}
