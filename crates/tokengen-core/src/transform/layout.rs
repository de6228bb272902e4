use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{definition, parse_alias, Definition};
use crate::error::TokenError;
use crate::expr::Expr;

/// The only device profile consulted in layout sets.
pub const LAYOUT_PROFILE: &str = "desktop";

/// Aliases inside layout values may only target font sizes.
const ALIAS_TARGET_MARKER: &str = "font-size";

/// `16px`, `-4px` — integer CSS pixels.
static RE_PIXELS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(-?\d+)px$").unwrap());

/// `1`, `-2`, `1.5` — bare numbers passed through verbatim.
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

/// Transform a layout token: pixels, bare number, font-size alias, or a
/// per-profile set (only `desktop` is used).
pub fn transform(raw: &Value) -> Result<Expr, TokenError> {
    match definition(raw) {
        Definition::Value(value) => scalar(value),
        Definition::Sets(sets) => {
            let def = sets.get(LAYOUT_PROFILE).ok_or_else(|| {
                TokenError::InvalidSizeFormat(format!("set has no `{LAYOUT_PROFILE}` profile"))
            })?;
            match definition(def) {
                Definition::Value(value) => scalar(value),
                Definition::Sets(_) => Err(TokenError::InvalidSizeFormat(format!(
                    "nested sets in `{LAYOUT_PROFILE}` profile"
                ))),
            }
        }
    }
}

fn scalar(value: &Value) -> Result<Expr, TokenError> {
    match value {
        Value::Number(n) => Ok(Expr::Number(n.to_string())),
        Value::String(s) => parse_size(s),
        other => Err(TokenError::InvalidSizeFormat(other.to_string())),
    }
}

/// Parse a single size string.
pub fn parse_size(s: &str) -> Result<Expr, TokenError> {
    let s = s.trim();
    if let Some(caps) = RE_PIXELS.captures(s) {
        let px: i64 = caps[1]
            .parse()
            .map_err(|_| TokenError::InvalidSizeFormat(s.to_string()))?;
        return Ok(Expr::ScaledPixel(px));
    }
    if RE_NUMBER.is_match(s) {
        return Ok(Expr::Number(s.to_string()));
    }
    if let Some(target) = parse_alias(s) {
        if target.contains(ALIAS_TARGET_MARKER) {
            return Ok(Expr::reference(target));
        }
        return Err(TokenError::InvalidSizeFormat(format!(
            "alias `{target}` does not name a font size"
        )));
    }
    Err(TokenError::InvalidSizeFormat(s.to_string()))
}
