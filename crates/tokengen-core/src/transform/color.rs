use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::{definition, parse_alias, Definition};
use crate::error::TokenError;
use crate::expr::{Expr, Rgb};

/// `rgb(255, 0, 128)` — whitespace around components is tolerated.
static RE_RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap()
});

/// Transform a color token: literal, alias, or light/dark variant set.
pub fn transform(raw: &Value) -> Result<Expr, TokenError> {
    match definition(raw) {
        Definition::Value(value) => scalar(value),
        Definition::Sets(sets) => Ok(Expr::dark_mode(
            variant(sets, "dark")?,
            variant(sets, "light")?,
        )),
    }
}

/// One side of a light/dark set. Nested sets are not allowed.
fn variant(sets: &Map<String, Value>, name: &str) -> Result<Expr, TokenError> {
    let def = sets.get(name).ok_or_else(|| {
        TokenError::InvalidColorFormat(format!("color set has no `{name}` variant"))
    })?;
    match definition(def) {
        Definition::Value(value) => scalar(value),
        Definition::Sets(_) => Err(TokenError::InvalidColorFormat(format!(
            "nested sets in `{name}` variant"
        ))),
    }
}

/// A single color value: `rgb(...)` or `{alias}`.
fn scalar(value: &Value) -> Result<Expr, TokenError> {
    let Some(s) = value.as_str() else {
        return Err(TokenError::InvalidColorFormat(value.to_string()));
    };
    if let Some(target) = parse_alias(s) {
        return Ok(Expr::reference(target));
    }
    parse_rgb(s)
        .map(Expr::Color)
        .ok_or_else(|| TokenError::InvalidColorFormat(s.to_string()))
}

/// Parse `rgb(r, g, b)` with each channel in 0–255.
pub fn parse_rgb(s: &str) -> Option<Rgb> {
    let caps = RE_RGB.captures(s.trim())?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some(Rgb::new(r, g, b))
}
