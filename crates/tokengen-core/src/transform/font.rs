use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::trace;

use super::layout::{self, LAYOUT_PROFILE};
use super::{definition, Definition};
use crate::error::TokenError;
use crate::expr::Expr;

/// Typography keys that are really layout metrics. Matched as `*pattern*`,
/// case-insensitively.
const LAYOUT_KEY_PATTERNS: &[&str] = &["size", "height", "margin", "color", "spacing"];

/// `14`, `14.5`, `14pt`, `14px`.
static RE_POINT_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)(?:pt|px)?$").unwrap());

/// Transform a typography token.
///
/// A complete family/size/weight triple becomes a font reference; keys that
/// look like metrics go through the layout rules; everything else is ignored.
pub fn transform(key: &str, raw: &Value) -> Result<Option<Expr>, TokenError> {
    if let Some(font) = font_reference(raw) {
        return Ok(Some(font));
    }
    if matches_layout_pattern(key) {
        return layout::transform(raw).map(Some);
    }
    trace!(key, "typography key has no emitted value, ignoring");
    Ok(None)
}

/// Whether `key` matches one of the metric globs.
pub fn matches_layout_pattern(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    LAYOUT_KEY_PATTERNS.iter().any(|p| key.contains(p))
}

fn font_reference(raw: &Value) -> Option<Expr> {
    let value = match definition(raw) {
        Definition::Value(value) => value,
        Definition::Sets(sets) => match definition(sets.get(LAYOUT_PROFILE)?) {
            Definition::Value(value) => value,
            Definition::Sets(_) => return None,
        },
    };
    let Value::Object(obj) = value else {
        return None;
    };
    font_triple(obj)
}

fn font_triple(obj: &Map<String, Value>) -> Option<Expr> {
    let family = obj.get("fontFamily")?.as_str()?.trim();
    let weight = obj.get("fontWeight")?.as_str()?;
    let size = match obj.get("fontSize")? {
        Value::Number(n) if n.as_f64().is_some_and(|f| f >= 0.0) => n.to_string(),
        Value::String(s) => RE_POINT_SIZE.captures(s.trim())?[1].to_string(),
        _ => return None,
    };
    if family.is_empty() {
        return None;
    }
    Some(Expr::Font {
        family: family.to_string(),
        size,
        bold: weight.to_ascii_lowercase().contains("bold"),
    })
}
