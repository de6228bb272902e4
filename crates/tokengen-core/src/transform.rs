//! Value transformers: one raw JSON token definition in, one [`Expr`] out.

pub mod color;
pub mod font;
pub mod layout;

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::TokenError;
use crate::expr::Expr;

/// `{gray-400}` — a whole-value alias to another token.
static RE_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([A-Za-z0-9_.-]+)\}$").unwrap());

/// Which transformer a file's tokens go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Color,
    Layout,
    Font,
}

impl Category {
    /// Transform one token. `Ok(None)` means the key carries nothing this
    /// category emits and is skipped without a diagnostic.
    pub fn transform(self, key: &str, raw: &Value) -> Result<Option<Expr>, TokenError> {
        match self {
            Category::Color => color::transform(raw).map(Some),
            Category::Layout => layout::transform(raw).map(Some),
            Category::Font => font::transform(key, raw),
        }
    }
}

/// A token definition with its `value`/`sets` wrapper peeled off.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Definition<'a> {
    Value(&'a Value),
    Sets(&'a Map<String, Value>),
}

/// Peel a definition: `{"sets": {...}}`, `{"value": x}`, or a bare value.
pub(crate) fn definition(raw: &Value) -> Definition<'_> {
    if let Value::Object(obj) = raw {
        if let Some(Value::Object(sets)) = obj.get("sets") {
            return Definition::Sets(sets);
        }
        if let Some(value) = obj.get("value") {
            return Definition::Value(value);
        }
    }
    Definition::Value(raw)
}

/// Extract the target key of a `{name}` alias.
pub(crate) fn parse_alias(s: &str) -> Option<&str> {
    RE_ALIAS
        .captures(s.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
