//! Dependency extraction.
//!
//! Grammar, over the canonical text of an [`Expr`](crate::expr::Expr):
//!
//! ```text
//! reference ::= "var(" key ")"      not preceded by a word character
//! key       ::= [A-Za-z0-9_.-]+
//! ```
//!
//! Double-quoted string literals are skipped whole, so a font family named
//! `var(x)` is not a reference. `var(dark-mode)` is the runtime flag and is
//! never reported.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::expr::DARK_MODE_FLAG;
use crate::loader::TokenSet;

/// Either a string literal (group 0 only) or a reference (group `key`).
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|\bvar\((?P<key>[A-Za-z0-9_.-]+)\)"#).unwrap()
});

/// Every key referenced by `text`, de-duplicated, in order of appearance.
pub fn extract(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in RE_REFERENCE.captures_iter(text) {
        let Some(key) = caps.name("key") else {
            continue;
        };
        let key = key.as_str();
        if key == DARK_MODE_FLAG || keys.iter().any(|k| k == key) {
            continue;
        }
        keys.push(key.to_string());
    }
    keys
}

/// Adjacency map: token key → keys it references, in token-set order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph for every token in `tokens`.
    pub fn build(tokens: &TokenSet) -> Self {
        let edges = tokens
            .iter()
            .map(|token| (token.key.clone(), token.dependencies()))
            .collect();
        Self { edges }
    }

    /// Build a graph directly from `(key, dependencies)` pairs.
    pub fn from_edges<K, D, I>(edges: I) -> Self
    where
        K: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        I: IntoIterator<Item = (K, D)>,
    {
        let edges = edges
            .into_iter()
            .map(|(key, deps)| (key.into(), deps.into_iter().map(Into::into).collect()))
            .collect();
        Self { edges }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.edges.contains_key(key)
    }

    pub fn dependencies(&self, key: &str) -> &[String] {
        self.edges.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys in graph order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
