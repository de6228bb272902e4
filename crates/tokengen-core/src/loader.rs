//! Reads the fixed set of token files and builds the ordered [`TokenSet`].

use std::path::Path;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::deps;
use crate::error::{CompileError, TokenError};
use crate::expr::Expr;
use crate::keys;
use crate::transform::Category;

/// One required input file and the transformer its tokens go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFile {
    pub name: &'static str,
    pub category: Category,
}

/// Required input files, in processing order. The order decides discovery
/// order and therefore every tie-break in the output.
pub const INPUT_FILES: &[InputFile] = &[
    InputFile {
        name: "color-palette.json",
        category: Category::Color,
    },
    InputFile {
        name: "semantic-color-palette.json",
        category: Category::Color,
    },
    InputFile {
        name: "color-aliases.json",
        category: Category::Color,
    },
    InputFile {
        name: "color-component.json",
        category: Category::Color,
    },
    InputFile {
        name: "icons.json",
        category: Category::Color,
    },
    InputFile {
        name: "layout.json",
        category: Category::Layout,
    },
    InputFile {
        name: "layout-component.json",
        category: Category::Layout,
    },
    InputFile {
        name: "typography.json",
        category: Category::Font,
    },
];

/// A named design value and its transformed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub key: String,
    pub raw: Value,
    pub value: Expr,
}

impl Token {
    /// Keys this token's value references, in order of appearance.
    pub fn dependencies(&self) -> Vec<String> {
        deps::extract(&self.value.to_string())
    }
}

/// Tokens keyed by name, in discovery order.
///
/// Re-inserting a key replaces its token but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: IndexMap<String, Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token, returning the one it replaced.
    pub fn insert(&mut self, token: Token) -> Option<Token> {
        self.tokens.insert(token.key.clone(), token)
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.tokens.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tokens.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = TokenSet::new();
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// What happened to the keys of one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub file: String,
    pub loaded: usize,
    pub ignored: usize,
    pub dropped: Vec<(String, TokenError)>,
}

/// Per-file outcome of a [`load_dir`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub files: Vec<FileReport>,
}

impl LoadReport {
    pub fn loaded(&self) -> usize {
        self.files.iter().map(|f| f.loaded).sum()
    }

    pub fn dropped(&self) -> usize {
        self.files.iter().map(|f| f.dropped.len()).sum()
    }

    pub fn ignored(&self) -> usize {
        self.files.iter().map(|f| f.ignored).sum()
    }
}

/// Load every required file under `dir`, in order.
pub fn load_dir(dir: &Path) -> Result<(TokenSet, LoadReport), CompileError> {
    if !dir.is_dir() {
        return Err(CompileError::NotADirectory(dir.to_path_buf()));
    }

    let mut tokens = TokenSet::new();
    let mut report = LoadReport::default();

    for input in INPUT_FILES {
        let path = dir.join(input.name);
        let content = std::fs::read_to_string(&path).map_err(|source| CompileError::Read {
            path: path.clone(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| CompileError::Parse {
                path: path.clone(),
                source,
            })?;
        let Value::Object(document) = document else {
            return Err(CompileError::NotAnObject { path });
        };

        let file_report = load_document(&mut tokens, input.name, input.category, &document);
        info!(
            file = input.name,
            loaded = file_report.loaded,
            dropped = file_report.dropped.len(),
            ignored = file_report.ignored,
            "loaded token file"
        );
        report.files.push(file_report);
    }

    Ok((tokens, report))
}

/// Transform every key of one parsed document into `tokens`.
///
/// Keys are visited in [`keys::cmpkeys`] order. Failing tokens are dropped
/// and recorded; they never abort the file.
pub fn load_document(
    tokens: &mut TokenSet,
    file: &str,
    category: Category,
    document: &Map<String, Value>,
) -> FileReport {
    let mut report = FileReport {
        file: file.to_string(),
        ..FileReport::default()
    };

    let mut names: Vec<&String> = document.keys().collect();
    keys::sort_keys(&mut names);

    for key in names {
        let raw = &document[key.as_str()];
        match category.transform(key, raw) {
            Ok(Some(value)) => {
                let replaced = tokens.insert(Token {
                    key: key.clone(),
                    raw: raw.clone(),
                    value,
                });
                if replaced.is_some() {
                    debug!(key = %key, file, "token redefined, later definition wins");
                }
                report.loaded += 1;
            }
            Ok(None) => report.ignored += 1,
            Err(e) => {
                debug!(key = %key, file, error = %e, "dropping token");
                report.dropped.push((key.clone(), e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("Expected object, got {other}"),
        }
    }

    #[test]
    fn test_document_keys_in_cmpkeys_order() {
        let doc = object(json!({
            "gray-10": {"value": "rgb(1, 1, 1)"},
            "gray-2": {"value": "rgb(2, 2, 2)"},
            "gray": {"value": "rgb(3, 3, 3)"}
        }));
        let mut tokens = TokenSet::new();
        let report = load_document(&mut tokens, "color-palette.json", Category::Color, &doc);
        assert_eq!(report.loaded, 3);
        assert_eq!(tokens.keys().collect::<Vec<_>>(), vec!["gray", "gray-2", "gray-10"]);
    }

    #[test]
    fn test_invalid_tokens_dropped_not_fatal() {
        let doc = object(json!({
            "good": {"value": "rgb(0, 0, 0)"},
            "bad": {"value": "rgb(999, 0, 0)"}
        }));
        let mut tokens = TokenSet::new();
        let report = load_document(&mut tokens, "icons.json", Category::Color, &doc);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].0, "bad");
        assert!(tokens.contains_key("good"));
        assert!(!tokens.contains_key("bad"));
    }

    #[test]
    fn test_later_definition_wins_keeps_position() {
        let mut tokens = TokenSet::new();
        let first = object(json!({
            "a": {"value": "rgb(0, 0, 0)"},
            "b": {"value": "rgb(1, 1, 1)"}
        }));
        let second = object(json!({"a": {"value": "{b}"}}));
        load_document(&mut tokens, "color-palette.json", Category::Color, &first);
        load_document(&mut tokens, "color-aliases.json", Category::Color, &second);

        assert_eq!(tokens.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(tokens.get("a").unwrap().value, Expr::reference("b"));
    }

    #[test]
    fn test_failed_redefinition_keeps_earlier_token() {
        let mut tokens = TokenSet::new();
        let first = object(json!({"a": {"value": "rgb(0, 0, 0)"}}));
        let second = object(json!({"a": {"value": "not a color"}}));
        load_document(&mut tokens, "color-palette.json", Category::Color, &first);
        load_document(&mut tokens, "icons.json", Category::Color, &second);
        assert!(matches!(tokens.get("a").unwrap().value, Expr::Color(_)));
    }

    #[test]
    fn test_ignored_typography_keys_counted() {
        let doc = object(json!({
            "sans-font-family": {"value": "Adobe Clean"},
            "font-size-100": {"value": "14px"}
        }));
        let mut tokens = TokenSet::new();
        let report = load_document(&mut tokens, "typography.json", Category::Font, &doc);
        assert_eq!(report.loaded, 1);
        assert_eq!(report.ignored, 1);
        assert!(tokens.contains_key("font-size-100"));
    }

    #[test]
    fn test_token_dependencies() {
        let token = Token {
            key: "accent".into(),
            raw: Value::Null,
            value: Expr::dark_mode(Expr::reference("blue-400"), Expr::reference("blue-600")),
        };
        assert_eq!(token.dependencies(), vec!["blue-400", "blue-600"]);
    }

    #[test]
    fn test_load_dir_rejects_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            load_dir(file.path()),
            Err(CompileError::NotADirectory(_))
        ));
    }
}
