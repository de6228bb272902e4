use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CompileError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Per-directory override file, looked up next to the token JSON files.
pub const CONFIG_FILE_NAME: &str = "tokengen.toml";

/// Top-level compiler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub emit: EmitConfig,
}

/// Options for the generated source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Name of the generated module.
    pub module: String,
    /// Path the generated code imports `ThemeRuntime` from.
    pub runtime_path: String,
    /// Tool name recorded in the generated header.
    pub tool_name: String,
}

impl CompilerConfig {
    /// Load config: an explicit file, else `tokengen.toml` in the token
    /// directory (if present), merged key by key over built-in defaults.
    pub fn load(token_dir: &Path, explicit: Option<&Path>) -> Result<Self, CompileError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = Self::local_path(token_dir);
                candidate.is_file().then_some(candidate)
            }
        };

        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading config overrides");
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| CompileError::Config(format!("{}: {e}", path.display())))?;
                Self::from_overrides(&content).map_err(|e| match e {
                    CompileError::Config(msg) => {
                        CompileError::Config(format!("{}: {msg}", path.display()))
                    }
                    other => other,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a user TOML document and merge it over the defaults.
    pub fn from_overrides(content: &str) -> Result<Self, CompileError> {
        let mut base: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CompileError::Config(e.to_string()))?;
        let overlay: toml::Table =
            toml::from_str(content).map_err(|e| CompileError::Config(e.to_string()))?;
        merge_tables(&mut base, overlay);

        let config = CompilerConfig::deserialize(toml::Value::Table(base))
            .map_err(|e| CompileError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Path a directory-local override file would live at.
    pub fn local_path(token_dir: &Path) -> PathBuf {
        token_dir.join(CONFIG_FILE_NAME)
    }

    fn validate(&self) -> Result<(), CompileError> {
        if !is_identifier(&self.emit.module) {
            return Err(CompileError::Config(format!(
                "emit.module `{}` is not a valid identifier",
                self.emit.module
            )));
        }
        if self.emit.runtime_path.split("::").any(|seg| !is_identifier(seg)) {
            return Err(CompileError::Config(format!(
                "emit.runtime_path `{}` is not a valid module path",
                self.emit.runtime_path
            )));
        }
        if self.emit.tool_name.trim().is_empty() || self.emit.tool_name.contains('\n') {
            return Err(CompileError::Config(
                "emit.tool_name must be a non-empty single line".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`; scalar values replace.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
