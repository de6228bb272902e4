pub mod config;
pub mod deps;
pub mod emit;
pub mod error;
pub mod expr;
pub mod keys;
pub mod loader;
pub mod runtime;
pub mod sort;
pub mod transform;

pub use config::CompilerConfig;
pub use emit::emit;
pub use error::{CompileError, TokenError};
pub use expr::{Expr, Rgb};
pub use loader::{load_dir, LoadReport, Token, TokenSet};
pub use sort::{sort, SortOutcome};
