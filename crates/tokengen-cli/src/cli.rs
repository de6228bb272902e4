use std::path::PathBuf;

use clap::Parser;

/// Compile design-token JSON files into ordered theme initialization code.
#[derive(Debug, Parser)]
#[command(name = "tokengen", version, about)]
pub struct Cli {
    /// Directory containing the design-token JSON files.
    #[arg(value_name = "TOKEN_DIR", value_parser = existing_dir)]
    pub token_dir: PathBuf,

    /// Print per-token diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file to use instead of `tokengen.toml` in the token directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn existing_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.is_dir() {
        Ok(path)
    } else {
        Err(format!("`{s}` is not a directory"))
    }
}
