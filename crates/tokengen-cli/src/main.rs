mod cli;

use std::io::Write;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tokengen_core::{load_dir, sort, CompileError, CompilerConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not errors.
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            let _ = e.print();
            return code;
        }
    };

    init_tracing(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    ExitCode::from(run(&cli, &mut stdout))
}

/// Compile and write the generated source to `out`, returning the process
/// exit status. On failure nothing is written to `out`.
fn run<W: Write>(cli: &Cli, out: &mut W) -> u8 {
    let output = match compile(cli) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    if let Err(e) = out.write_all(output.as_bytes()).and_then(|()| out.flush()) {
        eprintln!("error: failed to write output: {e}");
        return 1;
    }
    0
}

/// Run the whole pipeline, returning the generated source.
fn compile(cli: &Cli) -> Result<String, CompileError> {
    let config = CompilerConfig::load(&cli.token_dir, cli.config.as_deref())?;
    debug!(?config, "resolved config");

    let (tokens, report) = load_dir(&cli.token_dir)?;
    let outcome = sort(&tokens);

    info!(
        loaded = report.loaded(),
        dropped = report.dropped(),
        ignored = report.ignored(),
        skipped = outcome.skipped.len(),
        emitted = outcome.ordered.len(),
        "compiled design tokens"
    );

    Ok(tokengen_core::emit(&outcome.ordered, &config.emit, Utc::now()))
}

/// Diagnostics go to stderr; stdout carries only the generated source.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Per-token diagnostics are logged at `debug`, so only `--verbose` shows them.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "tokengen_core=debug,tokengen_cli=debug"
    } else {
        "tokengen_core=warn,tokengen_cli=warn"
    }
}
