//! SimpleScript command line
//!
//! Without a script path, reads statements interactively from stdin. With one,
//! runs the file's statements in order and stops.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as _;
use simplescript::repl::{AstFormat, Repl, ReplConfig};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SIMPLESCRIPT_LOG";

/// SimpleScript - a tiny integer scripting language
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the parsed tree and the execution trace of each statement
    #[arg(short, long)]
    verbose: bool,

    /// Show the parsed tree of each statement in this format
    #[arg(long, value_enum, default_value_t = AstFormat::None)]
    ast: AstFormat,

    /// Log filter (overrides SIMPLESCRIPT_LOG), e.g. `debug` or `simplescript=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Script to run instead of reading stdin
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level filter")?,
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let mut stdout = io::stdout().lock();
    match &args.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            let config = ReplConfig {
                verbose: args.verbose,
                ast_format: args.ast,
                prompt: String::new(),
            };
            tracing::info!(script = %path.display(), "running script");
            Repl::new(config).run(BufReader::new(file), &mut stdout)?;
        }
        None => {
            let config = ReplConfig {
                verbose: args.verbose,
                ast_format: args.ast,
                ..ReplConfig::default()
            };
            writeln!(stdout, "SimpleScript {}", simplescript::VERSION)?;
            writeln!(stdout, "Statements end with `;`. Type `exit();` to quit.")?;
            Repl::new(config).run(io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}
