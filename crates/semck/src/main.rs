//! semck - static semantic checker
//!
//! Usage: semck [OPTIONS] <input>

use anyhow::Context;
use clap::Parser as ClapParser;
use semck::{CheckConfig, DiagnosticReporter, Pipeline};
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "semck")]
#[command(version)]
#[command(about = "Static semantic checker for a small imperative language", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only report failures; print nothing on success
    #[arg(short, long)]
    quiet: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "semck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Returns whether the input passed the check
fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let config = CheckConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };

    if args.verbose {
        eprintln!("Checking {filename}");
    }

    let mut reporter = DiagnosticReporter::new();
    let pipeline = Pipeline::with_config(config);
    match pipeline.check_file(&filename, &source, &mut reporter) {
        Ok(metrics) => {
            if !args.quiet {
                println!("{metrics}");
            }
            Ok(true)
        }
        // already rendered by the reporter
        Err(_) => Ok(false),
    }
}
