use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use std::process::ExitCode;
use themefix_core::Engine;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "themefix",
    version,
    about = "Idempotent audit/repair runner for storefront theme checkouts."
)]
struct Cli {
    /// Command to run: `audit` or `fix-all`. Anything else prints usage.
    cmd: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let engine = match engine_for_cwd() {
        Ok(engine) => engine,
        Err(e) => {
            error!("{:?}", e);
            return ExitCode::from(1);
        }
    };

    match cli.cmd.as_deref() {
        Some("audit") => cmd_audit(&engine),
        Some("fix-all") => cmd_fix_all(&engine),
        _ => {
            print_usage();
            ExitCode::SUCCESS
        }
    }
}

fn engine_for_cwd() -> anyhow::Result<Engine> {
    let cwd = std::env::current_dir().context("resolve current directory")?;
    let root = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("non-utf8 working directory: {}", p.display()))?;
    Ok(Engine::new(root))
}

fn cmd_audit(engine: &Engine) -> ExitCode {
    let report = engine.audit();
    if report.ok {
        println!("audit clean");
        return ExitCode::SUCCESS;
    }
    println!("Problems:");
    for problem in &report.problems {
        println!(" - {problem}");
    }
    ExitCode::from(1)
}

fn cmd_fix_all(engine: &Engine) -> ExitCode {
    match engine.fix_all() {
        Ok(report) => {
            println!("Applied:");
            for note in &report.notes {
                println!(" - {note}");
            }
            println!("done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  themefix audit");
    println!("  themefix fix-all");
}
