//! UCI engine binary
//!
//! Speaks UCI on stdin/stdout; logs go to stderr (`RUST_LOG` controls the
//! filter, default `warn`).
//!
//! ```bash
//! cargo run -p uci_engine -- --level 4
//! cargo run -p uci_engine -- --profiles levels.toml
//! ```

mod session;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use skill_engine::{DifficultyTable, SkillEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::{Flow, Session};

#[derive(Debug, Default)]
struct Args {
    profiles: Option<PathBuf>,
    level: Option<u8>,
    seed: Option<u64>,
}

fn print_usage() {
    eprintln!("Usage: uci_engine [--profiles <file.toml|file.json>] [--level N] [--seed N]");
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag {
            "--profiles" | "-p" => parsed.profiles = Some(PathBuf::from(value()?)),
            "--level" | "-l" => {
                let v = value()?;
                parsed.level = Some(v.parse().with_context(|| format!("bad level '{v}'"))?);
            }
            "--seed" => {
                let v = value()?;
                parsed.seed = Some(v.parse().with_context(|| format!("bad seed '{v}'"))?);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                print_usage();
                bail!("unknown argument '{other}'");
            }
        }
        i += 2;
    }
    Ok(parsed)
}

fn build_engine(args: &Args) -> Result<SkillEngine> {
    let mut engine = match &args.profiles {
        Some(path) => {
            let table = DifficultyTable::load(path)
                .with_context(|| format!("loading difficulty table from {}", path.display()))?;
            SkillEngine::with_table(table)
        }
        None => SkillEngine::new(),
    };
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }
    if let Some(level) = args.level {
        engine.set_level(level);
    }
    Ok(engine)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    let engine = build_engine(&args)?;
    info!(
        level = engine.level(),
        levels = engine.table().max_level(),
        "engine ready"
    );

    let mut session = Session::new(engine);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if session.handle(&line, &mut stdout)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
