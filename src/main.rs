// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use repscan::config::constants::{CACHE_PATH_ENV, MAX_SUPPORTED_DIGITS};
use repscan::{
    DiskStore, InvalidRangePolicy, MatchCache, RangeScanner, Repetition, ScanConfigBuilder,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "repscan",
    about = "Sum the ids in a list of ranges whose digits repeat a shorter block",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress everything but the answer
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Match cache file (JSON)
    #[arg(long, global = true, env = CACHE_PATH_ENV)]
    cache: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Sum the distinct repeated ids in a list of ranges
    Sum {
        /// File of comma-joined <start>-<end> ranges; stdin when absent or "-"
        input: Option<PathBuf>,

        /// Ranges given inline, e.g. "11-22,95-115"
        #[arg(long, conflicts_with = "input")]
        ranges: Option<String>,

        /// Which repetitions count
        #[arg(long, value_enum, default_value_t = RuleArg::AtLeastTwice)]
        repetition: RuleArg,

        /// Skip invalid range specs instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Enumerate every range directly even when a cache is configured
        #[arg(long)]
        no_cache: bool,
    },

    /// Extend the match cache to every id with at most N digits
    Precompute {
        /// Digit length to cover
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SUPPORTED_DIGITS as i64))]
        digits: u32,
    },

    /// Delete the match cache
    ClearCache,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RuleArg {
    /// Exactly two copies of a block
    Twice,
    /// Two or more copies of a block
    AtLeastTwice,
}

impl From<RuleArg> for Repetition {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Twice => Repetition::Twice,
            RuleArg::AtLeastTwice => Repetition::AtLeastTwice,
        }
    }
}

fn init_tracing(cli: &Cli) {
    // --quiet: errors only; --verbose: RUST_LOG or info; default: warnings
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("error")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        error!("repscan failed: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sum {
            input,
            ranges,
            repetition,
            skip_invalid,
            no_cache,
        } => {
            let policy = if skip_invalid {
                InvalidRangePolicy::Skip
            } else {
                InvalidRangePolicy::Fail
            };
            let scanner = RangeScanner::new(
                ScanConfigBuilder::new()
                    .repetition(repetition.into())
                    .invalid_ranges(policy)
                    .build(),
            );

            let text = read_ranges(ranges, input)?;
            let report = match cli.cache.filter(|_| !no_cache) {
                Some(path) => {
                    let cache = MatchCache::new(DiskStore::new(path));
                    let report = scanner.scan_lines_cached(text.lines(), &cache)?;
                    info!(stats = %cache.stats(), "Match cache used");
                    report
                }
                None => scanner.scan_lines(text.lines())?,
            };

            info!(
                ranges = report.ranges_scanned(),
                matches = report.matches().len(),
                skipped = report.skipped().len(),
                "Scan complete"
            );
            println!("{}", report.sum());
        }

        Command::Precompute { digits } => {
            let cache = MatchCache::new(require_cache(cli.cache)?.validate()?);
            let matches = cache.ensure_computed(digits)?;
            info!(stats = %cache.stats(), digits, "Match cache ready");
            println!("{}", matches.len());
        }

        Command::ClearCache => {
            let store = require_cache(cli.cache)?;
            info!(path = %store.path().display(), "Clearing match cache");
            MatchCache::new(store).clear()?;
        }
    }
    Ok(())
}

fn require_cache(path: Option<PathBuf>) -> Result<DiskStore> {
    path.map(DiskStore::new)
        .with_context(|| format!("No cache path: pass --cache or set {CACHE_PATH_ENV}"))
}

fn read_ranges(inline: Option<String>, input: Option<PathBuf>) -> Result<String> {
    if let Some(ranges) = inline {
        return Ok(ranges);
    }

    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read ranges from '{}'", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read ranges from stdin")?;
            Ok(text)
        }
    }
}
