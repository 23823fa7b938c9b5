mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use policy::Policy;
use simulation::{RunConfig, RunSummary, run_campaigns};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "anvil-tester", version)]
#[command(about = "Headless campaign runner for the Anvil Arcade forge minigame")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Campaigns to play per seed
    #[arg(long, default_value_t = 1)]
    campaigns: u32,

    /// Scripted player behaviour
    #[arg(long, value_enum, default_value_t = Policy::Steady)]
    policy: Policy,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Abort a seed after this many strikes
    #[arg(long, default_value_t = 5_000)]
    max_strikes: u64,

    /// Optional path to write the report to instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let seeds = parse_seeds(&args.seeds)?;
    let started = Instant::now();

    if matches!(args.report, ReportFormat::Console) {
        println!("{}", "⚒  Anvil Arcade Forge Tester".bright_cyan().bold());
        println!("{}", "============================".cyan());
    }

    let mut runs: Vec<RunSummary> = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let config = RunConfig {
            seed,
            policy: args.policy,
            campaigns: args.campaigns,
            max_strikes: args.max_strikes,
        };
        let summary = run_campaigns(&config).with_context(|| format!("running seed {seed}"))?;
        if args.verbose {
            eprintln!(
                "✅ seed {} finished in {} strikes",
                seed.to_string().green(),
                summary.strikes
            );
        }
        runs.push(summary);
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(stdout().lock()),
    };
    match args.report {
        ReportFormat::Console => reports::write_console_report(&mut out, &runs, started.elapsed())?,
        ReportFormat::Json => reports::write_json_report(&mut out, &runs)?,
    }
    out.flush().context("flushing report")?;
    Ok(())
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    let seeds = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}
