use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::simulation::RunSummary;

#[derive(Debug, Serialize)]
struct Totals {
    runs: usize,
    campaigns_completed: u32,
    strikes: u64,
    hits: u64,
    misses: u64,
    upgrades_bought: u32,
    victory_points: i64,
    crests: i64,
}

impl Totals {
    fn from_runs(runs: &[RunSummary]) -> Self {
        Self {
            runs: runs.len(),
            campaigns_completed: runs.iter().map(|r| r.campaigns_completed).sum(),
            strikes: runs.iter().map(|r| r.strikes).sum(),
            hits: runs.iter().map(|r| r.hits).sum(),
            misses: runs.iter().map(|r| r.misses).sum(),
            upgrades_bought: runs.iter().map(|r| r.upgrades_bought).sum(),
            victory_points: runs.iter().map(|r| r.victory_points).sum(),
            crests: runs.iter().map(|r| r.crests).sum(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    runs: &'a [RunSummary],
    totals: Totals,
}

pub fn write_console_report(
    out: &mut impl Write,
    runs: &[RunSummary],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Forge Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    for run in runs {
        let policy = run.policy.map_or("-", |p| p.label());
        writeln!(out, "{} seed {} ({policy})", "⚒".yellow(), run.seed.to_string().bold())?;
        writeln!(
            out,
            "   Campaigns: {}  Contracts: {}",
            run.campaigns_completed.to_string().green(),
            run.contracts_completed
        )?;
        writeln!(
            out,
            "   Strikes: {}  Hits: {}  Misses: {}  Hit rate: {:.1}%",
            run.strikes,
            run.hits.to_string().green(),
            run.misses.to_string().red(),
            run.hit_rate() * 100.0
        )?;
        writeln!(
            out,
            "   Best combo: {}  Upgrades: {} ({} coins)",
            run.best_combo, run.upgrades_bought, run.coins_spent
        )?;
        writeln!(
            out,
            "   Victory points: {}  Crests: {}",
            run.victory_points, run.crests
        )?;
    }

    let totals = Totals::from_runs(runs);
    writeln!(out)?;
    writeln!(out, "Runs: {}", totals.runs)?;
    writeln!(out, "Campaigns completed: {}", totals.campaigns_completed)?;
    writeln!(out, "Strikes: {} ({} hits, {} misses)", totals.strikes, totals.hits, totals.misses)?;
    writeln!(out, "Upgrades bought: {}", totals.upgrades_bought)?;
    writeln!(out, "Victory points: {}  Crests: {}", totals.victory_points, totals.crests)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    Ok(())
}

pub fn write_json_report(out: &mut impl Write, runs: &[RunSummary]) -> Result<()> {
    let report = JsonReport {
        runs,
        totals: Totals::from_runs(runs),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Policy;

    fn sample() -> Vec<RunSummary> {
        vec![
            RunSummary {
                seed: 1,
                policy: Some(Policy::Steady),
                campaigns_completed: 1,
                strikes: 40,
                hits: 38,
                misses: 2,
                victory_points: 1,
                crests: 5,
                ..RunSummary::default()
            },
            RunSummary {
                seed: 2,
                policy: Some(Policy::Steady),
                campaigns_completed: 1,
                strikes: 42,
                hits: 42,
                victory_points: 1,
                crests: 5,
                ..RunSummary::default()
            },
        ]
    }

    #[test]
    fn json_report_carries_runs_and_totals() {
        let mut buf = Vec::new();
        write_json_report(&mut buf, &sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["runs"].as_array().unwrap().len(), 2);
        assert_eq!(value["runs"][0]["policy"], "steady");
        assert_eq!(value["totals"]["strikes"], 82);
        assert_eq!(value["totals"]["crests"], 10);
    }

    #[test]
    fn console_report_lists_every_seed() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_console_report(&mut buf, &sample(), Duration::from_millis(5)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("seed 1 (Steady)"));
        assert!(text.contains("seed 2 (Steady)"));
        assert!(text.contains("Campaigns completed: 2"));
        assert!(text.contains("Hit rate: 95.0%"));
    }
}
