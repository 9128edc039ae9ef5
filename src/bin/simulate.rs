//! Match-day odds from the command line.
//!
//! Loads a year → table JSON history, takes the candidate's ranked
//! site names (or falls back to the historical favorites order), runs
//! the requested number of trials, and prints the descending per-site
//! percentages.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use internmatch::market::History;
use internmatch::sample::Prefs;
use internmatch::sim::Method;
use internmatch::sim::Settings;
use internmatch::sim::Simulation;
use internmatch::sim::Ticker;

#[derive(Parser)]
#[command(about = "estimate internship match odds for a ranked list of sites")]
struct Args {
    /// path to the year -> tables JSON document
    #[arg(long)]
    history: std::path::PathBuf,
    /// which year's tables to simulate against
    #[arg(long)]
    year: u16,
    /// comma-separated site names, most preferred first; defaults to
    /// the historical favorites order
    #[arg(long)]
    list: Option<String>,
    /// number of monte carlo trials
    #[arg(long, default_value_t = internmatch::DEFAULT_TRIALS)]
    trials: usize,
    /// resolution procedure: da or rsd+trade
    #[arg(long, default_value = "da")]
    method: String,
    /// inner RSD iterations per trial (rsd+trade only)
    #[arg(long, default_value_t = internmatch::DEFAULT_RSD_ITERATIONS)]
    rsd_iterations: usize,
    /// master seed; omit for OS entropy
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    internmatch::init();
    let args = Args::parse();
    let history = History::load(&args.history).context("loading history")?;
    let market = history.year(args.year)?;
    let names = match args.list {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .map(String::from)
            .collect::<Vec<String>>(),
        None => history.favorites(),
    };
    let candidate = Prefs::from_names(market.roster(), &names)?;
    let settings = Settings {
        trials: args.trials,
        method: Method::try_from(args.method.as_str())?,
        rsd_iterations: args.rsd_iterations,
        seed: args.seed,
    };
    let bar = internmatch::progress(args.trials);
    let trials = args.trials;
    let mirror = bar.clone();
    let ticker = Ticker::from(move |fraction: f64| {
        mirror.set_position((fraction * trials as f64).round() as u64)
    });
    let simulation = Simulation::new(market, settings)?;
    let outcome = simulation.run(&candidate, Some(&ticker), None)?;
    bar.finish_and_clear();
    for (place, (site, percent)) in outcome.iter().enumerate() {
        let name = market.roster().name(site);
        let line = format!("{:>3}. {:<32} {:>6.1}%", place + 1, name, percent);
        match percent > 0. {
            true => println!("{}", line),
            false => println!("{}", line.dimmed()),
        }
    }
    Ok(())
}
