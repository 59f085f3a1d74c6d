//! SwingScan CLI — run scan cycles and inspect the configuration.
//!
//! Commands:
//! - `scan` — run one full scan cycle and write the snapshot
//! - `universe` — resolve and print the ticker universe
//! - `presets` — list the built-in strategy presets

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swingscan_core::data::{UniverseProvider, WikipediaUniverse, YahooBars};
use swingscan_core::strategy::StrategyConfig;
use swingscan_runner::{
    run_cycle, EmailNotifier, LedgerStore, NoopNotifier, Notifier, ScanConfig,
};

#[derive(Parser)]
#[command(name = "swingscan", about = "SwingScan CLI — periodic equity screener")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scan cycle and write the snapshot.
    Scan {
        /// Path to a TOML scan config. Flags below override file values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Named preset: classic, coil, atr_swing.
        #[arg(long)]
        preset: Option<String>,

        /// Benchmark symbol for market health and relative strength.
        #[arg(long)]
        benchmark: Option<String>,

        /// Snapshot output path.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Ledger file path.
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Calendar days of history per ticker.
        #[arg(long)]
        lookback_days: Option<u32>,
    },
    /// Resolve and print the ticker universe.
    Universe,
    /// List the built-in strategy presets.
    Presets,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            preset,
            benchmark,
            output,
            ledger,
            lookback_days,
        } => run_scan(config, preset, benchmark, output, ledger, lookback_days),
        Commands::Universe => run_universe(),
        Commands::Presets => run_presets(),
    }
}

fn run_scan(
    config_path: Option<PathBuf>,
    preset: Option<String>,
    benchmark: Option<String>,
    output: Option<PathBuf>,
    ledger_path: Option<PathBuf>,
    lookback_days: Option<u32>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ScanConfig::from_file(&path)?,
        None => ScanConfig::default(),
    };

    if let Some(preset) = preset {
        config.preset = preset;
    }
    if let Some(benchmark) = benchmark {
        config.benchmark = benchmark;
    }
    if let Some(output) = output {
        config.output_path = output;
    }
    if let Some(path) = ledger_path {
        config.ledger_path = path;
    }
    if let Some(days) = lookback_days {
        config.lookback_days = days;
    }

    if StrategyConfig::preset(&config.preset).is_none() {
        bail!(
            "unknown preset '{}' (available: {})",
            config.preset,
            StrategyConfig::preset_names().join(", ")
        );
    }

    let universe = WikipediaUniverse::new();
    let bars = YahooBars::new();
    let ledger = LedgerStore::new(&config.ledger_path);
    let notifier: Box<dyn Notifier> = match &config.email {
        Some(settings) => Box::new(EmailNotifier::new(settings.clone())),
        None => Box::new(NoopNotifier),
    };

    let now = chrono::Local::now().naive_local();
    let outcome = run_cycle(&universe, &bars, &ledger, notifier.as_ref(), &config, now)?;

    println!(
        "Scan complete: {} signals (market {}, threshold {}, bias {:+})",
        outcome.snapshot.signals.len(),
        if outcome.snapshot.market_healthy {
            "healthy"
        } else {
            "cautious"
        },
        outcome.threshold,
        outcome.bias,
    );
    for signal in &outcome.snapshot.signals {
        println!(
            "  {:<6} score {:>3}  {:<8}  ${:.2} -> goal ${:.2}, stop ${:.2}",
            signal.ticker, signal.score, signal.pattern, signal.current_price, signal.goal,
            signal.stop_loss,
        );
    }
    println!("Snapshot written to {}", config.output_path.display());

    Ok(())
}

fn run_universe() -> Result<()> {
    let universe = WikipediaUniverse::new();
    let tickers = universe.fetch();
    println!("{} tickers:", tickers.len());
    for ticker in tickers {
        println!("{ticker}");
    }
    Ok(())
}

fn run_presets() -> Result<()> {
    for name in StrategyConfig::preset_names() {
        let config = StrategyConfig::preset(name).expect("listed preset exists");
        let exit = match config.exit {
            swingscan_core::strategy::ExitModel::PercentOffsets { goal_pct, stop_pct } => {
                format!("+{:.0}% / -{:.0}%", goal_pct * 100.0, stop_pct * 100.0)
            }
            swingscan_core::strategy::ExitModel::AtrMultiple {
                goal_mult,
                stop_mult,
            } => format!("{goal_mult}x / {stop_mult}x ATR"),
        };
        println!(
            "{name:<10} min_history {:>3}  threshold {:>3}  exits {exit}",
            config.min_history, config.base_strictness,
        );
    }
    Ok(())
}
