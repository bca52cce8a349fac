//! Command Line Interface for the hedged LP tracker.
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use hedge_lp_data::{InMemorySnapshotRepository, SnapshotService};
use hedge_lp_domain::entities::{Observation, Snapshot, StrategyConfig};
use hedge_lp_domain::math::{
    compute_liquidity_from_notional, compute_lp_state, estimate_liquidity_fallback,
};
use hedge_lp_engine::hedge::describe_position;
use hedge_lp_engine::params::EngineParameters;
use prettytable::{Table, row};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "hedge-lp")]
#[command(about = "Delta-hedged CLMM position tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Token amounts, value and delta of a position at one price
    LpState {
        /// Pool price (token1 in token2)
        #[arg(short, long)]
        price: f64,

        /// Liquidity constant
        #[arg(short = 'L', long)]
        liquidity: f64,

        /// Lower price bound
        #[arg(long)]
        lower: f64,

        /// Upper price bound
        #[arg(long)]
        upper: f64,
    },
    /// Liquidity constant of a position worth a given notional
    Liquidity {
        /// Position value in USD
        #[arg(short, long)]
        notional: f64,

        /// Reference price
        #[arg(short, long)]
        price: f64,

        /// Lower price bound
        #[arg(long)]
        lower: f64,

        /// Upper price bound
        #[arg(long)]
        upper: f64,
    },
    /// Replay a strategy's observations and print the derived snapshots
    Replay {
        /// JSON file with a strategy and its observations
        #[arg(short, long)]
        file: PathBuf,

        /// Print snapshots as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayFile {
    strategy: StrategyConfig,
    #[serde(default)]
    parameters: EngineParameters,
    observations: Vec<TimedObservation>,
}

#[derive(Debug, Deserialize)]
struct TimedObservation {
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    observation: Observation,
}

fn load_replay(path: &Path) -> Result<ReplayFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_replay(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn parse_replay(raw: &str) -> Result<ReplayFile> {
    let mut replay: ReplayFile = serde_json::from_str(raw)?;
    replay.observations.sort_by_key(|o| o.timestamp);
    Ok(replay)
}

async fn replay(file: &Path) -> Result<(StrategyConfig, Vec<Snapshot>)> {
    let replay = load_replay(file)?;
    let service = SnapshotService::new(InMemorySnapshotRepository::new(), replay.parameters);

    let strategy_id = service.create_strategy(replay.strategy.clone()).await?;
    info!(
        strategy = %replay.strategy.name,
        observations = replay.observations.len(),
        "Replaying strategy"
    );

    for timed in replay.observations {
        service
            .record(strategy_id, timed.timestamp, timed.observation)
            .await
            .with_context(|| format!("failed to record observation at {}", timed.timestamp))?;
    }

    Ok((replay.strategy, service.history(strategy_id).await?))
}

fn print_snapshots(strategy: &StrategyConfig, snapshots: &[Snapshot]) {
    let mut table = Table::new();
    table.add_row(row![
        "Time", "LP Price", "LP Value", "LP PnL", "Hedge PnL", "Strategy PnL %", "Quality",
        "Liq. Buffer", "Hedge1 Target", "Hedge2 Target", "Reason"
    ]);

    for snapshot in snapshots {
        let m = &snapshot.metrics;
        let buffer = m
            .liquidation_buffer_pct
            .map_or_else(|| "-".to_string(), |b| format!("{b:.2}%"));
        table.add_row(row![
            snapshot.timestamp.format("%Y-%m-%d %H:%M"),
            format!("{:.4}", m.lp_price),
            format!("${:.2}", m.lp_value_usd),
            format!("${:.2}", m.lp_pnl_usd),
            format!("${:.2}", m.total_hedge_pnl_usd),
            format!("{:.2}%", m.total_strategy_pnl_pct),
            format!("{:.2} ({:?})", m.hedge_quality_score, m.hedge_quality_grade),
            buffer,
            describe_position(m.hedge_rebalance_suggestion.token1.target, &strategy.token1),
            describe_position(m.hedge_rebalance_suggestion.token2.target, &strategy.token2),
            m.rebalance_reason
        ]);
    }

    println!("\n📊 {} ({}/{})", strategy.name, strategy.token1, strategy.token2);
    table.printstd();

    for snapshot in snapshots {
        if let Some(cross) = &snapshot.metrics.cross_position_suggestion {
            println!(
                "⚠️  {}: {} Move ${:.2} (LP {:.1}% / hedge {:.1}%)",
                snapshot.timestamp.format("%Y-%m-%d %H:%M"),
                cross.reason,
                cross.capital_to_move,
                cross.suggested_lp_allocation_pct,
                cross.suggested_hedge_allocation_pct
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::LpState {
            price,
            liquidity,
            lower,
            upper,
        } => {
            let state = compute_lp_state(*price, *liquidity, *lower, *upper);
            println!("\n📐 LP State at {price} ({:?})", state.position);
            println!("════════════════════════════════════");
            println!("Token1 (x):  {:.6}", state.x);
            println!("Token2 (y):  {:.6}", state.y);
            println!("Value:       {:.4}", state.value);
            println!("Delta:       {:.6}", state.delta);
            println!("════════════════════════════════════");
        }
        Commands::Liquidity {
            notional,
            price,
            lower,
            upper,
        } => match compute_liquidity_from_notional(*notional, *price, *lower, *upper) {
            Ok(liquidity) => println!("✅ L = {liquidity:.6}"),
            Err(e) => {
                let fallback = estimate_liquidity_fallback(*notional, *price, *lower, *upper);
                println!("❌ {e}");
                println!("Fallback estimate: L ≈ {fallback:.6}");
            }
        },
        Commands::Replay { file, json } => {
            let (strategy, snapshots) = replay(file).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshots)?);
            } else {
                print_snapshots(&strategy, &snapshots);
            }
        }
    }

    Ok(())
}
