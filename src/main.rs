//! blockdrop command line driver.
//!
//! `blockdrop replay <script.json>` runs a scripted input sequence through the
//! game headlessly and prints the final state as JSON on stdout. Logs go to
//! stderr and are filtered by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockdrop::core::{GameConfig, Randomizer};
use blockdrop::replay::ReplayScript;

#[derive(Debug, Parser)]
#[command(name = "blockdrop", version, about = "Falling-block puzzle engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a JSON input script and print the final state
    Replay(ReplayArgs),
}

#[derive(Debug, Args)]
struct ReplayArgs {
    /// Path to the replay script
    script: PathBuf,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    tuning: TuningArgs,
}

/// Game tuning. Each flag falls back to its `BLOCKDROP_*` variable, then to
/// the built-in default. Script fields (`seed`, `randomizer`) win over both.
#[derive(Debug, Args)]
struct TuningArgs {
    #[arg(long, env = "BLOCKDROP_MOVE_REPEAT_MS")]
    move_repeat_ms: Option<u32>,

    #[arg(long, env = "BLOCKDROP_BASE_TICK_MS")]
    base_tick_ms: Option<u32>,

    #[arg(long, env = "BLOCKDROP_SPEED_FACTOR")]
    speed_factor: Option<f32>,

    #[arg(long, env = "BLOCKDROP_START_LEVEL")]
    start_level: Option<u32>,

    /// Enable leveling: one level per this many cleared lines
    #[arg(long, env = "BLOCKDROP_LINES_PER_LEVEL")]
    lines_per_level: Option<u32>,

    #[arg(long, env = "BLOCKDROP_SEED")]
    seed: Option<u32>,

    /// uniform | seven-bag
    #[arg(long, env = "BLOCKDROP_RANDOMIZER")]
    randomizer: Option<String>,
}

impl TuningArgs {
    fn apply(&self, config: &mut GameConfig) -> Result<()> {
        if let Some(v) = self.move_repeat_ms {
            config.move_repeat_ms = v;
        }
        if let Some(v) = self.base_tick_ms {
            config.base_tick_ms = v;
        }
        if let Some(v) = self.speed_factor {
            config.speed_factor = v;
        }
        if let Some(v) = self.start_level {
            config.start_level = v;
        }
        if let Some(v) = self.lines_per_level {
            config.lines_per_level = Some(v);
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(name) = &self.randomizer {
            config.randomizer = Randomizer::from_str(name)
                .with_context(|| format!("unknown randomizer {:?}", name))?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => replay(args),
    }
}

fn replay(args: ReplayArgs) -> Result<()> {
    let mut config = GameConfig::default();
    args.tuning.apply(&mut config)?;
    config.validate().context("invalid game configuration")?;

    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let script = ReplayScript::from_json(&text)
        .with_context(|| format!("failed to parse {}", args.script.display()))?;
    let plan = script
        .compile(config)
        .with_context(|| format!("invalid script {}", args.script.display()))?;

    tracing::info!(
        script = %args.script.display(),
        ticks = plan.ticks.len(),
        seed = plan.game.config().seed,
        "replay start"
    );
    let report = plan.run();
    tracing::info!(status = report.status, points = report.points, "replay done");

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
