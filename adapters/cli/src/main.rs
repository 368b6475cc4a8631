#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter for Defend Your Bounty battles.

mod layout_transfer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bounty_simulation::Battle;
use bounty_system_bootstrap::Bootstrap;
use bounty_world::{self as world, format::MapAsset, query, World};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::layout_transfer::FortificationLayout;

#[derive(Parser, Debug)]
#[command(name = "bounty")]
#[command(about = "Runs Defend Your Bounty battles without a window")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario until it concludes or the tick budget is spent
    Run {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long, default_value_t = 20_000)]
        ticks: u64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Fortification layout string applied before the battle starts
        #[arg(long)]
        layout: Option<String>,
        /// Start the assault on the first tick
        #[arg(long)]
        skip_planning: bool,
        /// Ticks spent planning before the assault when not skipped
        #[arg(long, default_value_t = 600)]
        planning_ticks: u64,
    },
    /// Validate a map asset
    CheckMap {
        #[arg(long)]
        map: PathBuf,
    },
    /// Print the layout string of a scenario's preset fortifications
    ExportLayout {
        #[arg(long)]
        scenario: PathBuf,
        /// Layout string merged into the scenario before exporting
        #[arg(long)]
        layout: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Entry point for the Defend Your Bounty command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            seed,
            layout,
            skip_planning,
            planning_ticks,
        } => run(scenario, ticks, seed, layout.as_deref(), skip_planning, planning_ticks),
        Commands::CheckMap { map } => check_map(map),
        Commands::ExportLayout { scenario, layout } => export_layout(scenario, layout.as_deref()),
    }
}

fn run(
    scenario: PathBuf,
    ticks: u64,
    seed: u64,
    layout: Option<&str>,
    skip_planning: bool,
    planning_ticks: u64,
) -> Result<()> {
    let bootstrap = Bootstrap;
    let mut battlefield = bootstrap.load(&scenario)?;
    if let Some(layout) = layout {
        import_layout(&mut battlefield.world, layout)?;
    }
    println!("{}", bootstrap.welcome_banner(&battlefield.world));

    let mut battle = Battle::new(battlefield, seed);
    let planning = if skip_planning {
        0
    } else {
        planning_ticks.min(ticks)
    };
    let _ = battle.run(planning);
    battle.begin_assault();
    let outcome = battle.run(ticks - planning);

    let world = battle.world();
    info!(
        scenario = battle.name(),
        ?outcome,
        tick = query::tick_index(world),
        "run finished"
    );
    println!("battle:   {}", battle.name());
    println!("outcome:  {outcome:?}");
    println!("ticks:    {}", query::tick_index(world));
    println!(
        "waves:    {}/{}",
        battle.scheduler().waves_launched(),
        battle.scheduler().wave_count()
    );
    println!("treasury: {}", query::treasury(world));
    println!("units:    {}", query::unit_view(world).len());
    println!("walls:    {}", query::walls(world).len());
    Ok(())
}

fn check_map(map: PathBuf) -> Result<()> {
    let asset =
        MapAsset::load(&map).with_context(|| format!("failed to load map {}", map.display()))?;
    let world = World::from_asset(&asset)
        .with_context(|| format!("map {} is inconsistent", map.display()))?;
    println!(
        "{}: {}x{} tiles, {} units, {} walls",
        map.display(),
        query::columns(&world),
        query::rows(&world),
        asset.units.len(),
        asset.walls.len()
    );
    Ok(())
}

fn export_layout(scenario: PathBuf, layout: Option<&str>) -> Result<()> {
    let mut battlefield = Bootstrap.load(&scenario)?;
    if let Some(layout) = layout {
        import_layout(&mut battlefield.world, layout)?;
    }
    let encoded = FortificationLayout::capture(&battlefield.world)
        .encode()
        .context("failed to encode layout")?;
    println!("{encoded}");
    Ok(())
}

fn import_layout(world: &mut World, layout: &str) -> Result<()> {
    let layout = FortificationLayout::decode(layout).context("invalid layout string")?;
    let commands = layout
        .commands_for(world)
        .context("layout does not fit the scenario map")?;
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    info!(walls = layout.walls.len(), "layout imported");
    Ok(())
}
