#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that turns a scenario file into a ready-to-play battlefield.
//!
//! A scenario is a TOML document naming a map asset (resolved relative to the
//! scenario file) together with the starting treasury, gold piles, preset
//! fortifications and the wave scripts. Loading is fatal on any error and
//! reports it with the offending path attached.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use bounty_core::{tuning::WALL_HP, CellCoord, Command, TurretKind};
use bounty_system_wave_scheduler::{parse_wave_script, Wave};
use bounty_world::{self as world, format::MapAsset, query, World};
use serde::Deserialize;
use tracing::info;

/// Battle setup as authored in a scenario file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Display name of the battle.
    pub name: String,
    /// Map asset path, relative to the scenario file.
    pub map: PathBuf,
    /// Gold available to the player when the battle starts.
    pub gold: u32,
    /// Ticks between two consecutive waves.
    pub next_wave_time: u32,
    /// Gold piles the invaders try to plunder.
    #[serde(default)]
    pub gold_piles: Vec<GoldPileSpec>,
    /// Walls, gates and turrets standing before the first wave.
    #[serde(default)]
    pub fortifications: Vec<Fortification>,
    /// Wave scripts in launch order.
    #[serde(default)]
    pub waves: Vec<String>,
}

/// Gold pile preset.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GoldPileSpec {
    /// Column of the pile.
    pub x: u32,
    /// Row of the pile.
    pub y: u32,
    /// Coins stored in the pile.
    pub coins: u32,
}

/// Wall or gate preset, optionally carrying a turret.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Fortification {
    /// Column of the wall.
    pub x: u32,
    /// Row of the wall.
    pub y: u32,
    /// Hit points of the wall; may exceed the buildable maximum.
    #[serde(default = "default_wall_hp")]
    pub hp: i32,
    /// Whether the wall is a passable gate.
    #[serde(default)]
    pub gate: bool,
    /// Turret mounted on the wall.
    #[serde(default)]
    pub turret: Option<TurretKind>,
    /// Overrides the turret's default firing period.
    #[serde(default)]
    pub shot_delay: Option<u32>,
}

const fn default_wall_hp() -> i32 {
    WALL_HP
}

impl Fortification {
    fn cell(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }
}

impl Scenario {
    /// Parses a scenario from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// Reads and parses the scenario stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Parses every wave script, reporting the first invalid one.
    pub fn parse_waves(&self) -> Result<Vec<Wave>> {
        self.waves
            .iter()
            .enumerate()
            .map(|(index, script)| {
                parse_wave_script(script)
                    .with_context(|| format!("wave {} `{script}` is invalid", index + 1))
            })
            .collect()
    }
}

/// World and wave list ready for the first tick.
#[derive(Debug)]
pub struct Battlefield {
    /// Display name of the battle.
    pub name: String,
    /// Initial world state with every preset applied.
    pub world: World,
    /// Parsed waves in launch order.
    pub waves: Vec<Wave>,
    /// Ticks between two consecutive waves.
    pub next_wave_time: u32,
}

/// Prepares battlefields from scenario files.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Loads the scenario at `path` together with the map asset it names.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Battlefield> {
        let path = path.as_ref();
        let scenario = Scenario::load(path)?;
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let map_path = base.join(&scenario.map);
        let asset = MapAsset::load(&map_path)
            .with_context(|| format!("failed to load map for scenario `{}`", scenario.name))?;
        self.assemble(&scenario, &asset)
    }

    /// Builds the battlefield described by `scenario` on top of `asset`.
    pub fn assemble(&self, scenario: &Scenario, asset: &MapAsset) -> Result<Battlefield> {
        let waves = scenario.parse_waves()?;
        let mut world = World::from_asset(asset)
            .with_context(|| format!("map of scenario `{}` is invalid", scenario.name))?;

        let columns = query::columns(&world);
        let rows = query::rows(&world);
        let in_bounds = |x: u32, y: u32| x < columns && y < rows;

        let mut presets = vec![Command::SetTreasury {
            gold: scenario.gold,
        }];
        for pile in &scenario.gold_piles {
            if !in_bounds(pile.x, pile.y) {
                bail!(
                    "gold pile at ({}, {}) lies outside the {columns}x{rows} map",
                    pile.x,
                    pile.y
                );
            }
            presets.push(Command::PlaceGoldPile {
                cell: CellCoord::new(pile.x, pile.y),
                coins: pile.coins,
            });
        }
        for fortification in &scenario.fortifications {
            if !in_bounds(fortification.x, fortification.y) {
                bail!(
                    "fortification at ({}, {}) lies outside the {columns}x{rows} map",
                    fortification.x,
                    fortification.y
                );
            }
            let cell = fortification.cell();
            presets.push(Command::PlaceWall {
                cell,
                hp: fortification.hp,
                gate: fortification.gate,
            });
            if let Some(kind) = fortification.turret {
                if fortification.gate {
                    bail!("gate at ({}, {}) cannot carry a turret", cell.column(), cell.row());
                }
                presets.push(Command::PlaceTurret {
                    kind,
                    cell,
                    shot_delay: fortification.shot_delay.unwrap_or_else(|| kind.shot_delay()),
                });
            }
        }

        let mut events = Vec::new();
        for command in presets {
            world::apply(&mut world, command, &mut events);
        }

        info!(
            scenario = %scenario.name,
            columns,
            rows,
            waves = waves.len(),
            fortifications = scenario.fortifications.len(),
            "battlefield prepared"
        );

        Ok(Battlefield {
            name: scenario.name.clone(),
            world,
            waves,
            next_wave_time: scenario.next_wave_time,
        })
    }
}
