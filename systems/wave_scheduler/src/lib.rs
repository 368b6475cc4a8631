#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler that launches invading carriers from the map edges.
//!
//! The scheduler starts in the planning phase with a frozen timer. Once the
//! player calls [`WaveScheduler::begin_assault`], every
//! `Event::TimeAdvanced` moves the timer forward and a wave launches each
//! time it reaches the configured wave period.

mod script;

pub use script::{parse_wave_script, Wave, WaveGroup, WaveScriptError};

use bounty_core::{
    tuning::{PLANNING_READY_LEAD, TILE_SIZE},
    Command, Event, Notice, Side, UnitKind, UnitSpawn, Vec2,
};
use bounty_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Configuration parameters required to construct the wave scheduler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    next_wave_time: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration launching a wave every `next_wave_time` ticks.
    #[must_use]
    pub const fn new(next_wave_time: u32, rng_seed: u64) -> Self {
        Self {
            next_wave_time,
            rng_seed,
        }
    }
}

/// System that owns the wave list and the inter-wave timer.
#[derive(Debug)]
pub struct WaveScheduler {
    waves: Vec<Wave>,
    next_wave: usize,
    next_wave_time: u32,
    timer: u32,
    planning: bool,
    rng: ChaCha8Rng,
}

impl WaveScheduler {
    /// Creates a scheduler in the planning phase.
    #[must_use]
    pub fn new(config: Config, waves: Vec<Wave>) -> Self {
        Self {
            waves,
            next_wave: 0,
            next_wave_time: config.next_wave_time,
            timer: 0,
            planning: true,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Ends the planning phase so the first wave arrives shortly after.
    pub fn begin_assault(&mut self) {
        if !self.planning {
            return;
        }
        self.planning = false;
        self.timer = self.next_wave_time.saturating_sub(PLANNING_READY_LEAD);
        info!(ticks_to_wave = self.ticks_until_next_wave(), "assault begins");
    }

    /// Reports whether the player is still preparing the defences.
    #[must_use]
    pub fn is_planning(&self) -> bool {
        self.planning
    }

    /// Reports whether every wave has been launched.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next_wave >= self.waves.len()
    }

    /// Number of waves launched so far.
    #[must_use]
    pub fn waves_launched(&self) -> usize {
        self.next_wave
    }

    /// Total number of scheduled waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Ticks left before the next wave launches.
    #[must_use]
    pub fn ticks_until_next_wave(&self) -> u32 {
        self.next_wave_time.saturating_sub(self.timer)
    }

    /// Consumes tick events and emits spawn and notice commands.
    pub fn handle(&mut self, events: &[Event], world: &World, out: &mut Vec<Command>) {
        for event in events {
            if !matches!(event, Event::TimeAdvanced { .. }) || self.planning {
                continue;
            }
            if self.timer >= self.next_wave_time && !self.is_exhausted() {
                self.timer = 0;
                self.launch_wave(world, out);
            }
            self.timer = self.timer.saturating_add(1);
        }
    }

    fn launch_wave(&mut self, world: &World, out: &mut Vec<Command>) {
        let index = self.next_wave;
        self.next_wave += 1;
        let final_wave = self.is_exhausted();
        let Some(wave) = self.waves.get(index).cloned() else {
            return;
        };

        out.push(Command::Notify {
            notice: Notice::InvasionSpotted,
        });
        for group in wave.groups() {
            match group.kind {
                UnitKind::GoliathShip => out.push(Command::Notify {
                    notice: Notice::GoliathApproaches,
                }),
                UnitKind::EdricShip => out.push(Command::Notify {
                    notice: Notice::EdricApproaches,
                }),
                _ => {}
            }

            let position = self.edge_position(world, group.side);
            let destination = query::closest_land_noisy(world, position, &mut self.rng)
                .or_else(|| query::closest_land(world, position));
            out.push(Command::SpawnUnit {
                spawn: UnitSpawn::carrier(group.kind, position, destination),
            });
        }
        if final_wave {
            out.push(Command::Notify {
                notice: Notice::FinalAssault,
            });
        }

        info!(wave = index + 1, carriers = wave.len(), final_wave, "wave launched");
    }

    /// Random point on the requested map edge.
    fn edge_position(&mut self, world: &World, side: Side) -> Vec2 {
        let width = query::columns(world) as f32 * TILE_SIZE;
        let height = query::rows(world) as f32 * TILE_SIZE;
        let along_width = self.rng.gen_range(0.0..=width);
        let along_height = self.rng.gen_range(0.0..=height);
        let (x, y) = match side {
            Side::North => (along_width, 0.0),
            Side::South => (along_width, height),
            Side::East => (width, along_height),
            Side::West => (0.0, along_height),
        };
        Vec2::new(x.floor(), y.floor())
    }
}
