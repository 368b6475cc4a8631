#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Battle loop wiring the world to every system in a fixed per-tick order.
//!
//! A [`Battle`] owns the world and the systems. Each call to
//! [`Battle::step`] runs, in order: the clock tick, the wave scheduler,
//! turret targeting and combat, unit decisions, steering followed by arrival
//! transitions, projectile flight, effect aging and finally the player's
//! economy input. Every system reads the world as left by the previous pass.

mod seeds;

use bounty_core::{Command, Event, TurretTarget};
use bounty_system_bootstrap::Battlefield;
use bounty_system_economy::{Economy, EconomyInput};
use bounty_system_steering::Steering;
use bounty_system_turret_combat::TurretCombat;
use bounty_system_turret_targeting::TurretTargeting;
use bounty_system_unit_ai::UnitAi;
use bounty_system_wave_scheduler::{Config, Wave, WaveScheduler};
use bounty_world::{self as world, query, World};
use tracing::{debug, info};

use crate::seeds::{derive_labeled_seed, STREAM_TURRETS, STREAM_UNITS, STREAM_WAVES};

/// State of the battle as judged after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Neither side has won yet.
    InProgress,
    /// Every wave was launched and every unit is gone.
    Victory,
    /// A gold pile was emptied, or the defences fell while units remain.
    Defeat,
}

impl Outcome {
    /// Reports whether the battle has ended.
    #[must_use]
    pub const fn is_concluded(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A running battle.
#[derive(Debug)]
pub struct Battle {
    name: String,
    world: World,
    scheduler: WaveScheduler,
    targeting: TurretTargeting,
    combat: TurretCombat,
    unit_ai: UnitAi,
    steering: Steering,
    economy: Economy,
    targets: Vec<TurretTarget>,
    commands: Vec<Command>,
    events: Vec<Event>,
    outcome: Outcome,
}

impl Battle {
    /// Creates a battle in the planning phase from a prepared battlefield.
    #[must_use]
    pub fn new(battlefield: Battlefield, seed: u64) -> Self {
        let Battlefield {
            name,
            world,
            waves,
            next_wave_time,
        } = battlefield;
        Self::from_parts(name, world, waves, next_wave_time, seed)
    }

    /// Creates a battle from an already populated world.
    #[must_use]
    pub fn from_parts(
        name: String,
        world: World,
        waves: Vec<Wave>,
        next_wave_time: u32,
        seed: u64,
    ) -> Self {
        let scheduler = WaveScheduler::new(
            Config::new(next_wave_time, derive_labeled_seed(seed, STREAM_WAVES)),
            waves,
        );
        Self {
            name,
            world,
            scheduler,
            targeting: TurretTargeting::new(),
            combat: TurretCombat::new(derive_labeled_seed(seed, STREAM_TURRETS)),
            unit_ai: UnitAi::new(derive_labeled_seed(seed, STREAM_UNITS)),
            steering: Steering::new(),
            economy: Economy::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Display name of the battle.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Wave scheduler driving the invasion.
    #[must_use]
    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    /// Economy system holding the player's active tool.
    #[must_use]
    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    /// Outcome as of the last completed tick.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Ends the planning phase; the first wave follows shortly after.
    pub fn begin_assault(&mut self) {
        self.scheduler.begin_assault();
    }

    /// Runs one full tick and returns every event it produced.
    pub fn step(&mut self, input: EconomyInput) -> &[Event] {
        self.events.clear();
        world::apply(&mut self.world, Command::Tick, &mut self.events);

        self.scheduler
            .handle(&self.events, &self.world, &mut self.commands);
        self.flush();

        let turrets = query::turret_view(&self.world);
        self.targeting
            .handle(&turrets, &query::unit_view(&self.world), &mut self.targets);
        self.combat.handle(&turrets, &self.targets, &mut self.commands);
        self.flush();

        self.unit_ai.handle(&self.world, &mut self.commands);
        self.flush();

        self.steering.handle(
            &query::unit_view(&self.world),
            &query::repelling_walls(&self.world),
            &mut self.commands,
        );
        let moved_from = self.events.len();
        self.flush();
        self.unit_ai
            .handle_arrivals(&self.events[moved_from..], &self.world, &mut self.commands);
        self.flush();

        world::apply(&mut self.world, Command::AdvanceProjectiles, &mut self.events);
        world::apply(&mut self.world, Command::AgeEffects, &mut self.events);

        self.economy
            .handle(input, self.scheduler.is_planning(), &mut self.commands);
        self.flush();

        self.conclude();
        &self.events
    }

    /// Advances the battle until it concludes or `max_ticks` ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> Outcome {
        for _ in 0..max_ticks {
            if self.outcome.is_concluded() {
                break;
            }
            let _ = self.step(EconomyInput::default());
        }
        self.outcome
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn conclude(&mut self) {
        if self.outcome.is_concluded() {
            return;
        }
        self.outcome = self.judge();
        if self.outcome.is_concluded() {
            info!(
                outcome = ?self.outcome,
                tick = query::tick_index(&self.world),
                "battle concluded"
            );
        } else {
            debug!(
                tick = query::tick_index(&self.world),
                events = self.events.len(),
                "tick completed"
            );
        }
    }

    fn judge(&self) -> Outcome {
        let plundered = query::gold_piles(&self.world)
            .iter()
            .any(|pile| pile.coins == 0);
        let has_units = query::has_units(&self.world);
        if plundered || (has_units && !query::has_turrets(&self.world)) {
            return Outcome::Defeat;
        }
        if self.scheduler.is_exhausted() && !has_units {
            return Outcome::Victory;
        }
        Outcome::InProgress
    }
}
