#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits turret firing commands from targeting data.

use bounty_core::{
    heading_between,
    tuning::{TURRET_AIM_BIAS, TURRET_AIM_JITTER},
    Command, TurretTarget, TurretView, Vec2,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Turret combat system that queues firing commands for turrets whose timer
/// lands on a multiple of their shot delay.
#[derive(Debug)]
pub struct TurretCombat {
    rng: ChaCha8Rng,
    scratch: Vec<Command>,
}

impl TurretCombat {
    /// Creates a turret combat system whose aim jitter derives from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch: Vec::new(),
        }
    }

    /// Emits `Command::FireTurret` entries for turrets ready to fire.
    pub fn handle(&mut self, turrets: &TurretView, targets: &[TurretTarget], out: &mut Vec<Command>) {
        if targets.is_empty() || turrets.is_empty() {
            return;
        }

        self.scratch.clear();
        for target in targets {
            let Some(turret) = turrets.get(target.turret) else {
                continue;
            };
            if turret.shot_delay == 0 || turret.timer % turret.shot_delay != 0 {
                continue;
            }

            let aim = target.unit_position + self.jitter();
            self.scratch.push(Command::FireTurret {
                turret: turret.id,
                heading: heading_between(target.turret_position, aim),
            });
        }

        out.append(&mut self.scratch);
    }

    fn jitter(&mut self) -> Vec2 {
        let (low, high) = TURRET_AIM_JITTER;
        let x = self.rng.gen_range(low..=high) - TURRET_AIM_BIAS;
        let y = self.rng.gen_range(low..=high) - TURRET_AIM_BIAS;
        Vec2::new(x as f32, y as f32)
    }
}

impl Default for TurretCombat {
    fn default() -> Self {
        Self::new(0)
    }
}
