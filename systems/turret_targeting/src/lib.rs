#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks the invader each turret should shoot at.
//!
//! Distances are measured from the upper-left corner of the turret's cell to
//! the unit position, and only invaders strictly closer than
//! [`TURRET_RANGE`] are eligible.

use bounty_core::{
    tuning::TURRET_RANGE, Owner, TurretTarget, TurretView, UnitId, UnitView, Vec2,
};

/// Turret targeting system that reuses a scratch buffer of invader positions.
#[derive(Debug, Default)]
pub struct TurretTargeting {
    invaders: Vec<Candidate>,
}

impl TurretTargeting {
    /// Creates a new turret targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes turret targets for the provided snapshots.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Turrets without an invader in range produce no entry.
    pub fn handle(&mut self, turrets: &TurretView, units: &UnitView, out: &mut Vec<TurretTarget>) {
        out.clear();
        if turrets.is_empty() {
            return;
        }

        self.invaders.clear();
        self.invaders.extend(
            units
                .iter()
                .filter(|unit| unit.owner == Owner::Invader)
                .map(|unit| Candidate {
                    id: unit.id,
                    position: unit.position,
                }),
        );
        if self.invaders.is_empty() {
            return;
        }

        for turret in turrets.iter() {
            let origin = turret.cell.world_origin();
            let mut best: Option<(Candidate, f32)> = None;
            for candidate in &self.invaders {
                let distance = origin.distance(candidate.position);
                if best.map_or(true, |(_, closest)| distance < closest) {
                    best = Some((*candidate, distance));
                }
            }

            let Some((candidate, distance)) = best else {
                continue;
            };
            if distance < TURRET_RANGE {
                out.push(TurretTarget {
                    turret: turret.id,
                    unit: candidate.id,
                    turret_position: origin,
                    unit_position: candidate.position,
                    distance,
                });
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    id: UnitId,
    position: Vec2,
}
