#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Steering engine that integrates unit motion from seek and separation forces.
//!
//! Every force is computed from the snapshot taken before any unit moves, so
//! the order in which units are processed never changes the outcome of a tick.

use bounty_core::{
    tuning::{
        ARRIVAL_RADIUS, MAX_FORCE, MAX_SPEED, MIN_SEPARATION, SCALING_FACTOR,
        SEPARATION_UNIT_SCALE, VELOCITY_MINIMUM, WALL_SEPARATION,
    },
    Command, Motion, UnitSnapshot, UnitView, Vec2,
};

/// Pure system that turns unit snapshots into `Command::MoveUnit` entries.
#[derive(Debug, Default)]
pub struct Steering {
    forces: Vec<Vec2>,
}

impl Steering {
    /// Creates a steering system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrates one tick of motion for every unit in the view.
    ///
    /// `walls` holds the origins of the walls that repel units.
    pub fn handle(&mut self, units: &UnitView, walls: &[Vec2], out: &mut Vec<Command>) {
        self.forces.clear();
        self.forces.extend(units.iter().map(|unit| {
            if unit.destination.is_some() {
                seek(unit.destination, unit.position, unit.velocity)
                    + separation(unit, units, walls)
            } else {
                Vec2::ZERO
            }
        }));

        for (unit, force) in units.iter().zip(self.forces.iter()) {
            out.push(Command::MoveUnit {
                unit: unit.id,
                motion: integrate(unit, *force),
            });
        }
    }
}

/// Force steering a unit straight toward its destination at full speed.
///
/// Yields zero without a destination or once the unit sits on it.
#[must_use]
pub fn seek(destination: Option<Vec2>, position: Vec2, velocity: Vec2) -> Vec2 {
    let Some(destination) = destination else {
        return Vec2::ZERO;
    };
    if destination == position {
        return Vec2::ZERO;
    }
    MAX_SPEED * (destination - position).normalize_or_zero() - velocity
}

/// Force pushing a unit away from crowded neighbours and nearby walls.
#[must_use]
pub fn separation(unit: &UnitSnapshot, units: &UnitView, walls: &[Vec2]) -> Vec2 {
    let mut total = Vec2::ZERO;

    for other in units.iter().filter(|other| other.id != unit.id) {
        if unit.position.distance(other.position) < MIN_SEPARATION {
            total += (unit.position - other.position) * SEPARATION_UNIT_SCALE;
        }
    }
    for wall in walls {
        if unit.position.distance(*wall) < WALL_SEPARATION {
            total += unit.position - *wall;
        }
    }

    MAX_FORCE * total
}

/// Scales `vector` down to `max` length; shorter vectors pass unchanged.
#[must_use]
pub fn truncate(vector: Vec2, max: f32) -> Vec2 {
    let length = vector.length();
    if length > max {
        vector * (max / length)
    } else {
        vector
    }
}

/// Reports whether a unit has settled close enough to its destination.
#[must_use]
pub fn has_arrived(position: Vec2, velocity: Vec2, destination: Option<Vec2>) -> bool {
    let Some(destination) = destination else {
        return false;
    };
    velocity.x.abs() < VELOCITY_MINIMUM
        && velocity.y.abs() < VELOCITY_MINIMUM
        && position.distance(destination) < ARRIVAL_RADIUS
}

/// Applies `force` to a unit for a single tick.
#[must_use]
pub fn integrate(unit: &UnitSnapshot, force: Vec2) -> Motion {
    let velocity = truncate(unit.velocity + SCALING_FACTOR * force, MAX_SPEED);
    let position = unit.position + velocity;
    let rotation = if unit.kind.is_carrier() {
        velocity.y.atan2(velocity.x).to_degrees() - 90.0
    } else {
        unit.rotation
    };

    Motion {
        position,
        velocity,
        force,
        rotation,
        arrived: has_arrived(position, velocity, unit.destination),
    }
}
