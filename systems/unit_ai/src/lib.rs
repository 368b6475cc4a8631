#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Unit decision system driving invaders from the shore to the defences.
//!
//! Every tick [`UnitAi::handle`] removes defeated units, acquires targets for
//! idle invaders and advances the attack and casting counters stored in each
//! unit's rotation. [`UnitAi::handle_arrivals`] reacts to the arrival events
//! raised by steering: carriers unload their landing parties or leave the
//! map, and walking troops start their assault.

use bounty_core::{
    heading_between,
    tuning::{
        DISEMBARK_SCATTER, GOLIATH_ARM_DISTANCE, GOLIATH_THROW_RANGE, HOME_WATERS_RADIUS,
        RANGED_AIM_JITTER, SWING_PERIOD, SWING_STEP, VOLLEY_THRESHOLD,
    },
    Command, Event, Owner, ProjectileKind, RangedWeapon, RemovalReason, UnitKind,
    UnitOrders, UnitRole, UnitSnapshot, UnitSpawn, UnitState, Vec2, Volley,
};
use bounty_world::{query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Decision system owning the random stream used for aim and scatter.
#[derive(Debug)]
pub struct UnitAi {
    rng: ChaCha8Rng,
}

impl UnitAi {
    /// Creates a unit AI whose random decisions derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Runs one decision pass over every unit, in identifier order.
    pub fn handle(&mut self, world: &World, out: &mut Vec<Command>) {
        for unit in query::unit_view(world).iter() {
            if unit.hp <= 0 {
                out.push(Command::RemoveUnit {
                    unit: unit.id,
                    reason: RemovalReason::Defeated,
                });
                continue;
            }

            self.throw_boulder(unit, out);

            if unit.owner != Owner::Invader {
                continue;
            }
            match unit.state {
                UnitState::Idle if !unit.kind.is_carrier() => {
                    if let Some(orders) = choose_target(world, unit) {
                        out.push(Command::AssignOrders {
                            unit: unit.id,
                            orders,
                        });
                    }
                }
                UnitState::Attacking => attack(world, unit, out),
                UnitState::Ranging => self.range(world, unit, out),
                UnitState::Idle | UnitState::Walking | UnitState::Retreating => {}
            }
        }
    }

    /// Reacts to `Event::UnitArrived` entries raised while moving units.
    pub fn handle_arrivals(&mut self, events: &[Event], world: &World, out: &mut Vec<Command>) {
        for event in events {
            let Event::UnitArrived { unit } = event else {
                continue;
            };
            let Some(unit) = query::unit(world, *unit) else {
                continue;
            };

            if unit.kind.is_carrier() && unit.owner == Owner::Invader {
                self.land_or_leave(&unit, out);
                continue;
            }
            if unit.state != UnitState::Walking {
                continue;
            }

            let state = match (unit.owner, unit.kind.role()) {
                (Owner::Invader, UnitRole::Melee) => UnitState::Attacking,
                (Owner::Invader, UnitRole::Ranged) => UnitState::Ranging,
                _ => UnitState::Idle,
            };
            out.push(Command::AssignOrders {
                unit: unit.id,
                orders: UnitOrders {
                    state,
                    ..UnitOrders::from_snapshot(&unit)
                },
            });
        }
    }

    fn land_or_leave(&mut self, carrier: &UnitSnapshot, out: &mut Vec<Command>) {
        let home = carrier.position.distance(carrier.origin) < HOME_WATERS_RADIUS;
        if carrier.state == UnitState::Retreating || home {
            out.push(Command::RemoveUnit {
                unit: carrier.id,
                reason: RemovalReason::ReturnedHome,
            });
            return;
        }

        out.push(Command::RemoveUnit {
            unit: carrier.id,
            reason: RemovalReason::Disembarked,
        });
        for trooper in carrier.kind.landing_party() {
            for _ in 0..trooper.count {
                let position = if trooper.scatter {
                    carrier.position + self.scatter()
                } else {
                    carrier.position
                };
                out.push(Command::SpawnUnit {
                    spawn: UnitSpawn::trooper(trooper, position, carrier.origin),
                });
            }
        }
    }

    fn scatter(&mut self) -> Vec2 {
        let x = self.rng.gen_range(-DISEMBARK_SCATTER..=DISEMBARK_SCATTER);
        let y = self.rng.gen_range(-DISEMBARK_SCATTER..=DISEMBARK_SCATTER);
        Vec2::new(x as f32, y as f32)
    }

    fn throw_boulder(&mut self, unit: &UnitSnapshot, out: &mut Vec<Command>) {
        if !unit.boulder_armed {
            return;
        }
        let Some(destination) = unit.destination else {
            return;
        };
        if unit.position.distance(destination) >= GOLIATH_THROW_RANGE {
            return;
        }

        out.push(Command::LaunchProjectile {
            kind: ProjectileKind::Boulder,
            owner: unit.owner,
            position: unit.position,
            heading: heading_between(unit.position, destination),
        });
        out.push(Command::DisarmBoulder { unit: unit.id });
    }

    fn range(&mut self, world: &World, unit: &UnitSnapshot, out: &mut Vec<Command>) {
        let standing = unit.wall_target.filter(|cell| query::wall(world, *cell).is_some());
        let (Some(weapon), Some(wall)) = (unit.kind.weapon(), standing) else {
            out.push(idle(unit));
            return;
        };

        let counter = unit.rotation + weapon.counter_step;
        if counter < VOLLEY_THRESHOLD {
            out.push(Command::AnimateUnit {
                unit: unit.id,
                rotation: counter,
            });
            return;
        }

        out.push(Command::AnimateUnit {
            unit: unit.id,
            rotation: 0.0,
        });
        match weapon.volley {
            Volley::Single => {
                let (low, high) = RANGED_AIM_JITTER;
                let jitter = Vec2::new(
                    self.rng.gen_range(low..=high) as f32,
                    self.rng.gen_range(low..=high) as f32,
                );
                fire(unit, weapon, wall.world_origin() + jitter, out);
            }
            Volley::Triple => {
                fire(unit, weapon, wall.world_center(), out);
                for _ in 0..2 {
                    if let Some(extra) =
                        query::closest_wall_noisy(world, unit.position, &mut self.rng)
                    {
                        fire(unit, weapon, extra.cell.world_center(), out);
                    }
                }
            }
        }
    }
}

impl Default for UnitAi {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Picks the gold pile or wall an idle invader should go after.
fn choose_target(world: &World, unit: &UnitSnapshot) -> Option<UnitOrders> {
    let gold = query::closest_gold_pile(world, unit.position);
    let wall = query::closest_wall(world, unit.position);

    let mut orders = None;
    if let Some(gold) = gold {
        let closer_than_wall = wall.map_or(true, |wall| gold.distance < wall.distance);
        if gold.distance > 0.0 && closer_than_wall {
            orders = Some(UnitOrders {
                state: UnitState::Walking,
                destination: Some(gold.position),
                wall_target: None,
                gold_target: Some(gold.pile),
                boulder_armed: unit.boulder_armed,
            });
        }
    }

    let Some(wall) = wall else {
        return orders;
    };
    let wall_wins = gold.map_or(true, |gold| wall.distance <= gold.distance);
    if !(wall_wins || unit.kind.prefers_walls()) {
        return orders;
    }

    let mut assault = UnitOrders {
        state: UnitState::Walking,
        destination: Some(wall.position),
        wall_target: Some(wall.cell),
        gold_target: None,
        boulder_armed: unit.boulder_armed,
    };
    if unit.kind == UnitKind::Goliath {
        assault.boulder_armed |= wall.distance > GOLIATH_ARM_DISTANCE;
    } else if let Some(weapon) = unit.kind.weapon() {
        if wall.distance < weapon.range {
            assault.state = UnitState::Ranging;
            assault.destination = Some(unit.position);
        } else {
            let away = (unit.position - wall.position).normalize_or_zero();
            assault.destination = Some(wall.position + away * weapon.range);
        }
    }
    Some(assault)
}

fn attack(world: &World, unit: &UnitSnapshot, out: &mut Vec<Command>) {
    if let Some(cell) = unit.wall_target {
        if query::wall(world, cell).is_none() {
            out.push(idle(unit));
            return;
        }
        let mut counter = unit.rotation + SWING_STEP;
        if counter >= SWING_PERIOD {
            counter -= SWING_PERIOD;
            out.push(Command::StrikeWall { unit: unit.id });
        }
        out.push(Command::AnimateUnit {
            unit: unit.id,
            rotation: counter,
        });
    } else if unit.gold_target.is_some() {
        out.push(Command::StealCoin { unit: unit.id });
    } else {
        out.push(idle(unit));
    }
}

fn fire(unit: &UnitSnapshot, weapon: RangedWeapon, target: Vec2, out: &mut Vec<Command>) {
    out.push(Command::LaunchProjectile {
        kind: weapon.projectile,
        owner: unit.owner,
        position: unit.position + unit.kind.body_size() / 2.0,
        heading: heading_between(unit.position, target),
    });
}

fn idle(unit: &UnitSnapshot) -> Command {
    Command::AssignOrders {
        unit: unit.id,
        orders: UnitOrders {
            state: UnitState::Idle,
            destination: None,
            wall_target: None,
            gold_target: None,
            boulder_armed: unit.boulder_armed,
        },
    }
}
