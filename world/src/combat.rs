//! Projectile flight, impact resolution and wall collapse.

use bounty_core::{
    heading_direction,
    tuning::{
        EXPLOSION_FRAMES, EXPLOSION_FRAME_DELAY, FIREBALL_RADIUS, PROJECTILE_SPEED, TILE_SIZE,
        UNIT_HITBOX_MARGIN,
    },
    CellCoord, Event, ExplosionSnapshot, Owner, ProjectileKind, ProjectileSnapshot, TurretId,
    UnitId, Vec2,
};
use tracing::debug;

use crate::World;

/// Scale of the explosion left behind by a collapsing wall.
const COLLAPSE_EXPLOSION_SCALE: f32 = 1.5;

/// Projectile travelling along a fixed heading.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) kind: ProjectileKind,
    pub(crate) owner: Owner,
    /// Upper-left corner of the hitbox.
    pub(crate) position: Vec2,
    pub(crate) heading: f32,
    pub(crate) age: u32,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            kind: self.kind,
            owner: self.owner,
            position: self.position,
            heading: self.heading,
            age: self.age,
        }
    }

    fn centre(&self) -> Vec2 {
        self.position + self.kind.size() / 2.0
    }
}

/// Short-lived explosion effect.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Explosion {
    pub(crate) position: Vec2,
    pub(crate) scale: f32,
    pub(crate) age: u32,
}

impl Explosion {
    pub(crate) fn snapshot(&self) -> ExplosionSnapshot {
        ExplosionSnapshot {
            position: self.position,
            scale: self.scale,
            frame: (self.age / EXPLOSION_FRAME_DELAY).min(EXPLOSION_FRAMES - 1),
        }
    }

    /// Explosions disappear once their last frame is reached.
    fn expired(&self) -> bool {
        self.age >= (EXPLOSION_FRAMES - 1) * EXPLOSION_FRAME_DELAY
    }
}

impl World {
    /// Spawns a projectile whose hitbox is centred on `launch`.
    pub(crate) fn launch_projectile(
        &mut self,
        kind: ProjectileKind,
        owner: Owner,
        launch: Vec2,
        heading: f32,
        out_events: &mut Vec<Event>,
    ) {
        self.projectiles.push(Projectile {
            kind,
            owner,
            position: launch - kind.size() / 2.0,
            heading,
            age: 0,
        });
        out_events.push(Event::ProjectileLaunched {
            kind,
            owner,
            position: launch,
        });
    }

    pub(crate) fn fire_turret(
        &mut self,
        turret: TurretId,
        heading: f32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(state) = self.turrets.get_mut(turret) else {
            return;
        };
        state.rotation = heading;
        let kind = state.kind.projectile();
        let launch = state.cell.world_center();

        out_events.push(Event::TurretFired {
            turret,
            projectile: kind,
        });
        self.launch_projectile(kind, Owner::Player, launch, heading, out_events);
    }

    /// Moves every projectile one tick and resolves at most one hit for each.
    pub(crate) fn advance_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let bounds = self.world_size();
        let mut index = 0;
        while index < self.projectiles.len() {
            let projectile = {
                let projectile = &mut self.projectiles[index];
                projectile.position += heading_direction(projectile.heading) * PROJECTILE_SPEED;
                projectile.age = projectile.age.saturating_add(1);
                *projectile
            };

            let outside = projectile.position.x < 0.0
                || projectile.position.y < 0.0
                || projectile.position.x > bounds.x
                || projectile.position.y > bounds.y;
            let resolved = outside
                || match projectile.owner {
                    Owner::Invader => self.resolve_wall_hit(&projectile, out_events),
                    Owner::Player | Owner::Neutral => {
                        self.resolve_unit_hit(&projectile, out_events)
                    }
                };

            if resolved {
                let _ = self.projectiles.remove(index);
            } else {
                index += 1;
            }
        }
    }

    fn resolve_wall_hit(&mut self, projectile: &Projectile, out_events: &mut Vec<Event>) -> bool {
        let Some(cell) = self.first_wall_hit(projectile) else {
            return false;
        };

        self.explode(projectile.position, projectile.kind.impact_scale());
        out_events.push(Event::ProjectileImpact {
            kind: projectile.kind,
            position: projectile.position,
        });
        if let Some(hp) = self.damage_wall(cell, projectile.kind.wall_damage()) {
            out_events.push(Event::WallDamaged { cell, hp });
            if hp <= 0 {
                self.collapse_wall(cell, out_events);
            }
        }
        true
    }

    /// Scans active walls and stops at the first one overlapping the projectile.
    fn first_wall_hit(&self, projectile: &Projectile) -> Option<CellCoord> {
        let size = projectile.kind.size();
        for (cell, _) in self.walls.iter_active() {
            if overlaps(
                projectile.position,
                size,
                cell.world_origin(),
                Vec2::splat(TILE_SIZE),
            ) {
                return Some(cell);
            }
        }
        None
    }

    fn resolve_unit_hit(&mut self, projectile: &Projectile, out_events: &mut Vec<Event>) -> bool {
        let size = projectile.kind.size();
        let primary = self.units.iter().find(|unit| {
            unit.owner != projectile.owner
                && overlaps(
                    projectile.position,
                    size,
                    unit.position - Vec2::splat(UNIT_HITBOX_MARGIN),
                    unit.kind.body_size() + Vec2::splat(UNIT_HITBOX_MARGIN * 2.0),
                )
        });
        let Some(primary) = primary.map(|unit| unit.id) else {
            return false;
        };

        let damage = projectile.kind.unit_damage();
        if projectile.kind.splashes() {
            let impact = projectile.centre();
            let victims: Vec<UnitId> = self
                .units
                .iter()
                .filter(|unit| {
                    unit.owner != projectile.owner
                        && (unit.position - Vec2::splat(UNIT_HITBOX_MARGIN)).distance(impact)
                            < FIREBALL_RADIUS
                })
                .map(|unit| unit.id)
                .collect();
            for victim in victims {
                self.damage_unit(victim, damage, out_events);
            }
        } else {
            self.damage_unit(primary, damage, out_events);
        }

        self.explode(projectile.position, projectile.kind.impact_scale());
        out_events.push(Event::ProjectileImpact {
            kind: projectile.kind,
            position: projectile.position,
        });
        true
    }

    fn damage_unit(&mut self, unit: UnitId, damage: i32, out_events: &mut Vec<Event>) {
        if let Some(unit_state) = self.units.get_mut(unit) {
            unit_state.hp -= damage;
            out_events.push(Event::UnitDamaged {
                unit,
                hp: unit_state.hp,
            });
        }
    }

    /// Subtracts damage from an active wall, returning its remaining hit points.
    pub(crate) fn damage_wall(&mut self, cell: CellCoord, damage: i32) -> Option<i32> {
        let wall = self.walls.get_mut(cell).filter(|wall| wall.active)?;
        wall.hp -= damage;
        Some(wall.hp)
    }

    /// Tears down a wall together with its turret and releases every unit targeting it.
    pub(crate) fn collapse_wall(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(wall) = self.walls.get_mut(cell) else {
            return;
        };
        wall.active = false;
        wall.gate = false;
        wall.hp = 0;
        self.walls.recompute_adjacency();
        self.explode(cell.world_origin(), COLLAPSE_EXPLOSION_SCALE);
        debug!(?cell, "wall collapsed");
        out_events.push(Event::WallDestroyed { cell });

        if let Some(turret) = self.turrets.remove_at(cell) {
            debug!(turret = turret.id.get(), ?cell, "turret lost with its wall");
            out_events.push(Event::TurretDestroyed {
                turret: turret.id,
                cell,
            });
        }
        self.release_wall_target(cell, out_events);
    }

    /// Invalidates every unit reference to a wall that no longer stands.
    pub(crate) fn release_wall_target(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        for unit in self.units.iter_mut() {
            if unit.wall_target == Some(cell) {
                unit.lose_wall_target();
                out_events.push(Event::UnitTargetLost { unit: unit.id });
            }
        }
    }

    fn explode(&mut self, position: Vec2, scale: f32) {
        self.explosions.push(Explosion {
            position,
            scale,
            age: 0,
        });
    }

    /// Advances explosion animations and notice fading.
    pub(crate) fn age_effects(&mut self) {
        for explosion in &mut self.explosions {
            explosion.age = explosion.age.saturating_add(1);
        }
        self.explosions.retain(|explosion| !explosion.expired());
        self.notices.age();
    }
}

fn overlaps(a_position: Vec2, a_size: Vec2, b_position: Vec2, b_size: Vec2) -> bool {
    a_position.x < b_position.x + b_size.x
        && a_position.x + a_size.x > b_position.x
        && a_position.y < b_position.y + b_size.y
        && a_position.y + a_size.y > b_position.y
}
