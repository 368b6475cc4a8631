//! Validation and bookkeeping of the player's build, sell and repair actions.

use bounty_core::{
    tuning::{DANGER_RADIUS, GATE_COST, WALL_COST, WALL_HP},
    ActionRejection, BuildingKind, CellCoord, Event, Notice,
};
use tracing::debug;

use crate::{query, World};

impl World {
    pub(crate) fn build(&mut self, kind: BuildingKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.check_site(cell) {
            self.reject(reason, out_events);
            return;
        }

        let Some(wall) = self.walls.get(cell).copied() else {
            self.reject(ActionRejection::OutOfBounds, out_events);
            return;
        };
        let cost = kind.cost();

        match kind {
            BuildingKind::Wall | BuildingKind::Gate => {
                let rebuilds_gate = wall.gate && kind == BuildingKind::Wall;
                if wall.active && !rebuilds_gate {
                    self.reject(ActionRejection::Blocked, out_events);
                    return;
                }
                if !self.spend(cost) {
                    self.reject(ActionRejection::InsufficientFunds, out_events);
                    return;
                }
                if let Some(wall) = self.walls.get_mut(cell) {
                    wall.active = true;
                    wall.gate = kind == BuildingKind::Gate;
                    wall.hp = WALL_HP;
                }
                self.walls.recompute_adjacency();
            }
            BuildingKind::Turret(turret) => {
                if !wall.active || wall.gate || self.turrets.at(cell).is_some() {
                    self.reject(ActionRejection::RequiresEmptyWall, out_events);
                    return;
                }
                if !self.spend(cost) {
                    self.reject(ActionRejection::InsufficientFunds, out_events);
                    return;
                }
                let _ = self.turrets.insert(turret, cell, turret.shot_delay());
            }
        }

        debug!(?kind, ?cell, cost, gold = self.treasury, "building placed");
        out_events.push(Event::BuildingPlaced { kind, cell, cost });
    }

    pub(crate) fn sell(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.check_bounds_and_danger(cell) {
            self.reject(reason, out_events);
            return;
        }

        if let Some(turret) = self.turrets.remove_at(cell) {
            let refund = turret.kind.cost();
            self.earn(refund);
            out_events.push(Event::BuildingSold {
                cell,
                turret: Some(turret.kind),
                refund,
            });
            return;
        }

        let Some(wall) = self.walls.get(cell).copied().filter(|wall| wall.active) else {
            self.reject(ActionRejection::NothingToSell, out_events);
            return;
        };

        let cost = if wall.gate { GATE_COST } else { WALL_COST };
        let refund = prorated(cost, wall.hp);
        if let Some(wall) = self.walls.get_mut(cell) {
            wall.active = false;
            wall.gate = false;
            wall.hp = 0;
        }
        self.walls.recompute_adjacency();
        self.release_wall_target(cell, out_events);
        self.earn(refund);
        out_events.push(Event::BuildingSold {
            cell,
            turret: None,
            refund,
        });
    }

    pub(crate) fn repair(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.check_bounds_and_danger(cell) {
            self.reject(reason, out_events);
            return;
        }

        let Some(wall) = self
            .walls
            .get(cell)
            .copied()
            .filter(|wall| wall.active && wall.hp < WALL_HP)
        else {
            self.reject(ActionRejection::NothingToRepair, out_events);
            return;
        };

        let cost = repair_cost(wall.hp);
        if !self.spend(cost) {
            self.reject(ActionRejection::InsufficientFunds, out_events);
            return;
        }
        if let Some(wall) = self.walls.get_mut(cell) {
            wall.hp = WALL_HP;
        }
        out_events.push(Event::WallRepaired { cell, cost });
    }

    pub(crate) fn reset_defences(&mut self, out_events: &mut Vec<Event>) {
        let mut refund: u32 = self
            .turrets
            .drain()
            .iter()
            .map(|turret| turret.kind.cost())
            .sum();

        let standing: Vec<(CellCoord, bool)> = self
            .walls
            .iter_active()
            .map(|(cell, wall)| (cell, wall.gate))
            .collect();
        for (cell, gate) in standing {
            refund = refund.saturating_add(if gate { GATE_COST } else { WALL_COST });
            if let Some(wall) = self.walls.get_mut(cell) {
                wall.active = false;
                wall.gate = false;
                wall.hp = 0;
            }
            self.release_wall_target(cell, out_events);
        }
        self.walls.recompute_adjacency();

        self.earn(refund);
        out_events.push(Event::DefencesReset { refund });
    }

    fn check_site(&self, cell: CellCoord) -> Result<(), ActionRejection> {
        self.check_bounds_and_danger(cell)?;
        if self.tiles.is_water(cell) {
            return Err(ActionRejection::WaterTile);
        }
        Ok(())
    }

    fn check_bounds_and_danger(&self, cell: CellCoord) -> Result<(), ActionRejection> {
        if self.walls.get(cell).is_none() {
            return Err(ActionRejection::OutOfBounds);
        }
        if query::hostiles_within(self, cell.world_center(), DANGER_RADIUS) > 0 {
            return Err(ActionRejection::EnemiesNearby);
        }
        Ok(())
    }

    fn spend(&mut self, cost: u32) -> bool {
        match self.treasury.checked_sub(cost) {
            Some(remaining) => {
                self.treasury = remaining;
                true
            }
            None => false,
        }
    }

    fn earn(&mut self, amount: u32) {
        self.treasury = self.treasury.saturating_add(amount);
    }

    fn reject(&mut self, reason: ActionRejection, out_events: &mut Vec<Event>) {
        debug!(?reason, "economy action rejected");
        out_events.push(Event::ActionRejected { reason });
        self.post_notice(Notice::Rejected(reason), out_events);
    }

    pub(crate) fn award_bounty(&mut self, amount: u32) {
        self.earn(amount);
    }
}

/// Share of `cost` matching the wall's remaining health, rounded down.
fn prorated(cost: u32, hp: i32) -> u32 {
    let health = u64::try_from(hp.clamp(0, WALL_HP)).unwrap_or(0);
    let max = u64::try_from(WALL_HP).unwrap_or(1);
    u32::try_from(u64::from(cost) * health / max).unwrap_or(cost)
}

/// Gold needed to bring a wall back to full health; cheaper the more intact it is.
pub(crate) fn repair_cost(hp: i32) -> u32 {
    let missing = u64::try_from(WALL_HP - hp.clamp(0, WALL_HP)).unwrap_or(0);
    let max = u64::try_from(WALL_HP).unwrap_or(1);
    u32::try_from(u64::from(WALL_COST) * missing / max).unwrap_or(WALL_COST)
}
