//! Authoritative turret state management utilities.

use std::collections::BTreeMap;

use bounty_core::{CellCoord, TurretId, TurretKind, TurretSnapshot};

/// Snapshot of a turret stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TurretState {
    /// Identifier allocated by the world for the turret.
    pub(crate) id: TurretId,
    /// Kind of turret that was constructed.
    pub(crate) kind: TurretKind,
    /// Wall cell supporting the turret.
    pub(crate) cell: CellCoord,
    /// Fire-rate timer advanced every tick.
    pub(crate) timer: u32,
    /// Aim of the most recent shot, in degrees.
    pub(crate) rotation: f32,
    /// Ticks between two consecutive shots.
    pub(crate) shot_delay: u32,
}

impl TurretState {
    pub(crate) fn snapshot(&self) -> TurretSnapshot {
        TurretSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            timer: self.timer,
            rotation: self.rotation,
            shot_delay: self.shot_delay,
        }
    }
}

/// Registry that stores turrets and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TurretRegistry {
    entries: BTreeMap<TurretId, TurretState>,
    next_turret_id: TurretId,
}

impl TurretRegistry {
    /// Creates an empty turret registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_turret_id: TurretId::new(0),
        }
    }

    /// Mounts a turret, returning `None` when the cell already carries one.
    pub(crate) fn insert(
        &mut self,
        kind: TurretKind,
        cell: CellCoord,
        shot_delay: u32,
    ) -> Option<TurretId> {
        if self.at(cell).is_some() {
            return None;
        }

        let id = self.next_turret_id;
        self.next_turret_id = TurretId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            TurretState {
                id,
                kind,
                cell,
                timer: 0,
                rotation: 0.0,
                shot_delay,
            },
        );
        Some(id)
    }

    pub(crate) fn at(&self, cell: CellCoord) -> Option<&TurretState> {
        self.entries.values().find(|turret| turret.cell == cell)
    }

    pub(crate) fn remove_at(&mut self, cell: CellCoord) -> Option<TurretState> {
        let id = self.at(cell)?.id;
        self.entries.remove(&id)
    }

    pub(crate) fn get_mut(&mut self, turret: TurretId) -> Option<&mut TurretState> {
        self.entries.get_mut(&turret)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TurretState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TurretState> {
        self.entries.values_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every turret, yielding them in identifier order.
    pub(crate) fn drain(&mut self) -> Vec<TurretState> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}
