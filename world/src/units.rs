//! Authoritative unit state and identifier allocation.

use std::collections::BTreeMap;

use bounty_core::{
    CellCoord, GoldPileId, Owner, UnitId, UnitKind, UnitOrders, UnitSnapshot, UnitSpawn,
    UnitState, Vec2,
};

/// Unit stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) kind: UnitKind,
    pub(crate) owner: Owner,
    pub(crate) state: UnitState,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) force: Vec2,
    pub(crate) destination: Option<Vec2>,
    pub(crate) origin: Vec2,
    pub(crate) rotation: f32,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) damage: i32,
    pub(crate) wall_target: Option<CellCoord>,
    pub(crate) gold_target: Option<GoldPileId>,
    pub(crate) boulder_armed: bool,
}

impl Unit {
    fn from_spawn(id: UnitId, spawn: UnitSpawn) -> Self {
        Self {
            id,
            kind: spawn.kind,
            owner: spawn.owner,
            state: spawn.state,
            position: spawn.position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
            destination: spawn.destination,
            origin: spawn.origin,
            rotation: 0.0,
            hp: spawn.hp,
            max_hp: spawn.max_hp,
            damage: spawn.damage,
            wall_target: None,
            gold_target: None,
            boulder_armed: spawn.boulder_armed,
        }
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            kind: self.kind,
            owner: self.owner,
            state: self.state,
            position: self.position,
            velocity: self.velocity,
            force: self.force,
            destination: self.destination,
            origin: self.origin,
            rotation: self.rotation,
            hp: self.hp,
            max_hp: self.max_hp,
            damage: self.damage,
            wall_target: self.wall_target,
            gold_target: self.gold_target,
            boulder_armed: self.boulder_armed,
        }
    }

    pub(crate) fn follow(&mut self, orders: UnitOrders) {
        self.state = orders.state;
        self.destination = orders.destination;
        self.wall_target = orders.wall_target;
        self.gold_target = orders.gold_target;
        self.boulder_armed = orders.boulder_armed;
    }

    /// Drops the wall lock and returns the unit to its decision phase.
    pub(crate) fn lose_wall_target(&mut self) {
        self.state = UnitState::Idle;
        self.wall_target = None;
        self.destination = None;
        self.rotation = 0.0;
    }
}

/// Registry that stores units and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct UnitRegistry {
    entries: BTreeMap<UnitId, Unit>,
    next_unit_id: UnitId,
}

impl UnitRegistry {
    /// Creates an empty unit registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_unit_id: UnitId::new(0),
        }
    }

    pub(crate) fn spawn(&mut self, spawn: UnitSpawn) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id = UnitId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(id, Unit::from_spawn(id, spawn));
        id
    }

    pub(crate) fn get(&self, unit: UnitId) -> Option<&Unit> {
        self.entries.get(&unit)
    }

    pub(crate) fn get_mut(&mut self, unit: UnitId) -> Option<&mut Unit> {
        self.entries.get_mut(&unit)
    }

    pub(crate) fn remove(&mut self, unit: UnitId) -> Option<Unit> {
        self.entries.remove(&unit)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.entries.values_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
