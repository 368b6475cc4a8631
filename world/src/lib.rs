#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Defend Your Bounty.
//!
//! The world owns the battle map, its walls, turrets, units, projectiles and
//! gold piles. It only changes through [`apply`], which executes a single
//! [`Command`] and reports the consequences as [`Event`] values. Systems read
//! the state through the [`query`] module.

mod combat;
mod economy;
pub mod format;
mod grid;
mod notices;
mod turrets;
mod units;

use bounty_core::{
    tuning::{TILE_SIZE, WATER_TILE},
    BuildingKind, CellCoord, Command, Event, GoldPileId, Motion, Notice, Owner, RemovalReason,
    TurretKind, UnitId, UnitKind, UnitSpawn, UnitState, Vec2, WELCOME_BANNER,
};
use tracing::{debug, info, warn};

use crate::{
    combat::{Explosion, Projectile},
    format::{MapAsset, MapFormatError},
    grid::{TileLayers, WallGrid},
    notices::NoticeBoard,
    turrets::TurretRegistry,
    units::UnitRegistry,
};

/// Pile of coins the invaders try to plunder.
#[derive(Clone, Copy, Debug)]
struct GoldPile {
    id: GoldPileId,
    cell: CellCoord,
    coins: u32,
}

/// Represents the authoritative Defend Your Bounty world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tiles: TileLayers,
    walls: WallGrid,
    units: UnitRegistry,
    turrets: TurretRegistry,
    projectiles: Vec<Projectile>,
    explosions: Vec<Explosion>,
    gold_piles: Vec<GoldPile>,
    treasury: u32,
    notices: NoticeBoard,
    tick_index: u64,
}

impl World {
    /// Creates an empty world of open water with the provided dimensions in tiles.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self::with_tiles(TileLayers::filled(columns, rows, WATER_TILE))
    }

    /// Builds a world from a parsed map asset.
    ///
    /// Units stored in the asset enter the battle idle; walls keep their
    /// recorded hit points.
    pub fn from_asset(asset: &MapAsset) -> Result<Self, MapFormatError> {
        asset.validate()?;
        let mut world = Self::with_tiles(TileLayers::from_layers(
            asset.columns,
            asset.rows,
            asset.layers.clone(),
        ));

        for record in &asset.walls {
            if let Some(wall) = world.walls.get_mut(record.cell) {
                wall.active = true;
                wall.gate = false;
                wall.hp = record.hp;
            }
        }
        world.walls.recompute_adjacency();

        for record in &asset.units {
            let _ = world.units.spawn(UnitSpawn {
                kind: record.kind,
                owner: record.owner,
                state: UnitState::Idle,
                position: record.position,
                destination: None,
                origin: record.position,
                hp: record.hp,
                max_hp: record.max_hp,
                damage: garrison_damage(record.kind),
                boulder_armed: false,
            });
        }

        debug!(
            columns = asset.columns,
            rows = asset.rows,
            units = asset.units.len(),
            walls = asset.walls.len(),
            "world loaded from map asset"
        );
        Ok(world)
    }

    fn with_tiles(tiles: TileLayers) -> Self {
        let walls = WallGrid::new(tiles.columns(), tiles.rows());
        Self {
            banner: WELCOME_BANNER,
            tiles,
            walls,
            units: UnitRegistry::new(),
            turrets: TurretRegistry::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            gold_piles: Vec::new(),
            treasury: 0,
            notices: NoticeBoard::default(),
            tick_index: 0,
        }
    }

    /// Extent of the map in world units.
    pub(crate) fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.tiles.columns() as f32 * TILE_SIZE,
            self.tiles.rows() as f32 * TILE_SIZE,
        )
    }

    pub(crate) fn post_notice(&mut self, notice: Notice, out_events: &mut Vec<Event>) {
        if self.notices.post(notice) {
            out_events.push(Event::Notified { notice });
        }
    }

    fn place_wall(&mut self, cell: CellCoord, hp: i32, gate: bool, out_events: &mut Vec<Event>) {
        let Some(wall) = self.walls.get_mut(cell) else {
            warn!(?cell, "preset wall lies outside the map");
            return;
        };
        wall.active = true;
        wall.gate = gate;
        wall.hp = hp;
        self.walls.recompute_adjacency();
        let kind = if gate {
            BuildingKind::Gate
        } else {
            BuildingKind::Wall
        };
        out_events.push(Event::BuildingPlaced { kind, cell, cost: 0 });
    }

    fn place_turret(
        &mut self,
        kind: TurretKind,
        cell: CellCoord,
        shot_delay: u32,
        out_events: &mut Vec<Event>,
    ) {
        let supported = self
            .walls
            .get(cell)
            .is_some_and(|wall| wall.active && !wall.gate);
        if !supported {
            warn!(?cell, ?kind, "preset turret has no wall to stand on");
            return;
        }
        if self.turrets.insert(kind, cell, shot_delay.max(1)).is_some() {
            out_events.push(Event::BuildingPlaced {
                kind: BuildingKind::Turret(kind),
                cell,
                cost: 0,
            });
        }
    }

    fn place_gold_pile(&mut self, cell: CellCoord, coins: u32) {
        let id = GoldPileId::new(u32::try_from(self.gold_piles.len()).unwrap_or(u32::MAX));
        self.gold_piles.push(GoldPile { id, cell, coins });
    }

    fn remove_unit(&mut self, unit: UnitId, reason: RemovalReason, out_events: &mut Vec<Event>) {
        let Some(removed) = self.units.remove(unit) else {
            return;
        };

        if reason == RemovalReason::Defeated && removed.owner == Owner::Invader {
            let amount = removed.kind.bounty();
            self.award_bounty(amount);
            out_events.push(Event::BountyAwarded {
                amount,
                position: removed.position,
            });
        }
        debug!(unit = unit.get(), kind = ?removed.kind, ?reason, "unit removed");
        out_events.push(Event::UnitRemoved {
            unit,
            kind: removed.kind,
            reason,
            position: removed.position,
        });
    }

    fn strike_wall(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        let Some((cell, damage)) = self
            .units
            .get(unit)
            .and_then(|striker| striker.wall_target.map(|cell| (cell, striker.damage)))
        else {
            return;
        };

        match self.damage_wall(cell, damage) {
            Some(hp) => {
                out_events.push(Event::WallStruck { cell, hp });
                if hp <= 0 {
                    self.collapse_wall(cell, out_events);
                }
            }
            None => {
                if let Some(striker) = self.units.get_mut(unit) {
                    striker.lose_wall_target();
                    out_events.push(Event::UnitTargetLost { unit });
                }
            }
        }
    }

    fn steal_coin(&mut self, unit: UnitId, out_events: &mut Vec<Event>) {
        let Some(thief) = self.units.get_mut(unit) else {
            return;
        };
        let Some(pile_id) = thief.gold_target else {
            return;
        };
        let Some(pile) = self
            .gold_piles
            .get_mut(pile_id.get() as usize)
            .filter(|pile| pile.coins > 0)
        else {
            thief.gold_target = None;
            thief.state = UnitState::Idle;
            thief.destination = None;
            return;
        };

        pile.coins -= 1;
        thief.state = UnitState::Retreating;
        thief.destination = Some(thief.origin);
        thief.gold_target = None;
        let coins_left = pile.coins;

        info!(unit = unit.get(), pile = pile_id.get(), coins_left, "coin stolen");
        out_events.push(Event::CoinStolen {
            pile: pile_id,
            coins_left,
        });
        self.post_notice(Notice::CoinStolen, out_events);
    }

    fn move_unit(&mut self, unit: UnitId, motion: Motion, out_events: &mut Vec<Event>) {
        let on_water = query::is_water(self, motion.position);
        let Some(mover) = self.units.get_mut(unit) else {
            return;
        };

        mover.position = motion.position;
        mover.velocity = motion.velocity;
        mover.force = motion.force;
        mover.rotation = motion.rotation;

        if mover.state == UnitState::Retreating && mover.kind != UnitKind::Dinghy && on_water {
            mover.kind = UnitKind::Dinghy;
            debug!(unit = unit.get(), "retreating unit boarded a dinghy");
            out_events.push(Event::UnitReverted { unit });
        }

        if motion.arrived && mover.destination.is_some() {
            mover.velocity = Vec2::ZERO;
            mover.force = Vec2::ZERO;
            mover.destination = None;
            out_events.push(Event::UnitArrived { unit });
        }
    }
}

/// Damage dealt by a unit placed directly on the map, taken from the first
/// landing party that carries its kind.
fn garrison_damage(kind: UnitKind) -> i32 {
    (0..)
        .map_while(UnitKind::from_id)
        .flat_map(|carrier| carrier.landing_party().iter())
        .find(|trooper| trooper.kind == kind)
        .map_or(0, |trooper| trooper.damage)
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            for turret in world.turrets.iter_mut() {
                turret.timer = turret.timer.wrapping_add(1);
            }
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SetTreasury { gold } => {
            world.treasury = gold;
            out_events.push(Event::TreasuryChanged { gold });
        }
        Command::PlaceWall { cell, hp, gate } => world.place_wall(cell, hp, gate, out_events),
        Command::PlaceTurret {
            kind,
            cell,
            shot_delay,
        } => world.place_turret(kind, cell, shot_delay, out_events),
        Command::PlaceGoldPile { cell, coins } => world.place_gold_pile(cell, coins),
        Command::PaintTile { layer, cell, tile } => {
            if world.tiles.set_tile(layer, cell, tile) {
                out_events.push(Event::TilePainted { layer, cell, tile });
            }
        }
        Command::SpawnUnit { spawn } => {
            let unit = world.units.spawn(spawn);
            debug!(unit = unit.get(), kind = ?spawn.kind, owner = ?spawn.owner, "unit spawned");
            out_events.push(Event::UnitSpawned {
                unit,
                kind: spawn.kind,
                owner: spawn.owner,
                position: spawn.position,
            });
        }
        Command::RemoveUnit { unit, reason } => world.remove_unit(unit, reason, out_events),
        Command::AssignOrders { unit, orders } => {
            let fallen = orders
                .wall_target
                .is_some_and(|cell| !world.walls.is_active(cell));
            if let Some(unit) = world.units.get_mut(unit) {
                unit.follow(orders);
                if fallen {
                    unit.lose_wall_target();
                    out_events.push(Event::UnitTargetLost { unit: unit.id });
                }
            }
        }
        Command::AnimateUnit { unit, rotation } => {
            if let Some(unit) = world.units.get_mut(unit) {
                unit.rotation = rotation;
            }
        }
        Command::StrikeWall { unit } => world.strike_wall(unit, out_events),
        Command::StealCoin { unit } => world.steal_coin(unit, out_events),
        Command::DisarmBoulder { unit } => {
            if let Some(unit) = world.units.get_mut(unit) {
                unit.boulder_armed = false;
            }
        }
        Command::MoveUnit { unit, motion } => world.move_unit(unit, motion, out_events),
        Command::FireTurret { turret, heading } => world.fire_turret(turret, heading, out_events),
        Command::LaunchProjectile {
            kind,
            owner,
            position,
            heading,
        } => world.launch_projectile(kind, owner, position, heading, out_events),
        Command::AdvanceProjectiles => world.advance_projectiles(out_events),
        Command::AgeEffects => world.age_effects(),
        Command::Notify { notice } => world.post_notice(notice, out_events),
        Command::Build { kind, cell } => world.build(kind, cell, out_events),
        Command::Sell { cell } => world.sell(cell, out_events),
        Command::Repair { cell } => world.repair(cell, out_events),
        Command::ResetDefences => world.reset_defences(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use bounty_core::{
        CellCoord, ExplosionSnapshot, GoldPileId, GoldPileSnapshot, Notice, Owner,
        ProjectileSnapshot, TileLayer, TurretSnapshot, TurretView, UnitId, UnitSnapshot,
        UnitView, Vec2, WallSnapshot,
    };
    use rand::Rng;

    use super::World;
    use crate::format::{MapAsset, UnitRecord, WallRecord};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of tile columns in the map.
    #[must_use]
    pub fn columns(world: &World) -> u32 {
        world.tiles.columns()
    }

    /// Number of tile rows in the map.
    #[must_use]
    pub fn rows(world: &World) -> u32 {
        world.tiles.rows()
    }

    /// Extent of the map in world units.
    #[must_use]
    pub fn world_size(world: &World) -> Vec2 {
        world.world_size()
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Gold currently held by the player.
    #[must_use]
    pub fn treasury(world: &World) -> u32 {
        world.treasury
    }

    /// Tile stored at `cell` on the provided layer.
    #[must_use]
    pub fn tile(world: &World, layer: TileLayer, cell: CellCoord) -> Option<i32> {
        world.tiles.tile(layer, cell)
    }

    /// Reports whether a world-space position lies on water.
    ///
    /// Everything beyond the map edges counts as open sea.
    #[must_use]
    pub fn is_water(world: &World, position: Vec2) -> bool {
        match CellCoord::containing(position) {
            Some(cell) => {
                world.tiles.tile(TileLayer::Terrain, cell).is_none()
                    || world.tiles.is_water(cell)
            }
            None => true,
        }
    }

    /// Snapshot of the active wall at `cell`, if one stands there.
    #[must_use]
    pub fn wall(world: &World, cell: CellCoord) -> Option<WallSnapshot> {
        world
            .walls
            .get(cell)
            .filter(|wall| wall.active)
            .map(|wall| WallSnapshot {
                cell,
                hp: wall.hp,
                gate: wall.gate,
                adjacency: wall.adjacency,
            })
    }

    /// Snapshots of every active wall, column by column.
    #[must_use]
    pub fn walls(world: &World) -> Vec<WallSnapshot> {
        world
            .walls
            .iter_active()
            .map(|(cell, wall)| WallSnapshot {
                cell,
                hp: wall.hp,
                gate: wall.gate,
                adjacency: wall.adjacency,
            })
            .collect()
    }

    /// Origins of the walls that push units away; gates let units through.
    #[must_use]
    pub fn repelling_walls(world: &World) -> Vec<Vec2> {
        world
            .walls
            .iter_active()
            .filter(|(_, wall)| !wall.gate)
            .map(|(cell, _)| cell.world_origin())
            .collect()
    }

    /// Captures a read-only view of every unit on the map.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(world.units.iter().map(|unit| unit.snapshot()).collect())
    }

    /// Snapshot of a single unit.
    #[must_use]
    pub fn unit(world: &World, unit: UnitId) -> Option<UnitSnapshot> {
        world.units.get(unit).map(|unit| unit.snapshot())
    }

    /// Reports whether any unit remains on the map.
    #[must_use]
    pub fn has_units(world: &World) -> bool {
        !world.units.is_empty()
    }

    /// Captures a read-only view of every turret.
    #[must_use]
    pub fn turret_view(world: &World) -> TurretView {
        TurretView::from_snapshots(
            world
                .turrets
                .iter()
                .map(|turret| turret.snapshot())
                .collect(),
        )
    }

    /// Snapshot of the turret mounted at `cell`.
    #[must_use]
    pub fn turret_at(world: &World, cell: CellCoord) -> Option<TurretSnapshot> {
        world.turrets.at(cell).map(|turret| turret.snapshot())
    }

    /// Reports whether any turret still defends the map.
    #[must_use]
    pub fn has_turrets(world: &World) -> bool {
        !world.turrets.is_empty()
    }

    /// Snapshots of every gold pile in identifier order.
    #[must_use]
    pub fn gold_piles(world: &World) -> Vec<GoldPileSnapshot> {
        world
            .gold_piles
            .iter()
            .map(|pile| GoldPileSnapshot {
                id: pile.id,
                cell: pile.cell,
                coins: pile.coins,
            })
            .collect()
    }

    /// Snapshot of a single gold pile.
    #[must_use]
    pub fn gold_pile(world: &World, pile: GoldPileId) -> Option<GoldPileSnapshot> {
        world
            .gold_piles
            .get(pile.get() as usize)
            .map(|pile| GoldPileSnapshot {
                id: pile.id,
                cell: pile.cell,
                coins: pile.coins,
            })
    }

    /// Snapshots of the projectiles in flight, oldest launch first.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Snapshots of the running explosion effects.
    #[must_use]
    pub fn explosions(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .explosions
            .iter()
            .map(|explosion| explosion.snapshot())
            .collect()
    }

    /// Notice currently shown on the notification board.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ActiveNotice {
        /// Displayed notice.
        pub notice: Notice,
        /// Ticks left before the notice fades out.
        pub remaining: u32,
    }

    /// Notices currently shown, oldest first.
    #[must_use]
    pub fn notices(world: &World) -> Vec<ActiveNotice> {
        world
            .notices
            .iter()
            .map(|(notice, remaining)| ActiveNotice { notice, remaining })
            .collect()
    }

    /// Counts invaders strictly closer than `radius` to `position`.
    #[must_use]
    pub fn hostiles_within(world: &World, position: Vec2, radius: f32) -> usize {
        world
            .units
            .iter()
            .filter(|unit| unit.owner == Owner::Invader && unit.position.distance(position) < radius)
            .count()
    }

    /// Wall selected by a closest-wall query.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct WallTarget {
        /// Cell holding the wall.
        pub cell: CellCoord,
        /// Origin of the wall in world units.
        pub position: Vec2,
        /// Distance from the query origin.
        pub distance: f32,
    }

    /// Unit selected by a closest-enemy query.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemyTarget {
        /// Identifier of the unit.
        pub unit: UnitId,
        /// Position of the unit.
        pub position: Vec2,
        /// Distance from the query origin.
        pub distance: f32,
    }

    /// Gold pile selected by a closest-gold query.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct GoldTarget {
        /// Identifier of the pile.
        pub pile: GoldPileId,
        /// Origin of the pile's cell in world units.
        pub position: Vec2,
        /// Distance from the query origin.
        pub distance: f32,
    }

    /// Closest active wall to `origin`.
    #[must_use]
    pub fn closest_wall(world: &World, origin: Vec2) -> Option<WallTarget> {
        nearest(wall_candidates(world), origin, || false).map(wall_target)
    }

    /// Closest-wall scan that skips each closer candidate with probability one half.
    ///
    /// May return `None` even when walls stand.
    pub fn closest_wall_noisy<R: Rng>(
        world: &World,
        origin: Vec2,
        rng: &mut R,
    ) -> Option<WallTarget> {
        nearest(wall_candidates(world), origin, || rng.gen_bool(0.5)).map(wall_target)
    }

    /// Closest unit owned by `faction`.
    #[must_use]
    pub fn closest_enemy(world: &World, origin: Vec2, faction: Owner) -> Option<EnemyTarget> {
        let candidates = world
            .units
            .iter()
            .filter(|unit| unit.owner == faction)
            .map(|unit| (unit.id, unit.position));
        nearest(candidates, origin, || false).map(|(unit, position, distance)| EnemyTarget {
            unit,
            position,
            distance,
        })
    }

    /// Closest gold pile to `origin`, depleted or not.
    #[must_use]
    pub fn closest_gold_pile(world: &World, origin: Vec2) -> Option<GoldTarget> {
        let candidates = world
            .gold_piles
            .iter()
            .map(|pile| (pile.id, pile.cell.world_origin()));
        nearest(candidates, origin, || false).map(|(pile, position, distance)| GoldTarget {
            pile,
            position,
            distance,
        })
    }

    /// Origin of the land cell closest to `origin`.
    #[must_use]
    pub fn closest_land(world: &World, origin: Vec2) -> Option<Vec2> {
        nearest(land_candidates(world), origin, || false).map(|(_, position, _)| position)
    }

    /// Closest-land scan that skips each closer candidate with probability one half.
    pub fn closest_land_noisy<R: Rng>(world: &World, origin: Vec2, rng: &mut R) -> Option<Vec2> {
        nearest(land_candidates(world), origin, || rng.gen_bool(0.5))
            .map(|(_, position, _)| position)
    }

    /// Exports the map, its units and its walls as an asset.
    #[must_use]
    pub fn to_asset(world: &World) -> MapAsset {
        let layers = TileLayer::ALL.map(|layer| world.tiles.layer(layer).to_vec());
        MapAsset {
            columns: world.tiles.columns(),
            rows: world.tiles.rows(),
            layers,
            units: world
                .units
                .iter()
                .map(|unit| UnitRecord {
                    position: unit.position,
                    hp: unit.hp,
                    max_hp: unit.max_hp,
                    kind: unit.kind,
                    owner: unit.owner,
                })
                .collect(),
            walls: world
                .walls
                .iter_active()
                .map(|(cell, wall)| WallRecord { cell, hp: wall.hp })
                .collect(),
        }
    }

    fn wall_candidates(world: &World) -> impl Iterator<Item = (CellCoord, Vec2)> + '_ {
        world
            .walls
            .iter_active()
            .map(|(cell, _)| (cell, cell.world_origin()))
    }

    fn land_candidates(world: &World) -> impl Iterator<Item = ((), Vec2)> + '_ {
        world
            .tiles
            .land_cells()
            .map(|cell| ((), cell.world_origin()))
    }

    fn wall_target((cell, position, distance): (CellCoord, Vec2, f32)) -> WallTarget {
        WallTarget {
            cell,
            position,
            distance,
        }
    }

    /// Linear scan keeping the strictly closest candidate.
    ///
    /// `skip` is consulted only for candidates that would improve the match.
    fn nearest<T>(
        candidates: impl Iterator<Item = (T, Vec2)>,
        origin: Vec2,
        mut skip: impl FnMut() -> bool,
    ) -> Option<(T, Vec2, f32)> {
        let mut best: Option<(T, Vec2, f32)> = None;
        for (item, position) in candidates {
            let distance = origin.distance(position);
            let closer = best.as_ref().map_or(true, |(_, _, best)| distance < *best);
            if closer && !skip() {
                best = Some((item, position, distance));
            }
        }
        best
    }
}
