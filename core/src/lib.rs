#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Defend Your Bounty simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable snapshots and
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values that adapters and systems react to deterministically.

mod kinds;
pub mod tuning;

pub use glam::Vec2;
pub use kinds::{
    BuildingKind, Owner, ProjectileKind, RangedWeapon, Side, Trooper, TurretKind, UnitKind,
    UnitRole, UnitState, Volley,
};

use serde::{Deserialize, Serialize};

use crate::tuning::TILE_SIZE;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Defend your bounty!";

/// Computes the heading in degrees pointing from `from` toward `to`.
#[must_use]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x).to_degrees()
}

/// Converts a heading in degrees into a unit direction vector.
#[must_use]
pub fn heading_direction(heading: f32) -> Vec2 {
    let radians = heading.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by a single tick.
    Tick,
    /// Sets the gold available to the player.
    SetTreasury {
        /// Gold held after the command is applied.
        gold: u32,
    },
    /// Places a wall without charging the treasury, as authored by scenarios.
    PlaceWall {
        /// Cell receiving the wall.
        cell: CellCoord,
        /// Hit points assigned to the wall.
        hp: i32,
        /// Whether the wall is a passable gate.
        gate: bool,
    },
    /// Mounts a turret on an existing wall without charging the treasury.
    PlaceTurret {
        /// Variant of turret to mount.
        kind: TurretKind,
        /// Cell holding the supporting wall.
        cell: CellCoord,
        /// Ticks between two consecutive shots.
        shot_delay: u32,
    },
    /// Creates a gold pile the invaders try to plunder.
    PlaceGoldPile {
        /// Cell holding the pile.
        cell: CellCoord,
        /// Coins stored in the pile.
        coins: u32,
    },
    /// Replaces a background tile on one of the map layers.
    PaintTile {
        /// Layer that receives the tile.
        layer: TileLayer,
        /// Cell whose tile is replaced.
        cell: CellCoord,
        /// Tile identifier written into the layer.
        tile: i32,
    },
    /// Creates a new unit.
    SpawnUnit {
        /// Full description of the unit to create.
        spawn: UnitSpawn,
    },
    /// Removes a unit from the battle.
    RemoveUnit {
        /// Identifier of the unit to remove.
        unit: UnitId,
        /// Why the unit leaves the battle.
        reason: RemovalReason,
    },
    /// Replaces the decision state of a unit.
    AssignOrders {
        /// Identifier of the unit receiving the orders.
        unit: UnitId,
        /// Orders the unit follows from now on.
        orders: UnitOrders,
    },
    /// Updates the animation counter stored in a unit's rotation.
    AnimateUnit {
        /// Identifier of the animated unit.
        unit: UnitId,
        /// New rotation counter value.
        rotation: f32,
    },
    /// Applies a melee strike from a unit to the wall it targets.
    StrikeWall {
        /// Identifier of the striking unit.
        unit: UnitId,
    },
    /// Lets a unit take a single coin from the gold pile it targets.
    StealCoin {
        /// Identifier of the thieving unit.
        unit: UnitId,
    },
    /// Clears a Goliath's armed boulder after it has been thrown.
    DisarmBoulder {
        /// Identifier of the Goliath.
        unit: UnitId,
    },
    /// Stores the outcome of a steering integration step for a unit.
    MoveUnit {
        /// Identifier of the moved unit.
        unit: UnitId,
        /// Kinematic state after the integration step.
        motion: Motion,
    },
    /// Releases a turret shot along the provided heading.
    FireTurret {
        /// Identifier of the firing turret.
        turret: TurretId,
        /// Launch heading in degrees.
        heading: f32,
    },
    /// Launches a projectile from an arbitrary position.
    LaunchProjectile {
        /// Variant of projectile to launch.
        kind: ProjectileKind,
        /// Faction the projectile belongs to.
        owner: Owner,
        /// Launch position in world units.
        position: Vec2,
        /// Launch heading in degrees.
        heading: f32,
    },
    /// Moves every projectile and resolves its collisions.
    AdvanceProjectiles,
    /// Ages explosions and notices, pruning the expired ones.
    AgeEffects,
    /// Posts a notice on the notification board.
    Notify {
        /// Notice to display.
        notice: Notice,
    },
    /// Requests construction of a building at a cell.
    Build {
        /// Structure to build.
        kind: BuildingKind,
        /// Target cell.
        cell: CellCoord,
    },
    /// Requests the sale of the building occupying a cell.
    Sell {
        /// Target cell.
        cell: CellCoord,
    },
    /// Requests the repair of the wall occupying a cell.
    Repair {
        /// Target cell.
        cell: CellCoord,
    },
    /// Refunds and removes every wall and turret.
    ResetDefences,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Reports the new gold balance after a direct treasury update.
    TreasuryChanged {
        /// Gold held by the player.
        gold: u32,
    },
    /// Confirms that a unit entered the battle.
    UnitSpawned {
        /// Identifier allocated to the unit.
        unit: UnitId,
        /// Kind of the unit.
        kind: UnitKind,
        /// Faction controlling the unit.
        owner: Owner,
        /// Spawn position in world units.
        position: Vec2,
    },
    /// Confirms that a unit reached its destination.
    UnitArrived {
        /// Identifier of the unit.
        unit: UnitId,
    },
    /// Confirms that a unit left the battle.
    UnitRemoved {
        /// Identifier of the removed unit.
        unit: UnitId,
        /// Kind of the removed unit.
        kind: UnitKind,
        /// Why the unit left.
        reason: RemovalReason,
        /// Last position of the unit.
        position: Vec2,
    },
    /// Announces gold awarded for a defeated invader.
    BountyAwarded {
        /// Gold credited to the treasury.
        amount: u32,
        /// Position where the status text should float.
        position: Vec2,
    },
    /// Reports that a unit lost the wall it was targeting.
    UnitTargetLost {
        /// Identifier of the unit.
        unit: UnitId,
    },
    /// Reports that a retreating thief reached the water and boarded a dinghy.
    UnitReverted {
        /// Identifier of the unit.
        unit: UnitId,
    },
    /// Impact cue for a melee strike landing on a wall.
    WallStruck {
        /// Cell of the struck wall.
        cell: CellCoord,
        /// Hit points left after the strike.
        hp: i32,
    },
    /// Reports projectile damage applied to a wall.
    WallDamaged {
        /// Cell of the damaged wall.
        cell: CellCoord,
        /// Hit points left after the impact.
        hp: i32,
    },
    /// Reports that a wall collapsed.
    WallDestroyed {
        /// Cell of the destroyed wall.
        cell: CellCoord,
    },
    /// Reports that a turret disappeared together with its wall.
    TurretDestroyed {
        /// Identifier of the destroyed turret.
        turret: TurretId,
        /// Cell the turret occupied.
        cell: CellCoord,
    },
    /// Reports that a turret released a projectile.
    TurretFired {
        /// Identifier of the firing turret.
        turret: TurretId,
        /// Projectile released by the turret.
        projectile: ProjectileKind,
    },
    /// Reports that a projectile entered flight.
    ProjectileLaunched {
        /// Variant of the projectile.
        kind: ProjectileKind,
        /// Faction owning the projectile.
        owner: Owner,
        /// Launch position in world units.
        position: Vec2,
    },
    /// Reports that a projectile hit something and exploded.
    ProjectileImpact {
        /// Variant of the projectile.
        kind: ProjectileKind,
        /// Impact position in world units.
        position: Vec2,
    },
    /// Reports projectile damage applied to a unit.
    UnitDamaged {
        /// Identifier of the damaged unit.
        unit: UnitId,
        /// Hit points left after the impact.
        hp: i32,
    },
    /// Reports that an invader took a coin from a gold pile.
    CoinStolen {
        /// Identifier of the plundered pile.
        pile: GoldPileId,
        /// Coins left in the pile.
        coins_left: u32,
    },
    /// Reports that a notice was posted on the board.
    Notified {
        /// Posted notice.
        notice: Notice,
    },
    /// Confirms a completed construction.
    BuildingPlaced {
        /// Structure that was built.
        kind: BuildingKind,
        /// Cell holding the structure.
        cell: CellCoord,
        /// Gold charged for the construction.
        cost: u32,
    },
    /// Confirms a completed sale.
    BuildingSold {
        /// Cell whose building was sold.
        cell: CellCoord,
        /// Turret that was sold, or `None` when the wall itself was sold.
        turret: Option<TurretKind>,
        /// Gold refunded to the player.
        refund: u32,
    },
    /// Confirms a completed repair.
    WallRepaired {
        /// Cell of the repaired wall.
        cell: CellCoord,
        /// Gold charged for the repair.
        cost: u32,
    },
    /// Confirms that every wall and turret was refunded and removed.
    DefencesReset {
        /// Total gold refunded.
        refund: u32,
    },
    /// Reports that an economy action was refused.
    ActionRejected {
        /// Why the action was refused.
        reason: ActionRejection,
    },
    /// Reports that a background tile was replaced.
    TilePainted {
        /// Layer that received the tile.
        layer: TileLayer,
        /// Cell whose tile changed.
        cell: CellCoord,
        /// Tile identifier written into the layer.
        tile: i32,
    },
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a gold pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoldPileId(u32);

impl GoldPileId {
    /// Creates a new gold pile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Resolves the cell containing a world-space position.
    ///
    /// Positions left of or above the map origin have no cell.
    #[must_use]
    pub fn containing(position: Vec2) -> Option<Self> {
        if !(position.x >= 0.0 && position.y >= 0.0) {
            return None;
        }
        let column = (position.x / TILE_SIZE).floor();
        let row = (position.y / TILE_SIZE).floor();
        if column > u32::MAX as f32 || row > u32::MAX as f32 {
            return None;
        }
        Some(Self::new(column as u32, row as u32))
    }

    /// World-space position of the cell's upper-left corner.
    #[must_use]
    pub fn world_origin(self) -> Vec2 {
        Vec2::new(self.column as f32 * TILE_SIZE, self.row as f32 * TILE_SIZE)
    }

    /// World-space position of the cell's centre.
    #[must_use]
    pub fn world_center(self) -> Vec2 {
        self.world_origin() + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Background tile layers stored by every map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileLayer {
    /// Bottom layer; decides whether a cell is land or water.
    Terrain,
    /// Middle decoration layer.
    Detail,
    /// Top decoration layer.
    Overlay,
}

impl TileLayer {
    /// All layers ordered from bottom to top.
    pub const ALL: [TileLayer; 3] = [TileLayer::Terrain, TileLayer::Detail, TileLayer::Overlay];

    /// Zero-based index of the layer.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Terrain => 0,
            Self::Detail => 1,
            Self::Overlay => 2,
        }
    }
}

/// Why a unit left the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Hit points dropped to zero.
    Defeated,
    /// A carrier unloaded its landing party.
    Disembarked,
    /// A carrier sailed back to its origin.
    ReturnedHome,
    /// The map editor erased the unit.
    Erased,
}

/// Reasons an economy action may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRejection {
    /// The target cell lies outside the map.
    OutOfBounds,
    /// The target cell is water.
    WaterTile,
    /// An invader is too close to the target cell.
    EnemiesNearby,
    /// The treasury cannot cover the cost.
    InsufficientFunds,
    /// The target cell is already occupied.
    Blocked,
    /// Turrets require a wall without a turret.
    RequiresEmptyWall,
    /// Nothing at the target cell can be sold.
    NothingToSell,
    /// Nothing at the target cell can be repaired.
    NothingToRepair,
}

/// Transient messages shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notice {
    /// A new wave of carriers entered the map.
    InvasionSpotted,
    /// The Goliath's carrier is part of the wave.
    GoliathApproaches,
    /// Edric's carrier is part of the wave.
    EdricApproaches,
    /// The last wave was launched.
    FinalAssault,
    /// An invader stole a coin.
    CoinStolen,
    /// An economy action was refused.
    Rejected(ActionRejection),
}

impl Notice {
    /// Text displayed for the notice.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::InvasionSpotted => "An invasion force is spotted off the coast!",
            Self::GoliathApproaches => "That ship... the Goliath comes.",
            Self::EdricApproaches => "That ship... Edric the Swashbuckling Sorcerer comes.",
            Self::FinalAssault => "They will put everything they have on this last attack!",
            Self::CoinStolen => "A coin has been stolen!",
            Self::Rejected(reason) => match reason {
                ActionRejection::OutOfBounds => "You cannot build outside the map",
                ActionRejection::WaterTile => "Walls cannot be placed on water",
                ActionRejection::EnemiesNearby => "Cannot do that with enemies nearby",
                ActionRejection::InsufficientFunds => "You do not have enough gold",
                ActionRejection::Blocked => "Building location blocked",
                ActionRejection::RequiresEmptyWall => "You must place turrets on an empty wall",
                ActionRejection::NothingToSell => "There is nothing here to sell",
                ActionRejection::NothingToRepair => "There is nothing here to repair",
            },
        }
    }
}

/// Complete description of a unit about to be created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSpawn {
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Faction controlling the unit.
    pub owner: Owner,
    /// Initial state machine phase.
    pub state: UnitState,
    /// Spawn position in world units.
    pub position: Vec2,
    /// Initial destination, if any.
    pub destination: Option<Vec2>,
    /// Point the unit returns to when retreating.
    pub origin: Vec2,
    /// Initial hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Damage dealt per strike.
    pub damage: i32,
    /// Whether the unit holds an unthrown boulder.
    pub boulder_armed: bool,
}

impl UnitSpawn {
    /// Describes an invading carrier that sails from `position` toward `destination`.
    #[must_use]
    pub const fn carrier(kind: UnitKind, position: Vec2, destination: Option<Vec2>) -> Self {
        Self {
            kind,
            owner: Owner::Invader,
            state: UnitState::Walking,
            position,
            destination,
            origin: position,
            hp: tuning::CARRIER_HP,
            max_hp: tuning::CARRIER_HP,
            damage: 0,
            boulder_armed: false,
        }
    }

    /// Describes an idle trooper unloaded at `position`.
    #[must_use]
    pub const fn trooper(trooper: &Trooper, position: Vec2, origin: Vec2) -> Self {
        Self {
            kind: trooper.kind,
            owner: Owner::Invader,
            state: UnitState::Idle,
            position,
            destination: None,
            origin,
            hp: trooper.hp,
            max_hp: trooper.hp,
            damage: trooper.damage,
            boulder_armed: trooper.boulder_armed,
        }
    }
}

/// Decision state assigned to a unit by the AI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitOrders {
    /// State machine phase.
    pub state: UnitState,
    /// Destination the steering engine seeks, if any.
    pub destination: Option<Vec2>,
    /// Wall the unit attacks or bombards.
    pub wall_target: Option<CellCoord>,
    /// Gold pile the unit plunders.
    pub gold_target: Option<GoldPileId>,
    /// Whether the unit holds an unthrown boulder.
    pub boulder_armed: bool,
}

impl UnitOrders {
    /// Captures the orders a unit currently follows.
    #[must_use]
    pub const fn from_snapshot(snapshot: &UnitSnapshot) -> Self {
        Self {
            state: snapshot.state,
            destination: snapshot.destination,
            wall_target: snapshot.wall_target,
            gold_target: snapshot.gold_target,
            boulder_armed: snapshot.boulder_armed,
        }
    }
}

/// Kinematic state produced by a steering integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Position after the step.
    pub position: Vec2,
    /// Velocity after the step.
    pub velocity: Vec2,
    /// Steering force applied during the step.
    pub force: Vec2,
    /// Rotation after the step.
    pub rotation: f32,
    /// Whether the unit reached its destination during the step.
    pub arrived: bool,
}

/// Read-only snapshot describing a unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Identifier allocated by the world.
    pub id: UnitId,
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Faction controlling the unit.
    pub owner: Owner,
    /// State machine phase.
    pub state: UnitState,
    /// Position in world units.
    pub position: Vec2,
    /// Velocity in world units per tick.
    pub velocity: Vec2,
    /// Steering force applied on the previous tick.
    pub force: Vec2,
    /// Destination the unit seeks, if any.
    pub destination: Option<Vec2>,
    /// Point the unit returns to when retreating.
    pub origin: Vec2,
    /// Heading for carriers, animation counter for land units.
    pub rotation: f32,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Damage dealt per strike.
    pub damage: i32,
    /// Wall the unit attacks or bombards.
    pub wall_target: Option<CellCoord>,
    /// Gold pile the unit plunders.
    pub gold_target: Option<GoldPileId>,
    /// Whether the unit holds an unthrown boulder.
    pub boulder_armed: bool,
}

impl UnitSnapshot {
    /// Rotation adapters should draw the unit with.
    ///
    /// Carriers face their velocity; land units sway with their animation counter.
    #[must_use]
    pub fn display_rotation(&self) -> f32 {
        if self.kind.is_carrier() {
            self.rotation
        } else {
            self.rotation.sin() * 16.0
        }
    }
}

/// Read-only view of every unit, sorted by identifier.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new view from the provided snapshots, sorting them by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterates over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Retrieves the snapshot of a specific unit.
    #[must_use]
    pub fn get(&self, unit: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots
            .binary_search_by_key(&unit, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of units captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing a turret.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretSnapshot {
    /// Identifier allocated by the world.
    pub id: TurretId,
    /// Variant of the turret.
    pub kind: TurretKind,
    /// Cell holding the supporting wall.
    pub cell: CellCoord,
    /// Fire-rate timer incremented every tick.
    pub timer: u32,
    /// Current aim in degrees.
    pub rotation: f32,
    /// Ticks between two consecutive shots.
    pub shot_delay: u32,
}

/// Read-only view of every turret, sorted by identifier.
#[derive(Clone, Debug, Default)]
pub struct TurretView {
    snapshots: Vec<TurretSnapshot>,
}

impl TurretView {
    /// Creates a new view from the provided snapshots, sorting them by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterates over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &TurretSnapshot> {
        self.snapshots.iter()
    }

    /// Retrieves the snapshot of a specific turret.
    #[must_use]
    pub fn get(&self, turret: TurretId) -> Option<&TurretSnapshot> {
        self.snapshots
            .binary_search_by_key(&turret, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Reports whether the view captured no turrets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TurretSnapshot> {
        self.snapshots
    }
}

/// Target acquired by a turret for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretTarget {
    /// Turret that acquired the target.
    pub turret: TurretId,
    /// Unit selected as target.
    pub unit: UnitId,
    /// Position of the turret's cell origin.
    pub turret_position: Vec2,
    /// Position of the targeted unit.
    pub unit_position: Vec2,
    /// Distance between the turret and the unit.
    pub distance: f32,
}

/// Read-only snapshot describing an active wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSnapshot {
    /// Cell holding the wall.
    pub cell: CellCoord,
    /// Current hit points.
    pub hp: i32,
    /// Whether the wall is a passable gate.
    pub gate: bool,
    /// Sprite code derived from the neighbouring walls.
    pub adjacency: u8,
}

/// Read-only snapshot describing a gold pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoldPileSnapshot {
    /// Identifier allocated by the world.
    pub id: GoldPileId,
    /// Cell holding the pile.
    pub cell: CellCoord,
    /// Coins left in the pile.
    pub coins: u32,
}

/// Read-only snapshot describing a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Variant of the projectile.
    pub kind: ProjectileKind,
    /// Faction owning the projectile.
    pub owner: Owner,
    /// Position in world units.
    pub position: Vec2,
    /// Flight heading in degrees.
    pub heading: f32,
    /// Ticks spent in flight.
    pub age: u32,
}

/// Read-only snapshot describing an explosion effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionSnapshot {
    /// Centre of the explosion in world units.
    pub position: Vec2,
    /// Scale applied to the explosion sprite.
    pub scale: f32,
    /// Animation frame currently shown.
    pub frame: u32,
}
