//! Tagged kinds describing units, turrets, projectiles and buildings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::{
    CANNON_DAMAGE, EDRIC_BOUNTY, GATE_COST, GOLD_BOUNTY, GOLIATH_BOUNTY, INSTANT_KILL_DAMAGE,
    WALL_COST,
};

/// Faction that controls a unit or a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// The defending player.
    Player,
    /// The invading raiders.
    Invader,
    /// Units that belong to nobody.
    Neutral,
}

impl Owner {
    /// Resolves an owner from its numeric identifier in the map asset format.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Self::Player),
            1 => Some(Self::Invader),
            2 => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Numeric identifier used by the map asset format.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Player => 0,
            Self::Invader => 1,
            Self::Neutral => 2,
        }
    }
}

/// Behavioural role shared by a family of unit kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitRole {
    /// Seaborne unit that ferries a landing party to shore.
    Carrier,
    /// Land unit that attacks walls and steals gold at close quarters.
    Melee,
    /// Land unit that bombards walls from a distance.
    Ranged,
    /// Unit without any behaviour of its own.
    Inert,
}

/// Every unit variant known to the simulation, in asset identifier order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitKind {
    /// Small boat carrying footsoldiers; also the shape of retreating thieves.
    Dinghy,
    /// Carrier loaded with elite troops.
    EliteShip,
    /// Carrier loaded with mages.
    MageShip,
    /// Carrier loaded with stonethrowers.
    StonethrowerShip,
    /// Large carrier with a mixed landing party.
    RushShip,
    /// Carrier bringing the Goliath ashore.
    GoliathShip,
    /// Carrier bringing Edric ashore.
    EdricShip,
    /// Basic melee raider.
    Footsoldier,
    /// Ranged raider hurling stones.
    Stonethrower,
    /// Armoured melee raider.
    Elite,
    /// Ranged raider casting fireballs.
    Mage,
    /// Boss that throws a boulder on approach and smashes walls.
    Goliath,
    /// Boss sorcerer that casts three fireballs per volley.
    Edric,
    /// Inert field cannon kept for asset compatibility.
    Cannon,
    /// Final boss.
    UltimateBoss,
    /// Carrier bringing the final boss ashore.
    UltimateBossShip,
}

const ALL_UNIT_KINDS: [UnitKind; 16] = [
    UnitKind::Dinghy,
    UnitKind::EliteShip,
    UnitKind::MageShip,
    UnitKind::StonethrowerShip,
    UnitKind::RushShip,
    UnitKind::GoliathShip,
    UnitKind::EdricShip,
    UnitKind::Footsoldier,
    UnitKind::Stonethrower,
    UnitKind::Elite,
    UnitKind::Mage,
    UnitKind::Goliath,
    UnitKind::Edric,
    UnitKind::Cannon,
    UnitKind::UltimateBoss,
    UnitKind::UltimateBossShip,
];

const FOOTSOLDIER_HP: i32 = 4;
const FOOTSOLDIER_DAMAGE: i32 = 2;

const DINGHY_PARTY: [Trooper; 1] = [Trooper::squad(UnitKind::Footsoldier, FOOTSOLDIER_HP, FOOTSOLDIER_DAMAGE, 3)];
const RUSH_PARTY: [Trooper; 4] = [
    Trooper::squad(UnitKind::Footsoldier, FOOTSOLDIER_HP, FOOTSOLDIER_DAMAGE, 8),
    Trooper::squad(UnitKind::Elite, 6, 4, 1),
    Trooper::squad(UnitKind::Mage, 6, 4, 1),
    Trooper::squad(UnitKind::Stonethrower, 6, 4, 1),
];
const MAGE_PARTY: [Trooper; 2] = [
    Trooper::squad(UnitKind::Footsoldier, FOOTSOLDIER_HP, FOOTSOLDIER_DAMAGE, 2),
    Trooper::squad(UnitKind::Mage, 5, FOOTSOLDIER_DAMAGE, 3),
];
const STONETHROWER_PARTY: [Trooper; 2] = [
    Trooper::squad(UnitKind::Footsoldier, FOOTSOLDIER_HP, FOOTSOLDIER_DAMAGE, 2),
    Trooper::squad(UnitKind::Stonethrower, 5, FOOTSOLDIER_DAMAGE, 3),
];
const ELITE_PARTY: [Trooper; 2] = [
    Trooper::squad(UnitKind::Footsoldier, FOOTSOLDIER_HP, FOOTSOLDIER_DAMAGE, 1),
    Trooper::squad(UnitKind::Elite, 6, FOOTSOLDIER_DAMAGE, 3),
];
const GOLIATH_PARTY: [Trooper; 1] = [Trooper::champion(UnitKind::Goliath, 60, 3, true)];
const EDRIC_PARTY: [Trooper; 1] = [Trooper::champion(UnitKind::Edric, 55, 20, false)];
const ULTIMATE_BOSS_PARTY: [Trooper; 1] = [Trooper::champion(UnitKind::UltimateBoss, 1000, 30, false)];

impl UnitKind {
    /// Resolves a unit kind from its numeric identifier in the map asset format.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        let index = usize::try_from(id).ok()?;
        ALL_UNIT_KINDS.get(index).copied()
    }

    /// Numeric identifier used by the map asset format and wave scripts.
    #[must_use]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Behavioural role of the unit kind.
    #[must_use]
    pub const fn role(self) -> UnitRole {
        match self {
            Self::Dinghy
            | Self::EliteShip
            | Self::MageShip
            | Self::StonethrowerShip
            | Self::RushShip
            | Self::GoliathShip
            | Self::EdricShip
            | Self::UltimateBossShip => UnitRole::Carrier,
            Self::Footsoldier | Self::Elite | Self::Goliath | Self::UltimateBoss => UnitRole::Melee,
            Self::Stonethrower | Self::Mage | Self::Edric => UnitRole::Ranged,
            Self::Cannon => UnitRole::Inert,
        }
    }

    /// Reports whether the kind travels over water.
    #[must_use]
    pub const fn is_carrier(self) -> bool {
        matches!(self.role(), UnitRole::Carrier)
    }

    /// Reports whether the kind always targets walls even when gold lies closer.
    #[must_use]
    pub const fn prefers_walls(self) -> bool {
        matches!(
            self,
            Self::Goliath | Self::Mage | Self::Stonethrower | Self::Edric
        )
    }

    /// Gold awarded to the player when a unit of this kind is defeated.
    #[must_use]
    pub const fn bounty(self) -> u32 {
        match self {
            Self::Goliath => GOLIATH_BOUNTY,
            Self::Edric => EDRIC_BOUNTY,
            _ => GOLD_BOUNTY,
        }
    }

    /// Ranged weapon carried by the kind, if any.
    #[must_use]
    pub const fn weapon(self) -> Option<RangedWeapon> {
        match self {
            Self::Mage => Some(RangedWeapon {
                range: 380.0,
                counter_step: 0.098,
                projectile: ProjectileKind::Fireball,
                volley: Volley::Single,
            }),
            Self::Stonethrower => Some(RangedWeapon {
                range: 350.0,
                counter_step: 0.17,
                projectile: ProjectileKind::Stone,
                volley: Volley::Single,
            }),
            Self::Edric => Some(RangedWeapon {
                range: 500.0,
                counter_step: 0.098,
                projectile: ProjectileKind::Fireball,
                volley: Volley::Triple,
            }),
            _ => None,
        }
    }

    /// Troops unloaded when a carrier of this kind disembarks.
    ///
    /// Non-carrier kinds return an empty slice.
    #[must_use]
    pub fn landing_party(self) -> &'static [Trooper] {
        match self {
            Self::Dinghy => &DINGHY_PARTY,
            Self::RushShip => &RUSH_PARTY,
            Self::MageShip => &MAGE_PARTY,
            Self::StonethrowerShip => &STONETHROWER_PARTY,
            Self::EliteShip => &ELITE_PARTY,
            Self::GoliathShip => &GOLIATH_PARTY,
            Self::EdricShip => &EDRIC_PARTY,
            Self::UltimateBossShip => &ULTIMATE_BOSS_PARTY,
            _ => &[],
        }
    }

    /// Size of the sprite box used for projectile hit tests.
    #[must_use]
    pub fn body_size(self) -> Vec2 {
        match self {
            Self::Goliath => Vec2::new(96.0, 96.0),
            Self::UltimateBoss => Vec2::new(128.0, 128.0),
            Self::Edric => Vec2::new(40.0, 56.0),
            kind if kind.is_carrier() => Vec2::new(48.0, 80.0),
            _ => Vec2::new(32.0, 40.0),
        }
    }
}

/// Describes a group of identical troops in a landing party.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trooper {
    /// Kind of the spawned troops.
    pub kind: UnitKind,
    /// Hit points of each trooper.
    pub hp: i32,
    /// Damage dealt by each trooper per strike.
    pub damage: i32,
    /// Number of troops in the group.
    pub count: u32,
    /// Whether troops land scattered around the drop point.
    pub scatter: bool,
    /// Whether troops land with their boulder armed.
    pub boulder_armed: bool,
}

impl Trooper {
    const fn squad(kind: UnitKind, hp: i32, damage: i32, count: u32) -> Self {
        Self {
            kind,
            hp,
            damage,
            count,
            scatter: true,
            boulder_armed: false,
        }
    }

    const fn champion(kind: UnitKind, hp: i32, damage: i32, boulder_armed: bool) -> Self {
        Self {
            kind,
            hp,
            damage,
            count: 1,
            scatter: false,
            boulder_armed,
        }
    }
}

/// Number of projectiles a ranged unit releases per volley.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Volley {
    /// One projectile aimed at the target wall.
    Single,
    /// One projectile at the target wall plus two at nearby walls.
    Triple,
}

/// Parameters of a ranged unit's weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangedWeapon {
    /// Distance from the wall at which the unit takes position.
    pub range: f32,
    /// Counter increment applied per tick while ranging.
    pub counter_step: f32,
    /// Projectile released by the weapon.
    pub projectile: ProjectileKind,
    /// Volley pattern released at the counter threshold.
    pub volley: Volley,
}

/// Unit state machine phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// Waiting for a target decision.
    Idle,
    /// Travelling toward a destination.
    Walking,
    /// Bombarding a wall from range.
    Ranging,
    /// Striking a wall or plundering a gold pile.
    Attacking,
    /// Carrying stolen gold back toward the origin.
    Retreating,
}

/// Turret variants that can be mounted on walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurretKind {
    /// Fires cannonballs.
    Cannon,
    /// Fires fireballs with splash damage.
    Mage,
    /// Fires stones at a quick cadence.
    Stonethrower,
}

impl TurretKind {
    /// Gold required to build the turret, also refunded on sale.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Cannon => 150,
            Self::Mage => 300,
            Self::Stonethrower => 100,
        }
    }

    /// Ticks between two consecutive shots of a freshly built turret.
    #[must_use]
    pub const fn shot_delay(self) -> u32 {
        match self {
            Self::Cannon => 140,
            Self::Mage => 300,
            Self::Stonethrower => 105,
        }
    }

    /// Projectile fired by the turret.
    #[must_use]
    pub const fn projectile(self) -> ProjectileKind {
        match self {
            Self::Cannon => ProjectileKind::Cannonball,
            Self::Mage => ProjectileKind::Fireball,
            Self::Stonethrower => ProjectileKind::Stone,
        }
    }
}

/// Projectile variants in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Standard turret shot.
    Cannonball,
    /// Magical shot that splashes on impact.
    Fireball,
    /// Goliath's boulder that destroys anything it hits.
    Boulder,
    /// Small thrown stone.
    Stone,
}

impl ProjectileKind {
    /// Damage applied to a wall struck by the projectile.
    #[must_use]
    pub const fn wall_damage(self) -> i32 {
        match self {
            Self::Boulder => INSTANT_KILL_DAMAGE,
            Self::Fireball => 25,
            Self::Stone => 15,
            Self::Cannonball => CANNON_DAMAGE,
        }
    }

    /// Damage applied to a unit struck by the projectile.
    ///
    /// Fireballs apply this amount to every unit caught in the splash.
    #[must_use]
    pub const fn unit_damage(self) -> i32 {
        match self {
            Self::Boulder => INSTANT_KILL_DAMAGE,
            Self::Fireball | Self::Cannonball => CANNON_DAMAGE,
            Self::Stone => 1,
        }
    }

    /// Reports whether the projectile damages an area around the impact.
    #[must_use]
    pub const fn splashes(self) -> bool {
        matches!(self, Self::Fireball)
    }

    /// Size of the hitbox anchored at the projectile position.
    #[must_use]
    pub fn size(self) -> Vec2 {
        match self {
            Self::Cannonball => Vec2::new(16.0, 16.0),
            Self::Fireball => Vec2::new(18.0, 39.0),
            Self::Boulder => Vec2::new(48.0, 48.0),
            Self::Stone => Vec2::new(12.0, 12.0),
        }
    }

    /// Scale of the explosion spawned on impact.
    #[must_use]
    pub const fn impact_scale(self) -> f32 {
        match self {
            Self::Cannonball | Self::Stone => 0.6,
            Self::Fireball | Self::Boulder => 1.5,
        }
    }
}

/// Map edge from which a carrier enters the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
}

impl Side {
    /// Resolves a side from its wave script character.
    #[must_use]
    pub const fn from_char(value: char) -> Option<Self> {
        match value {
            'n' => Some(Self::North),
            's' => Some(Self::South),
            'e' => Some(Self::East),
            'w' => Some(Self::West),
            _ => None,
        }
    }

    /// Character used by wave scripts for the side.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::North => 'n',
            Self::South => 's',
            Self::East => 'e',
            Self::West => 'w',
        }
    }
}

/// Structures the player can buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Solid wall segment.
    Wall,
    /// Passable wall segment.
    Gate,
    /// Turret mounted on an existing wall.
    Turret(TurretKind),
}

impl BuildingKind {
    /// Gold required to build the structure.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Wall => WALL_COST,
            Self::Gate => GATE_COST,
            Self::Turret(kind) => kind.cost(),
        }
    }
}
