//! Gameplay tuning constants shared by the world and the systems.
//!
//! Distances are expressed in world units where a single tile spans
//! [`TILE_SIZE`] units. Durations are expressed in simulation ticks.

/// Edge length of a square tile in world units.
pub const TILE_SIZE: f32 = 64.0;

/// Layer-0 tile identifier that marks a water cell.
pub const WATER_TILE: i32 = 72;

/// Number of background tile layers stored per map.
pub const TILE_LAYER_COUNT: usize = 3;

/// Maximum hit points of a freshly built or repaired wall.
pub const WALL_HP: i32 = 80;

/// Gold required to build a wall.
pub const WALL_COST: u32 = 100;

/// Gold required to build a gate.
pub const GATE_COST: u32 = 20;

/// Gold awarded for defeating an ordinary invader.
pub const GOLD_BOUNTY: u32 = 50;

/// Gold awarded for defeating the Goliath.
pub const GOLIATH_BOUNTY: u32 = 360;

/// Gold awarded for defeating Edric.
pub const EDRIC_BOUNTY: u32 = 320;

/// Hit points assigned to every carrier leaving the map edge.
pub const CARRIER_HP: i32 = 25;

/// Maximum distance at which a turret engages an invader.
pub const TURRET_RANGE: f32 = 600.0;

/// Damage applied by cannonballs and by the fireball splash.
pub const CANNON_DAMAGE: i32 = 2;

/// Radius of the fireball splash measured from the impact point.
pub const FIREBALL_RADIUS: f32 = 80.0;

/// Damage that guarantees the destruction of anything it touches.
pub const INSTANT_KILL_DAMAGE: i32 = 1000;

/// Distance a projectile covers per tick.
pub const PROJECTILE_SPEED: f32 = 6.0;

/// Maximum speed a unit may reach.
pub const MAX_SPEED: f32 = 2.0;

/// Multiplier applied to the accumulated separation force.
pub const MAX_FORCE: f32 = 2.4;

/// Radius inside which neighbouring units push each other apart.
pub const MIN_SEPARATION: f32 = 25.0;

/// Radius inside which repelling walls push units away.
pub const WALL_SEPARATION: f32 = 50.0;

/// Scale applied to unit-to-unit repulsion vectors.
pub const SEPARATION_UNIT_SCALE: f32 = 1.0 / 15.0;

/// Fraction of the steering force converted into velocity each tick.
pub const SCALING_FACTOR: f32 = 1.0 / 15.0;

/// Velocity component magnitude below which a unit counts as stopped.
pub const VELOCITY_MINIMUM: f32 = 0.20;

/// Distance to the destination below which a stopped unit has arrived.
pub const ARRIVAL_RADIUS: f32 = 90.0;

/// Distance to its origin inside which a carrier despawns on arrival.
pub const HOME_WATERS_RADIUS: f32 = 95.0;

/// Radius around the cursor that must be free of invaders for economy actions.
pub const DANGER_RADIUS: f32 = 1000.0;

/// Counter increment applied per tick while a melee unit swings.
pub const SWING_STEP: f32 = 0.5;

/// Counter span between two consecutive melee strikes.
pub const SWING_PERIOD: f32 = 10.0;

/// Counter value at which a ranged unit releases its volley.
pub const VOLLEY_THRESHOLD: f32 = 16.0;

/// Distance at which an armed Goliath throws its boulder.
pub const GOLIATH_THROW_RANGE: f32 = 800.0;

/// Distance to its wall beyond which a Goliath arms its boulder.
pub const GOLIATH_ARM_DISTANCE: f32 = 250.0;

/// Per-axis scatter applied to disembarking troops.
pub const DISEMBARK_SCATTER: i32 = 5;

/// Inclusive bounds of the per-axis offset ranged units add to their aim.
pub const RANGED_AIM_JITTER: (i32, i32) = (6, 38);

/// Inclusive bounds of the per-axis offset turrets add to their aim.
pub const TURRET_AIM_JITTER: (i32, i32) = (6, 32);

/// Constant subtracted from the turret aim jitter to centre it on the target.
pub const TURRET_AIM_BIAS: i32 = 10;

/// Margin added around a unit sprite when testing projectile hits.
pub const UNIT_HITBOX_MARGIN: f32 = 15.0;

/// Number of frames in the explosion animation.
pub const EXPLOSION_FRAMES: u32 = 5;

/// Ticks spent on a single explosion frame.
pub const EXPLOSION_FRAME_DELAY: u32 = 7;

/// Ticks a notice stays on the board before fading out.
pub const NOTICE_LIFETIME: u32 = 255;

/// Ticks between leaving the planning phase and the first wave.
pub const PLANNING_READY_LEAD: u32 = 50;
