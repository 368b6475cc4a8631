use bounty_core::{
    tuning::{WALL_COST, WALL_HP},
    ActionRejection, BuildingKind, CellCoord, Command, Event, Motion, Notice, Owner,
    ProjectileKind, RemovalReason, TileLayer, TurretKind, UnitId, UnitKind, UnitOrders,
    UnitSpawn, UnitState, Vec2,
};
use bounty_world::{apply, format::MapAsset, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const LAND_TILE: i32 = 1;

/// An 8x8 map whose top two rows are water and everything else is land.
fn coastal_world() -> World {
    let mut world = World::new(8, 8);
    let mut events = Vec::new();
    for column in 0..8 {
        for row in 2..8 {
            apply(
                &mut world,
                Command::PaintTile {
                    layer: TileLayer::Terrain,
                    cell: CellCoord::new(column, row),
                    tile: LAND_TILE,
                },
                &mut events,
            );
        }
    }
    world
}

fn spawn(world: &mut World, spawn: UnitSpawn) -> UnitId {
    let mut events = Vec::new();
    apply(world, Command::SpawnUnit { spawn }, &mut events);
    match events.as_slice() {
        [Event::UnitSpawned { unit, .. }] => *unit,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn footsoldier(position: Vec2) -> UnitSpawn {
    UnitSpawn::trooper(&UnitKind::Dinghy.landing_party()[0], position, Vec2::ZERO)
}

fn run(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        apply(world, command, &mut events);
    }
    events
}

#[test]
fn destroyed_wall_takes_turret_and_releases_attackers() {
    let mut world = coastal_world();
    let cell = CellCoord::new(3, 4);
    let neighbour = CellCoord::new(4, 4);
    let _ = run(
        &mut world,
        [
            Command::PlaceWall {
                cell,
                hp: 2,
                gate: false,
            },
            Command::PlaceWall {
                cell: neighbour,
                hp: WALL_HP,
                gate: false,
            },
            Command::PlaceTurret {
                kind: TurretKind::Cannon,
                cell,
                shot_delay: 140,
            },
        ],
    );
    assert_eq!(query::wall(&world, neighbour).map(|wall| wall.adjacency), Some(9));

    let attacker = spawn(&mut world, footsoldier(cell.world_origin()));
    let onlooker = spawn(&mut world, footsoldier(cell.world_origin()));
    for unit in [attacker, onlooker] {
        let _ = run(
            &mut world,
            [Command::AssignOrders {
                unit,
                orders: UnitOrders {
                    state: UnitState::Attacking,
                    destination: Some(cell.world_origin()),
                    wall_target: Some(cell),
                    gold_target: None,
                    boulder_armed: false,
                },
            }],
        );
    }

    let events = run(&mut world, [Command::StrikeWall { unit: attacker }]);

    assert!(events.contains(&Event::WallStruck { cell, hp: 0 }));
    assert!(events.contains(&Event::WallDestroyed { cell }));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::TurretDestroyed { cell: lost, .. } if *lost == cell)));
    assert!(events.contains(&Event::UnitTargetLost { unit: attacker }));
    assert!(events.contains(&Event::UnitTargetLost { unit: onlooker }));

    assert!(query::wall(&world, cell).is_none(), "wall must be inactive");
    assert!(query::turret_at(&world, cell).is_none(), "turret must fall with the wall");
    assert_eq!(
        query::wall(&world, neighbour).map(|wall| wall.adjacency),
        Some(6),
        "neighbour becomes isolated once adjacency is recomputed"
    );
    for unit in [attacker, onlooker] {
        let snapshot = query::unit(&world, unit).expect("unit survives");
        assert_eq!(snapshot.state, UnitState::Idle);
        assert_eq!(snapshot.wall_target, None);
        assert_eq!(snapshot.destination, None);
    }
    assert_eq!(query::explosions(&world).len(), 1);
}

#[test]
fn fireball_splashes_every_enemy_in_radius() {
    let mut world = coastal_world();
    let victims = [
        spawn(&mut world, footsoldier(Vec2::new(200.0, 200.0))),
        spawn(&mut world, footsoldier(Vec2::new(210.0, 205.0))),
        spawn(&mut world, footsoldier(Vec2::new(195.0, 215.0))),
    ];
    let mut bystander = footsoldier(Vec2::new(205.0, 210.0));
    bystander.owner = Owner::Player;
    let bystander = spawn(&mut world, bystander);

    let events = run(
        &mut world,
        [
            Command::LaunchProjectile {
                kind: ProjectileKind::Fireball,
                owner: Owner::Player,
                position: Vec2::new(190.0, 215.0),
                heading: 0.0,
            },
            Command::AdvanceProjectiles,
        ],
    );

    for unit in victims {
        assert!(
            events.contains(&Event::UnitDamaged { unit, hp: 2 }),
            "{unit:?} should take two damage from the splash"
        );
    }
    assert_eq!(
        query::unit(&world, bystander).map(|unit| unit.hp),
        Some(4),
        "friendly units are spared"
    );
    assert!(query::projectiles(&world).is_empty(), "fireball is consumed on impact");
}

#[test]
fn cannonball_hits_a_single_unit() {
    let mut world = coastal_world();
    let first = spawn(&mut world, footsoldier(Vec2::new(200.0, 200.0)));
    let second = spawn(&mut world, footsoldier(Vec2::new(205.0, 205.0)));

    let events = run(
        &mut world,
        [
            Command::LaunchProjectile {
                kind: ProjectileKind::Cannonball,
                owner: Owner::Player,
                position: Vec2::new(190.0, 215.0),
                heading: 0.0,
            },
            Command::AdvanceProjectiles,
        ],
    );

    assert!(events.contains(&Event::UnitDamaged { unit: first, hp: 2 }));
    assert_eq!(query::unit(&world, second).map(|unit| unit.hp), Some(4));
}

#[test]
fn projectiles_leaving_the_map_disappear() {
    let mut world = coastal_world();
    let _ = run(
        &mut world,
        [Command::LaunchProjectile {
            kind: ProjectileKind::Stone,
            owner: Owner::Invader,
            position: Vec2::new(3.0, 300.0),
            heading: 180.0,
        }],
    );
    assert_eq!(query::projectiles(&world).len(), 1);

    let _ = run(&mut world, [Command::AdvanceProjectiles]);
    assert!(query::projectiles(&world).is_empty());
}

#[test]
fn invader_stone_damages_the_wall_it_reaches() {
    let mut world = coastal_world();
    let cell = CellCoord::new(4, 4);
    let _ = run(
        &mut world,
        [Command::PlaceWall {
            cell,
            hp: WALL_HP,
            gate: false,
        }],
    );

    let events = run(
        &mut world,
        [
            Command::LaunchProjectile {
                kind: ProjectileKind::Stone,
                owner: Owner::Invader,
                position: Vec2::new(250.0, 280.0),
                heading: 0.0,
            },
            Command::AdvanceProjectiles,
        ],
    );

    assert!(events.contains(&Event::WallDamaged {
        cell,
        hp: WALL_HP - 15
    }));
}

#[test]
fn repairing_a_wall_at_forty_percent_costs_sixty() {
    let mut world = coastal_world();
    let cell = CellCoord::new(2, 5);
    let events = run(
        &mut world,
        [
            Command::PlaceWall {
                cell,
                hp: 32,
                gate: false,
            },
            Command::SetTreasury { gold: 100 },
            Command::Repair { cell },
        ],
    );

    assert!(events.contains(&Event::WallRepaired { cell, cost: 60 }));
    assert_eq!(query::treasury(&world), 40);
    assert_eq!(query::wall(&world, cell).map(|wall| wall.hp), Some(WALL_HP));
}

#[test]
fn walls_above_standard_strength_are_not_repaired_down() {
    let mut world = coastal_world();
    let cell = CellCoord::new(2, 5);
    let events = run(
        &mut world,
        [
            Command::PlaceWall {
                cell,
                hp: 100,
                gate: false,
            },
            Command::SetTreasury { gold: 500 },
            Command::Repair { cell },
        ],
    );

    assert!(events.contains(&Event::ActionRejected {
        reason: ActionRejection::NothingToRepair
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::WallRepaired { .. })));
    assert_eq!(query::wall(&world, cell).map(|wall| wall.hp), Some(100));
    assert_eq!(query::treasury(&world), 500);
}

#[test]
fn selling_refunds_by_health_and_needs_a_standing_wall() {
    let mut world = coastal_world();
    let healthy = CellCoord::new(2, 5);
    let damaged = CellCoord::new(5, 5);
    let events = run(
        &mut world,
        [
            Command::PlaceWall {
                cell: healthy,
                hp: WALL_HP,
                gate: false,
            },
            Command::PlaceWall {
                cell: damaged,
                hp: 40,
                gate: false,
            },
            Command::Sell { cell: healthy },
            Command::Sell { cell: damaged },
            Command::Sell { cell: damaged },
        ],
    );

    assert!(events.contains(&Event::BuildingSold {
        cell: healthy,
        turret: None,
        refund: WALL_COST
    }));
    assert!(events.contains(&Event::BuildingSold {
        cell: damaged,
        turret: None,
        refund: 50
    }));
    assert!(events.contains(&Event::ActionRejected {
        reason: ActionRejection::NothingToSell
    }));
    assert_eq!(query::treasury(&world), 150);
}

#[test]
fn building_is_validated_before_charging() {
    let mut world = coastal_world();
    let land = CellCoord::new(3, 3);
    let events = run(
        &mut world,
        [
            Command::SetTreasury { gold: 120 },
            Command::Build {
                kind: BuildingKind::Wall,
                cell: CellCoord::new(3, 0),
            },
            Command::Build {
                kind: BuildingKind::Wall,
                cell: land,
            },
            Command::Build {
                kind: BuildingKind::Wall,
                cell: land,
            },
            Command::Build {
                kind: BuildingKind::Turret(TurretKind::Cannon),
                cell: land,
            },
            Command::Build {
                kind: BuildingKind::Gate,
                cell: CellCoord::new(8, 3),
            },
        ],
    );

    let rejections: Vec<ActionRejection> = events
        .iter()
        .filter_map(|event| match event {
            Event::ActionRejected { reason } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejections,
        vec![
            ActionRejection::WaterTile,
            ActionRejection::Blocked,
            ActionRejection::InsufficientFunds,
            ActionRejection::OutOfBounds,
        ]
    );
    assert_eq!(query::treasury(&world), 20);
    assert_eq!(query::wall(&world, land).map(|wall| wall.adjacency), Some(6));
    assert!(query::notices(&world)
        .iter()
        .any(|active| active.notice == Notice::Rejected(ActionRejection::WaterTile)));
}

#[test]
fn nearby_invaders_block_construction() {
    let mut world = coastal_world();
    let _ = spawn(&mut world, footsoldier(Vec2::new(500.0, 500.0)));
    let events = run(
        &mut world,
        [
            Command::SetTreasury { gold: 1000 },
            Command::Build {
                kind: BuildingKind::Wall,
                cell: CellCoord::new(2, 4),
            },
        ],
    );
    assert!(events.contains(&Event::ActionRejected {
        reason: ActionRejection::EnemiesNearby
    }));
    assert_eq!(query::treasury(&world), 1000);
}

#[test]
fn walls_may_replace_gates_but_turrets_may_not_stand_on_them() {
    let mut world = coastal_world();
    let cell = CellCoord::new(4, 6);
    let events = run(
        &mut world,
        [
            Command::SetTreasury { gold: 500 },
            Command::Build {
                kind: BuildingKind::Gate,
                cell,
            },
            Command::Build {
                kind: BuildingKind::Turret(TurretKind::Stonethrower),
                cell,
            },
            Command::Build {
                kind: BuildingKind::Wall,
                cell,
            },
        ],
    );

    assert!(events.contains(&Event::ActionRejected {
        reason: ActionRejection::RequiresEmptyWall
    }));
    assert_eq!(query::treasury(&world), 500 - 20 - 100);
    let wall = query::wall(&world, cell).expect("wall stands");
    assert!(!wall.gate);
    assert!(query::repelling_walls(&world).contains(&cell.world_origin()));
}

#[test]
fn reset_refunds_every_defence() {
    let mut world = coastal_world();
    let events = run(
        &mut world,
        [
            Command::SetTreasury { gold: 1000 },
            Command::Build {
                kind: BuildingKind::Wall,
                cell: CellCoord::new(2, 4),
            },
            Command::Build {
                kind: BuildingKind::Gate,
                cell: CellCoord::new(3, 4),
            },
            Command::Build {
                kind: BuildingKind::Turret(TurretKind::Mage),
                cell: CellCoord::new(2, 4),
            },
            Command::ResetDefences,
        ],
    );

    assert!(events.contains(&Event::DefencesReset { refund: 420 }));
    assert_eq!(query::treasury(&world), 1000);
    assert!(query::walls(&world).is_empty());
    assert!(!query::has_turrets(&world));
}

#[test]
fn defeated_invaders_pay_their_bounty() {
    let mut world = coastal_world();
    let goliath = spawn(
        &mut world,
        UnitSpawn::trooper(
            &UnitKind::GoliathShip.landing_party()[0],
            Vec2::new(300.0, 300.0),
            Vec2::ZERO,
        ),
    );
    let carrier = spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(10.0, 10.0), None),
    );

    let events = run(
        &mut world,
        [
            Command::RemoveUnit {
                unit: goliath,
                reason: RemovalReason::Defeated,
            },
            Command::RemoveUnit {
                unit: carrier,
                reason: RemovalReason::Disembarked,
            },
        ],
    );

    assert!(events.contains(&Event::BountyAwarded {
        amount: 360,
        position: Vec2::new(300.0, 300.0)
    }));
    assert_eq!(query::treasury(&world), 360, "disembarking pays nothing");
    assert!(!query::has_units(&world));
}

#[test]
fn stealing_a_coin_sends_the_thief_home() {
    let mut world = coastal_world();
    let pile_cell = CellCoord::new(4, 5);
    let origin = Vec2::new(256.0, 0.0);
    let _ = run(
        &mut world,
        [Command::PlaceGoldPile {
            cell: pile_cell,
            coins: 1,
        }],
    );
    let pile = query::closest_gold_pile(&world, origin).expect("pile placed");
    let thief = spawn(
        &mut world,
        UnitSpawn::trooper(
            &UnitKind::Dinghy.landing_party()[0],
            pile_cell.world_origin(),
            origin,
        ),
    );
    let _ = run(
        &mut world,
        [Command::AssignOrders {
            unit: thief,
            orders: UnitOrders {
                state: UnitState::Attacking,
                destination: None,
                wall_target: None,
                gold_target: Some(pile.pile),
                boulder_armed: false,
            },
        }],
    );

    let events = run(&mut world, [Command::StealCoin { unit: thief }]);

    assert!(events.contains(&Event::CoinStolen {
        pile: pile.pile,
        coins_left: 0
    }));
    assert!(events.contains(&Event::Notified {
        notice: Notice::CoinStolen
    }));
    let snapshot = query::unit(&world, thief).expect("thief present");
    assert_eq!(snapshot.state, UnitState::Retreating);
    assert_eq!(snapshot.destination, Some(origin));
    assert_eq!(snapshot.gold_target, None);
    assert_eq!(query::gold_pile(&world, pile.pile).map(|pile| pile.coins), Some(0));
}

#[test]
fn retreating_units_board_a_dinghy_on_water() {
    let mut world = coastal_world();
    let thief = spawn(&mut world, footsoldier(Vec2::new(100.0, 140.0)));
    let _ = run(
        &mut world,
        [Command::AssignOrders {
            unit: thief,
            orders: UnitOrders {
                state: UnitState::Retreating,
                destination: Some(Vec2::new(100.0, 0.0)),
                wall_target: None,
                gold_target: None,
                boulder_armed: false,
            },
        }],
    );

    let events = run(
        &mut world,
        [Command::MoveUnit {
            unit: thief,
            motion: Motion {
                position: Vec2::new(100.0, 120.0),
                velocity: Vec2::new(0.0, -2.0),
                force: Vec2::ZERO,
                rotation: 0.0,
                arrived: false,
            },
        }],
    );

    assert_eq!(events, vec![Event::UnitReverted { unit: thief }]);
    assert_eq!(
        query::unit(&world, thief).map(|unit| unit.kind),
        Some(UnitKind::Dinghy)
    );
}

#[test]
fn arrival_clears_destination_and_stops_the_unit() {
    let mut world = coastal_world();
    let carrier = spawn(
        &mut world,
        UnitSpawn::carrier(
            UnitKind::Dinghy,
            Vec2::new(0.0, 0.0),
            Some(Vec2::new(64.0, 128.0)),
        ),
    );

    let events = run(
        &mut world,
        [Command::MoveUnit {
            unit: carrier,
            motion: Motion {
                position: Vec2::new(60.0, 100.0),
                velocity: Vec2::new(0.1, 0.1),
                force: Vec2::ZERO,
                rotation: -45.0,
                arrived: true,
            },
        }],
    );

    assert_eq!(events, vec![Event::UnitArrived { unit: carrier }]);
    let snapshot = query::unit(&world, carrier).expect("carrier present");
    assert_eq!(snapshot.destination, None);
    assert_eq!(snapshot.velocity, Vec2::ZERO);
    assert_eq!(snapshot.rotation, -45.0);
}

#[test]
fn closest_queries_prefer_the_first_of_equal_candidates() {
    let mut world = coastal_world();
    let _ = run(
        &mut world,
        [
            Command::PlaceWall {
                cell: CellCoord::new(1, 3),
                hp: WALL_HP,
                gate: false,
            },
            Command::PlaceWall {
                cell: CellCoord::new(3, 3),
                hp: WALL_HP,
                gate: false,
            },
        ],
    );

    let origin = CellCoord::new(2, 3).world_origin();
    let wall = query::closest_wall(&world, origin).expect("walls exist");
    assert_eq!(wall.cell, CellCoord::new(1, 3), "scan is column-major and strict");
    assert_eq!(wall.distance, 64.0);

    let land = query::closest_land(&world, Vec2::new(130.0, 0.0)).expect("land exists");
    assert_eq!(land, CellCoord::new(2, 2).world_origin());

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..32 {
        if let Some(noisy) = query::closest_wall_noisy(&world, origin, &mut rng) {
            assert!(noisy.cell == CellCoord::new(1, 3) || noisy.cell == CellCoord::new(3, 3));
        }
        if let Some(noisy) = query::closest_land_noisy(&world, Vec2::new(130.0, 0.0), &mut rng) {
            assert!(!query::is_water(&world, noisy));
        }
    }
}

#[test]
fn closest_enemy_filters_by_faction() {
    let mut world = coastal_world();
    let invader = spawn(&mut world, footsoldier(Vec2::new(400.0, 400.0)));
    let mut friend = footsoldier(Vec2::new(10.0, 10.0));
    friend.owner = Owner::Player;
    let _ = spawn(&mut world, friend);

    let target = query::closest_enemy(&world, Vec2::ZERO, Owner::Invader).expect("invader");
    assert_eq!(target.unit, invader);
    assert_eq!(query::hostiles_within(&world, Vec2::ZERO, 500.0), 0);
    assert_eq!(query::hostiles_within(&world, Vec2::ZERO, 600.0), 1);
}

#[test]
fn exported_asset_rebuilds_the_same_world() {
    let mut world = coastal_world();
    let _ = run(
        &mut world,
        [Command::PlaceWall {
            cell: CellCoord::new(5, 5),
            hp: 55,
            gate: false,
        }],
    );
    let _ = spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::EliteShip, Vec2::new(64.0, 32.0), None),
    );

    let asset = query::to_asset(&world);
    let text = asset.write();
    let reloaded = World::from_asset(&MapAsset::parse(&text).expect("asset parses"))
        .expect("asset is valid");

    assert_eq!(query::to_asset(&reloaded), asset);
    assert_eq!(query::walls(&reloaded), query::walls(&world));
    let units = query::unit_view(&reloaded);
    assert_eq!(units.len(), 1);
    let unit = units.iter().next().expect("unit reloaded");
    assert_eq!(unit.state, UnitState::Idle);
    assert_eq!(unit.kind, UnitKind::EliteShip);
}
