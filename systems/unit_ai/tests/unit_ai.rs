use bounty_core::{
    tuning::WALL_HP, CellCoord, Command, Event, Owner, ProjectileKind, RemovalReason, TileLayer,
    UnitId, UnitKind, UnitOrders, UnitSpawn, UnitState, Vec2,
};
use bounty_system_unit_ai::UnitAi;
use bounty_world::{self as world, query, World};

fn land_world() -> World {
    let mut world = World::new(30, 30);
    let mut events = Vec::new();
    for column in 0..30 {
        for row in 5..30 {
            world::apply(
                &mut world,
                Command::PaintTile {
                    layer: TileLayer::Terrain,
                    cell: CellCoord::new(column, row),
                    tile: 1,
                },
                &mut events,
            );
        }
    }
    world
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn spawn(world: &mut World, spawn: UnitSpawn) -> UnitId {
    let events = apply_all(world, vec![Command::SpawnUnit { spawn }]);
    match events.as_slice() {
        [Event::UnitSpawned { unit, .. }] => *unit,
        other => panic!("unexpected spawn events: {other:?}"),
    }
}

fn trooper(kind: UnitKind, position: Vec2) -> UnitSpawn {
    let party = match kind {
        UnitKind::Footsoldier => UnitKind::Dinghy.landing_party(),
        UnitKind::Mage => &UnitKind::MageShip.landing_party()[1..],
        UnitKind::Goliath => UnitKind::GoliathShip.landing_party(),
        UnitKind::Edric => UnitKind::EdricShip.landing_party(),
        other => panic!("no trooper template for {other:?}"),
    };
    UnitSpawn::trooper(&party[0], position, Vec2::ZERO)
}

fn place_wall(world: &mut World, cell: CellCoord) {
    let _ = apply_all(
        world,
        vec![Command::PlaceWall {
            cell,
            hp: WALL_HP,
            gate: false,
        }],
    );
}

fn orders_for(commands: &[Command], unit: UnitId) -> Option<UnitOrders> {
    commands.iter().find_map(|command| match command {
        Command::AssignOrders { unit: target, orders } if *target == unit => Some(*orders),
        _ => None,
    })
}

#[test]
fn carriers_unload_their_landing_party_and_vanish() {
    let mut world = land_world();
    let origin = Vec2::new(640.0, 0.0);
    let carrier = spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, origin, Some(Vec2::new(640.0, 320.0))),
    );
    let _ = apply_all(
        &mut world,
        vec![Command::MoveUnit {
            unit: carrier,
            motion: bounty_core::Motion {
                position: Vec2::new(640.0, 300.0),
                velocity: Vec2::ZERO,
                force: Vec2::ZERO,
                rotation: 90.0,
                arrived: true,
            },
        }],
    );

    let mut ai = UnitAi::new(11);
    let mut commands = Vec::new();
    ai.handle_arrivals(&[Event::UnitArrived { unit: carrier }], &world, &mut commands);

    assert_eq!(
        commands[0],
        Command::RemoveUnit {
            unit: carrier,
            reason: RemovalReason::Disembarked
        }
    );
    let troops: Vec<UnitSpawn> = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnUnit { spawn } => Some(*spawn),
            _ => None,
        })
        .collect();
    assert_eq!(troops.len(), 3);
    for troop in &troops {
        assert_eq!(troop.kind, UnitKind::Footsoldier);
        assert_eq!(troop.state, UnitState::Idle);
        assert_eq!(troop.origin, origin, "troops remember where their carrier came from");
        assert!((troop.position.x - 640.0).abs() <= 5.0);
        assert!((troop.position.y - 300.0).abs() <= 5.0);
    }

    let events = apply_all(&mut world, commands);
    assert!(events.contains(&Event::UnitRemoved {
        unit: carrier,
        kind: UnitKind::Dinghy,
        reason: RemovalReason::Disembarked,
        position: Vec2::new(640.0, 300.0),
    }));
    assert_eq!(query::unit_view(&world).len(), 3);
    assert_eq!(query::treasury(&world), 0, "disembarking pays no bounty");
}

#[test]
fn bosses_land_exactly_at_the_drop_point() {
    let mut world = land_world();
    let carrier = spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::GoliathShip, Vec2::new(0.0, 0.0), None),
    );
    let _ = apply_all(
        &mut world,
        vec![Command::MoveUnit {
            unit: carrier,
            motion: bounty_core::Motion {
                position: Vec2::new(400.0, 400.0),
                velocity: Vec2::ZERO,
                force: Vec2::ZERO,
                rotation: 0.0,
                arrived: false,
            },
        }],
    );

    let mut ai = UnitAi::new(3);
    let mut commands = Vec::new();
    ai.handle_arrivals(&[Event::UnitArrived { unit: carrier }], &world, &mut commands);

    let spawned: Vec<UnitSpawn> = commands
        .iter()
        .filter_map(|command| match command {
            Command::SpawnUnit { spawn } => Some(*spawn),
            _ => None,
        })
        .collect();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].kind, UnitKind::Goliath);
    assert_eq!(spawned[0].position, Vec2::new(400.0, 400.0));
    assert!(spawned[0].boulder_armed);
    assert_eq!(spawned[0].hp, 60);
}

#[test]
fn carriers_in_home_waters_leave_the_map() {
    let mut world = land_world();
    let carrier = spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::EliteShip, Vec2::new(100.0, 0.0), None),
    );

    let mut ai = UnitAi::new(1);
    let mut commands = Vec::new();
    ai.handle_arrivals(&[Event::UnitArrived { unit: carrier }], &world, &mut commands);

    assert_eq!(
        commands,
        vec![Command::RemoveUnit {
            unit: carrier,
            reason: RemovalReason::ReturnedHome
        }]
    );
}

#[test]
fn walking_troops_start_their_assault_on_arrival() {
    let mut world = land_world();
    let wall = CellCoord::new(10, 10);
    place_wall(&mut world, wall);
    let soldier = spawn(&mut world, trooper(UnitKind::Footsoldier, Vec2::new(640.0, 500.0)));
    let mage = spawn(&mut world, trooper(UnitKind::Mage, Vec2::new(800.0, 800.0)));
    let mut ai = UnitAi::new(5);

    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);
    let _ = apply_all(&mut world, commands);
    assert_eq!(
        query::unit(&world, soldier).map(|unit| unit.state),
        Some(UnitState::Walking)
    );

    let mut commands = Vec::new();
    ai.handle_arrivals(
        &[
            Event::UnitArrived { unit: soldier },
            Event::UnitArrived { unit: mage },
        ],
        &world,
        &mut commands,
    );
    let soldier_orders = orders_for(&commands, soldier).expect("soldier orders");
    assert_eq!(soldier_orders.state, UnitState::Attacking);
    assert_eq!(soldier_orders.wall_target, Some(wall));
}

#[test]
fn idle_invaders_prefer_closer_gold_over_walls() {
    let mut world = land_world();
    place_wall(&mut world, CellCoord::new(20, 20));
    let _ = apply_all(
        &mut world,
        vec![Command::PlaceGoldPile {
            cell: CellCoord::new(6, 6),
            coins: 10,
        }],
    );
    let soldier = spawn(&mut world, trooper(UnitKind::Footsoldier, Vec2::new(320.0, 320.0)));
    let mage = spawn(&mut world, trooper(UnitKind::Mage, Vec2::new(330.0, 320.0)));

    let mut ai = UnitAi::new(9);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);

    let soldier_orders = orders_for(&commands, soldier).expect("soldier orders");
    assert_eq!(soldier_orders.state, UnitState::Walking);
    assert!(soldier_orders.gold_target.is_some());
    assert_eq!(soldier_orders.destination, Some(CellCoord::new(6, 6).world_origin()));

    let mage_orders = orders_for(&commands, mage).expect("mage orders");
    assert_eq!(
        mage_orders.wall_target,
        Some(CellCoord::new(20, 20)),
        "mages always go for walls"
    );
    assert_eq!(mage_orders.gold_target, None);
}

#[test]
fn ranged_units_keep_their_distance() {
    let mut world = land_world();
    let wall = CellCoord::new(10, 10);
    place_wall(&mut world, wall);
    let far = spawn(&mut world, trooper(UnitKind::Mage, Vec2::new(640.0, 1500.0)));
    let near = spawn(&mut world, trooper(UnitKind::Mage, Vec2::new(640.0, 840.0)));

    let mut ai = UnitAi::new(2);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);

    let far_orders = orders_for(&commands, far).expect("far orders");
    assert_eq!(far_orders.state, UnitState::Walking);
    let destination = far_orders.destination.expect("destination");
    assert!((destination - Vec2::new(640.0, 640.0 + 380.0)).length() < 1e-3);

    let near_orders = orders_for(&commands, near).expect("near orders");
    assert_eq!(near_orders.state, UnitState::Ranging);
    assert_eq!(near_orders.destination, Some(Vec2::new(640.0, 840.0)));
}

#[test]
fn distant_goliaths_arm_and_throw_their_boulder() {
    let mut world = land_world();
    let wall = CellCoord::new(10, 10);
    place_wall(&mut world, wall);
    let mut spawn_goliath = trooper(UnitKind::Goliath, Vec2::new(640.0, 1400.0));
    spawn_goliath.boulder_armed = false;
    let goliath = spawn(&mut world, spawn_goliath);

    let mut ai = UnitAi::new(4);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);
    let orders = orders_for(&commands, goliath).expect("goliath orders");
    assert!(orders.boulder_armed, "walls farther than 250 arm the boulder");
    assert_eq!(orders.destination, Some(wall.world_origin()));
    let _ = apply_all(&mut world, commands);

    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);
    assert!(commands.iter().any(|command| matches!(
        command,
        Command::LaunchProjectile {
            kind: ProjectileKind::Boulder,
            owner: Owner::Invader,
            ..
        }
    )));
    assert!(commands.contains(&Command::DisarmBoulder { unit: goliath }));
}

#[test]
fn edric_casts_up_to_three_fireballs() {
    let mut world = land_world();
    let target = CellCoord::new(10, 10);
    place_wall(&mut world, target);
    place_wall(&mut world, CellCoord::new(12, 10));
    let edric = spawn(&mut world, trooper(UnitKind::Edric, Vec2::new(640.0, 1000.0)));
    let _ = apply_all(
        &mut world,
        vec![
            Command::AssignOrders {
                unit: edric,
                orders: UnitOrders {
                    state: UnitState::Ranging,
                    destination: None,
                    wall_target: Some(target),
                    gold_target: None,
                    boulder_armed: false,
                },
            },
            Command::AnimateUnit {
                unit: edric,
                rotation: 15.95,
            },
        ],
    );

    let mut ai = UnitAi::new(21);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);

    let fireballs = commands
        .iter()
        .filter(|command| {
            matches!(
                command,
                Command::LaunchProjectile {
                    kind: ProjectileKind::Fireball,
                    ..
                }
            )
        })
        .count();
    assert!((1..=3).contains(&fireballs), "volley fired {fireballs} fireballs");
    assert!(commands.contains(&Command::AnimateUnit {
        unit: edric,
        rotation: 0.0
    }));
}

#[test]
fn rangers_without_a_wall_go_idle() {
    let mut world = land_world();
    let mage = spawn(&mut world, trooper(UnitKind::Mage, Vec2::new(640.0, 1000.0)));
    let _ = apply_all(
        &mut world,
        vec![Command::AssignOrders {
            unit: mage,
            orders: UnitOrders {
                state: UnitState::Ranging,
                destination: None,
                wall_target: None,
                gold_target: None,
                boulder_armed: false,
            },
        }],
    );

    let mut ai = UnitAi::new(8);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);

    let orders = orders_for(&commands, mage).expect("mage orders");
    assert_eq!(orders.state, UnitState::Idle);
}

#[test]
fn defeated_units_are_removed_for_their_bounty() {
    let mut world = land_world();
    let edric = spawn(&mut world, trooper(UnitKind::Edric, Vec2::new(640.0, 1000.0)));
    let _ = apply_all(
        &mut world,
        vec![
            Command::LaunchProjectile {
                kind: ProjectileKind::Boulder,
                owner: Owner::Player,
                position: Vec2::new(640.0, 1020.0),
                heading: 0.0,
            },
            Command::AdvanceProjectiles,
        ],
    );
    assert!(query::unit(&world, edric).is_some_and(|unit| unit.hp <= 0));

    let mut ai = UnitAi::new(6);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);
    assert_eq!(
        commands,
        vec![Command::RemoveUnit {
            unit: edric,
            reason: RemovalReason::Defeated
        }]
    );

    let events = apply_all(&mut world, commands);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BountyAwarded { amount: 320, .. })));
    assert_eq!(query::treasury(&world), 320);
}

#[test]
fn orders_for_a_wall_felled_in_the_same_tick_are_dropped() {
    let mut world = land_world();
    let doomed = CellCoord::new(10, 10);
    let spare = CellCoord::new(25, 25);
    let _ = apply_all(
        &mut world,
        vec![Command::PlaceWall {
            cell: doomed,
            hp: 1,
            gate: false,
        }],
    );
    place_wall(&mut world, spare);

    let soldier = spawn(&mut world, trooper(UnitKind::Footsoldier, doomed.world_origin()));
    let _ = apply_all(
        &mut world,
        vec![
            Command::AssignOrders {
                unit: soldier,
                orders: UnitOrders {
                    state: UnitState::Attacking,
                    destination: Some(doomed.world_origin()),
                    wall_target: Some(doomed),
                    gold_target: None,
                    boulder_armed: false,
                },
            },
            Command::AnimateUnit {
                unit: soldier,
                rotation: 9.5,
            },
        ],
    );
    let mage = spawn(
        &mut world,
        trooper(UnitKind::Mage, doomed.world_origin() + Vec2::new(0.0, 200.0)),
    );

    let mut ai = UnitAi::new(13);
    let mut commands = Vec::new();
    ai.handle(&world, &mut commands);
    assert_eq!(
        orders_for(&commands, mage).and_then(|orders| orders.wall_target),
        Some(doomed),
        "the mage picks the wall before it falls"
    );

    let events = apply_all(&mut world, commands);
    assert!(events.contains(&Event::WallDestroyed { cell: doomed }));
    assert!(events.contains(&Event::UnitTargetLost { unit: mage }));
    let locked = query::unit(&world, mage).expect("mage stands");
    assert_eq!(locked.state, UnitState::Idle);
    assert_eq!(locked.wall_target, None);

    for _ in 0..400 {
        let mut commands = Vec::new();
        ai.handle(&world, &mut commands);
        let _ = apply_all(&mut world, commands);
        let mage = query::unit(&world, mage).expect("mage stands");
        assert_ne!(mage.wall_target, Some(doomed));
    }
    assert_eq!(
        query::unit(&world, mage).and_then(|unit| unit.wall_target),
        Some(spare)
    );
}
