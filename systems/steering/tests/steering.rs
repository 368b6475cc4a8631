use bounty_core::{
    tuning::{MAX_SPEED, WALL_HP},
    CellCoord, Command, Event, UnitKind, UnitSpawn, Vec2,
};
use bounty_system_steering::{integrate, seek, separation, Steering};
use bounty_world::{self as world, query, World};

fn spawn(world: &mut World, spawn: UnitSpawn) {
    let mut events = Vec::new();
    world::apply(world, Command::SpawnUnit { spawn }, &mut events);
}

fn step(world: &mut World, steering: &mut Steering) -> Vec<Event> {
    let units = query::unit_view(world);
    let walls = query::repelling_walls(world);
    let mut commands = Vec::new();
    steering.handle(&units, &walls, &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn seek_is_zero_without_a_destination() {
    assert_eq!(seek(None, Vec2::new(4.0, 4.0), Vec2::new(1.0, 0.0)), Vec2::ZERO);
    assert_eq!(
        seek(Some(Vec2::new(4.0, 4.0)), Vec2::new(4.0, 4.0), Vec2::new(1.0, 0.0)),
        Vec2::ZERO,
        "a unit sitting on its destination feels no seek force"
    );
}

#[test]
fn idle_units_are_left_in_place() {
    let mut world = World::new(10, 10);
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(100.0, 100.0), None),
    );
    let mut steering = Steering::new();
    let events = step(&mut world, &mut steering);

    assert!(events.is_empty());
    let unit = query::unit_view(&world).into_vec().remove(0);
    assert_eq!(unit.position, Vec2::new(100.0, 100.0));
    assert_eq!(unit.force, Vec2::ZERO);
}

#[test]
fn velocity_never_exceeds_max_speed() {
    let mut world = World::new(40, 40);
    let destinations = [
        Vec2::new(2000.0, 2000.0),
        Vec2::new(0.0, 2000.0),
        Vec2::new(2000.0, 10.0),
    ];
    for destination in destinations {
        spawn(
            &mut world,
            UnitSpawn::carrier(UnitKind::RushShip, Vec2::new(500.0, 500.0), Some(destination)),
        );
    }

    let mut steering = Steering::new();
    for _ in 0..200 {
        let _ = step(&mut world, &mut steering);
        for unit in query::unit_view(&world).iter() {
            assert!(
                unit.velocity.length() <= MAX_SPEED + 1e-4,
                "unit {} moved at {}",
                unit.id.get(),
                unit.velocity.length()
            );
        }
    }
}

#[test]
fn carriers_sail_to_their_destination_and_arrive() {
    let mut world = World::new(20, 20);
    let destination = Vec2::new(400.0, 100.0);
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(100.0, 100.0), Some(destination)),
    );

    let mut steering = Steering::new();
    let mut arrived_at = None;
    for tick in 0..600 {
        let events = step(&mut world, &mut steering);
        if events
            .iter()
            .any(|event| matches!(event, Event::UnitArrived { .. }))
        {
            arrived_at = Some(tick);
            break;
        }
    }

    assert!(arrived_at.is_some(), "carrier never arrived");
    let unit = query::unit_view(&world).into_vec().remove(0);
    assert!(unit.position.distance(destination) < 90.0);
    assert_eq!(unit.destination, None);
    assert_eq!(unit.velocity, Vec2::ZERO);
}

#[test]
fn carriers_face_their_velocity_while_land_units_keep_their_counter() {
    let mut world = World::new(10, 10);
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(100.0, 100.0), Some(Vec2::new(500.0, 100.0))),
    );
    let mut soldier = UnitSpawn::trooper(
        &UnitKind::Dinghy.landing_party()[0],
        Vec2::new(300.0, 300.0),
        Vec2::ZERO,
    );
    soldier.destination = Some(Vec2::new(300.0, 600.0));
    spawn(&mut world, soldier);

    let view = query::unit_view(&world);
    let carrier = view.iter().next().expect("carrier");
    let footsoldier = view.iter().nth(1).expect("footsoldier");

    let sailing = integrate(carrier, seek(carrier.destination, carrier.position, carrier.velocity));
    assert!((sailing.rotation - -90.0).abs() < 1e-3, "east-bound carriers rotate to -90");

    let walking = integrate(
        footsoldier,
        seek(footsoldier.destination, footsoldier.position, footsoldier.velocity),
    );
    assert_eq!(walking.rotation, footsoldier.rotation);
}

#[test]
fn walls_repel_but_gates_do_not() {
    let mut world = World::new(10, 10);
    let mut events = Vec::new();
    for (cell, gate) in [(CellCoord::new(2, 2), false), (CellCoord::new(5, 5), true)] {
        world::apply(
            &mut world,
            Command::PlaceWall {
                cell,
                hp: WALL_HP,
                gate,
            },
            &mut events,
        );
    }
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(140.0, 128.0), Some(Vec2::ZERO)),
    );
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(330.0, 320.0), Some(Vec2::ZERO)),
    );

    let view = query::unit_view(&world);
    let walls = query::repelling_walls(&world);
    assert_eq!(walls, vec![CellCoord::new(2, 2).world_origin()]);

    let near_wall = view.iter().next().expect("first unit");
    let near_gate = view.iter().nth(1).expect("second unit");
    assert_eq!(separation(near_wall, &view, &walls), Vec2::new(12.0 * 2.4, 0.0));
    assert_eq!(separation(near_gate, &view, &walls), Vec2::ZERO);
}

#[test]
fn crowded_units_push_each_other_apart() {
    let mut world = World::new(10, 10);
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(100.0, 100.0), None),
    );
    spawn(
        &mut world,
        UnitSpawn::carrier(UnitKind::Dinghy, Vec2::new(115.0, 100.0), None),
    );

    let view = query::unit_view(&world);
    let first = view.iter().next().expect("first unit");
    let push = separation(first, &view, &[]);
    assert!((push.x - (-15.0 / 15.0 * 2.4)).abs() < 1e-5);
    assert_eq!(push.y, 0.0);
}
