use rand::rngs::StdRng;
use rand::SeedableRng;

use city_sim::simulation::{
    car_capacity, cell_at, spawn_initial_cars, spawn_random_car, update_cars, CarUpdateResult,
    CellType, CityMap, Direction, GridPos, Rgb, SimCar, MAX_CAR_SPEED, MIN_CAR_SPEED,
    PASTEL_MAX, PASTEL_MIN,
};

fn car_at(x: i32, y: i32, direction: Direction, speed: f32) -> SimCar {
    SimCar::new(GridPos::new(x, y), 0, speed, direction, Rgb::new(200, 200, 200))
}

/// 10-cell road along row 2 of a 12x5 map
fn straight_road() -> CityMap {
    let mut map = CityMap::new(12, 5);
    for x in 0..10 {
        assert!(map.claim_road(GridPos::new(x, 2)));
    }
    map
}

#[test]
fn test_car_keeps_heading_on_open_road() {
    let map = straight_road();
    let mut rng = StdRng::seed_from_u64(1);
    let mut car = car_at(2, 2, Direction::Right, 0.1);

    assert_eq!(car.update(&map, &mut rng), CarUpdateResult::Moved);
    assert!((car.x - 2.1).abs() < 1e-5);
    assert_eq!(car.y, 2.0);
    assert_eq!(car.direction, Direction::Right);
}

#[test]
fn test_car_turns_away_from_water() {
    let mut map = CityMap::new(5, 5);
    assert!(map.claim_water(GridPos::new(1, 2)));
    assert!(map.claim_road(GridPos::new(2, 2)));
    assert!(map.claim_road(GridPos::new(2, 1)));
    let mut rng = StdRng::seed_from_u64(3);
    let mut car = car_at(2, 2, Direction::Left, 0.1);

    assert_eq!(car.update(&map, &mut rng), CarUpdateResult::Turned(Direction::Up));
    assert_eq!(car.direction, Direction::Up);
    assert_eq!(car.x, 2.0);
    assert!((car.y - 1.9).abs() < 1e-5);
    assert_eq!(car.cell(), GridPos::new(2, 1));
}

#[test]
fn test_car_never_reverses_into_dead_end() {
    let mut map = CityMap::new(5, 5);
    assert!(map.claim_road(GridPos::new(2, 2)));
    assert!(map.claim_road(GridPos::new(3, 2)));
    let mut rng = StdRng::seed_from_u64(8);
    let mut car = car_at(2, 2, Direction::Left, 0.1);

    assert_eq!(car.update(&map, &mut rng), CarUpdateResult::Teleported);
    assert!(map.roads().contains(&car.cell()));
    assert_eq!(map.roads()[car.road_index], car.cell());
}

#[test]
fn test_teleport_without_roads_stalls() {
    let map = CityMap::new(5, 5);
    let mut rng = StdRng::seed_from_u64(8);
    let mut car = car_at(2, 2, Direction::Right, 0.1);

    assert_eq!(car.teleport(&map, &mut rng), CarUpdateResult::Stalled);
    assert_eq!(car.cell(), GridPos::new(2, 2));
}

#[test]
fn test_cars_stay_on_the_road() {
    let map = straight_road();
    let mut rng = StdRng::seed_from_u64(10);
    let mut cars = Vec::new();
    assert_eq!(spawn_initial_cars(&mut cars, &map, 4, &mut rng), 4);

    for _ in 0..500 {
        update_cars(&mut cars, &map, &mut rng);
        for car in &cars {
            assert!(map.is(car.cell(), CellType::Road));
        }
    }
}

#[test]
fn test_spawned_cars_are_pastel_and_slow() {
    let map = straight_road();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let car = spawn_random_car(&map, &mut rng).expect("roads exist");
        assert!((MIN_CAR_SPEED..MAX_CAR_SPEED).contains(&car.speed));
        for channel in [car.color.r, car.color.g, car.color.b] {
            assert!((PASTEL_MIN..=PASTEL_MAX).contains(&channel));
        }
        assert_eq!(map.roads()[car.road_index], car.cell());
    }
}

#[test]
fn test_no_cars_without_roads() {
    let map = CityMap::new(6, 6);
    let mut rng = StdRng::seed_from_u64(0);
    let mut cars = Vec::new();
    assert!(spawn_random_car(&map, &mut rng).is_none());
    assert_eq!(spawn_initial_cars(&mut cars, &map, 15, &mut rng), 0);

    for _ in 0..200 {
        let report = update_cars(&mut cars, &map, &mut rng);
        assert_eq!(report.spawned, 0);
    }
    assert!(cars.is_empty());
}

#[test]
fn test_spawning_respects_capacity() {
    let map = straight_road();
    assert_eq!(car_capacity(&map), 2);
    let mut rng = StdRng::seed_from_u64(77);
    let mut cars = Vec::new();

    let mut spawned = 0;
    for _ in 0..2000 {
        spawned += update_cars(&mut cars, &map, &mut rng).spawned;
        assert!(cars.len() <= 2);
    }
    assert_eq!(spawned, 2);
}

#[test]
fn test_cell_rounds_toward_negative_infinity() {
    assert_eq!(cell_at(2.9, 0.1), GridPos::new(2, 0));
    assert_eq!(cell_at(-0.5, 1.2), GridPos::new(-1, 1));
}

#[test]
fn test_direction_reverse() {
    assert_eq!(Direction::Left.reverse(), Direction::Right);
    assert_eq!(Direction::Up.reverse(), Direction::Down);
    assert_eq!(Direction::from_index(6), Direction::Right);
    assert_eq!(Direction::Up.offset(), (0, -1));
}
