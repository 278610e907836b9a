//! Car spawning and per-tick updates for the traffic simulation
//!
//! Keeps spawn policy separate from the movement rules in `car.rs`.

use rand::Rng;

use super::car::{CarUpdateResult, SimCar};
use super::grid::CityMap;
use super::types::{Direction, Rgb};

/// Chance per tick of adding one car
pub const SPAWN_CHANCE: f64 = 0.05;
/// New cars are only spawned while there are at least this many road cells per car
pub const ROAD_CELLS_PER_CAR: usize = 5;
pub const MIN_CAR_SPEED: f32 = 0.05;
pub const MAX_CAR_SPEED: f32 = 0.2;
/// Lower bound of each pastel color channel
pub const PASTEL_MIN: u8 = 150;
/// Upper bound of each pastel color channel
pub const PASTEL_MAX: u8 = 250;

/// Tally of what the cars did during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficReport {
    pub moved: usize,
    pub turned: usize,
    pub teleported: usize,
    pub spawned: usize,
}

/// Most cars the road network supports
pub fn car_capacity(map: &CityMap) -> usize {
    map.roads().len() / ROAD_CELLS_PER_CAR
}

/// Builds a car on a random road cell. Returns `None` when there are no roads.
pub fn spawn_random_car<R: Rng + ?Sized>(map: &CityMap, rng: &mut R) -> Option<SimCar> {
    let roads = map.roads();
    if roads.is_empty() {
        return None;
    }
    let road_index = rng.random_range(0..roads.len());
    let speed = rng.random_range(MIN_CAR_SPEED..MAX_CAR_SPEED);
    let direction = Direction::from_index(rng.random_range(0..Direction::ALL.len()));
    let color = Rgb::new(
        rng.random_range(PASTEL_MIN..=PASTEL_MAX),
        rng.random_range(PASTEL_MIN..=PASTEL_MAX),
        rng.random_range(PASTEL_MIN..=PASTEL_MAX),
    );
    Some(SimCar::new(
        roads[road_index],
        road_index,
        speed,
        direction,
        color,
    ))
}

/// Spawns up to `count` cars, ignoring the capacity limit
pub fn spawn_initial_cars<R: Rng + ?Sized>(
    cars: &mut Vec<SimCar>,
    map: &CityMap,
    count: u32,
    rng: &mut R,
) -> usize {
    let before = cars.len();
    for _ in 0..count {
        match spawn_random_car(map, rng) {
            Some(car) => cars.push(car),
            None => break,
        }
    }
    cars.len() - before
}

/// Moves every car one tick, then maybe spawns one more
pub fn update_cars<R: Rng + ?Sized>(
    cars: &mut Vec<SimCar>,
    map: &CityMap,
    rng: &mut R,
) -> TrafficReport {
    let mut report = TrafficReport::default();
    if map.roads().is_empty() {
        return report;
    }

    for car in cars.iter_mut() {
        match car.update(map, rng) {
            CarUpdateResult::Moved => report.moved += 1,
            CarUpdateResult::Turned(_) => report.turned += 1,
            CarUpdateResult::Teleported => report.teleported += 1,
            CarUpdateResult::Stalled => {}
        }
    }

    if rng.random_bool(SPAWN_CHANCE) && cars.len() < car_capacity(map) {
        if let Some(car) = spawn_random_car(map, rng) {
            cars.push(car);
            report.spawned += 1;
        }
    }
    report
}
