//! Car movement logic for the traffic simulation
//!
//! Cars wander the road grid in fractional coordinates. They keep their
//! heading while the cell ahead is road, pick a new heading when it is not,
//! and jump to a random road cell when they are boxed in.

use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::grid::CityMap;
use super::types::{CellType, Direction, GridPos, Rgb};

/// Result of a car update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarUpdateResult {
    /// Kept its heading and moved
    Moved,
    /// Picked a new heading and moved along it
    Turned(Direction),
    /// Boxed in; relocated to a random road cell without moving
    Teleported,
    /// No roads exist, nothing happened
    Stalled,
}

/// A car in the traffic simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimCar {
    pub x: f32,
    pub y: f32,
    /// Cells per tick
    pub speed: f32,
    pub direction: Direction,
    /// Entry of the road list the car last spawned or teleported onto
    pub road_index: usize,
    pub color: Rgb,
}

/// The grid cell containing a fractional position
pub fn cell_at(x: f32, y: f32) -> GridPos {
    GridPos::new(x.floor() as i32, y.floor() as i32)
}

impl SimCar {
    pub fn new(
        pos: GridPos,
        road_index: usize,
        speed: f32,
        direction: Direction,
        color: Rgb,
    ) -> Self {
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
            speed,
            direction,
            road_index,
            color,
        }
    }

    /// The cell the car currently occupies
    pub fn cell(&self) -> GridPos {
        cell_at(self.x, self.y)
    }

    fn next_position(&self, direction: Direction) -> (f32, f32) {
        let (dx, dy) = direction.offset();
        (
            self.x + dx as f32 * self.speed,
            self.y + dy as f32 * self.speed,
        )
    }

    /// Advances the car by one tick
    pub fn update<R: Rng + ?Sized>(&mut self, map: &CityMap, rng: &mut R) -> CarUpdateResult {
        let (next_x, next_y) = self.next_position(self.direction);
        if map.is(cell_at(next_x, next_y), CellType::Road) {
            self.x = next_x;
            self.y = next_y;
            return CarUpdateResult::Moved;
        }

        let here = self.cell();
        let reverse = self.direction.reverse();
        let options: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| d != reverse && map.is(here.step(d), CellType::Road))
            .collect();

        if let Some(&direction) = options.choose(rng) {
            self.direction = direction;
            let (next_x, next_y) = self.next_position(direction);
            self.x = next_x;
            self.y = next_y;
            return CarUpdateResult::Turned(direction);
        }

        self.teleport(map, rng)
    }

    /// Moves the car onto a random road cell with a random heading
    pub fn teleport<R: Rng + ?Sized>(&mut self, map: &CityMap, rng: &mut R) -> CarUpdateResult {
        let roads = map.roads();
        if roads.is_empty() {
            return CarUpdateResult::Stalled;
        }
        let index = rng.random_range(0..roads.len());
        let pos = roads[index];
        trace!("car at ({:.2}, {:.2}) boxed in, teleporting to {:?}", self.x, self.y, pos);
        self.road_index = index;
        self.x = pos.x as f32;
        self.y = pos.y as f32;
        self.direction = Direction::from_index(rng.random_range(0..Direction::ALL.len()));
        CarUpdateResult::Teleported
    }
}
