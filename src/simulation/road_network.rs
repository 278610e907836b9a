//! Road network construction and incremental extension
//!
//! Roads live on the grid as `CellType::Road` cells; the ordered road list on
//! [`CityMap`] is appended to by every claim made here.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::grid::CityMap;
use super::types::{CellType, Direction, GridPos, CARDINAL_COUNT};

/// Shortest branch road laid at initialization
pub const BRANCH_MIN_LENGTH: u32 = 5;
/// Longest branch road laid at initialization
pub const BRANCH_MAX_LENGTH: u32 = 15;
/// Steps of simulation time per extra road cell allowed in one extension pass
pub const ROAD_GROWTH_STEP_DIVISOR: u64 = 100;

/// Road cells one extension pass may lay at `step`
pub fn max_new_roads(step: u64) -> usize {
    1 + (step / ROAD_GROWTH_STEP_DIVISOR) as usize
}

/// Row of the horizontal arterial
pub fn horizontal_arterial_row(map: &CityMap) -> i32 {
    map.height() / 2
}

/// Column of the vertical arterial
pub fn vertical_arterial_column(map: &CityMap) -> i32 {
    map.width() / 2
}

/// Lays the two full-span arterials through the middle of the grid, skipping
/// cells already taken by terrain. Returns how many road cells were claimed.
pub fn lay_arterials(map: &mut CityMap) -> usize {
    let row = horizontal_arterial_row(map);
    let column = vertical_arterial_column(map);
    let mut laid = 0;
    for x in 0..map.width() {
        if map.claim_road(GridPos::new(x, row)) {
            laid += 1;
        }
    }
    for y in 0..map.height() {
        if map.claim_road(GridPos::new(column, y)) {
            laid += 1;
        }
    }
    laid
}

/// Lays `count` branch roads off the arterials.
///
/// Even branches start on the horizontal arterial, odd ones on the vertical.
/// Each walks up to a random length in one cardinal direction and stops at
/// the first cell it cannot claim.
pub fn lay_branch_roads<R: Rng + ?Sized>(map: &mut CityMap, count: u32, rng: &mut R) -> usize {
    if map.width() <= 0 || map.height() <= 0 {
        return 0;
    }
    let row = horizontal_arterial_row(map);
    let column = vertical_arterial_column(map);
    let mut laid = 0;

    for branch in 0..count {
        let mut pos = if branch % 2 == 0 {
            GridPos::new(rng.random_range(0..map.width()), row)
        } else {
            GridPos::new(column, rng.random_range(0..map.height()))
        };
        let direction = Direction::from_index(rng.random_range(0..CARDINAL_COUNT));
        let length = rng.random_range(BRANCH_MIN_LENGTH..=BRANCH_MAX_LENGTH);

        for _ in 0..length {
            pos = pos.step(direction);
            if !map.claim_road(pos) {
                break;
            }
            laid += 1;
        }
    }
    laid
}

/// Arterials plus `branches` branch roads
pub fn build_initial_network<R: Rng + ?Sized>(
    map: &mut CityMap,
    branches: u32,
    rng: &mut R,
) -> usize {
    let arterial = lay_arterials(map);
    let branch = lay_branch_roads(map, branches, rng);
    debug!("initial roads: {arterial} arterial cells, {branch} branch cells");
    arterial + branch
}

/// Empty cells next to a structure that also touch an existing road.
/// Each cell appears once, sorted by coordinate.
pub fn road_spots(map: &CityMap) -> Vec<GridPos> {
    let mut spots = Vec::new();
    for pos in map.positions() {
        let Some(cell) = map.cell(pos) else {
            continue;
        };
        if !cell.is_structure() {
            continue;
        }
        for neighbor in pos.cardinal_neighbors() {
            if map.is_empty_cell(neighbor) && map.touches_road(neighbor) {
                spots.push(neighbor);
            }
        }
    }
    spots.sort_unstable();
    spots.dedup();
    spots
}

/// Grows the network toward buildings: claims up to [`max_new_roads`] of
/// the current [`road_spots`], chosen at random. Returns the new road cells.
pub fn extend_network<R: Rng + ?Sized>(map: &mut CityMap, step: u64, rng: &mut R) -> Vec<GridPos> {
    let mut spots = road_spots(map);
    if spots.is_empty() {
        return Vec::new();
    }
    spots.shuffle(rng);
    spots.truncate(max_new_roads(step));

    let added: Vec<GridPos> = spots
        .into_iter()
        .filter(|&pos| map.claim_road(pos))
        .collect();
    debug!("step {step}: extended road network by {} cells", added.len());
    added
}

/// Number of separate 4-connected road networks on the map
pub fn component_count(map: &CityMap) -> usize {
    map.connected_regions(CellType::Road)
}
