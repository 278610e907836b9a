//! City growth: zoning new buildings along roads, maturing existing ones, and
//! periodically extending the road network toward them

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::building::Building;
use super::grid::CityMap;
use super::road_network;
use super::types::{BuildingStyle, CellType, GridPos};

/// Steps of simulation time per extra building allowed in one growth pass
pub const BUILDING_GROWTH_STEP_DIVISOR: u64 = 50;
/// The road network is extended on growth passes whose step is a multiple of this
pub const ROAD_EXTENSION_INTERVAL: u64 = 10;
/// Radius of the square scanned for attractive surroundings
pub const PROXIMITY_RADIUS: i32 = 3;

/// Percentile rolls below this zone residential
pub const RESIDENTIAL_ROLL: u32 = 60;
/// Percentile rolls below this (and not residential) zone commercial
pub const COMMERCIAL_ROLL: u32 = 85;
/// Nearby water forces residential for rolls below this
pub const WATERFRONT_ROLL: u32 = 80;
/// Nearby parks or forest force residential for rolls below this
pub const GREENSPACE_ROLL: u32 = 75;
/// Rolls above this become parks once the city is old enough
pub const PARK_ROLL: u32 = 95;
/// Parks are only zoned after this step
pub const PARK_MIN_STEP: u64 = 50;

pub const BUILDING_VARIANTS: u8 = 5;
pub const NEW_TREE_CHANCE: f64 = 0.40;

/// Age interval (in ticks) at which a building may gain a density tier
pub const DENSITY_AGE_INTERVAL: u64 = 20;
pub const DENSITY_CHANCE: f64 = 0.60;
/// Age interval (in ticks) at which a house may grow a tree
pub const TREE_AGE_INTERVAL: u64 = 30;
pub const TREE_CHANCE: f64 = 0.40;

/// Buildings one growth pass may place at `step`
pub fn max_new_buildings(step: u64) -> usize {
    1 + (step / BUILDING_GROWTH_STEP_DIVISOR) as usize
}

/// Features near a candidate lot that sway its zoning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surroundings {
    pub near_water: bool,
    /// A park or forest is nearby
    pub near_green: bool,
}

impl Surroundings {
    pub fn scan(map: &CityMap, pos: GridPos) -> Self {
        Self {
            near_water: map.any_in_radius(pos, CellType::Water, PROXIMITY_RADIUS),
            near_green: map.any_in_radius(pos, CellType::Park, PROXIMITY_RADIUS)
                || map.any_in_radius(pos, CellType::Forest, PROXIMITY_RADIUS),
        }
    }
}

/// Zoning decision for a percentile `roll` in `0..=100`.
///
/// The base split is residential/commercial/industrial; attractive
/// surroundings then pull low rolls toward housing, and the highest rolls
/// become parks once the city has been growing for a while.
pub fn choose_building_type(roll: u32, surroundings: Surroundings, step: u64) -> CellType {
    let mut cell_type = if roll < RESIDENTIAL_ROLL {
        CellType::Residential
    } else if roll < COMMERCIAL_ROLL {
        CellType::Commercial
    } else {
        CellType::Industrial
    };

    if surroundings.near_water && roll < WATERFRONT_ROLL {
        cell_type = CellType::Residential;
    }
    if surroundings.near_green && roll < GREENSPACE_ROLL {
        cell_type = CellType::Residential;
    }
    if roll > PARK_ROLL && step > PARK_MIN_STEP {
        cell_type = CellType::Park;
    }
    cell_type
}

/// Empty cells 4-adjacent to any road, each listed once
pub fn building_spots(map: &CityMap) -> Vec<GridPos> {
    let mut spots: Vec<GridPos> = map
        .roads()
        .iter()
        .flat_map(|road| road.cardinal_neighbors())
        .filter(|&pos| map.is_empty_cell(pos))
        .collect();
    spots.sort_unstable();
    spots.dedup();
    spots
}

/// What one growth pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrowthReport {
    pub step: u64,
    /// Lots zoned this pass, in placement order
    pub buildings: Vec<GridPos>,
    pub densified: usize,
    pub trees_planted: usize,
    /// Road cells laid this pass
    pub roads: Vec<GridPos>,
}

/// Runs one growth pass at simulation step `step`
pub fn grow<R: Rng + ?Sized>(map: &mut CityMap, step: u64, rng: &mut R) -> GrowthReport {
    let mut report = GrowthReport {
        step,
        ..GrowthReport::default()
    };

    report.buildings = place_buildings(map, step, rng);
    let (densified, trees_planted) = mature_buildings(map, rng);
    report.densified = densified;
    report.trees_planted = trees_planted;

    if step % ROAD_EXTENSION_INTERVAL == 0 {
        report.roads = road_network::extend_network(map, step, rng);
    }

    debug!(
        "step {}: {} new buildings, {} densified, {} trees, {} road cells",
        step,
        report.buildings.len(),
        report.densified,
        report.trees_planted,
        report.roads.len()
    );
    report
}

/// Zones up to [`max_new_buildings`] random lots next to roads
pub fn place_buildings<R: Rng + ?Sized>(
    map: &mut CityMap,
    step: u64,
    rng: &mut R,
) -> Vec<GridPos> {
    let mut spots = building_spots(map);
    spots.shuffle(rng);
    spots.truncate(max_new_buildings(step));

    let mut placed = Vec::with_capacity(spots.len());
    for pos in spots {
        let roll = rng.random_range(0..=100);
        let cell_type = choose_building_type(roll, Surroundings::scan(map, pos), step);
        let style = BuildingStyle::ALL[rng.random_range(0..BuildingStyle::ALL.len())];
        let variant = rng.random_range(0..BUILDING_VARIANTS);
        let has_tree = matches!(cell_type, CellType::Residential | CellType::Commercial)
            && rng.random_bool(NEW_TREE_CHANCE);

        if map.claim_structure(pos, Building::new(cell_type, style, variant, has_tree)) {
            placed.push(pos);
        }
    }
    placed
}

/// Ages every structure by one tick. Returns `(densified, trees_planted)`.
pub fn mature_buildings<R: Rng + ?Sized>(map: &mut CityMap, rng: &mut R) -> (usize, usize) {
    let mut densified = 0;
    let mut trees_planted = 0;

    for x in 0..map.width() {
        for y in 0..map.height() {
            let pos = GridPos::new(x, y);
            if !map.cell(pos).is_some_and(CellType::is_structure) {
                continue;
            }
            let Some(building) = map.building_mut(pos) else {
                continue;
            };
            building.age = building.age.saturating_add(1);

            if building.age % DENSITY_AGE_INTERVAL == 0
                && building.can_densify()
                && rng.random_bool(DENSITY_CHANCE)
            {
                building.densify();
                densified += 1;
            }

            if !building.has_tree
                && building.cell_type == CellType::Residential
                && building.age % TREE_AGE_INTERVAL == 0
                && rng.random_bool(TREE_CHANCE)
            {
                building.has_tree = true;
                trees_planted += 1;
            }
        }
    }
    (densified, trees_planted)
}
