//! Terrain generation: rivers, lakes, forests and farmland
//!
//! Runs once on an empty map, before any roads are laid. Every generator only
//! claims empty cells, so later passes never overwrite earlier ones.

use std::collections::VecDeque;

use log::{debug, warn};
use rand::Rng;

use super::building::Building;
use super::config::{TerrainParams, WaterBodyKind};
use super::grid::CityMap;
use super::types::{CellType, Direction, GridPos, CARDINAL_COUNT};

/// What a terrain pass produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainReport {
    pub rivers: usize,
    pub lakes: usize,
    pub forests: usize,
    pub farms: usize,
}

/// Populates water, forest and farm regions in that order
pub fn generate_terrain<R: Rng + ?Sized>(
    map: &mut CityMap,
    params: &TerrainParams,
    rng: &mut R,
) -> TerrainReport {
    let mut report = TerrainReport::default();

    let water_bodies = draw_count(params.water_bodies, rng);
    for _ in 0..water_bodies {
        let Some(start) = seed_point(map, params.seed_margin, rng) else {
            break;
        };
        let kind = params.water_kind.unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                WaterBodyKind::River
            } else {
                WaterBodyKind::Lake
            }
        });
        match kind {
            WaterBodyKind::River => {
                let length = draw_count(params.river_length, rng);
                carve_river(map, start, length, params.river_bend_one_in, rng);
                report.rivers += 1;
            }
            WaterBodyKind::Lake => {
                let budget = draw_count(params.lake_size, rng);
                grow_region(
                    map,
                    start,
                    budget,
                    params.lake_expand_chance,
                    RegionFill::Water,
                    rng,
                );
                report.lakes += 1;
            }
        }
    }

    let forests = draw_count(params.forests, rng);
    for _ in 0..forests {
        let Some(start) = seed_point(map, params.seed_margin, rng) else {
            break;
        };
        let budget = draw_count(params.forest_size, rng);
        grow_region(
            map,
            start,
            budget,
            params.forest_expand_chance,
            RegionFill::Terrain {
                cell_type: CellType::Forest,
                variants: params.forest_variants,
            },
            rng,
        );
        report.forests += 1;
    }

    let farms = draw_count(params.farms, rng);
    for _ in 0..farms {
        let Some(start) = seed_point(map, params.seed_margin, rng) else {
            break;
        };
        let width = draw_count(params.farm_side, rng) as i32;
        let height = draw_count(params.farm_side, rng) as i32;
        stamp_farm(map, start, width, height, params.farm_variants, rng);
        report.farms += 1;
    }

    debug!(
        "terrain: {} rivers, {} lakes, {} forests, {} farms, {} water cells",
        report.rivers,
        report.lakes,
        report.forests,
        report.farms,
        map.water_cells().len()
    );
    report
}

/// How a region-growing pass claims cells
#[derive(Debug, Clone, Copy)]
pub enum RegionFill {
    Water,
    Terrain { cell_type: CellType, variants: u8 },
}

/// Randomized flood fill from `start`.
///
/// Pops cells off a FIFO frontier; a popped cell that is still empty and in
/// bounds is claimed and spends one unit of `budget`, then each of its four
/// neighbors is queued independently with probability `expand_chance`. Cells
/// may be queued more than once; the emptiness check at pop time discards the
/// repeats. Returns the claimed cells in claim order.
pub fn grow_region<R: Rng + ?Sized>(
    map: &mut CityMap,
    start: GridPos,
    budget: u32,
    expand_chance: f64,
    fill: RegionFill,
    rng: &mut R,
) -> Vec<GridPos> {
    if !(0.0..=1.0).contains(&expand_chance) {
        warn!("expand chance {expand_chance} outside [0, 1], clamping");
    }
    let expand_chance = if expand_chance.is_nan() {
        0.0
    } else {
        expand_chance.clamp(0.0, 1.0)
    };
    let mut remaining = budget;
    let mut claimed = Vec::new();
    let mut frontier = VecDeque::from([start]);

    while remaining > 0 {
        let Some(pos) = frontier.pop_front() else {
            break;
        };
        if !map.is_empty_cell(pos) {
            continue;
        }
        let taken = match fill {
            RegionFill::Water => map.claim_water(pos),
            RegionFill::Terrain {
                cell_type,
                variants,
            } => {
                let variant = rng.random_range(0..variants.max(1));
                map.claim_structure(pos, Building::terrain(cell_type, variant))
            }
        };
        if !taken {
            continue;
        }
        claimed.push(pos);
        remaining -= 1;

        for index in 0..CARDINAL_COUNT {
            if rng.random_bool(expand_chance) {
                frontier.push_back(pos.neighbor(index));
            }
        }
    }
    claimed
}

/// Biased random walk that stamps a 3×3 block of water at every step.
///
/// Bends only ever pick one of the four cardinal headings. The walk stops
/// early once it leaves the grid.
pub fn carve_river<R: Rng + ?Sized>(
    map: &mut CityMap,
    start: GridPos,
    length: u32,
    bend_one_in: u32,
    rng: &mut R,
) -> Vec<GridPos> {
    let mut claimed = Vec::new();
    let mut heading = Direction::from_index(rng.random_range(0..CARDINAL_COUNT));
    let mut current = start;

    for _ in 0..length {
        if rng.random_ratio(1, bend_one_in.max(1)) {
            let nudge = rng.random_range(0..3_i32) - 1;
            let turned = (heading.index() as i32 + nudge).rem_euclid(CARDINAL_COUNT as i32);
            heading = Direction::from_index(turned as usize);
        }

        for ox in -1..=1 {
            for oy in -1..=1 {
                let pos = GridPos::new(current.x + ox, current.y + oy);
                if map.claim_water(pos) {
                    claimed.push(pos);
                }
            }
        }

        current = current.step(heading);
        if !map.in_bounds(current) {
            break;
        }
    }
    claimed
}

/// Fills the empty cells of a `width`×`height` rectangle whose top-left
/// corner is `origin` with farmland
pub fn stamp_farm<R: Rng + ?Sized>(
    map: &mut CityMap,
    origin: GridPos,
    width: i32,
    height: i32,
    variants: u8,
    rng: &mut R,
) -> usize {
    let mut claimed = 0;
    for x in 0..width {
        for y in 0..height {
            let pos = GridPos::new(origin.x + x, origin.y + y);
            if !map.is_empty_cell(pos) {
                continue;
            }
            let variant = rng.random_range(0..variants.max(1));
            if map.claim_structure(pos, Building::terrain(CellType::Farm, variant)) {
                claimed += 1;
            }
        }
    }
    claimed
}

/// Uniform draw from an inclusive `(min, max)` pair. Inverted pairs yield `min`.
fn draw_count<R: Rng + ?Sized>((min, max): (u32, u32), rng: &mut R) -> u32 {
    if min >= max {
        min
    } else {
        rng.random_range(min..=max)
    }
}

/// Random seed point kept `margin` cells away from the edges where the grid
/// is large enough, anywhere on the grid otherwise
fn seed_point<R: Rng + ?Sized>(map: &CityMap, margin: i32, rng: &mut R) -> Option<GridPos> {
    let x = axis_coordinate(map.width(), margin, rng)?;
    let y = axis_coordinate(map.height(), margin, rng)?;
    Some(GridPos::new(x, y))
}

fn axis_coordinate<R: Rng + ?Sized>(len: i32, margin: i32, rng: &mut R) -> Option<i32> {
    if len <= 0 {
        return None;
    }
    let hi = (len - margin).min(len - 1);
    let (lo, hi) = if margin <= hi { (margin, hi) } else { (0, len - 1) };
    Some(rng.random_range(lo..=hi))
}
