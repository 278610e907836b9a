//! Standalone city growth simulation module
//!
//! This module contains all the core simulation logic: terrain generation,
//! road building, city growth and traffic. It has no rendering dependencies;
//! a renderer reads `SimWorld` state between calls to `SimWorld::step`.

mod building;
mod car;
mod car_manager;
mod clock;
mod config;
mod grid;
mod growth;
mod road_network;
mod stats;
mod terrain;
mod types;
mod world;

pub use building::{Building, MAX_DENSITY};
pub use car::{cell_at, CarUpdateResult, SimCar};
pub use car_manager::{
    car_capacity, spawn_initial_cars, spawn_random_car, update_cars, TrafficReport,
    MAX_CAR_SPEED, MIN_CAR_SPEED, PASTEL_MAX, PASTEL_MIN, ROAD_CELLS_PER_CAR, SPAWN_CHANCE,
};
pub use clock::{SimClock, GROWTH_INTERVAL, WATER_ANIM_INTERVAL};
pub use config::{SimConfig, TerrainParams, WaterBodyKind};
pub use grid::CityMap;
pub use growth::{
    building_spots, choose_building_type, grow, mature_buildings, max_new_buildings,
    place_buildings, GrowthReport, Surroundings, BUILDING_GROWTH_STEP_DIVISOR,
    DENSITY_AGE_INTERVAL, PROXIMITY_RADIUS, ROAD_EXTENSION_INTERVAL, TREE_AGE_INTERVAL,
};
pub use road_network::{
    build_initial_network, component_count, extend_network, lay_arterials, lay_branch_roads,
    max_new_roads, road_spots, BRANCH_MAX_LENGTH, BRANCH_MIN_LENGTH, ROAD_GROWTH_STEP_DIVISOR,
};
pub use stats::CityStats;
pub use terrain::{carve_river, generate_terrain, grow_region, stamp_farm, RegionFill, TerrainReport};
pub use types::{
    BuildingStyle, CellType, Direction, GridPos, Rgb, CARDINAL_COUNT, DX, DY, WATER_ANIM_PHASES,
};
pub use world::{SimWorld, StepOutcome};
