//! Configuration surface for the city simulation

use anyhow::{bail, Result};

/// Default grid width in cells (1280 px at 16 px per cell)
pub const DEFAULT_WIDTH: i32 = 80;
/// Default grid height in cells (720 px at 16 px per cell)
pub const DEFAULT_HEIGHT: i32 = 45;
pub const DEFAULT_CELL_SIZE: u32 = 16;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 300;
pub const DEFAULT_INITIAL_ROADS: u32 = 30;
pub const DEFAULT_INITIAL_CARS: u32 = 15;
pub const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Top-level simulation settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    /// Pixels per cell. Only renderers read this.
    pub cell_size: u32,
    /// Wall-clock delay between steps when running in real time
    pub tick_interval_ms: u64,
    /// Branch roads laid off the arterials at initialization
    pub initial_roads: u32,
    pub initial_cars: u32,
    /// The clock refuses to advance past this step
    pub max_steps: u64,
    /// Seed for reproducible runs; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub terrain: TerrainParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_roads: DEFAULT_INITIAL_ROADS,
            initial_cars: DEFAULT_INITIAL_CARS,
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
            terrain: TerrainParams::default(),
        }
    }
}

impl SimConfig {
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            bail!(
                "grid dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.cell_size == 0 {
            bail!("cell size must be at least one pixel");
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be at least one millisecond");
        }
        self.terrain.validate()
    }
}

/// Kind of water body the terrain generator lays down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterBodyKind {
    River,
    Lake,
}

/// Knobs for the terrain generator. Ranges are inclusive `(min, max)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    pub water_bodies: (u32, u32),
    /// Forces every water body to one kind instead of a coin flip
    pub water_kind: Option<WaterBodyKind>,
    pub river_length: (u32, u32),
    /// A river bends on average once every this many steps
    pub river_bend_one_in: u32,
    pub lake_size: (u32, u32),
    pub lake_expand_chance: f64,
    pub forests: (u32, u32),
    pub forest_size: (u32, u32),
    pub forest_expand_chance: f64,
    pub forest_variants: u8,
    pub farms: (u32, u32),
    pub farm_side: (u32, u32),
    pub farm_variants: u8,
    /// Distance from the grid edge kept clear when picking seed points
    pub seed_margin: i32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            water_bodies: (1, 3),
            water_kind: None,
            river_length: (15, 34),
            river_bend_one_in: 5,
            lake_size: (20, 40),
            lake_expand_chance: 0.70,
            forests: (2, 5),
            forest_size: (10, 30),
            forest_expand_chance: 0.60,
            forest_variants: 3,
            farms: (1, 3),
            farm_side: (5, 10),
            farm_variants: 3,
            seed_margin: 5,
        }
    }
}

impl TerrainParams {
    /// Terrain with nothing on it
    pub fn barren() -> Self {
        Self {
            water_bodies: (0, 0),
            forests: (0, 0),
            farms: (0, 0),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("water_bodies", self.water_bodies),
            ("river_length", self.river_length),
            ("lake_size", self.lake_size),
            ("forests", self.forests),
            ("forest_size", self.forest_size),
            ("farms", self.farms),
            ("farm_side", self.farm_side),
        ];
        for (name, (min, max)) in ranges {
            if min > max {
                bail!("terrain range {name} is inverted: {min} > {max}");
            }
        }
        for (name, chance) in [
            ("lake_expand_chance", self.lake_expand_chance),
            ("forest_expand_chance", self.forest_expand_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                bail!("terrain probability {name} must lie in [0, 1], got {chance}");
            }
        }
        if self.river_bend_one_in == 0 {
            bail!("river_bend_one_in must be at least 1");
        }
        if self.forest_variants == 0 || self.farm_variants == 0 {
            bail!("terrain variant counts must be at least 1");
        }
        if self.seed_margin < 0 {
            bail!("seed_margin cannot be negative");
        }
        Ok(())
    }
}
