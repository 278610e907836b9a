//! Main simulation world that ties everything together
//!
//! `SimWorld` owns the map, the cars, the clock and the random source. It is
//! the only writer of simulation state; renderers read it between steps
//! through the accessors below.

use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::building::Building;
use super::car::SimCar;
use super::car_manager::{self, TrafficReport};
use super::clock::SimClock;
use super::config::{SimConfig, TerrainParams};
use super::grid::CityMap;
use super::growth::{self, GrowthReport};
use super::road_network;
use super::stats::CityStats;
use super::terrain;
use super::types::{CellType, GridPos};

/// What a call to [`SimWorld::step`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced {
        /// Step number that was simulated
        step: u64,
        traffic: TrafficReport,
        /// Present on growth steps only
        growth: Option<GrowthReport>,
    },
    /// The step cap was reached; nothing changed
    Halted,
}

/// The main simulation world
pub struct SimWorld {
    config: SimConfig,
    map: CityMap,
    cars: Vec<SimCar>,
    clock: SimClock,
    rng: StdRng,
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl SimWorld {
    /// Validates `config` and generates a fresh city from it
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("invalid simulation config")?;
        let mut world = Self::blank_with_config(config);
        world.populate();
        Ok(world)
    }

    /// An all-empty world with no terrain, roads or cars. Useful for
    /// hand-built scenarios.
    pub fn blank(width: i32, height: i32, seed: u64) -> Self {
        let config = SimConfig {
            terrain: TerrainParams::barren(),
            initial_roads: 0,
            initial_cars: 0,
            ..SimConfig::default()
        }
        .with_size(width, height)
        .with_seed(seed);
        Self::blank_with_config(config)
    }

    fn blank_with_config(config: SimConfig) -> Self {
        Self {
            map: CityMap::new(config.width, config.height),
            cars: Vec::new(),
            clock: SimClock::new(config.max_steps, Instant::now()),
            rng: make_rng(config.seed),
            config,
        }
    }

    /// Rebuilds terrain, roads and cars for a `width`×`height` grid,
    /// discarding all previous state. The same seed yields the same city.
    pub fn initialize(&mut self, width: i32, height: i32, seed: Option<u64>) -> Result<()> {
        let config = SimConfig {
            width,
            height,
            seed,
            ..self.config.clone()
        };
        *self = Self::new(config)?;
        Ok(())
    }

    fn populate(&mut self) {
        terrain::generate_terrain(&mut self.map, &self.config.terrain, &mut self.rng);
        road_network::build_initial_network(&mut self.map, self.config.initial_roads, &mut self.rng);
        car_manager::spawn_initial_cars(
            &mut self.cars,
            &self.map,
            self.config.initial_cars,
            &mut self.rng,
        );
        info!(
            "initialized {}x{} city: {} road cells, {} water cells, {} cars",
            self.map.width(),
            self.map.height(),
            self.map.roads().len(),
            self.map.water_cells().len(),
            self.cars.len()
        );
    }

    /// Advances the simulation by one tick.
    ///
    /// Cars always move; the city grows on every third step. Once the step cap
    /// is reached this returns [`StepOutcome::Halted`] and changes nothing.
    pub fn step(&mut self) -> StepOutcome {
        if self.clock.is_finished() {
            return StepOutcome::Halted;
        }
        let step = self.clock.step();

        self.clock.advance_water_animation(Instant::now());
        let traffic = car_manager::update_cars(&mut self.cars, &self.map, &mut self.rng);
        let growth = if self.clock.is_growth_step() {
            Some(growth::grow(&mut self.map, step, &mut self.rng))
        } else {
            None
        };

        self.clock.advance();
        StepOutcome::Advanced {
            step,
            traffic,
            growth,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &CityMap {
        &self.map
    }

    /// Mutable access for building scenarios by hand. The public mutators on
    /// [`CityMap`] only claim empty cells, so the road and water lists and
    /// the building records stay in step with the grid.
    pub fn map_mut(&mut self) -> &mut CityMap {
        &mut self.map
    }

    /// Row-major snapshot of every cell tag
    pub fn grid(&self) -> Vec<Vec<CellType>> {
        self.map.rows()
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<CellType> {
        self.map.cell(GridPos::new(x, y))
    }

    pub fn building(&self, x: i32, y: i32) -> Option<&Building> {
        self.map.building(GridPos::new(x, y))
    }

    pub fn roads(&self) -> &[GridPos] {
        self.map.roads()
    }

    pub fn water_cells(&self) -> &[GridPos] {
        self.map.water_cells()
    }

    pub fn cars(&self) -> &[SimCar] {
        &self.cars
    }

    pub fn add_car(&mut self, car: SimCar) {
        self.cars.push(car);
    }

    /// Current water animation phase in `0..8`
    pub fn water_anim_phase(&self) -> u8 {
        self.clock.water_phase()
    }

    pub fn current_step(&self) -> u64 {
        self.clock.step()
    }

    pub fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }

    pub fn stats(&self) -> CityStats {
        CityStats::collect(self)
    }

    pub fn print_summary(&self) {
        println!("=== City Status ===");
        println!("{}", self.stats());
    }

    /// Draw a visual map of the city in the terminal
    pub fn draw_map(&self) {
        let mut rows: Vec<Vec<char>> = self
            .map
            .rows()
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, &cell)| {
                        let glyph = cell.map_char();
                        let sparse = self
                            .map
                            .building(GridPos::new(x as i32, y as i32))
                            .is_some_and(|b| cell.densifies() && b.density <= 1);
                        if sparse {
                            glyph.to_ascii_lowercase()
                        } else {
                            glyph
                        }
                    })
                    .collect()
            })
            .collect();

        for car in &self.cars {
            let pos = car.cell();
            if self.map.in_bounds(pos) {
                rows[pos.y as usize][pos.x as usize] = 'o';
            }
        }

        println!("\n=== City Map (step {}) ===", self.clock.step());
        println!(
            "Legend: #=Road ~=Water R/C/I=Zoned (lowercase=low density) P=Park T=Forest F=Farm o=Car"
        );
        println!();
        for row in &rows {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }

    /// Checks the cross-collection invariants: the road list and the road
    /// tags describe the same cells, water cells are tagged water, and cells
    /// without structures carry empty building records.
    pub fn is_consistent(&self) -> bool {
        let map = &self.map;
        let roads_tagged = map.roads().iter().all(|&pos| map.is(pos, CellType::Road));
        let road_count_matches = map.count_of(CellType::Road) == map.roads().len();
        let water_tagged = map
            .water_cells()
            .iter()
            .all(|&pos| map.is(pos, CellType::Water));
        let records_clean = map.positions().all(|pos| match map.cell(pos) {
            Some(cell) if !cell.is_structure() => map
                .building(pos)
                .is_some_and(|b| b.cell_type == CellType::Empty),
            _ => true,
        });
        roads_tagged && road_count_matches && water_tagged && records_clean
    }
}
