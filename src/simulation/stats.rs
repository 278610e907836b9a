//! Summary statistics for a running city

use std::fmt;

use log::info;

use super::types::CellType;
use super::world::SimWorld;

/// Point-in-time counts over the whole city
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityStats {
    pub step: u64,
    pub residential: usize,
    pub commercial: usize,
    pub industrial: usize,
    pub parks: usize,
    pub forest: usize,
    pub farmland: usize,
    pub water: usize,
    pub road_cells: usize,
    /// Separate 4-connected road networks
    pub road_networks: usize,
    /// Separate 4-connected water bodies
    pub water_bodies: usize,
    pub cars: usize,
    /// Mean density over residential, commercial and industrial lots
    pub mean_density: f32,
}

impl CityStats {
    pub fn collect(world: &SimWorld) -> Self {
        let map = world.map();
        let mut density_sum = 0u32;
        let mut zoned = 0u32;
        for pos in map.positions() {
            if let Some(building) = map.building(pos) {
                if building.cell_type.densifies() {
                    density_sum += u32::from(building.density);
                    zoned += 1;
                }
            }
        }

        Self {
            step: world.current_step(),
            residential: map.count_of(CellType::Residential),
            commercial: map.count_of(CellType::Commercial),
            industrial: map.count_of(CellType::Industrial),
            parks: map.count_of(CellType::Park),
            forest: map.count_of(CellType::Forest),
            farmland: map.count_of(CellType::Farm),
            water: map.count_of(CellType::Water),
            road_cells: map.roads().len(),
            road_networks: map.connected_regions(CellType::Road),
            water_bodies: map.connected_regions(CellType::Water),
            cars: world.cars().len(),
            mean_density: if zoned > 0 {
                density_sum as f32 / zoned as f32
            } else {
                0.0
            },
        }
    }

    /// Buildings placed by growth, parks included
    pub fn total_buildings(&self) -> usize {
        self.residential + self.commercial + self.industrial + self.parks
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Steps simulated: {}", self.step);
        info!("Total buildings: {}", self.total_buildings());
        info!(
            "Residential/Commercial/Industrial/Parks: {}/{}/{}/{}",
            self.residential, self.commercial, self.industrial, self.parks
        );
        info!("Mean density: {:.2}", self.mean_density);
        info!(
            "Road cells: {} in {} networks",
            self.road_cells, self.road_networks
        );
        info!("Active cars: {}", self.cars);
    }
}

impl fmt::Display for CityStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Step: {}", self.step)?;
        writeln!(
            f,
            "  Buildings: {} (R {} / C {} / I {} / P {}), mean density {:.2}",
            self.total_buildings(),
            self.residential,
            self.commercial,
            self.industrial,
            self.parks,
            self.mean_density
        )?;
        writeln!(
            f,
            "  Terrain: {} water cells in {} bodies, {} forest, {} farmland",
            self.water, self.water_bodies, self.forest, self.farmland
        )?;
        writeln!(
            f,
            "  Roads: {} cells in {} networks",
            self.road_cells, self.road_networks
        )?;
        write!(f, "  Cars: {}", self.cars)
    }
}
