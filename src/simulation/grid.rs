//! The city map: cell tags, building records, and the road and water lists
//!
//! All writes to cell tags go through the `claim_*` methods here, so the road
//! and water sequences can never drift from the grid.

use petgraph::unionfind::UnionFind;

use super::building::Building;
use super::types::{CellType, GridPos};

/// Fixed-size cellular grid plus the collections derived from it
#[derive(Debug, Clone)]
pub struct CityMap {
    width: i32,
    height: i32,
    /// Column-major cell tags
    cells: Vec<CellType>,
    buildings: Vec<Building>,
    /// Road cells in the order they were laid
    roads: Vec<GridPos>,
    /// Water cells in the order they were generated
    water_cells: Vec<GridPos>,
}

impl CityMap {
    /// An all-empty map. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![CellType::Empty; len],
            buildings: vec![Building::default(); len],
            roads: Vec::new(),
            water_cells: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bounds predicate. Everything else in this type checks it first.
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.x as usize * self.height as usize + pos.y as usize)
        } else {
            None
        }
    }

    /// Tag at `pos`, or `None` outside the grid
    pub fn cell(&self, pos: GridPos) -> Option<CellType> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// True when `pos` is inside the grid and tagged `cell_type`
    pub fn is(&self, pos: GridPos, cell_type: CellType) -> bool {
        self.cell(pos) == Some(cell_type)
    }

    pub fn is_empty_cell(&self, pos: GridPos) -> bool {
        self.is(pos, CellType::Empty)
    }

    pub fn building(&self, pos: GridPos) -> Option<&Building> {
        self.index(pos).map(|i| &self.buildings[i])
    }

    /// Record access for the growth pass. Callers must leave `cell_type` alone.
    pub(crate) fn building_mut(&mut self, pos: GridPos) -> Option<&mut Building> {
        let index = self.index(pos)?;
        Some(&mut self.buildings[index])
    }

    pub fn roads(&self) -> &[GridPos] {
        &self.roads
    }

    pub fn water_cells(&self) -> &[GridPos] {
        &self.water_cells
    }

    /// Every coordinate in column-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| GridPos::new(x, y)))
    }

    /// Row-major copy of the tags, one `Vec` per row
    pub fn rows(&self) -> Vec<Vec<CellType>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| self.cells[x as usize * self.height as usize + y as usize])
                    .collect()
            })
            .collect()
    }

    /// Tags a cell as road and records it. Only empty cells can be claimed.
    pub fn claim_road(&mut self, pos: GridPos) -> bool {
        if !self.set_if_empty(pos, CellType::Road) {
            return false;
        }
        self.roads.push(pos);
        true
    }

    pub fn claim_water(&mut self, pos: GridPos) -> bool {
        if !self.set_if_empty(pos, CellType::Water) {
            return false;
        }
        self.water_cells.push(pos);
        true
    }

    /// Claims an empty cell for a structure and installs its record
    pub fn claim_structure(&mut self, pos: GridPos, building: Building) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        if self.cells[index] != CellType::Empty || !building.cell_type.is_structure() {
            return false;
        }
        self.cells[index] = building.cell_type;
        self.buildings[index] = building;
        true
    }

    fn set_if_empty(&mut self, pos: GridPos, cell_type: CellType) -> bool {
        match self.index(pos) {
            Some(index) if self.cells[index] == CellType::Empty => {
                self.cells[index] = cell_type;
                true
            }
            _ => false,
        }
    }

    /// Counts 4-neighbors of `pos` tagged `cell_type`
    pub fn count_neighbors_of_type(&self, pos: GridPos, cell_type: CellType) -> usize {
        pos.cardinal_neighbors()
            .filter(|&n| self.is(n, cell_type))
            .count()
    }

    /// Counts cells tagged `cell_type` in the `(2r+1)²` square around `pos`,
    /// not counting `pos` itself
    pub fn count_in_radius(&self, pos: GridPos, cell_type: CellType, radius: i32) -> usize {
        let mut count = 0;
        for i in -radius..=radius {
            for j in -radius..=radius {
                if i == 0 && j == 0 {
                    continue;
                }
                if self.is(GridPos::new(pos.x + i, pos.y + j), cell_type) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn any_in_radius(&self, pos: GridPos, cell_type: CellType, radius: i32) -> bool {
        self.count_in_radius(pos, cell_type, radius) > 0
    }

    pub fn count_of(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell_type).count()
    }

    /// Number of 4-connected regions of `cell_type`
    pub fn connected_regions(&self, cell_type: CellType) -> usize {
        let mut sets = UnionFind::<usize>::new(self.cells.len());
        for pos in self.positions() {
            if !self.is(pos, cell_type) {
                continue;
            }
            let Some(here) = self.index(pos) else {
                continue;
            };
            // right and down cover every edge once
            for index in [2, 1] {
                let next = pos.neighbor(index);
                if self.is(next, cell_type) {
                    if let Some(there) = self.index(next) {
                        sets.union(here, there);
                    }
                }
            }
        }
        let mut roots: Vec<usize> = self
            .positions()
            .filter(|&pos| self.is(pos, cell_type))
            .filter_map(|pos| self.index(pos))
            .map(|index| sets.find(index))
            .collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }

    /// Whether a road neighbors `pos` in one of the cardinal directions
    pub fn touches_road(&self, pos: GridPos) -> bool {
        self.count_neighbors_of_type(pos, CellType::Road) > 0
    }
}
