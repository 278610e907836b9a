//! Per-cell building records
//!
//! Every cell has one. Only cells whose tag is a structure (see
//! [`CellType::is_structure`]) carry meaningful data.

use super::types::{BuildingStyle, CellType};

/// Highest density tier a building can reach
pub const MAX_DENSITY: u8 = 3;

/// Metadata attached to a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Building {
    pub cell_type: CellType,
    /// 1..=3 for placed buildings, 0 for terrain and empty records
    pub density: u8,
    /// Ticks since placement
    pub age: u64,
    pub style: BuildingStyle,
    /// Visual sub-selection within a style
    pub variant: u8,
    pub has_tree: bool,
}

impl Building {
    /// A freshly zoned building
    pub fn new(cell_type: CellType, style: BuildingStyle, variant: u8, has_tree: bool) -> Self {
        Self {
            cell_type,
            density: 1,
            age: 0,
            style,
            variant,
            has_tree,
        }
    }

    /// A terrain feature such as forest or farmland
    pub fn terrain(cell_type: CellType, variant: u8) -> Self {
        Self {
            cell_type,
            variant,
            ..Self::default()
        }
    }

    pub fn can_densify(&self) -> bool {
        self.cell_type.densifies() && self.density < MAX_DENSITY
    }

    /// Bumps density by one tier, saturating at [`MAX_DENSITY`]
    pub fn densify(&mut self) {
        if self.can_densify() {
            self.density += 1;
        }
    }
}
