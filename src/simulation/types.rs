//! Core types for the city simulation
//!
//! Cell tags, building styles, directions and the shared offset table.

/// Horizontal neighbor offsets. Indices 0..4 are cardinal, 4..8 diagonal.
pub const DX: [i32; 8] = [-1, 0, 1, 0, -1, -1, 1, 1];

/// Vertical neighbor offsets, paired with [`DX`] by index.
pub const DY: [i32; 8] = [0, 1, 0, -1, -1, 1, 1, -1];

/// Number of leading entries in the offset table that are cardinal
pub const CARDINAL_COUNT: usize = 4;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    #[default]
    Empty,
    Road,
    Residential,
    Commercial,
    Industrial,
    Water,
    Park,
    PowerPlant,
    Government,
    Forest,
    Farm,
}

impl CellType {
    /// True for every tag that carries a meaningful building record.
    pub fn is_structure(self) -> bool {
        !matches!(self, CellType::Empty | CellType::Road | CellType::Water)
    }

    /// Zoned types that densify as they age
    pub fn densifies(self) -> bool {
        matches!(
            self,
            CellType::Residential | CellType::Commercial | CellType::Industrial
        )
    }

    /// Character used by the terminal map
    pub fn map_char(self) -> char {
        match self {
            CellType::Empty => '.',
            CellType::Road => '#',
            CellType::Residential => 'R',
            CellType::Commercial => 'C',
            CellType::Industrial => 'I',
            CellType::Water => '~',
            CellType::Park => 'P',
            CellType::PowerPlant => 'E',
            CellType::Government => 'G',
            CellType::Forest => 'T',
            CellType::Farm => 'F',
        }
    }
}

/// Architectural style of a building, used by renderers for palette choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildingStyle {
    #[default]
    Basic,
    Modern,
    Historic,
    Fancy,
}

impl BuildingStyle {
    pub const ALL: [BuildingStyle; 4] = [
        BuildingStyle::Basic,
        BuildingStyle::Modern,
        BuildingStyle::Historic,
        BuildingStyle::Fancy,
    ];
}

/// A cardinal heading. Discriminants index the offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Maps an index into the cardinal part of the offset table.
    /// Values wrap modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % CARDINAL_COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Integer step for this heading
    pub fn offset(self) -> (i32, i32) {
        (DX[self.index()], DY[self.index()])
    }
}

/// An integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbor at `index` in the offset table
    pub fn neighbor(self, index: usize) -> GridPos {
        GridPos::new(self.x + DX[index], self.y + DY[index])
    }

    pub fn step(self, direction: Direction) -> GridPos {
        self.neighbor(direction.index())
    }

    pub fn cardinal_neighbors(self) -> impl Iterator<Item = GridPos> {
        (0..CARDINAL_COUNT).map(move |index| self.neighbor(index))
    }
}

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Number of phases in the water shimmer cycle
pub const WATER_ANIM_PHASES: u8 = 8;
