//! Occupancy grid for cave maps
//!
//! Every cell is either a wall or open floor. Coordinates outside the map
//! always read as wall, so edge cells behave as if the map were enclosed.

use crate::tilemap::{Tilemap, BLOCK_3X3_OFFSETS, ORTHOGONAL_OFFSETS};

/// A single occupancy cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn is_open(self) -> bool {
        self == Cell::Open
    }

    /// 1 for walls, 0 for open cells. Used for neighbor sums and tile bits.
    pub fn wall_value(self) -> u8 {
        match self {
            Cell::Wall => 1,
            Cell::Open => 0,
        }
    }
}

/// Boolean wall/open grid with a wall sentinel outside its bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveMap {
    cells: Tilemap<Cell>,
}

impl CaveMap {
    /// Create a map filled with a single cell value.
    pub fn new_with(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            cells: Tilemap::new_with(width, height, cell),
        }
    }

    /// Parse a map from rows of `#` (wall) and `.` (open).
    /// Any other character is treated as wall.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut map = Self::new_with(width, height, Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate().take(width) {
                if ch == '.' {
                    map.set(x, y, Cell::Open);
                }
            }
        }
        map
    }

    pub fn width(&self) -> usize {
        self.cells.width
    }

    pub fn height(&self) -> usize {
        self.cells.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        *self.cells.get(x, y)
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells.set(x, y, cell);
    }

    /// Read a cell at signed coordinates, with walls outside the map.
    pub fn cell_at(&self, x: i32, y: i32) -> Cell {
        self.cells.get_signed(x, y).copied().unwrap_or(Cell::Wall)
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_wall()
    }

    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.cell_at(x, y).is_open()
    }

    /// Number of walls in the 3x3 block centered on (x, y), center included.
    pub fn walls_in_block(&self, x: i32, y: i32) -> u8 {
        BLOCK_3X3_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.cell_at(x + dx, y + dy).wall_value())
            .sum()
    }

    /// True when all 9 cells of the 3x3 block centered on (x, y) are open.
    pub fn is_block_clear(&self, x: i32, y: i32) -> bool {
        BLOCK_3X3_OFFSETS
            .iter()
            .all(|&(dx, dy)| self.is_open(x + dx, y + dy))
    }

    /// Number of walls among the 4 orthogonal neighbors.
    pub fn orthogonal_walls(&self, x: i32, y: i32) -> u8 {
        ORTHOGONAL_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.cell_at(x + dx, y + dy).wall_value())
            .sum()
    }

    pub fn open_count(&self) -> usize {
        self.cells.as_slice().iter().filter(|c| c.is_open()).count()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().map(|(x, y, &c)| (x, y, c))
    }

    pub fn as_tilemap(&self) -> &Tilemap<Cell> {
        &self.cells
    }
}

impl From<Tilemap<Cell>> for CaveMap {
    fn from(cells: Tilemap<Cell>) -> Self {
        Self { cells }
    }
}
