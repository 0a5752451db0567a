/// A bounded 2D tilemap stored row-major in a flat buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.index(x, y);
        &mut self.data[idx]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Check whether signed coordinates fall inside the map.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Look up signed coordinates. Returns `None` outside the map.
    pub fn get_signed(&self, x: i32, y: i32) -> Option<&T> {
        if self.in_bounds(x, y) {
            Some(self.get(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Mutable lookup of signed coordinates. Returns `None` outside the map.
    pub fn get_signed_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        if self.in_bounds(x, y) {
            Some(self.get_mut(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Row-major view of the underlying cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

// =============================================================================
// NEIGHBORHOOD OFFSETS
// =============================================================================

/// Orthogonal offsets (dx, dy) in tile-bit order: right, down, left, up.
pub const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// All 8 Moore neighbors (dx, dy): the 4 orthogonal ones first, then diagonals.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
];

/// The 3x3 block around a cell, center included.
pub const BLOCK_3X3_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut map = Tilemap::new_with(3, 2, 0u8);
        map.set(2, 0, 7);
        map.set(0, 1, 9);

        assert_eq!(map.as_slice(), &[0, 0, 7, 9, 0, 0]);
        assert_eq!(*map.get(2, 0), 7);
    }

    #[test]
    fn test_signed_lookup_outside_is_none() {
        let map = Tilemap::new_with(4, 4, 1u8);

        assert_eq!(map.get_signed(0, 0), Some(&1));
        assert_eq!(map.get_signed(-1, 0), None);
        assert_eq!(map.get_signed(0, -1), None);
        assert_eq!(map.get_signed(4, 0), None);
        assert_eq!(map.get_signed(0, 4), None);
    }

    #[test]
    fn test_iter_coordinates() {
        let map: Tilemap<u8> = Tilemap::new(3, 2);
        let coords: Vec<(usize, usize)> = map.iter().map(|(x, y, _)| (x, y)).collect();

        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }
}
