//! Connectivity repair for smoothed cave maps
//!
//! Cellular automata leave isolated pockets behind. This pass guarantees that
//! the remaining open space is one region reachable from the map center with
//! corridors at least 3 cells wide.
//!
//! Algorithm:
//! 1. Carve a 3x3 open block at the center and start the flood fill there
//! 2. Flood fill with a 3x3 brush: a position is entered only when its whole
//!    3x3 block is open, so 1- and 2-wide gaps are never crossed
//! 3. Keep unreached single-cell holes that open onto exactly one neighbor,
//!    purely for looks (they are not actually reachable)
//! 4. Turn every other unreached open cell into wall
//!
//! The hole rule looks at each cell on its own, so two holes facing each
//! other survive together as a disconnected 2-cell pocket. Cells kept this
//! way are marked `Reach::Hole`.

use log::debug;

use crate::error::{ConfigError, GenerationError};
use crate::grid::{CaveMap, Cell};
use crate::params::MIN_MAP_SIDE;
use crate::tilemap::{Tilemap, MOORE_OFFSETS};

/// How the flood fill touched a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reach {
    /// Not touched by the flood fill.
    #[default]
    Unreached,
    /// Inside the 3x3 brush of a reached cell, but not a brush center itself.
    Adjacent,
    /// Center of a fully open 3x3 block entered by the flood fill.
    Reached,
    /// Unreached open cell kept by the hole rule.
    Hole,
}

impl Reach {
    /// Whether the seal pass leaves this cell open.
    pub fn is_kept(self) -> bool {
        self != Reach::Unreached
    }
}

/// Per-cell flood fill marks from one repair.
#[derive(Clone, Debug)]
pub struct AccessMap {
    marks: Tilemap<Reach>,
}

impl AccessMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            marks: Tilemap::new(width, height),
        }
    }

    /// Mark (x, y) reached. Returns false if it already was.
    fn mark_reached(&mut self, x: i32, y: i32) -> bool {
        match self.marks.get_signed_mut(x, y) {
            Some(mark) if *mark != Reach::Reached => {
                *mark = Reach::Reached;
                true
            }
            _ => false,
        }
    }

    /// Mark (x, y) adjacent. Out-of-range positions are skipped.
    fn mark_adjacent(&mut self, x: i32, y: i32) {
        if let Some(mark) = self.marks.get_signed_mut(x, y) {
            if *mark == Reach::Unreached {
                *mark = Reach::Adjacent;
            }
        }
    }

    fn mark_hole(&mut self, x: usize, y: usize) {
        self.marks.set(x, y, Reach::Hole);
    }

    pub fn get(&self, x: usize, y: usize) -> Reach {
        *self.marks.get(x, y)
    }

    pub fn is_reached(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Reach::Reached
    }

    pub fn reached_count(&self) -> usize {
        self.count(Reach::Reached)
    }

    pub fn hole_count(&self) -> usize {
        self.count(Reach::Hole)
    }

    fn count(&self, reach: Reach) -> usize {
        self.marks.as_slice().iter().filter(|&&m| m == reach).count()
    }
}

/// LIFO stack of positions waiting to be visited.
///
/// Capacity doubles when full. Growth goes through `try_reserve_exact` so an
/// allocation failure aborts the run with an error instead of a panic.
#[derive(Debug, Default)]
pub struct VisitStack {
    entries: Vec<(i32, i32)>,
}

impl VisitStack {
    const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: i32, y: i32) -> Result<(), GenerationError> {
        if self.entries.len() == self.entries.capacity() {
            let additional = self.entries.capacity().max(Self::INITIAL_CAPACITY);
            self.entries
                .try_reserve_exact(additional)
                .map_err(|_| GenerationError::OutOfMemory {
                    capacity: self.entries.capacity() + additional,
                })?;
        }
        self.entries.push((x, y));
        Ok(())
    }

    pub fn pop(&mut self) -> Option<(i32, i32)> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

/// Counts from one connectivity repair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConnectivityStats {
    /// Brush centers reached by the flood fill
    pub reached: usize,
    /// Single-cell holes kept open
    pub preserved_holes: usize,
    /// Open cells turned into wall
    pub sealed: usize,
}

/// Center of the seed block.
pub fn seed_center(map: &CaveMap) -> (i32, i32) {
    ((map.width() / 2) as i32, (map.height() / 2) as i32)
}

/// Force the 3x3 block at the map center open and return its center.
/// The map must be at least 3x3.
pub fn carve_seed(map: &mut CaveMap) -> (i32, i32) {
    let (cx, cy) = seed_center(map);
    for y in cy - 1..=cy + 1 {
        for x in cx - 1..=cx + 1 {
            map.set(x as usize, y as usize, Cell::Open);
        }
    }
    (cx, cy)
}

/// Thick-brush flood fill from `start`.
///
/// A position may be pushed several times before it is visited; the reached
/// mark deduplicates at pop time. Every position is visited at most once, so
/// the fill terminates.
pub fn flood_fill(map: &CaveMap, start: (i32, i32)) -> Result<AccessMap, GenerationError> {
    let mut access = AccessMap::new(map.width(), map.height());
    let mut stack = VisitStack::new();
    stack.push(start.0, start.1)?;

    while let Some((x, y)) = stack.pop() {
        if !access.mark_reached(x, y) {
            continue;
        }
        for &(dx, dy) in MOORE_OFFSETS.iter() {
            access.mark_adjacent(x + dx, y + dy);
        }
        for &(dx, dy) in MOORE_OFFSETS.iter() {
            let (nx, ny) = (x + dx, y + dy);
            if map.is_block_clear(nx, ny) {
                stack.push(nx, ny)?;
            }
        }
    }

    Ok(access)
}

/// Mark untouched open cells with exactly one open orthogonal neighbor as
/// holes, so single-cell dead ends survive the seal pass.
/// Returns the number of holes kept.
pub fn preserve_holes(map: &CaveMap, access: &mut AccessMap) -> usize {
    let mut preserved = 0;
    for y in 0..map.height() {
        for x in 0..map.width() {
            let (sx, sy) = (x as i32, y as i32);
            if map.is_open(sx, sy)
                && access.get(x, y) == Reach::Unreached
                && map.orthogonal_walls(sx, sy) == 3
            {
                access.mark_hole(x, y);
                preserved += 1;
            }
        }
    }
    preserved
}

/// Turn every open cell the flood fill never touched into wall.
/// Returns the number of cells sealed.
pub fn seal_unreachable(map: &mut CaveMap, access: &AccessMap) -> usize {
    let mut sealed = 0;
    for y in 0..map.height() {
        for x in 0..map.width() {
            if map.get(x, y).is_open() && access.get(x, y) == Reach::Unreached {
                map.set(x, y, Cell::Wall);
                sealed += 1;
            }
        }
    }
    sealed
}

/// Run the full repair in place: seed carve, flood fill, hole preservation, seal.
///
/// Maps smaller than the 3x3 seed block are rejected.
pub fn enforce_connectivity(
    map: &mut CaveMap,
) -> Result<(AccessMap, ConnectivityStats), GenerationError> {
    if map.width() < MIN_MAP_SIDE || map.height() < MIN_MAP_SIDE {
        return Err(ConfigError::InvalidDimensions {
            width: map.width(),
            height: map.height(),
            min: MIN_MAP_SIDE,
        }
        .into());
    }
    let start = carve_seed(map);
    let mut access = flood_fill(map, start)?;
    let reached = access.reached_count();
    let preserved_holes = preserve_holes(map, &mut access);
    let sealed = seal_unreachable(map, &access);

    debug!(
        "Connectivity: {} centers reached, {} holes kept, {} cells sealed",
        reached, preserved_holes, sealed
    );

    Ok((
        access,
        ConnectivityStats {
            reached,
            preserved_holes,
            sealed,
        },
    ))
}
