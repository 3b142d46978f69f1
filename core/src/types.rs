use serde::{Deserialize, Serialize};

/// Single coordinate axis, signed so that off-board neighbors can be expressed.
pub type Coord = i32;

/// Count type used for bomb counts and total-tile counts.
pub type TileCount = u32;

/// Grid coordinates, `x` is the row (vertical extent) and `y` the column (horizontal extent).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub(crate) fn offset(self, (dx, dy): (Coord, Coord)) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self { x, y }
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    /// Callers must have validated the position as non-negative.
    fn to_nd_index(self) -> Self::Output {
        [self.x as usize, self.y as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> TileCount {
    let a = if a > 0 { a as TileCount } else { 0 };
    let b = if b > 0 { b as TileCount } else { 0 };
    a.saturating_mul(b)
}

/// Tile count of a `v_tiles × h_tiles` board, `None` when either side is not
/// positive or the count does not fit in [`TileCount`].
pub fn checked_area(h_tiles: Coord, v_tiles: Coord) -> Option<TileCount> {
    if h_tiles <= 0 || v_tiles <= 0 {
        return None;
    }
    TileCount::try_from(h_tiles)
        .ok()?
        .checked_mul(TileCount::try_from(v_tiles).ok()?)
}

/// Whether `p` is non-negative and, for each bound given, below it.
///
/// `bounds_h` limits `y`, `bounds_v` limits `x`.
pub fn is_valid_position(p: Position, bounds_h: Option<Coord>, bounds_v: Option<Coord>) -> bool {
    if p.x < 0 || p.y < 0 {
        return false;
    }
    if bounds_v.is_some_and(|v| p.x >= v) {
        return false;
    }
    if bounds_h.is_some_and(|h| p.y >= h) {
        return false;
    }
    true
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, 1),  // Top-Left
    (0, 1),   // Top
    (1, 1),   // Top-Right
    (-1, 0),  // Left
    (1, 0),   // Right
    (-1, -1), // Bottom-Left
    (0, -1),  // Bottom
    (1, -1),  // Bottom-Right
];

/// Iterates the 8 neighbors of a position in a fixed order, skipping the ones
/// that fail [`is_valid_position`] for the given bounds.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Position,
    bounds_h: Option<Coord>,
    bounds_v: Option<Coord>,
    index: u8,
}

impl NeighborIter {
    /// Neighbors clipped to a `v_tiles × h_tiles` board.
    pub fn new(center: Position, h_tiles: Coord, v_tiles: Coord) -> Self {
        Self {
            center,
            bounds_h: Some(h_tiles),
            bounds_v: Some(v_tiles),
            index: 0,
        }
    }

    /// Neighbors only checked for non-negativity.
    pub fn unbounded(center: Position) -> Self {
        Self {
            center,
            bounds_h: None,
            bounds_v: None,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            let Some(next_item) = self.center.offset(delta) else {
                continue;
            };
            if is_valid_position(next_item, self.bounds_h, self.bounds_v) {
                return Some(next_item);
            }
        }
    }
}
