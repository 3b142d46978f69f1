use hashbrown::HashSet;

use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Creates the tile at `position` for a given bomb layout.
///
/// Neighbors are not clipped to any board, offsets with a negative coordinate
/// simply never hold a bomb. Only negative positions are rejected, keeping the
/// tile inside the board is up to the caller.
pub fn create_tile(position: Position, bomb_positions: &HashSet<Position>) -> Result<Tile> {
    if !is_valid_position(position, None, None) {
        return Err(GameError::InvalidPosition);
    }

    if bomb_positions.contains(&position) {
        return Ok(Tile::new(position, TileKind::Bomb));
    }

    let neighbor_bombs = NeighborIter::unbounded(position)
        .filter(|pos| bomb_positions.contains(pos))
        .count();
    // at most 8 neighbors
    let kind = TileKind::from_bomb_count(neighbor_bombs as u8);
    Ok(Tile::new(position, kind))
}
