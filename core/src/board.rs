use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Tiles of one game, stored as a `v_tiles × h_tiles` arena indexed `[x][y]`.
///
/// Deserializing checks that the arena agrees with the declared dimensions and
/// bomb count, every later index relies on it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    h_tiles: Coord,
    v_tiles: Coord,
    bombs: TileCount,
    tiles: Array2<Tile>,
}

impl Board {
    /// Board without any bomb, used until the first reveal decides the layout.
    pub fn empty(h_tiles: Coord, v_tiles: Coord) -> Result<Self> {
        Self::from_bomb_positions(h_tiles, v_tiles, &HashSet::new())
    }

    /// Builds every tile for a fixed set of bomb positions.
    pub fn from_bomb_positions(
        h_tiles: Coord,
        v_tiles: Coord,
        bomb_positions: &HashSet<Position>,
    ) -> Result<Self> {
        let total_tiles =
            checked_area(h_tiles, v_tiles).ok_or(GameError::InvalidConfiguration)?;
        if bomb_positions
            .iter()
            .any(|&pos| !is_valid_position(pos, Some(h_tiles), Some(v_tiles)))
        {
            return Err(GameError::InvalidPosition);
        }

        let mut tiles = Vec::with_capacity(total_tiles as usize);
        for x in 0..v_tiles {
            for y in 0..h_tiles {
                tiles.push(create_tile(Position::new(x, y), bomb_positions)?);
            }
        }
        let tiles = Array2::from_shape_vec((v_tiles as usize, h_tiles as usize), tiles)
            .map_err(|_| GameError::InvalidConfiguration)?;

        Ok(Self {
            h_tiles,
            v_tiles,
            bombs: bomb_positions.len() as TileCount,
            tiles,
        })
    }

    pub fn h_tiles(&self) -> Coord {
        self.h_tiles
    }

    pub fn v_tiles(&self) -> Coord {
        self.v_tiles
    }

    pub fn bombs(&self) -> TileCount {
        self.bombs
    }

    pub fn total_tiles(&self) -> TileCount {
        mult(self.h_tiles, self.v_tiles)
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    pub fn contains(&self, position: Position) -> bool {
        is_valid_position(position, Some(self.h_tiles), Some(self.v_tiles))
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn get(&self, position: Position) -> Option<&Tile> {
        if self.contains(position) {
            self.tiles.get(position.to_nd_index())
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if self.contains(position) {
            self.tiles.get_mut(position.to_nd_index())
        } else {
            None
        }
    }

    /// In-bounds neighbors of `position`, see [`NeighborIter`] for the order.
    pub fn adjacent_positions(&self, position: Position) -> NeighborIter {
        NeighborIter::new(position, self.h_tiles, self.v_tiles)
    }

    /// Copies of the in-bounds neighbor tiles of `position`.
    pub fn adjacent_tiles(&self, position: Position) -> SmallVec<[Tile; 8]> {
        self.adjacent_positions(position)
            .map(|pos| self[pos])
            .collect()
    }

    /// Visits every tile row by row (`x` outer, `y` inner).
    pub fn for_each_tile(&self, mut f: impl FnMut(Tile, Position)) {
        for ((x, y), &tile) in self.tiles.indexed_iter() {
            f(tile, Position::new(x as Coord, y as Coord));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }
}

#[derive(Deserialize)]
struct BoardData {
    h_tiles: Coord,
    v_tiles: Coord,
    bombs: TileCount,
    tiles: Array2<Tile>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let BoardData {
            h_tiles,
            v_tiles,
            bombs,
            tiles,
        } = data;

        if checked_area(h_tiles, v_tiles).is_none()
            || tiles.dim() != (v_tiles as usize, h_tiles as usize)
        {
            return Err(GameError::InvalidBoardShape);
        }
        let misplaced = tiles
            .indexed_iter()
            .any(|((x, y), tile)| tile.position != Position::new(x as Coord, y as Coord));
        if misplaced {
            return Err(GameError::InvalidBoardShape);
        }
        if tiles.iter().filter(|tile| tile.is_bomb()).count() != bombs as usize {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            h_tiles,
            v_tiles,
            bombs,
            tiles,
        })
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = BoardData::deserialize(deserializer)?;
        Board::try_from(data).map_err(serde::de::Error::custom)
    }
}

impl Index<Position> for Board {
    type Output = Tile;

    fn index(&self, position: Position) -> &Self::Output {
        &self.tiles[position.to_nd_index()]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self.tiles[position.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn board(h: Coord, v: Coord, bombs: &[(Coord, Coord)]) -> Board {
        let bombs = bombs.iter().copied().map(Position::from).collect();
        Board::from_bomb_positions(h, v, &bombs).unwrap()
    }

    #[test]
    fn tiles_match_their_index() {
        let board = board(3, 4, &[(0, 0), (3, 2)]);

        assert_eq!(board.tiles().dim(), (4, 3));
        board.for_each_tile(|tile, pos| assert_eq!(tile.position, pos));
        assert_eq!(board.bombs(), 2);
        assert_eq!(board.iter().filter(|tile| tile.is_bomb()).count(), 2);
    }

    #[test]
    fn board_data_must_agree_with_its_tiles() {
        let source = board(3, 4, &[(1, 1)]);
        let data = |h_tiles, v_tiles, bombs| BoardData {
            h_tiles,
            v_tiles,
            bombs,
            tiles: source.tiles().clone(),
        };

        assert_eq!(Board::try_from(data(3, 4, 1)), Ok(source.clone()));
        assert_eq!(Board::try_from(data(4, 4, 1)), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::try_from(data(3, 3, 1)), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::try_from(data(-3, -4, 1)), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::try_from(data(3, 4, 0)), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn for_each_tile_is_row_major() {
        let board = board(2, 2, &[]);
        let mut visited = vec![];
        board.for_each_tile(|_, pos| visited.push((pos.x, pos.y)));
        assert_eq!(visited, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn adjacent_tiles_by_location() {
        let board = board(3, 3, &[(1, 0)]);

        assert_eq!(board.adjacent_tiles(Position::new(1, 1)).len(), 8);
        for corner in [(0, 0), (0, 2), (2, 2), (2, 0)] {
            assert_eq!(board.adjacent_tiles(corner.into()).len(), 3);
        }
        for edge in [(0, 1), (1, 2), (2, 1), (1, 0)] {
            assert_eq!(board.adjacent_tiles(edge.into()).len(), 5);
        }
    }

    #[test]
    fn adjacent_tiles_follow_neighbor_order() {
        let board = board(3, 3, &[]);
        let got: Vec<_> = board
            .adjacent_tiles(Position::new(0, 0))
            .iter()
            .map(|tile| (tile.position.x, tile.position.y))
            .collect();
        assert_eq!(got, vec![(0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn rejects_bombs_outside_the_board() {
        let bombs = [Position::new(3, 0)].into_iter().collect();
        assert_eq!(
            Board::from_bomb_positions(3, 3, &bombs),
            Err(GameError::InvalidPosition)
        );
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(Board::empty(0, 3), Err(GameError::InvalidConfiguration));
        assert_eq!(Board::empty(3, -1), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn empty_board_is_all_blank() {
        let board = Board::empty(4, 2).unwrap();
        assert_eq!(board.bombs(), 0);
        assert_eq!(board.total_tiles(), 8);
        assert!(board.iter().all(|tile| tile.is_blank()));
    }

    #[test]
    fn get_is_bounds_checked() {
        let board = board(2, 3, &[]);
        assert!(board.get(Position::new(2, 1)).is_some());
        assert!(board.get(Position::new(3, 0)).is_none());
        assert!(board.get(Position::new(0, 2)).is_none());
        assert!(board.get(Position::new(-1, 0)).is_none());
        assert_eq!(
            board.validate_position(Position::new(0, 2)),
            Err(GameError::InvalidPosition)
        );
    }
}
