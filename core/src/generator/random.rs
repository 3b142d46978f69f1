use alloc::vec::Vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Picks `bomb_count` distinct positions uniformly over a `v_tiles × h_tiles`
/// grid, never choosing one of `excluded`.
///
/// Each draw is an index into the tiles still free, so generation always
/// terminates even on nearly full boards.
pub fn generate_bomb_positions(
    rng: &mut SmallRng,
    h_tiles: Coord,
    v_tiles: Coord,
    bomb_count: TileCount,
    excluded: &[Position],
) -> Result<HashSet<Position>> {
    let Some(mut free_tiles) = checked_area(h_tiles, v_tiles) else {
        log::warn!("Cannot place bombs on a {}x{} board", v_tiles, h_tiles);
        return Err(GameError::InvalidConfiguration);
    };

    let mut taken: Array2<bool> = Array2::default((v_tiles as usize, h_tiles as usize));
    for &pos in excluded {
        if !is_valid_position(pos, Some(h_tiles), Some(v_tiles)) {
            continue;
        }
        let slot = &mut taken[pos.to_nd_index()];
        if !*slot {
            *slot = true;
            free_tiles -= 1;
        }
    }

    if bomb_count > free_tiles {
        log::warn!(
            "Too many bombs, requested {} but only {} tiles are free",
            bomb_count,
            free_tiles
        );
        return Err(GameError::InvalidConfiguration);
    }

    let mut positions = HashSet::with_capacity(bomb_count as usize);
    while positions.len() < bomb_count as usize {
        let mut place: TileCount = rng.random_range(0..free_tiles);
        for ((x, y), slot) in taken.indexed_iter_mut() {
            if *slot {
                continue;
            }
            if place == 0 {
                *slot = true;
                positions.insert(Position::new(x as Coord, y as Coord));
                free_tiles -= 1;
                break;
            }
            place -= 1;
        }
    }

    Ok(positions)
}

/// Generates a full board with randomly placed bombs.
pub fn create_board(
    rng: &mut SmallRng,
    h_tiles: Coord,
    v_tiles: Coord,
    bomb_count: TileCount,
    excluded: &[Position],
) -> Result<Board> {
    let bomb_positions = generate_bomb_positions(rng, h_tiles, v_tiles, bomb_count, excluded)?;
    let board = Board::from_bomb_positions(h_tiles, v_tiles, &bomb_positions)?;
    log::debug!(
        "Generated {}x{} board with {} bombs, excluded: {:?}",
        v_tiles,
        h_tiles,
        board.bombs(),
        excluded
    );
    Ok(board)
}

/// Generation strategy that places bombs uniformly at random, keeping the
/// excluded positions safe.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    excluded: Vec<Position>,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            excluded: Vec::new(),
        }
    }

    pub fn excluding(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.excluded.extend(positions);
        self
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        create_board(
            &mut rng,
            config.h_tiles,
            config.v_tiles,
            config.bombs,
            &self.excluded,
        )
    }
}
