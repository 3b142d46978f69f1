use rand::prelude::*;

use crate::*;

/// Owned state of one game session.
///
/// Mutations here are plain state transitions, the rules that decide which
/// of them to apply live in the engine commands.
#[derive(Clone, Debug)]
pub struct GameStore {
    board: Board,
    lose: bool,
    pristine: bool,
    selected: GameConfig,
    rng: SmallRng,
}

impl GameStore {
    /// Starts a pristine game, bombs are placed on the first reveal.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::empty(config.h_tiles, config.v_tiles)?,
            lose: false,
            pristine: true,
            selected: config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.board.get(position)
    }

    pub fn lose(&self) -> bool {
        self.lose
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Configuration the next generated board will use.
    pub fn selected(&self) -> GameConfig {
        self.selected
    }

    pub fn selected_bombs(&self) -> TileCount {
        self.selected.bombs
    }

    pub fn selected_h_tiles(&self) -> Coord {
        self.selected.h_tiles
    }

    pub fn selected_v_tiles(&self) -> Coord {
        self.selected.v_tiles
    }

    pub(crate) fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

// Mutations
impl GameStore {
    pub fn reveal_tile(&mut self, position: Position) -> Result<()> {
        let tile = self.board.get_mut(position).ok_or(GameError::InvalidPosition)?;
        tile.revealed = true;
        Ok(())
    }

    pub fn set_tile_flag(&mut self, position: Position, flag: bool) -> Result<()> {
        let tile = self.board.get_mut(position).ok_or(GameError::InvalidPosition)?;
        tile.flag = flag;
        Ok(())
    }

    pub fn set_lose(&mut self, lose: bool) {
        self.lose = lose;
    }

    pub fn set_pristine(&mut self, pristine: bool) {
        self.pristine = pristine;
    }

    pub fn set_selected_bombs(&mut self, bombs: TileCount) {
        self.selected.bombs = bombs;
    }

    pub fn set_selected_dimensions(&mut self, h_tiles: Coord, v_tiles: Coord) {
        self.selected.h_tiles = h_tiles;
        self.selected.v_tiles = v_tiles;
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }
}

// Derived queries
impl GameStore {
    pub fn total_revealed(&self) -> TileCount {
        self.board.iter().filter(|tile| tile.revealed).count() as TileCount
    }

    pub fn total_flags(&self) -> TileCount {
        self.board.iter().filter(|tile| tile.flag).count() as TileCount
    }

    pub fn total_tiles(&self) -> TileCount {
        self.board.total_tiles()
    }

    /// Safe tiles still hidden, negative once a lost board has been fully revealed.
    pub fn remaining_blanks(&self) -> isize {
        self.total_tiles() as isize - self.selected.bombs as isize - self.total_revealed() as isize
    }

    /// How many bombs have not been flagged yet
    pub fn remaining_bombs(&self) -> isize {
        self.selected.bombs as isize - self.total_flags() as isize
    }

    pub fn win(&self) -> bool {
        self.remaining_blanks() == 0
    }
}
