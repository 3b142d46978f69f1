use alloc::collections::VecDeque;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Pristine -> Active
/// - Pristine -> Won (only when every safe tile opens at once)
/// - Active -> Won
/// - Active -> Lost
///
/// Won and Lost are only left through [`GameStore::new_game`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No bombs placed yet, waiting for the first reveal
    Pristine,
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_pristine(self) -> bool {
        matches!(self, Self::Pristine)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl GameStore {
    pub fn status(&self) -> GameStatus {
        if self.lose() {
            GameStatus::Lost
        } else if self.is_pristine() {
            GameStatus::Pristine
        } else if self.win() {
            GameStatus::Won
        } else {
            GameStatus::Active
        }
    }

    /// Reveals a tile, flooding through connected blank tiles.
    ///
    /// Revealing a bomb loses the game. Already revealed tiles are left alone.
    pub fn reveal(&mut self, tile: impl Into<Position>) -> Result<RevealOutcome> {
        let position = self.board().validate_position(tile.into())?;
        let tile = self.board()[position];

        if tile.revealed {
            return Ok(RevealOutcome::NoChange);
        }
        if tile.is_bomb() {
            return self.lose_game(position);
        }

        self.flood_reveal(position)?;

        Ok(if self.win() {
            log::debug!("Game won at {:?}", position);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Breadth-first reveal starting at a safe tile, only blank tiles spread.
    fn flood_reveal(&mut self, start: Position) -> Result<()> {
        let mut visited: HashSet<Position> = HashSet::from_iter([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(position) = to_visit.pop_front() {
            let tile = self.board()[position];
            if tile.revealed {
                continue;
            }

            match tile.kind {
                TileKind::Bomb => {
                    log::trace!("Skipping bomb at {:?}", position);
                }
                TileKind::Number(value) => {
                    self.reveal_tile(position)?;
                    log::trace!("Revealed number {} at {:?}", value, position);
                }
                TileKind::Blank => {
                    self.reveal_tile(position)?;
                    let board = self.board();
                    let pending: SmallVec<[Position; 8]> = board
                        .adjacent_positions(position)
                        .filter(|&pos| !board[pos].revealed)
                        .filter(|&pos| visited.insert(pos))
                        .collect();
                    log::trace!(
                        "Revealed blank at {:?}, queueing {:?}",
                        position,
                        pending.as_slice()
                    );
                    to_visit.extend(pending);
                }
            }
        }

        Ok(())
    }

    /// Chord: when the flagged neighbors of a number tile match its value
    /// exactly, reveals every unflagged neighbor.
    pub fn reveal_adjacent(&mut self, tile: impl Into<Position>) -> Result<RevealOutcome> {
        let position = self.board().validate_position(tile.into())?;
        let Some(value) = self.board()[position].value() else {
            return Ok(RevealOutcome::NoChange);
        };

        let neighbors = self.board().adjacent_tiles(position);
        let flagged = neighbors.iter().filter(|tile| tile.flag).count();
        if flagged != usize::from(value) {
            return Ok(RevealOutcome::NoChange);
        }

        let mut outcome = RevealOutcome::NoChange;
        for neighbor in neighbors.iter().filter(|tile| !tile.flag) {
            outcome = outcome | self.reveal(neighbor)?;
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, tile: impl Into<Position>) -> Result<FlagOutcome> {
        let position = self.board().validate_position(tile.into())?;
        let tile = self.board()[position];

        if tile.revealed {
            return Ok(FlagOutcome::NoChange);
        }
        self.set_tile_flag(position, !tile.flag)?;
        Ok(FlagOutcome::Changed)
    }

    /// Reveals the whole board and marks the game lost, only when `tile` is a bomb.
    ///
    /// Nothing stops further commands afterwards, callers should treat the
    /// board as frozen.
    pub fn lose_game(&mut self, tile: impl Into<Position>) -> Result<RevealOutcome> {
        let position = self.board().validate_position(tile.into())?;
        if !self.board()[position].is_bomb() {
            return Ok(RevealOutcome::NoChange);
        }

        for x in 0..self.board().v_tiles() {
            for y in 0..self.board().h_tiles() {
                self.reveal_tile(Position::new(x, y))?;
            }
        }
        self.set_lose(true);
        log::debug!("Game lost, bomb at {:?}", position);
        Ok(RevealOutcome::HitBomb)
    }

    /// First reveal of a pristine game: places the bombs around `tile` and
    /// reveals it on the new board, so the first click is never a bomb.
    ///
    /// Once the game has started this is the same as [`GameStore::reveal`].
    pub fn initial_reveal(&mut self, tile: impl Into<Position>) -> Result<RevealOutcome> {
        let position = tile.into();
        if !self.is_pristine() {
            log::debug!("Game already started, plain reveal at {:?}", position);
            return self.reveal(position);
        }

        let config = self.selected();
        config.validate()?;
        if !is_valid_position(position, Some(config.h_tiles), Some(config.v_tiles)) {
            return Err(GameError::InvalidPosition);
        }

        let board = RandomBoardGenerator::new(self.next_seed())
            .excluding([position])
            .generate(config)?;
        self.set_board(board);
        self.set_pristine(false);
        log::debug!("Game started at {:?}", position);

        self.reveal(position)
    }

    /// Starts over with a bomb-free board, real bombs are placed by the next
    /// [`GameStore::initial_reveal`].
    pub fn new_game(&mut self, h_tiles: Coord, v_tiles: Coord, bombs: TileCount) -> Result<()> {
        let config = GameConfig::new(h_tiles, v_tiles, bombs)?;
        let board = Board::empty(config.h_tiles, config.v_tiles)?;

        self.set_selected_dimensions(config.h_tiles, config.v_tiles);
        self.set_selected_bombs(config.bombs);
        self.set_board(board);
        self.set_lose(false);
        self.set_pristine(true);
        log::debug!("New game {:?}", config);
        Ok(())
    }

    /// Primary click: the initial reveal on a pristine game, a plain reveal after.
    pub fn open(&mut self, tile: impl Into<Position>) -> Result<RevealOutcome> {
        self.initial_reveal(tile)
    }
}
