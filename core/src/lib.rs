//! Rules engine for Minesweeper: board generation, tile adjacency and the
//! reveal/flag actions over an owned [`GameStore`].

#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use store::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod store;
mod tile;
mod types;

/// Dimensions and bomb count of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub h_tiles: Coord,
    pub v_tiles: Coord,
    pub bombs: TileCount,
}

impl GameConfig {
    pub const fn new_unchecked(h_tiles: Coord, v_tiles: Coord, bombs: TileCount) -> Self {
        Self {
            h_tiles,
            v_tiles,
            bombs,
        }
    }

    pub fn new(h_tiles: Coord, v_tiles: Coord, bombs: TileCount) -> Result<Self> {
        let config = Self::new_unchecked(h_tiles, v_tiles, bombs);
        config.validate()?;
        Ok(config)
    }

    /// Dimensions must be positive, their product must fit in [`TileCount`] and
    /// one tile must stay free for the first click.
    pub fn validate(&self) -> Result<()> {
        let total_tiles =
            checked_area(self.h_tiles, self.v_tiles).ok_or(GameError::InvalidConfiguration)?;
        if self.bombs >= total_tiles {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(())
    }

    pub const fn total_tiles(&self) -> TileCount {
        mult(self.h_tiles, self.v_tiles)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(17, 10, 30)
    }
}

/// Outcome of a flag command
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether the board needs to be re-read
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of a reveal command
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
    Won,
}

impl RevealOutcome {
    /// Whether the board needs to be re-read
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitBomb => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when revealing several tiles
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitBomb, _) => HitBomb,
            (_, HitBomb) => HitBomb,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_validation() {
        assert!(GameConfig::new(3, 4, 2).is_ok());
        assert!(GameConfig::new(3, 3, 8).is_ok());
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(0, 3, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, -2, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(
            GameConfig::new(Coord::MAX, Coord::MAX, 1),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::new(70_000, 70_000, 1),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
            GameConfig::default(),
        ] {
            assert_eq!(config.validate(), Ok(()));
        }
        assert_eq!(GameConfig::default().total_tiles(), 170);
    }

    #[test]
    fn merged_outcome_keeps_the_strongest() {
        use RevealOutcome::*;
        assert_eq!(NoChange | NoChange, NoChange);
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Won | Revealed, Won);
        assert_eq!(Won | HitBomb, HitBomb);
        assert!(!NoChange.has_update());
        assert!(FlagOutcome::Changed.has_update());
    }
}
