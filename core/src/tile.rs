use core::num::NonZeroU8;
use core::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};

use crate::Position;

static NEXT_TILE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tile, unique across every tile created by this process.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(u64);

impl TileId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TILE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What a tile hides. A number is always at least 1, a tile with no bomb
/// neighbors is [`TileKind::Blank`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Bomb,
    Number(NonZeroU8),
    Blank,
}

impl TileKind {
    /// Classifies a safe tile from its neighboring bomb count.
    pub const fn from_bomb_count(count: u8) -> Self {
        match NonZeroU8::new(count) {
            Some(value) => Self::Number(value),
            None => Self::Blank,
        }
    }

    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub revealed: bool,
    pub flag: bool,
    /// Reserved, no rule toggles it.
    pub questionmark: bool,
    pub kind: TileKind,
}

impl Tile {
    pub(crate) fn new(position: Position, kind: TileKind) -> Self {
        Self {
            id: TileId::next(),
            position,
            revealed: false,
            flag: false,
            questionmark: false,
            kind,
        }
    }

    /// Neighboring bomb count, only present on number tiles.
    pub const fn value(&self) -> Option<u8> {
        match self.kind {
            TileKind::Number(value) => Some(value.get()),
            _ => None,
        }
    }

    pub const fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    pub const fn is_blank(&self) -> bool {
        matches!(self.kind, TileKind::Blank)
    }
}

impl From<&Tile> for Position {
    fn from(tile: &Tile) -> Self {
        tile.position
    }
}

impl From<Tile> for Position {
    fn from(tile: Tile) -> Self {
        tile.position
    }
}
