//! All game entity types — pure data, no logic.

use crate::config::GameConfig;
use crate::grid::CellIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// `sSs` lying on the bottom row.
    Horizontal,
    /// `s` / `S` / `s` stacked over the bottom three rows.
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Columns covered by the hit-box.
    pub fn width(self) -> i32 {
        match self {
            Orientation::Horizontal => 3,
            Orientation::Vertical => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    LivesExhausted,
    TimeUp,
    Quit,
}

/// A player command, decoded from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Fire,
    Rotate,
    Quit,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Leftmost column of the hit-box.
    pub column: i32,
    pub orientation: Orientation,
    pub lives: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
///
/// Every positional entity is a flat cell index (see [`crate::grid::Grid`]).
/// Duplicates are legal and each entry is tracked on its own.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub obstacles: Vec<CellIndex>,
    /// Anchors of 3x2 blocks; see `compute::large_obstacle_hits`.
    pub large_obstacles: Vec<CellIndex>,
    pub bonuses: Vec<CellIndex>,
    pub shots: Vec<CellIndex>,
    pub score: u32,
    /// Current tick interval in milliseconds.
    pub speed_ms: u64,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub frame: u64,
    pub config: GameConfig,
}
