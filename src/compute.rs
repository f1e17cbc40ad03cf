//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`.  Side effects are limited to the injected RNG and to
//! `tracing` events.

use rand::Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{Command, EndReason, GameState, GameStatus, Orientation, Player};
use crate::grid::{CellIndex, Grid};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player centred and lying flat, nothing on
/// the track.
pub fn init_state(config: GameConfig) -> GameState {
    let grid = config.grid;
    let column = (grid.width / 2)
        .min(max_column(&grid, Orientation::Horizontal))
        .max(1);
    GameState {
        player: Player {
            column,
            orientation: Orientation::Horizontal,
            lives: config.lives,
        },
        obstacles: Vec::new(),
        large_obstacles: Vec::new(),
        bonuses: Vec::new(),
        shots: Vec::new(),
        score: 0,
        speed_ms: config.initial_speed_ms,
        status: GameStatus::Playing,
        end_reason: None,
        frame: 0,
        config,
    }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Rightmost column the player may start its hit-box on.
fn max_column(grid: &Grid, orientation: Orientation) -> i32 {
    grid.width - 1 - orientation.width()
}

/// The three cells the player occupies, top-to-bottom or left-to-right.
pub fn hit_box(player: &Player, grid: &Grid) -> [CellIndex; 3] {
    let bottom = grid.bottom_row();
    let c = player.column;
    match player.orientation {
        Orientation::Vertical => [
            grid.index(c, bottom - 2),
            grid.index(c, bottom - 1),
            grid.index(c, bottom),
        ],
        Orientation::Horizontal => [
            grid.index(c, bottom),
            grid.index(c + 1, bottom),
            grid.index(c + 2, bottom),
        ],
    }
}

/// Position in `anchors` of the first large obstacle covering `cell`.
///
/// A block anchored at `a` covers `a, a+1, a+2` and the same three cells one
/// row further down, so candidates are probed in the order
/// `c, c-w, c-w-1, c-1, c-2, c-w-2`.
fn covering_anchor(anchors: &[CellIndex], cell: CellIndex, width: i32) -> Option<usize> {
    let candidates = [
        cell,
        cell - width,
        cell - width - 1,
        cell - 1,
        cell - 2,
        cell - width - 2,
    ];
    candidates
        .iter()
        .find_map(|&c| anchors.iter().position(|&a| a == c))
}

/// True if any large obstacle's 3x2 footprint covers `(col, row)`.
pub fn large_obstacle_hits(state: &GameState, col: i32, row: i32) -> bool {
    let grid = &state.config.grid;
    covering_anchor(&state.large_obstacles, grid.index(col, row), grid.width).is_some()
}

fn remove_first(cells: &mut Vec<CellIndex>, value: CellIndex) -> bool {
    match cells.iter().position(|&c| c == value) {
        Some(i) => {
            cells.remove(i);
            true
        }
        None => false,
    }
}

fn end_session(state: &mut GameState, reason: EndReason) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.status = GameStatus::GameOver;
    state.end_reason = Some(reason);
    info!(?reason, score = state.score, frame = state.frame, "session over");
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.player.column > 1 {
        next.player.column -= 1;
    }
    next
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.player.column < max_column(&next.config.grid, next.player.orientation) {
        next.player.column += 1;
    }
    next
}

/// Fire a shot from the player's mouth: the middle of `sSs`, or the cell just
/// above the top of the upright glyph.
pub fn player_shoot(state: &GameState) -> GameState {
    let grid = state.config.grid;
    let p = &state.player;
    let shot = match p.orientation {
        Orientation::Horizontal => grid.index(p.column + 1, grid.bottom_row()),
        Orientation::Vertical => grid.index(p.column, grid.bottom_row() - 3),
    };
    let mut next = state.clone();
    next.shots.push(shot);
    next
}

/// Flip orientation.  Lying down near the right wall pulls the player left so
/// the wider hit-box stays on the track.
pub fn rotate_player(state: &GameState) -> GameState {
    let mut next = state.clone();
    let orientation = next.player.orientation.flipped();
    next.player.orientation = orientation;
    next.player.column = next
        .player
        .column
        .min(max_column(&next.config.grid, orientation));
    next
}

pub fn apply_command(state: &GameState, command: Command) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    match command {
        Command::MoveLeft => move_player_left(state),
        Command::MoveRight => move_player_right(state),
        Command::Fire => player_shoot(state),
        Command::Rotate => rotate_player(state),
        Command::Quit => {
            let mut next = state.clone();
            end_session(&mut next, EndReason::Quit);
            next
        }
    }
}

/// Close the session because its time budget ran out.
pub fn time_up(state: &GameState) -> GameState {
    let mut next = state.clone();
    end_session(&mut next, EndReason::TimeUp);
    next
}

// ── Tick phases ─────────────────────────────────────────────────────────────

/// Roll independently for an obstacle, a large obstacle and a bonus, each
/// entering on row 0 at a random column.
pub fn spawn(state: &GameState, rng: &mut impl Rng) -> GameState {
    let cfg = &state.config;
    let w = cfg.grid.width;
    let mut next = state.clone();

    if rng.gen_ratio(1, cfg.obstacle_odds) {
        next.obstacles.push(rng.gen_range(1..w - 1));
    }
    // Anchor columns stop at w-4 to leave room for the 3-wide block.
    if rng.gen_ratio(1, cfg.large_obstacle_odds) {
        next.large_obstacles.push(rng.gen_range(1..w - 3));
    }
    if rng.gen_ratio(1, cfg.bonus_odds) {
        next.bonuses.push(rng.gen_range(1..w - 1));
    }
    next
}

/// Move everything one row and drop what has left the grid.
pub fn advance(state: &GameState) -> GameState {
    let grid = state.config.grid;
    let w = grid.width;
    let end = grid.cell_count();

    let fall = |cells: &[CellIndex]| -> Vec<CellIndex> {
        cells.iter().map(|&c| c + w).filter(|&c| c < end).collect()
    };

    GameState {
        obstacles: fall(&state.obstacles),
        large_obstacles: fall(&state.large_obstacles),
        bonuses: fall(&state.bonuses),
        shots: state
            .shots
            .iter()
            .map(|&s| s - w)
            .filter(|&s| s >= 0)
            .collect(),
        ..state.clone()
    }
}

/// Check each hit-box cell in turn against the live collections.
///
/// An obstacle (small or large) costs a life and is consumed; otherwise a
/// bonus on the cell is collected and speeds the game up.  Nothing is
/// evaluated once the last life is gone.
pub fn resolve_player_hits(state: &GameState) -> GameState {
    let mut next = state.clone();
    let grid = next.config.grid;

    for cell in hit_box(&next.player, &grid) {
        if next.status == GameStatus::GameOver {
            break;
        }

        let anchor = covering_anchor(&next.large_obstacles, cell, grid.width);
        let small = next.obstacles.contains(&cell);

        if small || anchor.is_some() {
            remove_first(&mut next.obstacles, cell);
            if let Some(i) = anchor {
                next.large_obstacles.remove(i);
            }
            next.player.lives = next.player.lives.saturating_sub(1);
            debug!(cell, small, lives = next.player.lives, "player hit");
            if next.player.lives == 0 {
                end_session(&mut next, EndReason::LivesExhausted);
            }
        } else if remove_first(&mut next.bonuses, cell) {
            let cfg = &next.config;
            next.score += cfg.bonus_score;
            if next.speed_ms > cfg.min_speed_ms {
                next.speed_ms = next
                    .speed_ms
                    .saturating_sub(cfg.speed_step_ms)
                    .max(cfg.min_speed_ms);
            }
            debug!(cell, score = next.score, speed_ms = next.speed_ms, "bonus collected");
        }
    }

    next
}

/// Every shot sitting on a bonus cell scores and is spent.
///
/// Matches are found against the bonuses as they stood before the pass.
/// Afterwards one bonus is removed per spent shot, for as long as a bonus is
/// left on that cell.
pub fn resolve_shot_hits(state: &GameState) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let used_shots: Vec<usize> = state
        .shots
        .iter()
        .enumerate()
        .filter(|(_, shot)| state.bonuses.contains(*shot))
        .map(|(i, _)| i)
        .collect();

    if used_shots.is_empty() {
        return state.clone();
    }

    let score_gain = used_shots.len() as u32 * state.config.shot_bonus_score;
    debug!(hits = used_shots.len(), score_gain, "shots hit bonuses");

    let shots: Vec<CellIndex> = state
        .shots
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_shots.contains(i))
        .map(|(_, &s)| s)
        .collect();

    let mut bonuses = state.bonuses.clone();
    for &i in &used_shots {
        remove_first(&mut bonuses, state.shots[i]);
    }

    GameState {
        shots,
        bonuses,
        score: state.score + score_gain,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one tick: spawn, move, then resolve collisions.
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    let next = spawn(state, rng);
    let next = advance(&next);
    let next = resolve_player_hits(&next);
    let mut next = resolve_shot_hits(&next);
    next.frame += 1;
    next
}
