//! Rendering layer — all terminal I/O lives here.
//!
//! The scene is recomputed from the game state every frame, but only cells
//! whose character differs from the last frame are written.  The cache is
//! purely a redraw optimisation; game logic never reads it.

use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::large_obstacle_hits;
use crate::entities::{GameState, Orientation};
use crate::grid::Grid;

// ── Glyphs ────────────────────────────────────────────────────────────────────

const BORDER: char = '|';
const HORIZONTAL_PLAYER: [char; 3] = ['s', 'S', 's'];
const VERTICAL_PLAYER: [char; 3] = ['s', 'S', 's'];
const OBSTACLE: char = 'X';
const LARGE_OBSTACLE: char = 'O';
const BONUS: char = 'B';
const SHOT: char = '\'';
const BLANK: char = ' ';
const HEART: char = '♥';

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::DarkYellow;
const C_OBSTACLE: Color = Color::Red;
const C_LARGE_OBSTACLE: Color = Color::DarkRed;
const C_BONUS: Color = Color::Green;
const C_SHOT: Color = Color::Cyan;
const C_DEFAULT: Color = Color::White;
const C_HUD: Color = Color::Grey;
const C_HUD_LIVES: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

fn colour_for(ch: char) -> Color {
    match ch {
        's' | 'S' => C_PLAYER,
        OBSTACLE => C_OBSTACLE,
        LARGE_OBSTACLE => C_LARGE_OBSTACLE,
        BONUS => C_BONUS,
        SHOT => C_SHOT,
        _ => C_DEFAULT,
    }
}

/// What should be on screen at `(x, y)`, by priority: border, player,
/// obstacle, large obstacle, bonus, shot.
pub fn scene_glyph(state: &GameState, x: i32, y: i32) -> char {
    let grid = &state.config.grid;
    if x == 0 || x == grid.width - 1 {
        return BORDER;
    }

    let p = &state.player;
    let top = grid.height - 3;
    match p.orientation {
        Orientation::Vertical if x == p.column && y >= top => {
            return VERTICAL_PLAYER[(y - top) as usize];
        }
        Orientation::Horizontal
            if y == grid.bottom_row() && x >= p.column && x < p.column + 3 =>
        {
            return HORIZONTAL_PLAYER[(x - p.column) as usize];
        }
        _ => {}
    }

    let cell = grid.index(x, y);
    if state.obstacles.contains(&cell) {
        OBSTACLE
    } else if large_obstacle_hits(state, x, y) {
        LARGE_OBSTACLE
    } else if state.bonuses.contains(&cell) {
        BONUS
    } else if state.shots.contains(&cell) {
        SHOT
    } else {
        BLANK
    }
}

/// Whole seconds left: the budget minus the whole seconds already elapsed.
pub fn remaining_secs(budget: Duration, elapsed: Duration) -> u64 {
    budget.as_secs().saturating_sub(elapsed.as_secs())
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct Renderer {
    grid: Grid,
    cache: Vec<char>,
}

impl Renderer {
    pub fn new(grid: Grid) -> Self {
        Renderer {
            grid,
            cache: vec![BLANK; grid.cell_count() as usize],
        }
    }

    /// Character last written at `(x, y)`.
    pub fn cached(&self, x: i32, y: i32) -> char {
        self.cache[self.grid.index(x, y) as usize]
    }

    /// Render one frame and return how many grid cells were rewritten.
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        state: &GameState,
        elapsed: Duration,
    ) -> std::io::Result<usize> {
        let mut written = 0;

        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                let wanted = scene_glyph(state, x, y);
                let slot = &mut self.cache[self.grid.index(x, y) as usize];
                if *slot == wanted {
                    continue;
                }
                out.queue(cursor::MoveTo(x as u16, y as u16))?;
                out.queue(style::SetForegroundColor(colour_for(wanted)))?;
                out.queue(Print(wanted))?;
                *slot = wanted;
                written += 1;
            }
        }

        self.draw_status(out, state, elapsed)?;
        self.draw_controls_hint(out)?;

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(written)
    }

    // ── Status line (row H) ───────────────────────────────────────────────────

    fn draw_status<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        elapsed: Duration,
    ) -> std::io::Result<()> {
        let max_lives = state.config.lives as usize;
        let hearts: String = std::iter::repeat(HEART)
            .take(state.player.lives as usize)
            .collect();
        let secs = remaining_secs(state.config.duration, elapsed);

        out.queue(cursor::MoveTo(0, self.grid.height as u16))?;
        out.queue(style::SetForegroundColor(C_HUD))?;
        out.queue(Print(format!("Score: {}    Lives: [", state.score)))?;
        out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
        out.queue(Print(format!("{:<width$}", hearts, width = max_lives)))?;
        out.queue(style::SetForegroundColor(C_HUD))?;
        out.queue(Print(format!("]    Time Left: {} seconds", secs)))?;
        // Score and time can shrink in width; wipe leftovers.
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        Ok(())
    }

    fn draw_controls_hint<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(0, self.grid.height as u16 + 1))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(
            "Keys : <- -> to move | space to shoot | Tab to rotate | Esc to quit",
        ))?;
        Ok(())
    }
}

/// Wipe the screen once the session is over.
pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}
