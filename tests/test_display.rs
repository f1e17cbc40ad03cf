use std::time::Duration;

use lane_runner::compute::{init_state, move_player_right};
use lane_runner::config::GameConfig;
use lane_runner::display::{remaining_secs, scene_glyph, Renderer};
use lane_runner::entities::{GameState, Orientation};
use lane_runner::grid::Grid;

const GRID: Grid = Grid::new(30, 23);

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

fn render(renderer: &mut Renderer, state: &GameState, elapsed: Duration) -> (usize, String) {
    let mut out: Vec<u8> = Vec::new();
    let written = renderer.render(&mut out, state, elapsed).unwrap();
    (written, String::from_utf8(out).unwrap())
}

// ── scene_glyph ───────────────────────────────────────────────────────────────

#[test]
fn borders_on_both_sides() {
    let s = make_state();
    for y in 0..GRID.height {
        assert_eq!(scene_glyph(&s, 0, y), '|');
        assert_eq!(scene_glyph(&s, 29, y), '|');
    }
}

#[test]
fn horizontal_player_glyph() {
    let s = make_state(); // column 15
    assert_eq!(scene_glyph(&s, 15, 22), 's');
    assert_eq!(scene_glyph(&s, 16, 22), 'S');
    assert_eq!(scene_glyph(&s, 17, 22), 's');
    assert_eq!(scene_glyph(&s, 15, 21), ' ');
}

#[test]
fn vertical_player_glyph() {
    let mut s = make_state();
    s.player.orientation = Orientation::Vertical;
    assert_eq!(scene_glyph(&s, 15, 20), 's');
    assert_eq!(scene_glyph(&s, 15, 21), 'S');
    assert_eq!(scene_glyph(&s, 15, 22), 's');
    assert_eq!(scene_glyph(&s, 16, 22), ' ');
}

#[test]
fn glyph_priority() {
    let mut s = make_state();
    let cell = GRID.index(4, 4);
    s.obstacles = vec![cell, GRID.index(15, 22)];
    s.bonuses = vec![cell, GRID.index(8, 8)];
    s.shots = vec![GRID.index(8, 8), GRID.index(9, 9)];
    s.large_obstacles = vec![GRID.index(20, 5)];

    assert_eq!(scene_glyph(&s, 4, 4), 'X');
    assert_eq!(scene_glyph(&s, 15, 22), 's'); // player drawn over obstacle
    assert_eq!(scene_glyph(&s, 8, 8), 'B');
    assert_eq!(scene_glyph(&s, 9, 9), '\'');
    assert_eq!(scene_glyph(&s, 22, 6), 'O');
}

// ── Renderer ──────────────────────────────────────────────────────────────────

#[test]
fn first_frame_draws_borders_and_player_only() {
    let s = make_state();
    let mut r = Renderer::new(GRID);
    let (written, _) = render(&mut r, &s, Duration::ZERO);
    assert_eq!(written, 2 * 23 + 3);
    assert_eq!(r.cached(0, 0), '|');
    assert_eq!(r.cached(16, 22), 'S');
}

#[test]
fn unchanged_scene_writes_no_cells() {
    let s = make_state();
    let mut r = Renderer::new(GRID);
    render(&mut r, &s, Duration::ZERO);
    let (written, _) = render(&mut r, &s, Duration::ZERO);
    assert_eq!(written, 0);
}

#[test]
fn moving_player_rewrites_changed_cells_only() {
    let s = make_state();
    let mut r = Renderer::new(GRID);
    render(&mut r, &s, Duration::ZERO);

    // sSs at 15..=17 becomes sSs at 16..=18: all four touched cells change.
    let moved = move_player_right(&s);
    let (written, _) = render(&mut r, &moved, Duration::ZERO);
    assert_eq!(written, 4);
    assert_eq!(r.cached(15, 22), ' ');
    assert_eq!(r.cached(18, 22), 's');
}

#[test]
fn status_line_shows_score_lives_and_time() {
    let mut s = make_state();
    s.score = 40;
    let mut r = Renderer::new(GRID);
    let (_, text) = render(&mut r, &s, Duration::from_millis(10_500));
    assert!(text.contains("Score: 40    Lives: ["));
    assert!(text.contains("♥♥♥"));
    assert!(text.contains("]    Time Left: 80 seconds"));
    assert!(text.contains("Tab to rotate"));
}

#[test]
fn lost_lives_are_padded_with_blanks() {
    let mut s = make_state();
    s.player.lives = 1;
    let mut r = Renderer::new(GRID);
    let (_, text) = render(&mut r, &s, Duration::ZERO);
    assert!(text.contains("♥  "));
    assert!(!text.contains("♥♥"));
}

#[test]
fn remaining_time_floors_elapsed_and_never_underflows() {
    let budget = Duration::from_secs(90);
    assert_eq!(remaining_secs(budget, Duration::from_millis(500)), 90);
    assert_eq!(remaining_secs(budget, Duration::from_millis(89_999)), 1);
    assert_eq!(remaining_secs(budget, Duration::from_secs(120)), 0);
}
