//! Game tuning constants.
//!
//! There is no config file; `GameConfig::default()` is the shipped game and
//! tests tweak individual fields with struct-update syntax.

use std::time::Duration;

use crate::grid::Grid;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid: Grid,
    /// Wall-clock length of a session.
    pub duration: Duration,
    /// Starting tick interval in milliseconds.
    pub initial_speed_ms: u64,
    /// Floor for the tick interval.
    pub min_speed_ms: u64,
    /// Tick interval reduction per bonus picked up by the player.
    pub speed_step_ms: u64,
    pub lives: u32,
    /// Spawn chances, each expressed as 1 in N.
    pub obstacle_odds: u32,
    pub bonus_odds: u32,
    pub large_obstacle_odds: u32,
    pub bonus_score: u32,
    pub shot_bonus_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: Grid::new(30, 23),
            duration: Duration::from_secs(90),
            initial_speed_ms: 100,
            min_speed_ms: 50,
            speed_step_ms: 10,
            lives: 3,
            obstacle_odds: 5,
            bonus_odds: 10,
            large_obstacle_odds: 20,
            bonus_score: 10,
            shot_bonus_score: 20,
        }
    }
}
