use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use super::grid::Board;

/// Largest number of cells along either side of the board
pub const MAX_CELLS_PER_SIDE: i32 = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub screen_width: i32,
    /// Height of the board in pixels
    pub screen_height: i32,
    /// Side of one square cell in pixels
    pub cell_size: i32,
    /// Game ticks per second
    pub ticks_per_second: u32,
    /// Segments behind the head excluded from self-collision
    pub neck_length: usize,
    /// Seed for food placement; random when unset
    pub seed: Option<u64>,
    /// Show length and timer in a strip above the board (window only)
    pub show_hud: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            ticks_per_second: 10,
            neck_length: 2,
            seed: None,
            show_hud: false,
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse game configuration")
    }

    /// Load a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Check that the board can be tiled by whole cells and the game can tick
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive, got {}", self.cell_size);
        ensure!(
            self.screen_width > 0 && self.screen_height > 0,
            "board size must be positive, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(
            self.screen_width % self.cell_size == 0 && self.screen_height % self.cell_size == 0,
            "board size {}x{} is not a multiple of the cell size {}",
            self.screen_width,
            self.screen_height,
            self.cell_size
        );
        ensure!(
            self.screen_width / self.cell_size >= 2 && self.screen_height / self.cell_size >= 2,
            "board must be at least 2x2 cells"
        );
        let (columns, rows) = (
            self.screen_width / self.cell_size,
            self.screen_height / self.cell_size,
        );
        ensure!(
            columns <= MAX_CELLS_PER_SIDE && rows <= MAX_CELLS_PER_SIDE,
            "board must be at most {}x{} cells, got {}x{}",
            MAX_CELLS_PER_SIDE,
            MAX_CELLS_PER_SIDE,
            columns,
            rows
        );
        ensure!(self.ticks_per_second > 0, "tick rate must be positive");
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::new(self.screen_width, self.screen_height, self.cell_size)
    }

    /// Time between two game ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}
