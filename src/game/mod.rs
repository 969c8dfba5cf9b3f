//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Both front-ends drive it through [`GameEngine::tick`] and draw it through [`Entity`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod entity;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use entity::{Entity, Rgb};
pub use grid::{Board, Position};
pub use state::{Food, GameState, MoveResult, Snake};
