//! Grid Snake - a classic wrap-around Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard mapping for both front-ends (input module)
//! - Window and terminal rendering (render module)
//! - The fixed-rate game loops (modes module)
//! - Per-session statistics (metrics module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
