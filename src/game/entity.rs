//! Shared capability of everything drawn on the board

use super::grid::Position;

/// An RGB color, independent of the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BOARD_BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const DEFAULT_COLOR: Rgb = Rgb(150, 150, 150);
pub const FOOD_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

/// A positioned, drawable object on the board.
///
/// Renderers only see this trait: they paint every cell of every entity in
/// the order [`GameState::entities`](super::GameState::entities) returns them.
pub trait Entity {
    /// Leading cell of the entity
    fn head(&self) -> Position;

    /// Every cell the entity covers, leading cell first
    fn cells(&self) -> &[Position];

    /// Fill color of the entity's cells
    fn color(&self) -> Rgb;

    fn covers(&self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }
}
