use macroquad::color::Color;
use macroquad::math::Rect;
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines};
use macroquad::text::draw_text;
use macroquad::window::clear_background;

use crate::game::entity::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, DEFAULT_COLOR};
use crate::game::{GameState, Position, Rgb};
use crate::metrics::GameMetrics;

const HUD_FONT_SIZE: f32 = 18.0;

/// Height of the strip above the board that holds the HUD
pub const HUD_HEIGHT: i32 = 24;

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::from_rgba(r, g, b, 255)
    }
}

/// Draws the board into the macroquad window, one cell per `cell_size` square
pub struct WindowRenderer {
    show_hud: bool,
}

impl WindowRenderer {
    pub fn new(show_hud: bool) -> Self {
        Self { show_hud }
    }

    /// Window y coordinate of the board's top edge
    pub fn board_top(&self) -> f32 {
        if self.show_hud { HUD_HEIGHT as f32 } else { 0.0 }
    }

    /// Redraw the whole frame. Clearing the background also erases the
    /// tail cell vacated on the last tick.
    pub fn draw(&self, state: &GameState, metrics: &GameMetrics) {
        clear_background(BOARD_BACKGROUND_COLOR.into());

        let top = self.board_top();
        for entity in state.entities() {
            let color = entity.color().into();
            for &pos in entity.cells() {
                draw_cell(cell_rect(pos, state.board.cell_size, top), color);
            }
        }

        if self.show_hud {
            self.draw_hud(state, metrics);
        }
    }

    fn draw_hud(&self, state: &GameState, metrics: &GameMetrics) {
        let width = state.board.width as f32;
        draw_rectangle(0.0, 0.0, width, HUD_HEIGHT as f32, BORDER_COLOR.into());
        draw_text(
            &hud_text(state, metrics),
            6.0,
            HUD_FONT_SIZE,
            HUD_FONT_SIZE,
            DEFAULT_COLOR.into(),
        );
    }
}

impl Default for WindowRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Screen rectangle covered by a cell, for a board drawn `top` pixels down
pub fn cell_rect(pos: Position, cell_size: i32, top: f32) -> Rect {
    Rect::new(
        pos.x as f32,
        pos.y as f32 + top,
        cell_size as f32,
        cell_size as f32,
    )
}

fn draw_cell(rect: Rect, color: Color) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, BORDER_COLOR.into());
}

fn hud_text(state: &GameState, metrics: &GameMetrics) -> String {
    format!(
        "Length {}  Best {}  Resets {}  {}",
        state.snake.length(),
        metrics.best_length,
        state.resets,
        metrics.format_time()
    )
}
