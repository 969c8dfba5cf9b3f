use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::entity::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, DEFAULT_COLOR};
use crate::game::{GameState, Rgb};
use crate::metrics::GameMetrics;

/// Terminal columns used to draw one board cell
const CELL_WIDTH: u16 = 2;

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Draws the board in the terminal, one cell as two characters
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Boards wider than the terminal are clipped by `centered`
        let grid_width = cells_to_u16(state.board.columns())
            .saturating_mul(CELL_WIDTH)
            .saturating_add(2);
        let grid_height = cells_to_u16(state.board.rows()).saturating_add(2);
        let game_area = centered(chunks[1], grid_width, grid_height);
        frame.render_widget(self.render_grid(state), game_area);

        // Render footer with controls
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let cells = paint(state);
        let columns = state.board.columns() as usize;

        let lines: Vec<Line> = cells
            .chunks(columns)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(color) => Span::styled("██", Style::default().fg((*color).into())),
                        None => Span::styled(
                            "· ",
                            Style::default()
                                .fg(Color::DarkGray)
                                .bg(BOARD_BACKGROUND_COLOR.into()),
                        ),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(BORDER_COLOR.into()))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(DEFAULT_COLOR.into());

        let text = vec![Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(
                state.snake.length().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_length.to_string(), value),
            Span::raw("    "),
            Span::styled("Resets: ", label),
            Span::styled(state.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw("/"),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Color of every board cell, row by row; later entities paint over earlier ones
fn paint(state: &GameState) -> Vec<Option<Rgb>> {
    let board = &state.board;
    let mut cells = vec![None; board.cell_count()];

    for entity in state.entities() {
        for &pos in entity.cells() {
            let (col, row) = board.column_row(pos);
            cells[(row * board.columns() + col) as usize] = Some(entity.color());
        }
    }

    cells
}

fn cells_to_u16(cells: i32) -> u16 {
    u16::try_from(cells.max(0)).unwrap_or(u16::MAX)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{FOOD_COLOR, SNAKE_COLOR};
    use crate::game::{Board, Food, Position, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn state() -> GameState {
        let board = Board::new(200, 100, 20);
        let snake = Snake::with_tail(
            Position::new(40, 20),
            &[Position::new(20, 20)],
            crate::game::Direction::Right,
        );
        GameState::new(snake, Food::new(Position::new(160, 80)), board)
    }

    #[test]
    fn test_paint_marks_entities() {
        let cells = paint(&state());

        assert_eq!(cells.len(), 50);
        assert_eq!(cells[10 + 2], Some(SNAKE_COLOR));
        assert_eq!(cells[10 + 1], Some(SNAKE_COLOR));
        assert_eq!(cells[4 * 10 + 8], Some(FOOD_COLOR));
        assert_eq!(cells.iter().filter(|cell| cell.is_some()).count(), 3);
    }

    #[test]
    fn test_centered_clamps_to_area() {
        let area = Rect::new(0, 3, 100, 30);
        assert_eq!(centered(area, 22, 7), Rect::new(39, 14, 22, 7));
        assert_eq!(centered(area, 200, 70), area);
    }

    #[test]
    fn test_board_size_saturates() {
        assert_eq!(cells_to_u16(32), 32);
        assert_eq!(cells_to_u16(40_000), 40_000);
        assert_eq!(cells_to_u16(70_000), u16::MAX);
        assert_eq!(cells_to_u16(-1), 0);
    }

    #[test]
    fn test_render_wide_board_is_clipped() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        // 40_000 columns would overflow u16 once doubled for the cell width
        let board = Board::new(40_000 * 20, 40, 20);
        let state = GameState::new(
            Snake::new(board.center()),
            Food::new(Position::new(0, 0)),
            board,
        );
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Length: 1"));
    }

    #[test]
    fn test_render_draws_board_and_stats() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let state = state();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| Renderer::new().render(frame, &state, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Length: 2"));
        assert!(text.contains("Snake"));

        let snake_cells = buffer
            .content()
            .iter()
            .filter(|cell| cell.symbol() == "█" && cell.style().fg == Some(SNAKE_COLOR.into()))
            .count();
        assert_eq!(snake_cells, 4);
    }
}
