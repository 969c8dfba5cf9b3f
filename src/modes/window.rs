use macroquad::input::{get_keys_pressed, is_quit_requested, prevent_quit};
use macroquad::time::get_time;
use macroquad::window::{next_frame, Conf};
use tracing::info;

use crate::game::{GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HUD_HEIGHT, WindowRenderer};

/// Window settings matching the board size, plus the HUD strip when shown
pub fn window_conf(config: &GameConfig) -> Conf {
    let hud_height = if config.show_hud { HUD_HEIGHT } else { 0 };
    Conf {
        window_title: String::from("Snake - Esc to quit"),
        window_width: config.screen_width,
        window_height: config.screen_height + hud_height,
        window_resizable: false,
        ..Default::default()
    }
}

/// Plays the game in a macroquad window
pub struct WindowMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: WindowRenderer,
    input_handler: InputHandler,
    tick_seconds: f64,
    should_quit: bool,
}

impl WindowMode {
    pub fn new(config: GameConfig) -> Self {
        let tick_seconds = config.tick_interval().as_secs_f64();
        let renderer = WindowRenderer::new(config.show_hud);
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            tick_seconds,
            should_quit: false,
        }
    }

    /// Runs until the window is closed or Escape is pressed. Must be driven
    /// by macroquad, e.g. through `macroquad::Window::from_config`.
    pub async fn run(mut self) {
        // Closing the window ends the loop below instead of the process
        prevent_quit();
        info!(
            columns = self.state.board.columns(),
            rows = self.state.board.rows(),
            "window game started"
        );

        let mut last_tick = get_time();
        loop {
            self.poll_input();
            if self.should_quit {
                break;
            }

            let now = get_time();
            if now - last_tick >= self.tick_seconds {
                last_tick = now;
                self.update_game();
            }

            self.metrics.update();
            self.renderer.draw(&self.state, &self.metrics);
            next_frame().await;
        }

        info!(ticks = self.state.ticks, best_length = self.metrics.best_length, "quit");
    }

    fn poll_input(&mut self) {
        if is_quit_requested() {
            self.should_quit = true;
            return;
        }

        let actions = self.input_handler.handle_window_keys(get_keys_pressed());
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                self.state.snake.steer(direction);
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick(&mut self.state);
        self.metrics.on_tick(&outcome, self.state.snake.length());
    }
}
