use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    grid::Position,
    state::{Food, GameState, MoveResult, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Tail cell that was left behind and needs erasing
    pub vacated: Option<Position>,
    /// Whether the snake ate the food this tick
    pub ate_food: bool,
    /// Whether the snake ran into itself and was reset
    pub collided: bool,
    /// Whether the snake filled the board and the round restarted
    pub board_full: bool,
    /// Target length the snake had reached before a reset this tick
    pub length_before_reset: Option<usize>,
}

impl TickOutcome {
    /// The snake went back to its start cell this tick
    pub fn was_reset(&self) -> bool {
        self.collided || self.board_full
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the starting state: a one-cell snake in the middle of the board
    /// heading right, and food on some other cell
    pub fn reset(&mut self) -> GameState {
        let board = self.config.board();
        let snake = Snake::new(board.center());
        let mut food = Food::new(board.center());
        food.randomize_position(&board, snake.body(), &mut self.rng);

        GameState::new(snake, food, board)
    }

    /// Execute one tick: move, resolve collision or food, then apply the
    /// buffered direction change
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let length_before = state.snake.length();
        state.ticks += 1;

        match state.snake.move_step(&state.board, self.config.neck_length) {
            MoveResult::Crashed { at } => {
                info!(x = at.x, y = at.y, tick = state.ticks, "snake ran into itself");
                outcome.collided = true;
                outcome.length_before_reset = Some(length_before);
                state.resets += 1;
                self.relocate_food(state);
            }
            MoveResult::Moved { vacated, .. } => {
                outcome.vacated = vacated;

                if state.snake.occupies(state.food.position()) {
                    state.snake.grow();
                    outcome.ate_food = true;
                    debug!(length = state.snake.length(), "snake ate the food");

                    if !self.relocate_food(state) {
                        warn!(length = state.snake.length(), "no free cell left, restarting");
                        outcome.board_full = true;
                        outcome.length_before_reset = Some(state.snake.length());
                        state.snake.reset();
                        state.resets += 1;
                        self.relocate_food(state);
                    }
                }
            }
        }

        state.snake.update_direction();
        outcome
    }

    fn relocate_food(&mut self, state: &mut GameState) -> bool {
        let placed = state
            .food
            .randomize_position(&state.board, state.snake.body(), &mut self.rng);
        if placed {
            let food = state.food.position();
            debug!(x = food.x, y = food.y, "food placed");
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Entity};

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig {
            seed: Some(11),
            ..Default::default()
        })
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert_eq!(state.snake.body(), &[Position::new(320, 240)]);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.length(), 1);
        assert_ne!(state.food.position(), state.snake.head());
        assert!(state.board.contains(state.food.position()));
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_seed_makes_food_deterministic() {
        let first = engine().reset();
        let second = engine().reset();
        assert_eq!(first.food, second.food);
    }

    #[test]
    fn test_single_tick_moves_head() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        let outcome = engine.tick(&mut state);

        assert_eq!(state.snake.body(), &[Position::new(340, 240)]);
        assert_eq!(outcome.vacated, Some(Position::new(320, 240)));
        assert!(!outcome.ate_food);
        assert!(!outcome.collided);
        assert_eq!(outcome.length_before_reset, None);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_eating_grows_on_following_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(340, 240));

        let outcome = engine.tick(&mut state);
        assert!(outcome.ate_food);
        assert_eq!(state.snake.length(), 2);
        assert_eq!(state.snake.body().len(), 1);
        assert_eq!(state.score(), 1);
        assert!(!state.is_occupied_by_snake(state.food.position()));

        // Park the new food out of the way so the next tick is a plain move
        state.food = Food::new(Position::new(0, 0));
        let outcome = engine.tick(&mut state);
        assert!(!outcome.ate_food);
        assert_eq!(outcome.vacated, None);
        assert_eq!(
            state.snake.body(),
            &[Position::new(360, 240), Position::new(340, 240)]
        );
    }

    #[test]
    fn test_length_grows_by_one_per_food() {
        let mut engine = engine();
        let mut state = engine.reset();

        for expected in 2..6 {
            state.food = Food::new(state.snake.head().stepped(state.snake.direction(), 20));
            let outcome = engine.tick(&mut state);
            assert!(outcome.ate_food);
            assert_eq!(state.snake.length(), expected);
            assert!(state.snake.body().len() <= state.snake.length());
        }
    }

    #[test]
    fn test_direction_applies_after_move() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        assert!(state.snake.steer(Direction::Up));
        engine.tick(&mut state);
        // The move still used the old direction
        assert_eq!(state.snake.head(), Position::new(340, 240));
        assert_eq!(state.snake.direction(), Direction::Up);

        engine.tick(&mut state);
        assert_eq!(state.snake.head(), Position::new(340, 220));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));

        assert!(!state.snake.steer(Direction::Left));
        engine.tick(&mut state);
        engine.tick(&mut state);

        assert_eq!(state.snake.direction(), Direction::Right);
        assert_eq!(state.snake.head(), Position::new(360, 240));
    }

    #[test]
    fn test_self_collision_resets_and_moves_food() {
        let mut engine = engine();
        let board = engine.config().board();
        let tail = [
            Position::new(40, 0),
            Position::new(40, 20),
            Position::new(20, 20),
            Position::new(0, 20),
        ];
        let mut snake = Snake::with_tail(Position::new(20, 0), &tail, Direction::Left);
        snake.steer(Direction::Down);
        snake.update_direction();
        let mut state = GameState::new(snake, Food::new(Position::new(600, 400)), board);

        let outcome = engine.tick(&mut state);

        assert!(outcome.collided);
        assert!(outcome.was_reset());
        assert_eq!(outcome.length_before_reset, Some(5));
        assert_eq!(state.resets, 1);
        assert_eq!(state.snake.length(), 1);
        assert_eq!(state.snake.body(), &[Position::new(20, 0)]);
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(!state.is_occupied_by_snake(state.food.position()));
    }

    #[test]
    fn test_full_board_restarts_round() {
        let mut engine = GameEngine::new(GameConfig {
            screen_width: 40,
            screen_height: 40,
            seed: Some(5),
            ..Default::default()
        });
        let board = engine.config().board();
        // Three cells of a 2x2 board; the head eats the last free cell
        let tail = [Position::new(0, 0), Position::new(0, 20)];
        let mut snake = Snake::with_tail(Position::new(20, 0), &tail, Direction::Down);
        snake.grow();
        let mut state = GameState::new(snake, Food::new(Position::new(20, 20)), board);

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert!(outcome.board_full);
        assert_eq!(outcome.length_before_reset, Some(5));
        assert_eq!(state.snake.length(), 1);
        assert_ne!(state.food.position(), state.snake.head());
    }

    #[test]
    fn test_head_stays_on_board() {
        let mut engine = engine();
        let mut state = engine.reset();
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for step in 0..400 {
            if step % 37 == 0 {
                state.snake.steer(turns[(step / 37) % turns.len()]);
            }
            engine.tick(&mut state);
            for entity in state.entities() {
                for &cell in entity.cells() {
                    assert!(state.board.contains(cell));
                }
            }
            assert!(!state.is_occupied_by_snake(state.food.position()));
        }
    }
}
