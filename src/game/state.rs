use rand::seq::SliceRandom;
use rand::Rng;

use super::direction::Direction;
use super::entity::{Entity, Rgb, FOOD_COLOR, SNAKE_COLOR};
use super::grid::{Board, Position};

/// Result of advancing the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The head moved; `vacated` is the tail cell dropped this move, if any
    Moved {
        new_head: Position,
        vacated: Option<Position>,
    },
    /// The head ran into the body and the snake was reset
    Crashed { at: Position },
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Direction buffered by input, applied after the next move
    next_direction: Option<Direction>,
    /// Target body length
    length: usize,
    /// Cell the snake restarts from
    start: Position,
    /// Tail cell dropped by the last move
    vacated: Option<Position>,
}

impl Snake {
    /// Create a one-segment snake at `start`, heading right
    pub fn new(start: Position) -> Self {
        Self {
            body: vec![start],
            direction: Direction::Right,
            next_direction: None,
            length: 1,
            start,
            vacated: None,
        }
    }

    /// Create a snake from a head and the segments behind it. The target
    /// length is the whole body and the snake restarts from the head cell.
    pub fn with_tail(head: Position, tail: &[Position], direction: Direction) -> Self {
        let mut body = Vec::with_capacity(tail.len() + 1);
        body.push(head);
        body.extend_from_slice(tail);

        Self {
            length: body.len(),
            body,
            direction,
            next_direction: None,
            start: head,
            vacated: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// Target body length
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn vacated(&self) -> Option<Position> {
        self.vacated
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Buffer a direction change. Turning back onto the current direction is
    /// rejected; an accepted change replaces any earlier pending one.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.next_direction = Some(direction);
        true
    }

    /// Apply the pending direction, if any
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.next_direction.take() {
            self.direction = direction;
        }
    }

    /// Advance one cell, wrapping around the board.
    ///
    /// The tail is trimmed before the collision check, so moving into the
    /// cell the tail is leaving is safe. The first `neck_length` segments
    /// behind the head never count as a collision.
    pub fn move_step(&mut self, board: &Board, neck_length: usize) -> MoveResult {
        let new_head = board.wrap(self.head().stepped(self.direction, board.cell_size));
        self.body.insert(0, new_head);

        self.vacated = if self.body.len() > self.length {
            self.body.pop()
        } else {
            None
        };

        if self.body.iter().skip(neck_length + 1).any(|&pos| pos == new_head) {
            self.reset();
            return MoveResult::Crashed { at: new_head };
        }

        MoveResult::Moved {
            new_head,
            vacated: self.vacated,
        }
    }

    /// Extend the target length by one segment
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// Back to a single segment at the start cell, heading right
    pub fn reset(&mut self) {
        self.length = 1;
        self.body.clear();
        self.body.push(self.start);
        self.direction = Direction::Right;
        self.next_direction = None;
        self.vacated = None;
    }
}

impl Entity for Snake {
    fn head(&self) -> Position {
        Snake::head(self)
    }

    fn cells(&self) -> &[Position] {
        &self.body
    }

    fn color(&self) -> Rgb {
        SNAKE_COLOR
    }
}

/// The apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move to a uniformly random free cell. Returns false, leaving the
    /// position untouched, when `occupied` covers the whole board.
    pub fn randomize_position<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        occupied: &[Position],
        rng: &mut R,
    ) -> bool {
        let free: Vec<Position> = board.cells().filter(|pos| !occupied.contains(pos)).collect();

        match free.choose(rng) {
            Some(&pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}

impl Entity for Food {
    fn head(&self) -> Position {
        self.position
    }

    fn cells(&self) -> &[Position] {
        std::slice::from_ref(&self.position)
    }

    fn color(&self) -> Rgb {
        FOOD_COLOR
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub board: Board,
    /// Ticks since the program started
    pub ticks: u64,
    /// Times the snake has been reset
    pub resets: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, board: Board) -> Self {
        Self {
            snake,
            food,
            board,
            ticks: 0,
            resets: 0,
        }
    }

    /// Entities in drawing order: the snake, then the food on top
    pub fn entities(&self) -> [&dyn Entity; 2] {
        [&self.snake, &self.food]
    }

    /// Apples eaten since the last reset
    pub fn score(&self) -> usize {
        self.snake.length() - 1
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
