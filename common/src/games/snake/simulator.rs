use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::log;
use super::snake::Snake;
use super::types::{
    Cell, CollisionKind, Direction, SessionStatus, FOOD_SCORE, GRID_SIZE, START_CELL,
    START_DIRECTION,
};

/// Random draws before food placement switches to picking among free cells.
pub const MAX_FOOD_PLACEMENT_ATTEMPTS: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnakeSnapshot {
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub status: SessionStatus,
    pub direction: Direction,
}

impl SnakeSnapshot {
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// Not running; nothing changed.
    Idle,
    Moved,
    AteFood,
    Collided(CollisionKind),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickResult {
    pub event: TickEvent,
    pub snapshot: SnakeSnapshot,
}

impl TickResult {
    pub fn is_terminal(&self) -> bool {
        self.snapshot.status == SessionStatus::Terminated
    }

    /// Score carried by a terminal result.
    pub fn final_score(&self) -> Option<u32> {
        self.is_terminal().then_some(self.snapshot.score)
    }
}

/// One game session on the fixed grid. Every call is synchronous and
/// infallible; the caller owns the clock and serializes calls.
#[derive(Clone, Debug)]
pub struct SnakeSimulator {
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Option<Cell>,
    score: u32,
    status: SessionStatus,
    last_collision: Option<CollisionKind>,
    rng: SessionRng,
}

impl SnakeSimulator {
    pub fn new(rng: SessionRng) -> Self {
        Self {
            snake: Snake::new(START_CELL),
            direction: START_DIRECTION,
            pending_direction: START_DIRECTION,
            food: None,
            score: 0,
            status: SessionStatus::NotStarted,
            last_collision: None,
            rng,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(SessionRng::new(seed))
    }

    pub fn start(&mut self) {
        self.snake = Snake::new(START_CELL);
        self.direction = START_DIRECTION;
        self.pending_direction = START_DIRECTION;
        self.score = 0;
        self.last_collision = None;
        self.food = self.place_food();
        self.status = SessionStatus::Running;
        log!("Session started (seed {}), food at {:?}", self.rng.seed(), self.food);
    }

    /// Reverse turns are measured against the direction applied on the last
    /// tick, not the pending one, so two quick turns cannot fold the snake.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status != SessionStatus::Running || direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = direction;
    }

    pub fn advance(&mut self) -> TickResult {
        if self.status != SessionStatus::Running {
            return self.result(TickEvent::Idle);
        }

        self.direction = self.pending_direction;
        let next_head = self.snake.head().step(self.direction);

        // Checked against the whole current body: the tail has not moved yet.
        let collision = if !next_head.is_in_bounds() {
            Some(CollisionKind::Wall)
        } else if self.snake.contains(&next_head) {
            Some(CollisionKind::SelfCollision)
        } else {
            None
        };

        if let Some(kind) = collision {
            self.status = SessionStatus::Terminated;
            self.last_collision = Some(kind);
            log!(
                "Game over: {} at ({}, {}), final score {}",
                kind,
                next_head.x,
                next_head.y,
                self.score
            );
            return self.result(TickEvent::Collided(kind));
        }

        self.snake.push_head(next_head);

        if self.food == Some(next_head) {
            self.score += FOOD_SCORE;
            self.food = self.place_food();
            log!(
                "Ate food at ({}, {}). Score: {}, length: {}",
                next_head.x,
                next_head.y,
                self.score,
                self.snake.len()
            );
            self.result(TickEvent::AteFood)
        } else {
            self.snake.pop_tail();
            self.result(TickEvent::Moved)
        }
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            snake: self.snake.to_vec(),
            food: self.food,
            score: self.score,
            status: self.status,
            direction: self.direction,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn last_collision(&self) -> Option<CollisionKind> {
        self.last_collision
    }

    #[cfg(test)]
    pub(crate) fn rng_mut(&mut self) -> &mut SessionRng {
        &mut self.rng
    }

    fn result(&self, event: TickEvent) -> TickResult {
        TickResult {
            event,
            snapshot: self.snapshot(),
        }
    }

    /// Rejection sampling over the whole grid, then a uniform pick among the
    /// free cells once the attempt cap is hit. `None` only on a full board.
    fn place_food(&mut self) -> Option<Cell> {
        for _ in 0..MAX_FOOD_PLACEMENT_ATTEMPTS {
            let candidate = Cell::new(
                self.rng.random_range(0..GRID_SIZE),
                self.rng.random_range(0..GRID_SIZE),
            );
            if !self.snake.contains(&candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Cell> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.snake.contains(cell))
            .collect();

        if free.is_empty() {
            log!("Board is full, no cell left for food");
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, body: Vec<Cell>, direction: Direction, food: Option<Cell>) {
        self.snake = Snake::from_cells(body);
        self.direction = direction;
        self.pending_direction = direction;
        self.food = food;
        self.status = SessionStatus::Running;
    }
}
