mod bot_controller;
mod session;
mod simulator;
mod snake;
mod types;

pub use bot_controller::{BotController, SnakeBotType};
pub use session::{SessionCommand, SessionOutcome, SessionSummary, SnakeSession, SnakeSessionSettings};
pub use simulator::{MAX_FOOD_PLACEMENT_ATTEMPTS, SnakeSimulator, SnakeSnapshot, TickEvent, TickResult};
pub use snake::Snake;
pub use types::{
    Cell, CollisionKind, Direction, SessionStatus, FOOD_SCORE, GRID_SIZE, START_CELL,
    START_DIRECTION,
};
