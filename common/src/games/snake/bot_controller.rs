use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use super::simulator::SnakeSimulator;
use super::types::{Cell, Direction, SessionStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakeBotType {
    #[default]
    Efficient,
    Random,
}

pub struct BotController;

impl BotController {
    pub fn calculate_move(
        bot_type: SnakeBotType,
        sim: &SnakeSimulator,
        rng: &mut SessionRng,
    ) -> Option<Direction> {
        if sim.status() != SessionStatus::Running {
            return None;
        }
        match bot_type {
            SnakeBotType::Efficient => Self::efficient_pathfinding(sim, rng),
            SnakeBotType::Random => Self::random_valid_move(sim, rng),
        }
    }

    fn efficient_pathfinding(sim: &SnakeSimulator, rng: &mut SessionRng) -> Option<Direction> {
        let Some(food) = sim.food() else {
            return Self::random_valid_move(sim, rng);
        };

        Self::safe_directions(sim)
            .into_iter()
            .min_by_key(|dir| sim.snake().head().step(*dir).manhattan_distance(&food))
            .or_else(|| Self::random_valid_move(sim, rng))
    }

    fn random_valid_move(sim: &SnakeSimulator, rng: &mut SessionRng) -> Option<Direction> {
        let safe = Self::safe_directions(sim);
        if safe.is_empty() {
            Some(sim.direction())
        } else {
            Some(safe[rng.random_range(0..safe.len())])
        }
    }

    fn safe_directions(sim: &SnakeSimulator) -> Vec<Direction> {
        let head = sim.snake().head();
        Direction::ALL
            .into_iter()
            .filter(|dir| !dir.is_opposite(&sim.direction()))
            .filter(|dir| Self::is_safe(sim, head.step(*dir)))
            .collect()
    }

    // The tail counts as occupied: the simulator checks the pre-move body.
    fn is_safe(sim: &SnakeSimulator, cell: Cell) -> bool {
        cell.is_in_bounds() && !sim.snake().contains(&cell)
    }
}
