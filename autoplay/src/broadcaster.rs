use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use common::games::GameBroadcaster;
use common::games::snake::{SessionSummary, SnakeSnapshot};
use common::log;

/// Reports a bot game through the log: one line per food eaten and one when
/// the session ends.
#[derive(Clone)]
pub struct LogBroadcaster {
    game_index: u32,
    last_score: Arc<AtomicU32>,
}

impl LogBroadcaster {
    pub fn new(game_index: u32) -> Self {
        Self {
            game_index,
            last_score: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl GameBroadcaster for LogBroadcaster {
    async fn broadcast_state(&self, snapshot: &SnakeSnapshot) {
        let previous = self.last_score.swap(snapshot.score, Ordering::Relaxed);
        if snapshot.score > previous {
            log!(
                "[game {}] Score {} (length {})",
                self.game_index,
                snapshot.score,
                snapshot.snake.len()
            );
        }
    }

    async fn broadcast_game_over(&self, summary: &SessionSummary) {
        log!(
            "[game {}] Over after {} ticks: {:?}, score {}, seed {}",
            self.game_index,
            summary.ticks,
            summary.outcome,
            summary.final_score,
            summary.seed
        );
    }
}
