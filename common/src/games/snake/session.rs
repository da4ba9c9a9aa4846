use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use crate::defaults::DEFAULT_TICK_INTERVAL_MS;
use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::bot_controller::{BotController, SnakeBotType};
use super::simulator::{SnakeSimulator, TickEvent};
use super::types::{CollisionKind, Direction};

#[derive(Clone, Debug)]
pub struct SnakeSessionSettings {
    pub tick_interval: Duration,
    pub seed: Option<u64>,
    pub bot: Option<SnakeBotType>,
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seed: None,
            bot: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionOutcome {
    Collided(CollisionKind),
    Abandoned,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub seed: u64,
    pub final_score: u32,
    pub ticks: u64,
    pub snake_length: usize,
    pub outcome: SessionOutcome,
}

impl SessionSummary {
    /// Only finished games are scored; abandoned ones never reach the leaderboard.
    pub fn is_finished(&self) -> bool {
        matches!(self.outcome, SessionOutcome::Collided(_))
    }
}

pub struct SnakeSession;

impl SnakeSession {
    /// Drives one simulator on a fixed interval. Queued commands are applied
    /// inside the tick, right before the single `advance()`, so direction
    /// changes and moves never interleave.
    pub async fn run(
        settings: SnakeSessionSettings,
        mut command_rx: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: impl GameBroadcaster,
    ) -> SessionSummary {
        let rng = SessionRng::from_seed_or_random(settings.seed);
        let seed = rng.seed();
        let mut bot_rng = SessionRng::new(seed.wrapping_add(1));
        let mut sim = SnakeSimulator::new(rng);
        sim.start();
        broadcaster.broadcast_state(&sim.snapshot()).await;

        let mut tick_timer = interval(settings.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        tick_timer.tick().await;

        let mut ticks: u64 = 0;
        let mut channel_open = true;

        let outcome = loop {
            tick_timer.tick().await;

            let mut quit = false;
            while channel_open {
                match command_rx.try_recv() {
                    Ok(SessionCommand::Turn(direction)) => sim.request_direction(direction),
                    Ok(SessionCommand::Quit) => {
                        quit = true;
                        break;
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        // Bot-driven sessions run without a human on the other end.
                        channel_open = false;
                        if settings.bot.is_none() {
                            quit = true;
                        }
                    }
                }
            }
            if quit {
                log!("[session:{}] Abandoned after {} ticks", seed, ticks);
                break SessionOutcome::Abandoned;
            }

            if let Some(bot_type) = settings.bot
                && let Some(direction) = BotController::calculate_move(bot_type, &sim, &mut bot_rng)
            {
                sim.request_direction(direction);
            }

            let result = sim.advance();
            ticks += 1;
            broadcaster.broadcast_state(&result.snapshot).await;

            if let TickEvent::Collided(kind) = result.event {
                break SessionOutcome::Collided(kind);
            }
        };

        let summary = SessionSummary {
            seed,
            final_score: sim.score(),
            ticks,
            snake_length: sim.snake().len(),
            outcome,
        };
        broadcaster.broadcast_game_over(&summary).await;
        summary
    }
}
