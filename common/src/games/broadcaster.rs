use std::future::Future;

use super::snake::{SessionSummary, SnakeSnapshot};

/// Output seam of a running session: whoever renders or relays the game.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: &SnakeSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: &SessionSummary) -> impl Future<Output = ()> + Send;
}
