#![cfg(feature = "std")]

//! Event loop that lets a [`BotPlayer`] play through a [`Coordinator`].

use log::debug;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    bot::BotPlayer,
    coordinator::Coordinator,
    game::Outcome,
    observer::{GameEvent, GameObserver},
};

/// Play `games` consecutive games, requesting a rematch after each one but
/// the last. Returns the outcomes in order.
///
/// `events` must be fed by the coordinator's observer, e.g. a
/// [`ChannelObserver`](crate::ChannelObserver).
pub async fn run_bot<O: GameObserver>(
    coordinator: &Coordinator<O>,
    events: &mut UnboundedReceiver<GameEvent>,
    bot: &mut BotPlayer,
    games: usize,
) -> anyhow::Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(games);
    if games == 0 {
        return Ok(outcomes);
    }
    while let Some(event) = events.recv().await {
        match event {
            GameEvent::TurnChanged {
                is_local_turn: true,
                turn,
            } => {
                let game = coordinator
                    .game()
                    .await
                    .ok_or_else(|| anyhow::anyhow!("session ended while it was our turn"))?;
                let mv = bot
                    .choose(&game)
                    .ok_or_else(|| anyhow::anyhow!("no empty cell left on turn {}", turn))?;
                debug!("bot picked {} on turn {}", mv, turn);
                coordinator.submit_local_move(mv.row, mv.col).await?;
            }
            GameEvent::GameOver(outcome) => {
                outcomes.push(outcome);
                if outcomes.len() == games {
                    return Ok(outcomes);
                }
                coordinator.request_rematch().await?;
            }
            GameEvent::FatalError(message) => {
                return Err(anyhow::anyhow!("session failed: {}", message));
            }
            _ => {}
        }
    }
    Err(anyhow::anyhow!("event stream ended after {} games", outcomes.len()))
}
