#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use serde_json::json;
#[cfg(feature = "std")]
use tictactoe::{
    run_bot, transport::in_memory, BotPlayer, ChannelObserver, Coordinator, Outcome, Symbol,
    DEFAULT_BOARD_SIZE,
};

/// Two bots play each other over an in-memory channel; prints a JSON summary.
#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        eprintln!("Usage: {} <seed1> <seed2> [games] [board_size]", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;
    let games: usize = args.get(3).map(|s| s.parse()).transpose()?.unwrap_or(1);
    let size: usize = args
        .get(4)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(DEFAULT_BOARD_SIZE);

    let (host_channel, guest_channel) = in_memory::pair(size).await?;
    let (obs1, mut events1) = ChannelObserver::new();
    let (obs2, mut events2) = ChannelObserver::new();
    let host = Coordinator::new(obs1);
    let guest = Coordinator::new(obs2);
    host.attach(host_channel).await?;
    guest.attach(guest_channel).await?;

    let mut bot1 = BotPlayer::from_seed(seed1);
    let mut bot2 = BotPlayer::from_seed(seed2);

    let (outcomes, _) = tokio::try_join!(
        run_bot(&host, &mut events1, &mut bot1, games),
        run_bot(&guest, &mut events2, &mut bot2, games),
    )?;
    host.shutdown().await;
    guest.shutdown().await;

    let count = |wanted: Outcome| outcomes.iter().filter(|o| **o == wanted).count();
    let result = json!({
        "board_size": size,
        "games": outcomes,
        "player1": {"symbol": Symbol::X, "wins": count(Outcome::Won(Symbol::X))},
        "player2": {"symbol": Symbol::O, "wins": count(Outcome::Won(Symbol::O))},
        "draws": count(Outcome::Draw),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
