#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use tictactoe::{
    init_logging, run_bot, BotPlayer, ChannelObserver, Coordinator, GameEvent, Outcome,
    SessionError, Symbol, DEFAULT_BOARD_SIZE, DEFAULT_PORT,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Bot,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Host a game and wait for an opponent to connect. The host plays X.
    Host {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, help = "Board size N (3-10)")]
        size: usize,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix the bot's RNG seed (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1, help = "Games a bot plays before quitting")]
        games: usize,
    },
    /// Connect to a hosted game. The joining player plays O.
    Join {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix the bot's RNG seed (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1, help = "Games a bot plays before quitting")]
        games: usize,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (observer, mut events) = ChannelObserver::new();
    let coordinator = Coordinator::new(observer);

    let (player, seed, games) = match cli.command {
        Commands::Host {
            port,
            size,
            player,
            seed,
            games,
        } => {
            let addr = coordinator.start_as_listener(port, size).await?;
            println!("Waiting for an opponent on {}...", addr);
            (player, seed, games)
        }
        Commands::Join {
            host,
            port,
            player,
            seed,
            games,
        } => {
            println!("Connecting to {}:{}...", host, port);
            coordinator.start_as_connector(&host, port).await?;
            (player, seed, games)
        }
    };

    let result = match player {
        PlayerType::Human => play_human(&coordinator, &mut events).await,
        PlayerType::Bot => {
            let rng = match seed {
                Some(s) => {
                    println!("Using fixed seed: {} (bot moves will be reproducible)", s);
                    SmallRng::seed_from_u64(s)
                }
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let mut bot = BotPlayer::new(rng);
            run_bot(&coordinator, &mut events, &mut bot, games)
                .await
                .map(|outcomes| {
                    for (i, outcome) in outcomes.iter().enumerate() {
                        println!("Game {}: {}", i + 1, outcome);
                    }
                })
        }
    };
    coordinator.shutdown().await;
    if let Err(e) = &result {
        eprintln!("Game ended with an error: {}", e);
    }
    result
}

/// Text front end: prints events, reads `row col` moves from stdin.
#[cfg(feature = "std")]
async fn play_human(
    coordinator: &Coordinator<ChannelObserver>,
    events: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> anyhow::Result<()> {
    let mut input = stdin_lines();
    let mut me = Symbol::X;

    while let Some(event) = events.recv().await {
        match event {
            GameEvent::Connected { local, board_size } => {
                me = local;
                println!(
                    "Opponent connected. You play {} on a {}x{} board.",
                    local, board_size, board_size
                );
                println!("Enter moves as `row col`, counting from 0.");
            }
            GameEvent::CellFilled { row, col, symbol } => {
                println!("{} took ({}, {})", symbol, row, col);
            }
            GameEvent::TurnChanged {
                turn,
                is_local_turn: true,
            } => {
                println!("Turn {} - your turn", turn);
                read_and_submit(coordinator, &mut input).await?;
            }
            GameEvent::TurnChanged { turn, .. } => {
                println!("Turn {} - opponent's turn", turn);
            }
            GameEvent::GameOver(outcome) => {
                match outcome {
                    Outcome::Won(s) if s == me => println!("Game over. You win."),
                    Outcome::Won(_) => println!("Game over. You lose."),
                    Outcome::Draw => println!("Game over. Draw."),
                }
                println!("Rematch? [y/N]");
                let answer = input.recv().await.unwrap_or_default();
                if !answer.trim().eq_ignore_ascii_case("y") {
                    return Ok(());
                }
                coordinator.request_rematch().await?;
            }
            GameEvent::FatalError(message) => {
                return Err(anyhow::anyhow!(message));
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn read_and_submit(
    coordinator: &Coordinator<ChannelObserver>,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    loop {
        let line = input
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("stdin closed"))?;
        let Some((row, col)) = parse_move(&line) else {
            println!("Could not read `{}`, expected `row col`", line.trim());
            continue;
        };
        match coordinator.submit_local_move(row, col).await {
            Ok(_) => return Ok(()),
            Err(SessionError::ProtocolViolation(e)) => println!("Illegal move: {}", e),
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(feature = "std")]
fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, col))
}

/// Lines from stdin, read on a plain thread so a pending read never holds up
/// runtime shutdown.
#[cfg(feature = "std")]
fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
