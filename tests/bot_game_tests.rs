use tictactoe::transport::in_memory;
use tictactoe::{
    run_bot, BotPlayer, ChannelObserver, Coordinator, GameConfig, GameSession, Move, Outcome,
    Symbol, FIRST_MOVER,
};

fn replay(local: Symbol, moves: &[(usize, usize)]) -> GameSession {
    let mut game = GameSession::new(GameConfig::new(3).unwrap(), local, FIRST_MOVER);
    for &(r, c) in moves {
        let mover = game.current_symbol();
        game.play(Move::new(r, c), mover).unwrap();
    }
    game
}

#[test]
fn bot_completes_its_own_line() {
    // X: (0,0) (0,1)   O: (1,0) (1,1)
    let game = replay(Symbol::X, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    for seed in 0..20 {
        assert_eq!(BotPlayer::from_seed(seed).choose(&game), Some(Move::new(0, 2)));
    }
}

#[test]
fn bot_prefers_winning_over_blocking() {
    // O to move with both players one cell short
    let game = replay(Symbol::O, &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2)]);
    assert_eq!(BotPlayer::from_seed(3).choose(&game), Some(Move::new(1, 2)));
}

#[test]
fn bot_blocks_the_opponent() {
    // X threatens (0,2)
    let game = replay(Symbol::O, &[(0, 0), (1, 1), (0, 1)]);
    for seed in 0..20 {
        assert_eq!(BotPlayer::from_seed(seed).choose(&game), Some(Move::new(0, 2)));
    }
}

#[test]
fn bot_picks_an_empty_cell() {
    let game = replay(Symbol::X, &[]);
    let mv = BotPlayer::from_seed(9).choose(&game).unwrap();
    assert!(mv.row < 3 && mv.col < 3);

    let full = replay(
        Symbol::X,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ],
    );
    assert_eq!(BotPlayer::from_seed(9).choose(&full), None);
}

#[test]
fn same_seed_same_moves() {
    let game = replay(Symbol::X, &[]);
    let a = BotPlayer::from_seed(42).choose(&game);
    let b = BotPlayer::from_seed(42).choose(&game);
    assert_eq!(a, b);
}

async fn bot_match(size: usize, games: usize, seeds: (u64, u64)) -> anyhow::Result<Vec<Outcome>> {
    let (host_ch, guest_ch) = in_memory::pair(size).await?;
    let (obs1, mut events1) = ChannelObserver::new();
    let (obs2, mut events2) = ChannelObserver::new();
    let host = Coordinator::new(obs1);
    let guest = Coordinator::new(obs2);
    host.attach(host_ch).await?;
    guest.attach(guest_ch).await?;

    let mut bot1 = BotPlayer::from_seed(seeds.0);
    let mut bot2 = BotPlayer::from_seed(seeds.1);
    let (a, b) = tokio::try_join!(
        run_bot(&host, &mut events1, &mut bot1, games),
        run_bot(&guest, &mut events2, &mut bot2, games),
    )?;
    assert_eq!(a, b, "both peers must agree on every outcome");
    host.shutdown().await;
    guest.shutdown().await;
    Ok(a)
}

#[tokio::test(flavor = "multi_thread")]
async fn bots_play_a_series_with_rematches() -> anyhow::Result<()> {
    let outcomes = bot_match(3, 6, (1, 2)).await?;
    assert_eq!(outcomes.len(), 6);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn bots_finish_on_large_boards() -> anyhow::Result<()> {
    for size in [5, 10] {
        let outcomes = bot_match(size, 2, (7, 8)).await?;
        assert_eq!(outcomes.len(), 2);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn zero_games_returns_immediately() -> anyhow::Result<()> {
    let outcomes = bot_match(3, 0, (1, 1)).await?;
    assert!(outcomes.is_empty());
    Ok(())
}
