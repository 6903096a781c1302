use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use tictactoe::transport::{in_memory, ChannelError, MoveChannel, Role};
use tictactoe::Move;

#[tokio::test]
async fn pair_agrees_on_board_size() -> anyhow::Result<()> {
    let (host, guest) = in_memory::pair(7).await?;
    assert_eq!(host.role(), Role::Listener);
    assert_eq!(guest.role(), Role::Connector);
    assert_eq!(host.board_size(), 7);
    assert_eq!(guest.board_size(), 7);
    Ok(())
}

#[tokio::test]
async fn moves_flow_both_ways_in_order() -> anyhow::Result<()> {
    let (mut host, mut guest) = in_memory::pair(3).await?;
    host.send(Move::new(0, 0)).await?;
    host.send(Move::new(2, 1)).await?;
    assert_eq!(guest.recv().await?, Move::new(0, 0));
    assert_eq!(guest.recv().await?, Move::new(2, 1));

    guest.send(Move::new(1, 1)).await?;
    assert_eq!(host.recv().await?, Move::new(1, 1));
    Ok(())
}

#[tokio::test]
async fn split_halves_work_from_separate_tasks() -> anyhow::Result<()> {
    let (host, guest) = in_memory::pair(5).await?;
    let (mut tx, _host_rx) = host.split();
    let (_guest_tx, mut rx) = guest.split();

    let reader = tokio::spawn(async move {
        let mut got = Vec::new();
        for _ in 0..5 {
            got.push(rx.recv().await?);
        }
        Ok::<_, ChannelError>(got)
    });
    for i in 0..5 {
        tx.send(Move::new(i, 4 - i)).await?;
    }
    let got = reader.await??;
    assert_eq!(got, (0..5).map(|i| Move::new(i, 4 - i)).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn invalid_board_size_fails_handshake() -> anyhow::Result<()> {
    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&11u32.to_le_bytes()).await?;
    let err = MoveChannel::join(guest_end).await.err().unwrap();
    assert!(matches!(err, ChannelError::Handshake(11)));

    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&2u32.to_le_bytes()).await?;
    let err = MoveChannel::join(guest_end).await.err().unwrap();
    assert!(matches!(err, ChannelError::Handshake(2)));
    Ok(())
}

#[tokio::test]
async fn short_handshake_is_peer_closed() -> anyhow::Result<()> {
    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&[3, 0]).await?;
    drop(raw);
    let err = MoveChannel::join(guest_end).await.err().unwrap();
    assert!(matches!(err, ChannelError::PeerClosed));
    Ok(())
}

#[tokio::test]
async fn partial_record_then_disconnect() -> anyhow::Result<()> {
    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&3u32.to_le_bytes()).await?;
    let mut guest = MoveChannel::join(guest_end).await?;

    // one complete record, then half of the next one
    raw.write_all(&[1, 0, 0, 0, 2, 0, 0, 0]).await?;
    raw.write_all(&[0, 0, 0, 0]).await?;
    drop(raw);

    assert_eq!(guest.recv().await?, Move::new(1, 2));
    assert!(matches!(guest.recv().await, Err(ChannelError::PeerClosed)));
    assert!(matches!(guest.recv().await, Err(ChannelError::AlreadyFailed)));
    Ok(())
}

#[tokio::test]
async fn record_split_across_writes_is_reassembled() -> anyhow::Result<()> {
    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&4u32.to_le_bytes()).await?;
    let mut guest = MoveChannel::join(guest_end).await?;

    let pending = tokio::spawn(async move {
        let mv = guest.recv().await;
        (guest, mv)
    });
    raw.write_all(&[3, 0, 0]).await?;
    tokio::time::sleep(Duration::from_millis(20)).await;
    raw.write_all(&[0, 1, 0, 0, 0]).await?;
    let (_guest, mv) = pending.await?;
    assert_eq!(mv?, Move::new(3, 1));
    Ok(())
}

#[tokio::test]
async fn cancelled_recv_keeps_partial_bytes() -> anyhow::Result<()> {
    let (mut raw, guest_end) = tokio::io::duplex(64);
    raw.write_all(&4u32.to_le_bytes()).await?;
    let mut guest = MoveChannel::join(guest_end).await?;

    raw.write_all(&[2, 0, 0, 0, 3]).await?;
    let first = timeout(Duration::from_millis(50), guest.recv()).await;
    assert!(first.is_err(), "recv should still be waiting for a full record");

    raw.write_all(&[0, 0, 0]).await?;
    assert_eq!(guest.recv().await?, Move::new(2, 3));
    Ok(())
}

#[tokio::test]
async fn close_wakes_a_blocked_receiver() -> anyhow::Result<()> {
    let (host, _guest) = in_memory::pair(3).await?;
    let (mut tx, mut rx) = host.split();
    let pending = tokio::spawn(async move { rx.recv().await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    tx.close().await;
    let res = timeout(Duration::from_secs(1), pending).await??;
    assert!(matches!(res, Err(ChannelError::ClosedLocally)));
    Ok(())
}

#[tokio::test]
async fn close_is_idempotent_and_stops_sends() -> anyhow::Result<()> {
    let (mut host, mut guest) = in_memory::pair(3).await?;
    let handle = host.close_handle();
    assert!(!handle.is_closed());

    host.close().await;
    host.close().await;
    assert!(handle.is_closed());
    assert!(!handle.close());

    assert!(matches!(
        host.send(Move::new(0, 0)).await,
        Err(ChannelError::ClosedLocally)
    ));
    assert!(matches!(
        host.recv().await,
        Err(ChannelError::ClosedLocally)
    ));
    // the peer sees the shutdown as end of stream
    assert!(matches!(guest.recv().await, Err(ChannelError::PeerClosed)));
    Ok(())
}

#[tokio::test]
async fn peer_closing_is_reported_once() -> anyhow::Result<()> {
    let (mut host, guest) = in_memory::pair(3).await?;
    drop(guest);
    assert!(matches!(host.recv().await, Err(ChannelError::PeerClosed)));
    assert!(matches!(host.recv().await, Err(ChannelError::AlreadyFailed)));
    Ok(())
}
