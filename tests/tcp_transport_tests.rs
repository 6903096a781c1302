use tictactoe::transport::{connect, ChannelError, ChannelListener, Role};
use tictactoe::Move;

#[tokio::test(flavor = "multi_thread")]
async fn loopback_handshake_and_moves() -> anyhow::Result<()> {
    let listener = ChannelListener::bind(0, 4).await?;
    let port = listener.local_addr()?.port();
    let accept = tokio::spawn(listener.accept());

    let mut guest = connect("127.0.0.1", port).await?;
    let mut host = accept.await??;

    assert_eq!(host.role(), Role::Listener);
    assert_eq!(guest.role(), Role::Connector);
    assert_eq!(guest.board_size(), 4);

    host.send(Move::new(3, 3)).await?;
    assert_eq!(guest.recv().await?, Move::new(3, 3));
    guest.send(Move::new(0, 2)).await?;
    assert_eq!(host.recv().await?, Move::new(0, 2));

    guest.close().await;
    assert!(matches!(host.recv().await, Err(ChannelError::PeerClosed)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn port_in_use_is_a_bind_error() -> anyhow::Result<()> {
    let first = ChannelListener::bind(0, 3).await?;
    let port = first.local_addr()?.port();
    let err = ChannelListener::bind(port, 3).await.err().unwrap();
    assert!(matches!(err, ChannelError::Bind { port: p, .. } if p == port));
    assert!(err.is_setup());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn nobody_listening_is_a_connect_error() -> anyhow::Result<()> {
    // grab a free port and release it again
    let port = {
        let probe = ChannelListener::bind(0, 3).await?;
        probe.local_addr()?.port()
    };
    let err = connect("127.0.0.1", port).await.err().unwrap();
    assert!(matches!(err, ChannelError::Connect { .. }));
    assert!(err.is_setup());
    Ok(())
}
