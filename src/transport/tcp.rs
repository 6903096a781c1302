use std::io;
use std::net::SocketAddr;

use log::info;
use tokio::net::{TcpListener, TcpStream};

use super::{ChannelError, MoveChannel};

/// Listening socket waiting for the single opponent.
pub struct ChannelListener {
    listener: TcpListener,
    port: u16,
    board_size: usize,
}

impl ChannelListener {
    /// Bind on all interfaces. Port 0 picks an ephemeral port.
    pub async fn bind(port: u16, board_size: usize) -> Result<Self, ChannelError> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .map_err(|source| ChannelError::Bind { port, source })?;
        Ok(Self {
            listener,
            port,
            board_size,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Wait for one peer, then send it the board size.
    ///
    /// The listening socket is released as soon as a peer is accepted.
    pub async fn accept(self) -> Result<MoveChannel, ChannelError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(ChannelError::Accept)?;
        drop(self.listener);
        info!("opponent connected from {} on port {}", peer, self.port);
        stream.set_nodelay(true).map_err(ChannelError::Io)?;
        MoveChannel::host(stream, self.board_size).await
    }
}

/// Dial the host and receive the board size.
pub async fn connect(host: &str, port: u16) -> Result<MoveChannel, ChannelError> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ChannelError::Connect {
            addr: addr.clone(),
            source,
        })?;
    info!("connected to {}", addr);
    stream.set_nodelay(true).map_err(ChannelError::Io)?;
    MoveChannel::join(stream).await
}
