use log::{debug, info};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

use super::{ChannelError, CloseHandle, Role};
use crate::common::Move;
use crate::config::validate_board_size;
use crate::protocol::{self, HANDSHAKE_LEN, MOVE_RECORD_LEN};

type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// A connection that has completed the board-size handshake.
///
/// Use [`MoveChannel::split`] to send and receive from separate tasks.
pub struct MoveChannel {
    role: Role,
    board_size: usize,
    sender: MoveSender,
    receiver: MoveReceiver,
}

impl MoveChannel {
    /// Listener side: announce `board_size` on a freshly accepted stream.
    pub async fn host<S>(stream: S, board_size: usize) -> Result<Self, ChannelError>
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (reader, mut writer) = tokio::io::split(stream);
        let frame = protocol::encode_handshake(board_size)?;
        writer.write_all(&frame).await.map_err(ChannelError::from_io)?;
        writer.flush().await.map_err(ChannelError::from_io)?;
        info!("sent board size {}", board_size);
        Ok(Self::assemble(
            Role::Listener,
            board_size,
            Box::new(reader),
            Box::new(writer),
        ))
    }

    /// Connector side: read the board size before anything else.
    pub async fn join<S>(stream: S) -> Result<Self, ChannelError>
    where
        S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    {
        let (mut reader, writer) = tokio::io::split(stream);
        let mut buf = [0u8; HANDSHAKE_LEN];
        reader
            .read_exact(&mut buf)
            .await
            .map_err(ChannelError::from_io)?;
        let hs = protocol::decode_handshake(&buf)?;
        let board_size = hs.board_size as usize;
        validate_board_size(board_size).map_err(|_| ChannelError::Handshake(hs.board_size))?;
        info!("received board size {}", board_size);
        Ok(Self::assemble(
            Role::Connector,
            board_size,
            Box::new(reader),
            Box::new(writer),
        ))
    }

    fn assemble(role: Role, board_size: usize, reader: BoxedReader, writer: BoxedWriter) -> Self {
        let closed = CloseHandle::new();
        let receiver = MoveReceiver {
            reader,
            buf: [0u8; MOVE_RECORD_LEN],
            filled: 0,
            closed: closed.subscribe(),
            failed: false,
        };
        let sender = MoveSender {
            writer: Some(writer),
            closed,
        };
        Self {
            role,
            board_size,
            sender,
            receiver,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Board size agreed during the handshake.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub async fn send(&mut self, mv: Move) -> Result<(), ChannelError> {
        self.sender.send(mv).await
    }

    pub async fn recv(&mut self) -> Result<Move, ChannelError> {
        self.receiver.recv().await
    }

    pub async fn close(&mut self) {
        self.sender.close().await;
    }

    pub fn close_handle(&self) -> CloseHandle {
        self.sender.close_handle()
    }

    pub fn split(self) -> (MoveSender, MoveReceiver) {
        (self.sender, self.receiver)
    }
}

/// Writing half of a [`MoveChannel`].
pub struct MoveSender {
    writer: Option<BoxedWriter>,
    closed: CloseHandle,
}

impl MoveSender {
    /// Write one move record. The record goes out in a single write.
    pub async fn send(&mut self, mv: Move) -> Result<(), ChannelError> {
        if self.closed.is_closed() {
            return Err(ChannelError::ClosedLocally);
        }
        let writer = self.writer.as_mut().ok_or(ChannelError::ClosedLocally)?;
        let frame = protocol::encode_move(mv)?;
        writer.write_all(&frame).await.map_err(ChannelError::from_io)?;
        writer.flush().await.map_err(ChannelError::from_io)?;
        debug!("sent move {}", mv);
        Ok(())
    }

    /// Close both halves. Safe to call any number of times.
    pub async fn close(&mut self) {
        if self.closed.close() {
            debug!("closing move channel");
        }
        if let Some(mut writer) = self.writer.take() {
            // peer may already be gone
            let _ = writer.shutdown().await;
        }
    }

    pub fn close_handle(&self) -> CloseHandle {
        self.closed.clone()
    }
}

/// Reading half of a [`MoveChannel`].
pub struct MoveReceiver {
    reader: BoxedReader,
    buf: [u8; MOVE_RECORD_LEN],
    filled: usize,
    closed: watch::Receiver<bool>,
    failed: bool,
}

impl MoveReceiver {
    /// Wait for the next complete move record.
    ///
    /// Cancel safe: bytes of a partially received record are kept for the
    /// next call. Returns [`ChannelError::ClosedLocally`] once the channel is
    /// closed, and [`ChannelError::AlreadyFailed`] after any other error has
    /// been returned.
    pub async fn recv(&mut self) -> Result<Move, ChannelError> {
        if self.failed {
            return Err(ChannelError::AlreadyFailed);
        }
        loop {
            if self.filled == MOVE_RECORD_LEN {
                self.filled = 0;
                let mv = protocol::decode_move(&self.buf)?;
                debug!("received move {}", mv);
                return Ok(mv);
            }
            let read = tokio::select! {
                biased;
                _ = closed_signal(&mut self.closed) => return Err(ChannelError::ClosedLocally),
                read = self.reader.read(&mut self.buf[self.filled..]) => read,
            };
            match read {
                Ok(0) => {
                    if self.filled > 0 {
                        debug!("peer closed after {} bytes of a move record", self.filled);
                    }
                    return Err(self.fail(ChannelError::PeerClosed));
                }
                Ok(n) => self.filled += n,
                Err(e) => return Err(self.fail(ChannelError::from_io(e))),
            }
        }
    }

    fn fail(&mut self, err: ChannelError) -> ChannelError {
        self.failed = true;
        self.filled = 0;
        err
    }
}

/// Resolves once the close flag is set or every [`CloseHandle`] is gone.
async fn closed_signal(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
