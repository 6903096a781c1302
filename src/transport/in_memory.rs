use super::{ChannelError, MoveChannel};

/// Buffer size of each direction of the in-memory pipe.
const PIPE_CAPACITY: usize = 256;

/// Two connected channels over an in-process pipe, handshake already done.
///
/// The first channel is the listener side, the second the connector side.
pub async fn pair(board_size: usize) -> Result<(MoveChannel, MoveChannel), ChannelError> {
    let (host_end, guest_end) = tokio::io::duplex(PIPE_CAPACITY);
    let host = MoveChannel::host(host_end, board_size).await?;
    let guest = MoveChannel::join(guest_end).await?;
    Ok((host, guest))
}
