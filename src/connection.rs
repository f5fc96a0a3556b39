use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::Decoder;

use crate::codec::FrameCodec;
use crate::frame::Frame;

/// Identity metadata for one client connection. Written by CLIENT SETINFO,
/// owned by the connection, never shared across connections.
#[derive(Debug, Default, PartialEq)]
pub struct ClientInfo {
    pub address: Option<String>,
    pub lib_name: Option<String>,
    pub lib_version: Option<String>,
}

pub struct Connection {
    stream: TcpStream,
    // Data is read from the socket into the read buffer. When a frame is
    // parsed, the corresponding data is removed from the buffer, so pipelined
    // and fragmented requests both decode correctly.
    buffer: BytesMut,
    codec: FrameCodec,
    pub client_info: ClientInfo,
}

impl Connection {
    pub fn new(stream: TcpStream) -> Connection {
        let client_info = ClientInfo {
            address: stream.peer_addr().ok().map(|addr| addr.to_string()),
            ..ClientInfo::default()
        };

        Connection {
            stream,
            // Allocate the buffer with 4kb of capacity.
            buffer: BytesMut::with_capacity(4096),
            codec: FrameCodec,
            client_info,
        }
    }

    /// Reads one frame, buffering socket data until the decoder yields one.
    /// Returns `None` on a clean end of stream. An end of stream in the
    /// middle of a frame surfaces as a connection-reset error.
    pub async fn read_frame(&mut self) -> crate::Result<Option<Frame>> {
        loop {
            if let Some(frame) = self.codec.decode(&mut self.buffer)? {
                return Ok(Some(frame));
            }

            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Err(io::Error::from(io::ErrorKind::ConnectionReset).into());
            }
        }
    }

    pub async fn write_frame(&mut self, frame: &Frame) -> crate::Result<()> {
        self.stream.write_all(&frame.serialize()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Drops any buffered input after a protocol error, so the next read
    /// starts on a fresh frame boundary.
    pub fn discard_input(&mut self) {
        self.buffer.clear();
    }
}
