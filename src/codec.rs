use bytes::{Buf, BytesMut};
use std::convert::TryInto;
use std::io::Cursor;
use tokio_util::codec::Decoder;

use crate::frame::{self, DataType, Frame};
use crate::Error;

pub struct FrameCodec;

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = Error;

    // TODO: Return an error if the frame is too large, so a misbehaving
    // client cannot grow the read buffer without bound.
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let mut cursor = Cursor::new(&src[..]);

        // A leading RESP type marker selects frame parsing; anything else is
        // treated as an inline text command.
        let result = match DataType::try_from(src[0]) {
            Ok(_) => Frame::parse(&mut cursor),
            Err(_) => Frame::parse_inline(&mut cursor),
        };

        let frame = match result {
            Ok(frame) => frame,
            Err(frame::Error::Incomplete) => return Ok(None), // Not enough data to parse a frame.
            Err(err) => return Err(err.into()),
        };

        let position: usize = cursor
            .position()
            .try_into()
            .expect("Cursor position is too large");

        // Remove the parsed frame from the buffer.
        src.advance(position);

        Ok(Some(frame))
    }
}
