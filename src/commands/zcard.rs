use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the number of members in the sorted set stored at `key`, zero
/// when the key is absent.
///
/// Ref: <https://redis.io/docs/latest/commands/zcard>
#[derive(Debug, PartialEq)]
pub struct Zcard {
    pub key: Bytes,
}

impl Executable for Zcard {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get_sorted_set(&self.key) {
            Err(err) => Frame::Error(err.to_string()),
            Ok(None) => Frame::Integer(0),
            Ok(Some(set)) => Frame::Integer(set.len() as i64),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Zcard {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
