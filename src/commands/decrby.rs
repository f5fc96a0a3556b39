use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Decrements the number stored at `key` by `decrement`.
///
/// Ref: <https://redis.io/docs/latest/commands/decrby/>
#[derive(Debug, PartialEq)]
pub struct DecrBy {
    pub key: Bytes,
    pub decrement: i64,
}

impl Executable for DecrBy {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        // i64::MIN has no positive counterpart; negating it would overflow
        // before the store ever saw the delta.
        let Some(delta) = self.decrement.checked_neg() else {
            return Ok(Frame::Error(
                "ERR value is not an integer or out of range".to_string(),
            ));
        };

        let res = store.lock().incr_by(&self.key, delta);
        match res {
            Ok(value) => Ok(Frame::Integer(value)),
            Err(err) => Ok(Frame::Error(err.to_string())),
        }
    }
}

impl TryFrom<&mut CommandParser> for DecrBy {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let decrement = parser.next_integer()?;

        Ok(Self { key, decrement })
    }
}
