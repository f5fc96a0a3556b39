use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError, Value};
use crate::Error;

/// Atomically sets `key` to `value` and returns the prior string or integer
/// value (null when absent). Composite values answer WRONGTYPE and nothing
/// is written.
///
/// Ref: <https://redis.io/docs/latest/commands/getset>
#[derive(Debug, PartialEq)]
pub struct Getset {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Getset {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let res = match state.get(&self.key) {
            None => Frame::Null,
            Some(Value::String(bytes)) => Frame::Bulk(bytes.clone()),
            Some(Value::Integer(n)) => Frame::Integer(*n),
            Some(_) => return Ok(Frame::Error(StoreError::WrongType.to_string())),
        };

        state.set(self.key, self.value);

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Getset {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let value = parser.next_bytes()?;

        Ok(Self { key, value })
    }
}
