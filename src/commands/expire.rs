use std::time::{Duration, SystemTime};

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Records an expiration deadline `seconds` from now for `key`. The deadline
/// is metadata only; nothing evicts the key when it elapses. A non-positive
/// argument records an already-elapsed deadline.
///
/// Ref: <https://redis.io/docs/latest/commands/expire>
#[derive(Debug, PartialEq)]
pub struct Expire {
    pub key: Bytes,
    pub seconds: i64,
}

impl Executable for Expire {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let deadline = SystemTime::now() + Duration::from_secs(self.seconds.max(0) as u64);

        let set = store.lock().set_expiration(&self.key, deadline);
        Ok(Frame::Integer(i64::from(set)))
    }
}

impl TryFrom<&mut CommandParser> for Expire {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let seconds = parser.next_integer()?;

        Ok(Self { key, seconds })
    }
}
