use std::time::{Duration, UNIX_EPOCH};

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Records an absolute unix-seconds expiration deadline for `key`. Metadata
/// only, like EXPIRE.
///
/// Ref: <https://redis.io/docs/latest/commands/expireat>
#[derive(Debug, PartialEq)]
pub struct ExpireAt {
    pub key: Bytes,
    pub timestamp: i64,
}

impl Executable for ExpireAt {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let deadline = UNIX_EPOCH + Duration::from_secs(self.timestamp.max(0) as u64);

        let set = store.lock().set_expiration(&self.key, deadline);
        Ok(Frame::Integer(i64::from(set)))
    }
}

impl TryFrom<&mut CommandParser> for ExpireAt {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let timestamp = parser.next_integer()?;

        Ok(Self { key, timestamp })
    }
}
