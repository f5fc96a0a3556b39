use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the value of `field` in the hash stored at `key`.
///
/// Ref: <https://redis.io/docs/latest/commands/hget>
#[derive(Debug, PartialEq)]
pub struct Hget {
    pub key: Bytes,
    pub field: Bytes,
}

impl Executable for Hget {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get_hash(&self.key) {
            Err(err) => Frame::Error(err.to_string()),
            Ok(None) => Frame::Null,
            Ok(Some(hash)) => hash
                .get(&self.field)
                .map(|value| Frame::Bulk(value.clone()))
                .unwrap_or(Frame::Null),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Hget {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let field = parser.next_bytes()?;

        Ok(Self { key, field })
    }
}
