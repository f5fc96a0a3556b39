use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{sorted_entries, Store};
use crate::Error;

/// Returns the rank of `member` in the sorted set at `key`, with scores
/// ordered low to high; null when the member or the key is absent.
///
/// Ref: <https://redis.io/docs/latest/commands/zrank>
#[derive(Debug, PartialEq)]
pub struct Zrank {
    pub key: Bytes,
    pub member: Bytes,
}

impl Executable for Zrank {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get_sorted_set(&self.key) {
            Err(err) => Frame::Error(err.to_string()),
            Ok(None) => Frame::Null,
            Ok(Some(set)) => sorted_entries(set)
                .iter()
                .position(|(member, _)| member == &self.member)
                .map(|rank| Frame::Integer(rank as i64))
                .unwrap_or(Frame::Null),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Zrank {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let member = parser.next_bytes()?;

        Ok(Self { key, member })
    }
}
