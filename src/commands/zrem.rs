use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Removes the given members from the sorted set at `key`, replying with the
/// number that were present. Removing the last member removes the key.
///
/// Ref: <https://redis.io/docs/latest/commands/zrem>
#[derive(Debug, PartialEq)]
pub struct Zrem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Zrem {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let set = match state.get_sorted_set_mut(&self.key) {
            Err(err) => return Ok(Frame::Error(err.to_string())),
            Ok(None) => return Ok(Frame::Integer(0)),
            Ok(Some(set)) => set,
        };

        let mut removed = 0;
        for member in self.members {
            if set.remove(&member).is_some() {
                removed += 1;
            }
        }

        if set.is_empty() {
            state.remove(&self.key);
        }

        Ok(Frame::Integer(removed))
    }
}

impl TryFrom<&mut CommandParser> for Zrem {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        let mut members = vec![];
        loop {
            match parser.next_bytes() {
                Ok(member) => members.push(member),
                Err(CommandParserError::EndOfStream) if !members.is_empty() => break,
                Err(err) => return Err(err),
            }
        }

        Ok(Self { key, members })
    }
}
