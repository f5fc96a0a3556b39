use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Adds the given score/member pairs to the sorted set stored at `key`,
/// creating the set when the key is absent. Replies with the number of
/// members that were newly added (score updates do not count).
///
/// Ref: <https://redis.io/docs/latest/commands/zadd>
#[derive(Debug, PartialEq)]
pub struct Zadd {
    pub key: Bytes,
    pub entries: Vec<(f64, Bytes)>,
}

impl Executable for Zadd {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let set = match state.get_or_create_sorted_set(&self.key) {
            Ok(set) => set,
            Err(err) => return Ok(Frame::Error(err.to_string())),
        };

        let mut added = 0;
        for (score, member) in self.entries {
            if set.insert(member, score).is_none() {
                added += 1;
            }
        }

        Ok(Frame::Integer(added))
    }
}

impl TryFrom<&mut CommandParser> for Zadd {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        let mut entries = vec![];
        loop {
            let score = match parser.next_float() {
                Ok(score) => score,
                Err(CommandParserError::EndOfStream) if !entries.is_empty() => break,
                Err(err) => return Err(err),
            };
            let member = parser.next_bytes()?;
            entries.push((score, member));
        }

        Ok(Self { key, entries })
    }
}
