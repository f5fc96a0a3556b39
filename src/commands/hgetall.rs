use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns every field and value of the hash stored at `key` as a flat
/// array: `f1 v1 f2 v2 ...`. An absent key is an empty array. Field order
/// is not observable.
///
/// Ref: <https://redis.io/docs/latest/commands/hgetall>
#[derive(Debug, PartialEq)]
pub struct Hgetall {
    pub key: Bytes,
}

impl Executable for Hgetall {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get_hash(&self.key) {
            Err(err) => Frame::Error(err.to_string()),
            Ok(None) => Frame::Array(vec![]),
            Ok(Some(hash)) => {
                let mut frames = Vec::with_capacity(hash.len() * 2);
                for (field, value) in hash {
                    frames.push(Frame::Bulk(field.clone()));
                    frames.push(Frame::Bulk(value.clone()));
                }
                Frame::Array(frames)
            }
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Hgetall {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}
