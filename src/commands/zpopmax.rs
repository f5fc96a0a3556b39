use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::zpopmin::{parse_key_and_count, pop_extremes};
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Removes and returns up to `count` members with the highest scores from
/// the sorted set at `key` (default one), as a flat `member score ...`
/// array.
///
/// Ref: <https://redis.io/docs/latest/commands/zpopmax>
#[derive(Debug, PartialEq)]
pub struct ZpopMax {
    pub key: Bytes,
    pub count: Option<u64>,
}

impl Executable for ZpopMax {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        pop_extremes(store, &self.key, self.count, true)
    }
}

impl TryFrom<&mut CommandParser> for ZpopMax {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        parse_key_and_count(parser).map(|(key, count)| Self { key, count })
    }
}
