use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{format_score, sorted_entries, Store};
use crate::Error;

/// Removes and returns up to `count` members with the lowest scores from the
/// sorted set at `key` (default one), as a flat `member score ...` array.
///
/// Ref: <https://redis.io/docs/latest/commands/zpopmin>
#[derive(Debug, PartialEq)]
pub struct ZpopMin {
    pub key: Bytes,
    pub count: Option<u64>,
}

impl Executable for ZpopMin {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        pop_extremes(store, &self.key, self.count, false)
    }
}

impl TryFrom<&mut CommandParser> for ZpopMin {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        parse_key_and_count(parser).map(|(key, count)| Self { key, count })
    }
}

pub(crate) fn parse_key_and_count(
    parser: &mut CommandParser,
) -> Result<(Bytes, Option<u64>), CommandParserError> {
    let key = parser.next_bytes()?;

    let count = match parser.next_integer() {
        Ok(count) => Some(u64::try_from(count).map_err(|_| CommandParserError::NotAnInteger)?),
        Err(CommandParserError::EndOfStream) => None,
        Err(err) => return Err(err),
    };

    Ok((key, count))
}

/// Shared pop routine: `highest` selects which end of the score order the
/// members come off. An emptied set takes its key with it.
pub(crate) fn pop_extremes(
    store: Store,
    key: &Bytes,
    count: Option<u64>,
    highest: bool,
) -> Result<Frame, Error> {
    let mut state = store.lock();

    let set = match state.get_sorted_set_mut(key) {
        Err(err) => return Ok(Frame::Error(err.to_string())),
        Ok(None) => return Ok(Frame::Array(vec![])),
        Ok(Some(set)) => set,
    };

    let mut entries = sorted_entries(set);
    if highest {
        entries.reverse();
    }

    let count = count.unwrap_or(1) as usize;
    let mut frames = Vec::with_capacity(count.min(entries.len()) * 2);
    for (member, score) in entries.into_iter().take(count) {
        set.remove(&member);
        frames.push(Frame::Bulk(member));
        frames.push(Frame::Bulk(Bytes::from(format_score(score))));
    }

    if set.is_empty() {
        state.remove(key);
    }

    Ok(Frame::Array(frames))
}
