use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{format_score, sorted_entries, Store};
use crate::Error;

/// Returns the members of the sorted set at `key` between the `start` and
/// `stop` indexes of the score order (ties broken by member bytes). Negative
/// indexes count from the end. The trailing WITHSCORES literal interleaves
/// scores into the reply.
///
/// Ref: <https://redis.io/docs/latest/commands/zrange>
#[derive(Debug, PartialEq)]
pub struct Zrange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
    pub with_scores: bool,
}

impl Executable for Zrange {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let entries = match state.get_sorted_set(&self.key) {
            Err(err) => return Ok(Frame::Error(err.to_string())),
            Ok(None) => return Ok(Frame::Array(vec![])),
            Ok(Some(set)) => sorted_entries(set),
        };

        let len = entries.len() as i64;
        let start = resolve_index(self.start, len);
        let stop = resolve_index(self.stop, len);
        if start > stop || start >= len {
            return Ok(Frame::Array(vec![]));
        }
        let stop = stop.min(len - 1);

        let mut frames = vec![];
        for (member, score) in &entries[start as usize..=stop as usize] {
            frames.push(Frame::Bulk(member.clone()));
            if self.with_scores {
                frames.push(Frame::Bulk(Bytes::from(format_score(*score))));
            }
        }

        Ok(Frame::Array(frames))
    }
}

/// Negative indexes address from the end; anything before the first element
/// clamps to zero.
fn resolve_index(index: i64, len: i64) -> i64 {
    if index < 0 {
        (len + index).max(0)
    } else {
        index
    }
}

impl TryFrom<&mut CommandParser> for Zrange {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let start = parser.next_integer()?;
        let stop = parser.next_integer()?;

        let with_scores = match parser.next_string() {
            Ok(token) if token.eq_ignore_ascii_case("withscores") => true,
            Ok(_) => return Err(CommandParserError::SyntaxError),
            Err(CommandParserError::EndOfStream) => false,
            Err(err) => return Err(err),
        };

        Ok(Self {
            key,
            start,
            stop,
            with_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    fn zrange_frame(parts: &[&str]) -> Frame {
        let mut frames = vec![Frame::Bulk(Bytes::from("ZRANGE"))];
        frames.extend(
            parts
                .iter()
                .map(|part| Frame::Bulk(Bytes::from(part.to_string()))),
        );
        Frame::Array(frames)
    }

    fn seeded_store() -> Store {
        let store = Store::new();
        {
            let mut state = store.lock();
            let set = state.get_or_create_sorted_set(b"board").unwrap();
            set.insert(Bytes::from("alice"), 1.0);
            set.insert(Bytes::from("bob"), 2.0);
            set.insert(Bytes::from("carol"), 3.0);
        }
        store
    }

    #[tokio::test]
    async fn full_range_in_score_order() {
        let store = seeded_store();

        let cmd = Command::try_from(zrange_frame(&["board", "0", "-1"])).unwrap();
        assert_eq!(
            cmd,
            Command::Zrange(Zrange {
                key: Bytes::from("board"),
                start: 0,
                stop: -1,
                with_scores: false,
            })
        );

        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("alice")),
                Frame::Bulk(Bytes::from("bob")),
                Frame::Bulk(Bytes::from("carol")),
            ])
        );
    }

    #[tokio::test]
    async fn withscores_interleaves_scores() {
        let store = seeded_store();

        let cmd = Command::try_from(zrange_frame(&["board", "0", "0", "WITHSCORES"])).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("alice")),
                Frame::Bulk(Bytes::from("1")),
            ])
        );
    }

    #[tokio::test]
    async fn withscores_is_case_insensitive() {
        let store = seeded_store();

        let cmd = Command::try_from(zrange_frame(&["board", "0", "0", "withScores"])).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        match result {
            Frame::Array(frames) => assert_eq!(frames.len(), 2),
            frame => panic!("expected array, got {:?}", frame),
        }
    }

    #[tokio::test]
    async fn other_trailing_token_is_a_syntax_error() {
        let err = Command::try_from(zrange_frame(&["board", "0", "-1", "REV"])).unwrap_err();

        assert_eq!(err, CommandParserError::SyntaxError);
    }

    #[tokio::test]
    async fn out_of_bounds_range_is_empty() {
        let store = seeded_store();

        let cmd = Command::try_from(zrange_frame(&["board", "5", "10"])).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Array(vec![]));
    }
}
