use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Counts the members of the sorted set at `key` whose score lies in the
/// inclusive `[min, max]` range. `-inf` / `+inf` are accepted bounds.
///
/// Ref: <https://redis.io/docs/latest/commands/zcount>
#[derive(Debug, PartialEq)]
pub struct Zcount {
    pub key: Bytes,
    pub min: f64,
    pub max: f64,
}

impl Executable for Zcount {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get_sorted_set(&self.key) {
            Err(err) => Frame::Error(err.to_string()),
            Ok(None) => Frame::Integer(0),
            Ok(Some(set)) => {
                let count = set
                    .values()
                    .filter(|score| self.min <= **score && **score <= self.max)
                    .count();
                Frame::Integer(count as i64)
            }
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Zcount {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        let min = parser.next_float()?;
        let max = parser.next_float()?;

        Ok(Self { key, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    fn zcount_frame(key: &str, min: &str, max: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("ZCOUNT")),
            Frame::Bulk(Bytes::from(key.to_string())),
            Frame::Bulk(Bytes::from(min.to_string())),
            Frame::Bulk(Bytes::from(max.to_string())),
        ])
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
    async fn counts_scores_in_the_inclusive_range() {
        let store = seeded_store();

        let cmd = Command::try_from(zcount_frame("board", "1", "2")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(2));
    }

    #[tokio::test]
    async fn infinite_bounds_cover_everything() {
        let store = seeded_store();

        let cmd = Command::try_from(zcount_frame("board", "-inf", "+inf")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(3));
    }

    #[tokio::test]
    async fn missing_key_is_zero() {
        let store = Store::new();

        let cmd = Command::try_from(zcount_frame("board", "0", "10")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(0));
    }
}
