use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Sets the given field/value pairs in the hash stored at `key`, creating
/// the hash when the key is absent. Replies with the number of fields that
/// were newly added (overwrites do not count).
///
/// Ref: <https://redis.io/docs/latest/commands/hset>
#[derive(Debug, PartialEq)]
pub struct Hset {
    pub key: Bytes,
    pub pairs: Vec<(Bytes, Bytes)>,
}

impl Executable for Hset {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let hash = match state.get_or_create_hash(&self.key) {
            Ok(hash) => hash,
            Err(err) => return Ok(Frame::Error(err.to_string())),
        };

        let mut added = 0;
        for (field, value) in self.pairs {
            if hash.insert(field, value).is_none() {
                added += 1;
            }
        }

        Ok(Frame::Integer(added))
    }
}

impl TryFrom<&mut CommandParser> for Hset {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        let mut pairs = vec![];
        loop {
            let field = match parser.next_bytes() {
                Ok(field) => field,
                Err(CommandParserError::EndOfStream) if !pairs.is_empty() => break,
                Err(err) => return Err(err),
            };
            // A field without a value is an arity error; the EndOfStream
            // bubbles up and is phrased with the command name.
            let value = parser.next_bytes()?;
            pairs.push((field, value));
        }

        Ok(Self { key, pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    fn hset_frame(parts: &[&str]) -> Frame {
        let mut frames = vec![Frame::Bulk(Bytes::from("HSET"))];
        frames.extend(
            parts
                .iter()
                .map(|part| Frame::Bulk(Bytes::from(part.to_string()))),
        );
        Frame::Array(frames)
    }

    #[tokio::test]
    async fn counts_only_new_fields() {
        let store = Store::new();
        let client_info = &mut ClientInfo::default();

        let cmd = Command::try_from(hset_frame(&["user", "name", "Alice"])).unwrap();
        assert_eq!(
            cmd,
            Command::Hset(Hset {
                key: Bytes::from("user"),
                pairs: vec![(Bytes::from("name"), Bytes::from("Alice"))],
            })
        );
        let result = cmd.exec(store.clone(), client_info).unwrap();
        assert_eq!(result, Frame::Integer(1));

        // Overwriting an existing field adds nothing.
        let cmd = Command::try_from(hset_frame(&["user", "name", "Bob"])).unwrap();
        let result = cmd.exec(store.clone(), client_info).unwrap();
        assert_eq!(result, Frame::Integer(0));

        let cmd =
            Command::try_from(hset_frame(&["user", "name", "Eve", "email", "e@x.io"])).unwrap();
        let result = cmd.exec(store.clone(), client_info).unwrap();
        assert_eq!(result, Frame::Integer(1));
    }

    #[tokio::test]
    async fn odd_parity_is_an_arity_error() {
        let err = Command::try_from(hset_frame(&["user", "f1", "v1", "f2"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: "hset".to_string()
            }
        );
    }

    #[tokio::test]
    async fn missing_pairs_is_an_arity_error() {
        let err = Command::try_from(hset_frame(&["user"])).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: "hset".to_string()
            }
        );
    }

    #[tokio::test]
    async fn string_key_is_a_type_error() {
        let store = Store::new();
        store.lock().set(Bytes::from("user"), Bytes::from("text"));

        let cmd = Command::try_from(hset_frame(&["user", "f", "v"])).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Error(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
            )
        );
        assert_eq!(store.lock().type_name(b"user"), Some("string"));
    }
}
