use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns how many of the given keys exist. Keys are counted as many times
/// as mentioned in the input.
///
/// Ref: <https://redis.io/docs/latest/commands/exists/>
#[derive(Debug, PartialEq)]
pub struct Exists {
    pub keys: Vec<Bytes>,
}

impl Executable for Exists {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();
        let count = self.keys.iter().filter(|key| state.exists(key)).count();
        Ok(Frame::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Exists {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut keys = vec![];

        loop {
            match parser.next_bytes() {
                Ok(key) => keys.push(key),
                Err(CommandParserError::EndOfStream) if !keys.is_empty() => {
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Self { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    #[test]
    fn zero_keys() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("EXISTS"))]);
        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: "exists".to_string()
            }
        );
    }

    #[tokio::test]
    async fn duplicates_count_per_mention() {
        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("1"));

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("EXISTS")),
            Frame::Bulk(Bytes::from("foo")),
            Frame::Bulk(Bytes::from("foo")),
            Frame::Bulk(Bytes::from("missing")),
        ]);
        let cmd = Command::try_from(frame).unwrap();
        assert_eq!(
            cmd,
            Command::Exists(Exists {
                keys: vec![
                    Bytes::from("foo"),
                    Bytes::from("foo"),
                    Bytes::from("missing")
                ]
            })
        );

        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(2));
    }
}
