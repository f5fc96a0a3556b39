use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Decrements the number stored at `key` by one.
///
/// Ref: <https://redis.io/docs/latest/commands/decr/>
#[derive(Debug, PartialEq)]
pub struct Decr {
    pub key: Bytes,
}

impl Executable for Decr {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let res = store.lock().incr_by(&self.key, -1);
        match res {
            Ok(value) => Ok(Frame::Integer(value)),
            Err(err) => Ok(Frame::Error(err.to_string())),
        }
    }
}

impl TryFrom<&mut CommandParser> for Decr {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;
    use crate::store::Value;

    fn decr_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("DECR")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn existing_key() {
        let store = Store::new();
        store.lock().set(Bytes::from("key1"), Bytes::from("10"));

        let cmd = Command::try_from(decr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(9));
        assert_eq!(store.lock().get(b"key1"), Some(&Value::Integer(9)));
    }

    #[tokio::test]
    async fn non_existing_key() {
        let store = Store::new();

        let cmd = Command::try_from(decr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(-1));
        assert_eq!(store.lock().get(b"key1"), Some(&Value::Integer(-1)));
    }

    #[tokio::test]
    async fn underflow_is_an_error() {
        let store = Store::new();
        store.lock().incr_by(b"key1", i64::MIN).unwrap();

        let cmd = Command::try_from(decr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Error("ERR value is not an integer or out of range".to_string())
        );
        assert_eq!(store.lock().get(b"key1"), Some(&Value::Integer(i64::MIN)));
    }
}
