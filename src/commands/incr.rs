use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Increments the number stored at `key` by one. An absent key starts from
/// zero; a string value whose bytes parse as base-10 is converted to the
/// integer tag in place.
///
/// Ref: <https://redis.io/docs/latest/commands/incr/>
#[derive(Debug, PartialEq)]
pub struct Incr {
    pub key: Bytes,
}

impl Executable for Incr {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let res = store.lock().incr_by(&self.key, 1);
        match res {
            Ok(value) => Ok(Frame::Integer(value)),
            Err(err) => Ok(Frame::Error(err.to_string())),
        }
    }
}

impl TryFrom<&mut CommandParser> for Incr {
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

    fn incr_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("INCR")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn existing_key() {
        let store = Store::new();
        store.lock().set(Bytes::from("key1"), Bytes::from("1"));

        let cmd = Command::try_from(incr_frame("key1")).unwrap();
        assert_eq!(
            cmd,
            Command::Incr(Incr {
                key: Bytes::from("key1")
            })
        );

        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(2));
        assert_eq!(store.lock().get(b"key1"), Some(&Value::Integer(2)));
    }

    #[tokio::test]
    async fn non_existing_key() {
        let store = Store::new();

        let cmd = Command::try_from(incr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(1));
        assert_eq!(store.lock().get(b"key1"), Some(&Value::Integer(1)));
    }

    #[tokio::test]
    async fn non_numeric_value() {
        let store = Store::new();
        store.lock().set(Bytes::from("key1"), Bytes::from("value"));

        let cmd = Command::try_from(incr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Error("ERR value is not an integer or out of range".to_string())
        );
        assert_eq!(
            store.lock().get(b"key1"),
            Some(&Value::String(Bytes::from("value")))
        );
    }

    #[tokio::test]
    async fn out_of_range_value() {
        let store = Store::new();
        store
            .lock()
            .set(Bytes::from("key1"), Bytes::from("999223372036854775808"));

        let cmd = Command::try_from(incr_frame("key1")).unwrap();
        let result = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Error("ERR value is not an integer or out of range".to_string())
        );
        assert_eq!(
            store.lock().get(b"key1"),
            Some(&Value::String(Bytes::from("999223372036854775808")))
        );
    }
}
