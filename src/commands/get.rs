use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError, Value};
use crate::Error;

/// Returns the value of `key`: a bulk string for string values, an integer
/// reply for integer-converted values, null when absent. Composite values
/// answer WRONGTYPE.
///
/// Ref: <https://redis.io/docs/latest/commands/get>
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: Bytes,
}

impl Executable for Get {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = match state.get(&self.key) {
            None => Frame::Null,
            Some(Value::String(bytes)) => Frame::Bulk(bytes.clone()),
            Some(Value::Integer(n)) => Frame::Integer(*n),
            Some(_) => Frame::Error(StoreError::WrongType.to_string()),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Get {
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

    fn get_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn existing_key() {
        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("bar"));

        let cmd = Command::try_from(get_frame("foo")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Bulk(Bytes::from("bar")));
    }

    #[tokio::test]
    async fn missing_key() {
        let store = Store::new();

        let cmd = Command::try_from(get_frame("missing")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Null);
    }

    #[tokio::test]
    async fn integer_converted_key() {
        let store = Store::new();
        store.lock().incr_by(b"counter", 41).unwrap();

        let cmd = Command::try_from(get_frame("counter")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(41));
    }

    #[tokio::test]
    async fn hash_key_is_a_type_error() {
        let store = Store::new();
        store
            .lock()
            .get_or_create_hash(b"h")
            .unwrap()
            .insert(Bytes::from("f"), Bytes::from("v"));

        let cmd = Command::try_from(get_frame("h")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(
            result,
            Frame::Error(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
            )
        );
    }
}
