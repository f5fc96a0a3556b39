use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError, Value};
use crate::Error;

/// Gets the value of `key` and deletes the key, if and only if the key holds
/// a string or integer value. Composite values answer WRONGTYPE and the key
/// is left untouched.
///
/// Ref: <https://redis.io/docs/latest/commands/getdel>
#[derive(Debug, PartialEq)]
pub struct Getdel {
    pub key: Bytes,
}

impl Executable for Getdel {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let res = match state.get(&self.key) {
            None => Frame::Null,
            Some(Value::String(bytes)) => {
                let res = Frame::Bulk(bytes.clone());
                state.remove(&self.key);
                res
            }
            Some(Value::Integer(n)) => {
                let res = Frame::Integer(*n);
                state.remove(&self.key);
                res
            }
            Some(_) => Frame::Error(StoreError::WrongType.to_string()),
        };

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Getdel {
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

    fn getdel_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("GETDEL")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn when_key_exists() {
        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("baz"));

        let cmd = Command::try_from(getdel_frame("foo")).unwrap();
        assert_eq!(
            cmd,
            Command::Getdel(Getdel {
                key: Bytes::from("foo")
            })
        );

        let res = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(res, Frame::Bulk(Bytes::from("baz")));
        assert_eq!(store.lock().get(b"foo"), None);
    }

    #[tokio::test]
    async fn when_key_does_not_exist() {
        let store = Store::new();

        let cmd = Command::try_from(getdel_frame("foo")).unwrap();
        let res = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(res, Frame::Null);
    }

    #[tokio::test]
    async fn removes_the_expiration_with_the_key() {
        use std::time::{Duration, SystemTime};

        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("baz"));
        store
            .lock()
            .set_expiration(b"foo", SystemTime::now() + Duration::from_secs(60));

        let cmd = Command::try_from(getdel_frame("foo")).unwrap();
        cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(store.lock().expiration(b"foo"), None);
    }

    #[tokio::test]
    async fn hash_key_is_a_type_error_and_survives() {
        let store = Store::new();
        store
            .lock()
            .get_or_create_hash(b"h")
            .unwrap()
            .insert(Bytes::from("f"), Bytes::from("v"));

        let cmd = Command::try_from(getdel_frame("h")).unwrap();
        let res = cmd.exec(store.clone(), &mut ClientInfo::default()).unwrap();

        assert_eq!(
            res,
            Frame::Error(
                "WRONGTYPE Operation against a key holding the wrong kind of value".to_string()
            )
        );
        assert!(store.lock().exists(b"h"));
    }
}
