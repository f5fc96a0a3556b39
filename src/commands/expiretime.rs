use std::time::UNIX_EPOCH;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the recorded expiration deadline of `key` as unix seconds, -1
/// when the key has no deadline, -2 when the key is absent.
///
/// Ref: <https://redis.io/docs/latest/commands/expiretime>
#[derive(Debug, PartialEq)]
pub struct ExpireTime {
    pub key: Bytes,
}

impl Executable for ExpireTime {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let res = if !state.exists(&self.key) {
            -2
        } else {
            match state.expiration(&self.key) {
                Some(deadline) => deadline
                    .duration_since(UNIX_EPOCH)
                    .map(|elapsed| elapsed.as_secs() as i64)
                    .unwrap_or(0),
                None => -1,
            }
        };

        Ok(Frame::Integer(res))
    }
}

impl TryFrom<&mut CommandParser> for ExpireTime {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    fn expiretime_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("EXPIRETIME")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn reports_the_recorded_deadline() {
        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("bar"));
        store
            .lock()
            .set_expiration(b"foo", UNIX_EPOCH + Duration::from_secs(33177117420));

        let cmd = Command::try_from(expiretime_frame("foo")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(33177117420));
    }

    #[tokio::test]
    async fn key_without_deadline() {
        let store = Store::new();
        store.lock().set(Bytes::from("foo"), Bytes::from("bar"));

        let cmd = Command::try_from(expiretime_frame("foo")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(-1));
    }

    #[tokio::test]
    async fn missing_key() {
        let store = Store::new();

        let cmd = Command::try_from(expiretime_frame("missing")).unwrap();
        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Integer(-2));
    }
}
