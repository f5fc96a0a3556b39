use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the tag of the value stored at `key`, or `none` when absent.
///
/// Ref: <https://redis.io/docs/latest/commands/type>
#[derive(Debug, PartialEq)]
pub struct Type {
    pub key: Bytes,
}

impl Executable for Type {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let tag = store.lock().type_name(&self.key).unwrap_or("none");
        Ok(Frame::Simple(tag.to_string()))
    }
}

impl TryFrom<&mut CommandParser> for Type {
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

    fn type_frame(key: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("TYPE")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ])
    }

    #[tokio::test]
    async fn reports_each_tag() {
        let store = Store::new();
        store.lock().set(Bytes::from("s"), Bytes::from("v"));
        store.lock().incr_by(b"n", 1).unwrap();
        store.lock().get_or_create_hash(b"h").unwrap();
        store.lock().get_or_create_sorted_set(b"z").unwrap();

        let client_info = &mut ClientInfo::default();

        let checks = [
            ("s", "string"),
            ("n", "integer"),
            ("h", "hash"),
            ("z", "zset"),
            ("missing", "none"),
        ];
        for (key, expected) in checks {
            let cmd = Command::try_from(type_frame(key)).unwrap();
            let result = cmd.exec(store.clone(), client_info).unwrap();
            assert_eq!(result, Frame::Simple(expected.to_string()));
        }
    }
}
