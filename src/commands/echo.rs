use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns the message as a bulk string. Never touches the store.
///
/// Ref: <https://redis.io/docs/latest/commands/echo>
#[derive(Debug, PartialEq)]
pub struct Echo {
    pub message: Bytes,
}

impl Executable for Echo {
    fn exec(self, _store: Store) -> Result<Frame, Error> {
        Ok(Frame::Bulk(self.message))
    }
}

impl TryFrom<&mut CommandParser> for Echo {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let message = parser.next_bytes()?;
        Ok(Self { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::connection::ClientInfo;

    #[tokio::test]
    async fn echoes_the_message() {
        let store = Store::new();

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("ECHO")),
            Frame::Bulk(Bytes::from("Socket Test")),
        ]);
        let cmd = Command::try_from(frame).unwrap();

        assert_eq!(
            cmd,
            Command::Echo(Echo {
                message: Bytes::from("Socket Test")
            })
        );

        let result = cmd.exec(store, &mut ClientInfo::default()).unwrap();

        assert_eq!(result, Frame::Bulk(Bytes::from("Socket Test")));
    }

    #[tokio::test]
    async fn missing_message_is_an_arity_error() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("ECHO"))]);

        let err = Command::try_from(frame).unwrap_err();

        assert_eq!(
            err,
            CommandParserError::WrongNumberOfArguments {
                command: "echo".to_string()
            }
        );
    }
}
