use crate::commands::{CommandParser, CommandParserError};
use crate::connection::ClientInfo;
use crate::frame::Frame;
use crate::Error;

/// Connection-introspection command. Only the SETINFO subcommand is
/// supported; it updates the calling connection's identity record and never
/// touches the store.
///
/// Ref: <https://redis.io/docs/latest/commands/client-setinfo>
#[derive(Debug, PartialEq)]
pub struct Client {
    pub subcommand: Subcommand,
}

#[derive(Debug, PartialEq)]
pub enum Subcommand {
    SetInfo { attribute: Attribute, value: String },
}

#[derive(Debug, PartialEq)]
pub enum Attribute {
    LibName,
    LibVersion,
    // Unrecognized attributes are accepted and ignored, the way the common
    // client handshake expects.
    Other(String),
}

impl Client {
    pub fn exec(self, client_info: &mut ClientInfo) -> Result<Frame, Error> {
        match self.subcommand {
            Subcommand::SetInfo { attribute, value } => {
                match attribute {
                    Attribute::LibName => client_info.lib_name = Some(value),
                    Attribute::LibVersion => client_info.lib_version = Some(value),
                    Attribute::Other(_) => {}
                }
                Ok(Frame::Simple("OK".to_string()))
            }
        }
    }
}

impl TryFrom<&mut CommandParser> for Client {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let subcommand = parser.next_string()?;

        match subcommand.to_lowercase().as_str() {
            "setinfo" => {
                let attribute = parser.next_string()?;
                let value = parser.next_string()?;

                let attribute = match attribute.to_lowercase().as_str() {
                    "lib-name" => Attribute::LibName,
                    "lib-ver" => Attribute::LibVersion,
                    _ => Attribute::Other(attribute),
                };

                Ok(Self {
                    subcommand: Subcommand::SetInfo { attribute, value },
                })
            }
            _ => Err(CommandParserError::UnknownClientSubcommand),
        }
    }
}
