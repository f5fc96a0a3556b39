use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::{Store, StoreError, Value};
use crate::Error;

/// Gets the value of `key` and optionally adjusts its expiration metadata.
///
/// Ref: <https://redis.io/docs/latest/commands/getex>
#[derive(Debug, PartialEq)]
pub struct Getex {
    pub key: Bytes,
    pub expiry: Option<Expiry>,
}

#[derive(Debug, PartialEq)]
pub enum Expiry {
    Ex(u64),
    Px(u64),
    ExAt(u64),
    PxAt(u64),
    // Remove the expiration.
    Persist,
}

impl Expiry {
    pub fn deadline(&self) -> SystemTime {
        match self {
            Expiry::Ex(seconds) => SystemTime::now() + Duration::from_secs(*seconds),
            Expiry::Px(millis) => SystemTime::now() + Duration::from_millis(*millis),
            Expiry::ExAt(timestamp) => UNIX_EPOCH + Duration::from_secs(*timestamp),
            Expiry::PxAt(timestamp) => UNIX_EPOCH + Duration::from_millis(*timestamp),
            Expiry::Persist => unreachable!("PERSIST carries no deadline"),
        }
    }
}

impl Executable for Getex {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let mut state = store.lock();

        let res = match state.get(&self.key) {
            None => return Ok(Frame::Null),
            Some(Value::String(bytes)) => Frame::Bulk(bytes.clone()),
            Some(Value::Integer(n)) => Frame::Integer(*n),
            Some(_) => return Ok(Frame::Error(StoreError::WrongType.to_string())),
        };

        match self.expiry {
            None => {}
            Some(Expiry::Persist) => {
                state.remove_expiration(&self.key);
            }
            Some(expiry) => {
                state.set_expiration(&self.key, expiry.deadline());
            }
        }

        Ok(res)
    }
}

impl TryFrom<&mut CommandParser> for Getex {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_bytes()?;

        let option = match parser.next_string() {
            Ok(option) => option,
            Err(CommandParserError::EndOfStream) => return Ok(Self { key, expiry: None }),
            Err(err) => return Err(err),
        };

        let expiry = match option.to_lowercase().as_str() {
            "ex" => Expiry::Ex(parse_unsigned(parser)?),
            "px" => Expiry::Px(parse_unsigned(parser)?),
            "exat" => Expiry::ExAt(parse_unsigned(parser)?),
            "pxat" => Expiry::PxAt(parse_unsigned(parser)?),
            "persist" => Expiry::Persist,
            _ => return Err(CommandParserError::SyntaxError),
        };

        Ok(Self {
            key,
            expiry: Some(expiry),
        })
    }
}

fn parse_unsigned(parser: &mut CommandParser) -> Result<u64, CommandParserError> {
    let value = parser.next_integer()?;
    u64::try_from(value).map_err(|_| CommandParserError::NotAnInteger)
}
