pub mod client;
pub mod decr;
pub mod decrby;
pub mod del;
pub mod echo;
pub mod executable;
pub mod exists;
pub mod expire;
pub mod expireat;
pub mod expiretime;
pub mod flushdb;
pub mod get;
pub mod getdel;
pub mod getex;
pub mod getset;
pub mod hget;
pub mod hgetall;
pub mod hset;
pub mod incr;
pub mod incrby;
pub mod keys;
pub mod ping;
pub mod set;
pub mod ttl;
pub mod type_;
pub mod zadd;
pub mod zcard;
pub mod zcount;
pub mod zpopmax;
pub mod zpopmin;
pub mod zrange;
pub mod zrank;
pub mod zrem;

use std::{str, vec};

use bytes::Bytes;
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::connection::ClientInfo;
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

use client::Client;
use decr::Decr;
use decrby::DecrBy;
use del::Del;
use echo::Echo;
use exists::Exists;
use expire::Expire;
use expireat::ExpireAt;
use expiretime::ExpireTime;
use flushdb::Flushdb;
use get::Get;
use getdel::Getdel;
use getex::Getex;
use getset::Getset;
use hget::Hget;
use hgetall::Hgetall;
use hset::Hset;
use incr::Incr;
use incrby::IncrBy;
use keys::Keys;
use ping::Ping;
use set::Set;
use ttl::Ttl;
use type_::Type;
use zadd::Zadd;
use zcard::Zcard;
use zcount::Zcount;
use zpopmax::ZpopMax;
use zpopmin::ZpopMin;
use zrange::Zrange;
use zrank::Zrank;
use zrem::Zrem;

#[derive(Debug, PartialEq)]
pub enum Command {
    Ping(Ping),
    Echo(Echo),
    Client(Client),
    Set(Set),
    Get(Get),
    Getdel(Getdel),
    Getset(Getset),
    Getex(Getex),
    Incr(Incr),
    Decr(Decr),
    IncrBy(IncrBy),
    DecrBy(DecrBy),
    Del(Del),
    Exists(Exists),
    Flushdb(Flushdb),
    Type(Type),
    Keys(Keys),
    Expire(Expire),
    ExpireAt(ExpireAt),
    ExpireTime(ExpireTime),
    Ttl(Ttl),
    Hset(Hset),
    Hget(Hget),
    Hgetall(Hgetall),
    Zadd(Zadd),
    Zcard(Zcard),
    Zcount(Zcount),
    ZpopMin(ZpopMin),
    ZpopMax(ZpopMax),
    Zrange(Zrange),
    Zrank(Zrank),
    Zrem(Zrem),
}

impl Command {
    /// Executes the command. CLIENT operates on the connection's identity
    /// record and never touches the store; everything else goes through the
    /// shared dataspace handle.
    pub fn exec(self, store: Store, client_info: &mut ClientInfo) -> Result<Frame, Error> {
        match self {
            Command::Ping(cmd) => cmd.exec(store),
            Command::Echo(cmd) => cmd.exec(store),
            Command::Client(cmd) => cmd.exec(client_info),
            Command::Set(cmd) => cmd.exec(store),
            Command::Get(cmd) => cmd.exec(store),
            Command::Getdel(cmd) => cmd.exec(store),
            Command::Getset(cmd) => cmd.exec(store),
            Command::Getex(cmd) => cmd.exec(store),
            Command::Incr(cmd) => cmd.exec(store),
            Command::Decr(cmd) => cmd.exec(store),
            Command::IncrBy(cmd) => cmd.exec(store),
            Command::DecrBy(cmd) => cmd.exec(store),
            Command::Del(cmd) => cmd.exec(store),
            Command::Exists(cmd) => cmd.exec(store),
            Command::Flushdb(cmd) => cmd.exec(store),
            Command::Type(cmd) => cmd.exec(store),
            Command::Keys(cmd) => cmd.exec(store),
            Command::Expire(cmd) => cmd.exec(store),
            Command::ExpireAt(cmd) => cmd.exec(store),
            Command::ExpireTime(cmd) => cmd.exec(store),
            Command::Ttl(cmd) => cmd.exec(store),
            Command::Hset(cmd) => cmd.exec(store),
            Command::Hget(cmd) => cmd.exec(store),
            Command::Hgetall(cmd) => cmd.exec(store),
            Command::Zadd(cmd) => cmd.exec(store),
            Command::Zcard(cmd) => cmd.exec(store),
            Command::Zcount(cmd) => cmd.exec(store),
            Command::ZpopMin(cmd) => cmd.exec(store),
            Command::ZpopMax(cmd) => cmd.exec(store),
            Command::Zrange(cmd) => cmd.exec(store),
            Command::Zrank(cmd) => cmd.exec(store),
            Command::Zrem(cmd) => cmd.exec(store),
        }
    }
}

impl TryFrom<Frame> for Command {
    type Error = CommandParserError;

    fn try_from(frame: Frame) -> Result<Self, Self::Error> {
        // Clients send commands to the server as RESP arrays (the inline
        // decoder also yields arrays of bulk strings).
        let frames = match frame {
            Frame::Array(array) => array,
            frame => {
                return Err(CommandParserError::InvalidFrame {
                    expected: "array".to_string(),
                    actual: frame,
                })
            }
        };

        let parser = &mut CommandParser {
            parts: frames.into_iter(),
        };

        // Command names dispatch case-insensitively; the bytes of every
        // argument are preserved as sent.
        let name = parser.parse_command_name()?;

        let command = match name.to_lowercase().as_str() {
            "ping" => Ping::try_from(&mut *parser).map(Command::Ping),
            "echo" => Echo::try_from(&mut *parser).map(Command::Echo),
            "client" => Client::try_from(&mut *parser).map(Command::Client),
            "set" => Set::try_from(&mut *parser).map(Command::Set),
            "get" => Get::try_from(&mut *parser).map(Command::Get),
            "getdel" => Getdel::try_from(&mut *parser).map(Command::Getdel),
            "getset" => Getset::try_from(&mut *parser).map(Command::Getset),
            "getex" => Getex::try_from(&mut *parser).map(Command::Getex),
            "incr" => Incr::try_from(&mut *parser).map(Command::Incr),
            "decr" => Decr::try_from(&mut *parser).map(Command::Decr),
            "incrby" => IncrBy::try_from(&mut *parser).map(Command::IncrBy),
            "decrby" => DecrBy::try_from(&mut *parser).map(Command::DecrBy),
            "del" => Del::try_from(&mut *parser).map(Command::Del),
            "exists" => Exists::try_from(&mut *parser).map(Command::Exists),
            "flushdb" => Flushdb::try_from(&mut *parser).map(Command::Flushdb),
            "type" => Type::try_from(&mut *parser).map(Command::Type),
            "keys" => Keys::try_from(&mut *parser).map(Command::Keys),
            "expire" => Expire::try_from(&mut *parser).map(Command::Expire),
            "expireat" => ExpireAt::try_from(&mut *parser).map(Command::ExpireAt),
            "expiretime" => ExpireTime::try_from(&mut *parser).map(Command::ExpireTime),
            "ttl" => Ttl::try_from(&mut *parser).map(Command::Ttl),
            "hset" => Hset::try_from(&mut *parser).map(Command::Hset),
            "hget" => Hget::try_from(&mut *parser).map(Command::Hget),
            "hgetall" => Hgetall::try_from(&mut *parser).map(Command::Hgetall),
            "zadd" => Zadd::try_from(&mut *parser).map(Command::Zadd),
            "zcard" => Zcard::try_from(&mut *parser).map(Command::Zcard),
            "zcount" => Zcount::try_from(&mut *parser).map(Command::Zcount),
            "zpopmin" => ZpopMin::try_from(&mut *parser).map(Command::ZpopMin),
            "zpopmax" => ZpopMax::try_from(&mut *parser).map(Command::ZpopMax),
            "zrange" => Zrange::try_from(&mut *parser).map(Command::Zrange),
            "zrank" => Zrank::try_from(&mut *parser).map(Command::Zrank),
            "zrem" => Zrem::try_from(&mut *parser).map(Command::Zrem),
            _ => return Err(CommandParserError::UnknownCommand { command: name }),
        };

        match command {
            Ok(command) => {
                // Surplus arguments count as an arity error, uniformly.
                if parser.parts.next().is_some() {
                    return Err(CommandParserError::WrongNumberOfArguments {
                        command: name.to_lowercase(),
                    });
                }
                Ok(command)
            }
            // Running out of arguments mid-parse is an arity error phrased
            // with the command's name.
            Err(CommandParserError::EndOfStream) => {
                Err(CommandParserError::WrongNumberOfArguments {
                    command: name.to_lowercase(),
                })
            }
            Err(err) => Err(err),
        }
    }
}

pub(crate) struct CommandParser {
    parts: vec::IntoIter<Frame>,
}

impl CommandParser {
    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        let command_name = self.parts.next().ok_or(CommandParserError::EndOfStream)?;

        match command_name {
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .map(|s| s.to_string())
                .map_err(CommandParserError::InvalidUTF8String),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        let frame = self.parts.next().ok_or(CommandParserError::EndOfStream)?;

        match frame {
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .map(|s| s.to_string())
                .map_err(CommandParserError::InvalidUTF8String),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_bytes(&mut self) -> Result<Bytes, CommandParserError> {
        let frame = self.parts.next().ok_or(CommandParserError::EndOfStream)?;

        match frame {
            // Both `Simple` and `Bulk` representations may carry keys and
            // payloads; bulk bytes are kept as-is, no UTF-8 requirement.
            Frame::Simple(s) => Ok(Bytes::from(s)),
            Frame::Bulk(bytes) => Ok(bytes),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "simple or bulk string".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        let frame = self.parts.next().ok_or(CommandParserError::EndOfStream)?;

        match frame {
            Frame::Integer(i) => Ok(i),
            Frame::Simple(s) => s.parse().map_err(|_| CommandParserError::NotAnInteger),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..])
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or(CommandParserError::NotAnInteger),
            frame => Err(CommandParserError::InvalidFrame {
                expected: "integer".to_string(),
                actual: frame,
            }),
        }
    }

    fn next_float(&mut self) -> Result<f64, CommandParserError> {
        let frame = self.parts.next().ok_or(CommandParserError::EndOfStream)?;

        let parsed = match frame {
            Frame::Integer(i) => Some(i as f64),
            Frame::Simple(s) => s.parse().ok(),
            Frame::Bulk(bytes) => str::from_utf8(&bytes[..]).ok().and_then(|s| s.parse().ok()),
            frame => {
                return Err(CommandParserError::InvalidFrame {
                    expected: "double".to_string(),
                    actual: frame,
                })
            }
        };

        match parsed {
            Some(score) if !f64::is_nan(score) => Ok(score),
            _ => Err(CommandParserError::NotAFloat),
        }
    }
}

/// Command-classification failures. The display strings are the exact error
/// texts written to the wire.
#[derive(Debug, ThisError, PartialEq)]
pub enum CommandParserError {
    #[error("ERR invalid command format")]
    InvalidFrame { expected: String, actual: Frame },
    #[error("ERR invalid command format")]
    InvalidUTF8String(#[from] str::Utf8Error),
    #[error("ERR invalid command format")]
    EndOfStream,
    #[error("ERR wrong number of arguments for '{command}' command")]
    WrongNumberOfArguments { command: String },
    #[error("ERR value is not an integer or out of range")]
    NotAnInteger,
    #[error("ERR value is not a valid float")]
    NotAFloat,
    #[error("ERR syntax error")]
    SyntaxError,
    #[error("ERR Syntax error, try CLIENT HELP")]
    UnknownClientSubcommand,
    #[error("ERR unknown command '{command}'")]
    UnknownCommand { command: String },
}
