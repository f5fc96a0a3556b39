// https://redis.io/docs/reference/protocol-spec

use std::fmt;
use std::io::Cursor;

use bytes::{Buf, Bytes};
use thiserror::Error as ThisError;

static CRLF: &[u8; 2] = b"\r\n";

#[derive(Debug, ThisError, PartialEq)]
pub enum Error {
    #[error("not enough data is available to parse an entire frame")]
    Incomplete,
    #[error("invalid frame data type: {0}")]
    InvalidDataType(u8),
    #[error("invalid integer in frame prefix")]
    InvalidInteger,
    #[error("expected CRLF after bulk payload")]
    ExpectedCrlf,
    #[error("invalid frame format")]
    InvalidFormat,
    #[error("empty inline command")]
    EmptyInput,
    #[error("unterminated double quote in inline command")]
    UnclosedQuote,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    Null,
    Array(Vec<Frame>),
}

impl Frame {
    /// Parses one RESP2 frame out of `src`, leaving the cursor just past it.
    /// `Error::Incomplete` means the buffer holds a frame prefix; the caller
    /// should read more bytes and retry from the same start position.
    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Self, Error> {
        // The first byte in a RESP-serialized payload always identifies its
        // type. Subsequent bytes constitute the type's contents.
        let first_byte = get_byte(src)?;
        let data_type = DataType::try_from(first_byte)?;

        match data_type {
            DataType::SimpleString => {
                let bytes = get_line(src)?.to_vec();
                let string = String::from_utf8(bytes).map_err(|_| Error::InvalidFormat)?;
                Ok(Frame::Simple(string))
            }
            DataType::SimpleError => {
                let bytes = get_line(src)?.to_vec();
                let string = String::from_utf8(bytes).map_err(|_| Error::InvalidFormat)?;
                Ok(Frame::Error(string))
            }
            DataType::Integer => {
                let integer = parse_decimal(get_line(src)?)?;
                Ok(Frame::Integer(integer))
            }
            // $<length>\r\n<data>\r\n
            DataType::BulkString => {
                let length = parse_decimal(get_line(src)?)?;

                if length == -1 {
                    return Ok(Frame::Null);
                }
                let length = usize::try_from(length).map_err(|_| Error::InvalidInteger)?;

                // The payload is length-prefixed and binary-safe: consume
                // exactly `length` bytes, then require the CRLF terminator.
                if src.remaining() < length + CRLF.len() {
                    return Err(Error::Incomplete);
                }
                let start = src.position() as usize;
                let data = Bytes::copy_from_slice(&src.get_ref()[start..start + length]);
                src.advance(length);

                let terminator = [src.get_u8(), src.get_u8()];
                if terminator != *CRLF {
                    return Err(Error::ExpectedCrlf);
                }

                Ok(Frame::Bulk(data))
            }
            // *<number-of-elements>\r\n<element-1>...<element-n>
            DataType::Array => {
                let length = parse_decimal(get_line(src)?)?;

                if length == -1 {
                    return Ok(Frame::Null);
                }
                let length = usize::try_from(length).map_err(|_| Error::InvalidInteger)?;

                let mut frames = Vec::with_capacity(length);
                for _ in 0..length {
                    frames.push(Self::parse(src)?);
                }

                Ok(Frame::Array(frames))
            }
        }
    }

    /// Parses an inline command: one text line tokenized on ASCII whitespace,
    /// honoring one level of double quotes with no escape processing. The
    /// tokens become an array of bulk strings, so downstream command
    /// classification is shared with the RESP path.
    pub fn parse_inline(src: &mut Cursor<&[u8]>) -> Result<Self, Error> {
        let start = src.position() as usize;
        let buffer = &src.get_ref()[start..];

        let line_end = buffer
            .iter()
            .position(|&byte| byte == b'\n')
            .ok_or(Error::Incomplete)?;
        let line = &buffer[..line_end];
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        src.set_position((start + line_end + 1) as u64);

        let mut tokens: Vec<Frame> = vec![];
        let mut current: Option<Vec<u8>> = None;
        let mut in_quotes = false;

        for &byte in line {
            if in_quotes {
                if byte == b'"' {
                    in_quotes = false;
                } else {
                    current.get_or_insert_with(Vec::new).push(byte);
                }
            } else if byte == b'"' {
                in_quotes = true;
                // A quote opens a token even when the quoted span is empty.
                current.get_or_insert_with(Vec::new);
            } else if byte.is_ascii_whitespace() {
                if let Some(token) = current.take() {
                    tokens.push(Frame::Bulk(Bytes::from(token)));
                }
            } else {
                current.get_or_insert_with(Vec::new).push(byte);
            }
        }

        if in_quotes {
            return Err(Error::UnclosedQuote);
        }
        if let Some(token) = current.take() {
            tokens.push(Frame::Bulk(Bytes::from(token)));
        }
        if tokens.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Frame::Array(tokens))
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Frame::Simple(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleString));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Error(s) => {
                let mut bytes = Vec::with_capacity(1 + s.len() + CRLF.len());
                bytes.push(u8::from(DataType::SimpleError));
                bytes.extend_from_slice(s.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Integer(i) => {
                let digits = i.to_string();
                let mut bytes = Vec::with_capacity(1 + digits.len() + CRLF.len());
                bytes.push(u8::from(DataType::Integer));
                bytes.extend_from_slice(digits.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes
            }
            Frame::Bulk(payload) => {
                let length = payload.len().to_string();
                let mut bytes =
                    Vec::with_capacity(1 + length.len() + CRLF.len() * 2 + payload.len());
                bytes.push(u8::from(DataType::BulkString));
                bytes.extend_from_slice(length.as_bytes());
                bytes.extend_from_slice(CRLF);
                bytes.extend_from_slice(payload);
                bytes.extend_from_slice(CRLF);
                bytes
            }
            // RESP2 encodes null as a bulk string of length -1.
            Frame::Null => b"$-1\r\n".to_vec(),
            Frame::Array(frames) => {
                let length = frames.len().to_string();
                let mut bytes = Vec::with_capacity(1 + length.len() + CRLF.len());
                bytes.push(u8::from(DataType::Array));
                bytes.extend_from_slice(length.as_bytes());
                bytes.extend_from_slice(CRLF);
                for frame in frames {
                    bytes.extend(frame.serialize());
                }
                bytes
            }
        }
    }
}

impl From<Frame> for Vec<u8> {
    fn from(frame: Frame) -> Self {
        frame.serialize()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Simple(s) => write!(f, "+{}", s),
            Frame::Error(s) => write!(f, "-{}", s),
            Frame::Integer(i) => write!(f, ":{}", i),
            Frame::Bulk(bytes) => write!(f, "${}", String::from_utf8_lossy(bytes)),
            Frame::Null => write!(f, "$-1"),
            Frame::Array(frames) => {
                write!(f, "*{}", frames.len())?;
                for frame in frames {
                    write!(f, " {}", frame)?;
                }
                Ok(())
            }
        }
    }
}

/// Returns the bytes up to the next CRLF, leaving the cursor past it.
fn get_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let end = src.get_ref().len();

    let line_end = src.get_ref()[start..end]
        .windows(CRLF.len())
        .position(|window| window == CRLF)
        .map(|index| start + index)
        .ok_or(Error::Incomplete)?;

    src.set_position((line_end + CRLF.len()) as u64);

    Ok(&src.get_ref()[start..line_end])
}

fn get_byte(src: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }
    Ok(src.get_u8())
}

fn parse_decimal(bytes: &[u8]) -> Result<i64, Error> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(Error::InvalidInteger)
}

#[derive(Debug)]
pub(crate) enum DataType {
    SimpleString, // '+'
    SimpleError,  // '-'
    Integer,      // ':'
    BulkString,   // '$'
    Array,        // '*'
}

impl TryFrom<u8> for DataType {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b'+' => Ok(Self::SimpleString),
            b'-' => Ok(Self::SimpleError),
            b':' => Ok(Self::Integer),
            b'$' => Ok(Self::BulkString),
            b'*' => Ok(Self::Array),
            _ => Err(Error::InvalidDataType(byte)),
        }
    }
}

impl From<DataType> for u8 {
    fn from(value: DataType) -> Self {
        match value {
            DataType::SimpleString => b'+',
            DataType::SimpleError => b'-',
            DataType::Integer => b':',
            DataType::BulkString => b'$',
            DataType::Array => b'*',
        }
    }
}
