use bytes::Bytes;
use glob_match::glob_match;

use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

/// Returns every key matching the glob pattern.
///
/// Ref: <https://redis.io/docs/latest/commands/keys>
#[derive(Debug, PartialEq)]
pub struct Keys {
    pub pattern: String,
}

impl Executable for Keys {
    fn exec(self, store: Store) -> Result<Frame, Error> {
        let state = store.lock();

        let mut res = vec![];
        for key in state.keys() {
            // Patterns are text; non-UTF-8 keys are matched through a lossy
            // view of their bytes.
            let matches = glob_match(&self.pattern, &String::from_utf8_lossy(key));
            if matches {
                res.push(Frame::Bulk(key.clone()));
            }
        }

        Ok(Frame::Array(res))
    }
}

impl TryFrom<&mut CommandParser> for Keys {
    type Error = CommandParserError;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let pattern = parser.next_string()?;
        Ok(Self { pattern })
    }
}
