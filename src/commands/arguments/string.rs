//! Single-token text parser.

use futures::future::BoxFuture;

use crate::commands::arguments::ArgumentParser;
use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError, ParseError};
use crate::message::Message;

/// Parses one token as text, registered under the `str` tag.
pub struct StringParser;

impl ArgumentParser for StringParser {
    fn parse<'a>(
        &'a self,
        _message: &'a Message,
        parameter: &'a Parameter,
        cursor: &'a mut ArgumentCursor,
    ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
        Box::pin(async move {
            if cursor.remaining() == 0 {
                return Err(ParseError::new(
                    "Missing argument",
                    format!("No value was provided for '{}'", parameter.name),
                )
                .into());
            }
            let token = cursor.next().map_err(ArgumentError::from)?;
            Ok(Argument::Text(token.to_string()))
        })
    }
}
