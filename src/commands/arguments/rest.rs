//! Remainder-of-message parser.

use futures::future::BoxFuture;

use crate::commands::arguments::ArgumentParser;
use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError, ParseError};
use crate::message::Message;

/// Consumes every remaining token and joins them with single spaces,
/// registered under the `rest` tag.
///
/// Declared as the last parameter of commands that take free text, e.g. a
/// reason or an announcement body. Fails when nothing remains, so an optional
/// `rest` parameter falls back to its default.
pub struct RestParser;

impl ArgumentParser for RestParser {
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
                    format!("No text was provided for '{}'", parameter.name),
                )
                .into());
            }
            let mut parts = Vec::with_capacity(cursor.remaining());
            while cursor.remaining() > 0 {
                parts.push(cursor.next().map_err(ArgumentError::from)?.to_string());
            }
            Ok(Argument::Text(parts.join(" ")))
        })
    }
}
