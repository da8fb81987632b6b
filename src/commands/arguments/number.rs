//! Numeric token parsers.

use futures::future::BoxFuture;

use crate::commands::arguments::ArgumentParser;
use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError, ParseError};
use crate::message::Message;

fn missing(parameter: &Parameter) -> ParseError {
    ParseError::new(
        "Missing argument",
        format!("No value was provided for '{}'", parameter.name),
    )
}

/// Parses one token as an `i64`, registered under the `int` tag.
pub struct IntParser;

impl ArgumentParser for IntParser {
    fn parse<'a>(
        &'a self,
        _message: &'a Message,
        parameter: &'a Parameter,
        cursor: &'a mut ArgumentCursor,
    ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
        Box::pin(async move {
            if cursor.remaining() == 0 {
                return Err(missing(parameter).into());
            }
            let snapshot = cursor.position();
            let token = cursor.next().map_err(ArgumentError::from)?;
            match token.parse::<i64>() {
                Ok(value) => Ok(Argument::Int(value)),
                Err(_) => {
                    let error = ParseError::new(
                        "Invalid number",
                        format!("'{token}' is not a whole number for '{}'", parameter.name),
                    );
                    cursor.seek(snapshot);
                    Err(error.into())
                }
            }
        })
    }
}

/// Parses one token as an `f64`, registered under the `float` tag.
pub struct FloatParser;

impl ArgumentParser for FloatParser {
    fn parse<'a>(
        &'a self,
        _message: &'a Message,
        parameter: &'a Parameter,
        cursor: &'a mut ArgumentCursor,
    ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
        Box::pin(async move {
            if cursor.remaining() == 0 {
                return Err(missing(parameter).into());
            }
            let snapshot = cursor.position();
            let token = cursor.next().map_err(ArgumentError::from)?;
            match token.parse::<f64>() {
                Ok(value) => Ok(Argument::Float(value)),
                Err(_) => {
                    let error = ParseError::new(
                        "Invalid number",
                        format!("'{token}' is not a number for '{}'", parameter.name),
                    );
                    cursor.seek(snapshot);
                    Err(error.into())
                }
            }
        })
    }
}
