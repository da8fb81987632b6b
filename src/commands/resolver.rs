//! Union-type parameter resolution.
//!
//! A parameter's type specifier may list several alternative type tags joined
//! by `|`. Resolution is an ordered-alternative parse: tags are tried in
//! declaration order, the first success wins, and when every alternative fails
//! the most recently recorded error is the one surfaced. A human reading the
//! resulting notice only needs the most specific failure reason, not every
//! attempt.

use crate::commands::arguments::ParserRegistry;
use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError, MESSAGE_TYPE, ParseError};
use crate::message::Message;

/// Resolves one declared parameter against the cursor.
///
/// Tags are handled in order:
///
/// - the reserved `message` tag short-circuits with a clone of the triggering
///   message, consuming nothing;
/// - a tag with no registered parser records an `Unknown type` error and the
///   next tag is tried;
/// - a registered parser is invoked; success returns immediately, a
///   [`ParseError`] overwrites the previously recorded error and the next tag
///   is tried.
///
/// # Errors
///
/// [`ArgumentError::Parse`] with the last recorded error when no alternative
/// succeeded. The error is seeded with a "no types were specified" message so
/// an empty union still reports something sensible. Internal parser failures
/// propagate immediately without trying further tags.
pub async fn resolve_parameter(
    message: &Message,
    parameter: &Parameter,
    parsers: &ParserRegistry,
    cursor: &mut ArgumentCursor,
) -> Result<Argument, ArgumentError> {
    let mut error = ParseError::new(
        "",
        format!(
            "No types were specified for the parameter '{}'",
            parameter.name
        ),
    );

    for tag in parameter.type_spec.split('|') {
        let tag = tag.trim();
        if tag == MESSAGE_TYPE {
            return Ok(Argument::Message(message.clone()));
        }

        match parsers.get(tag) {
            None => {
                error = ParseError::new(
                    "Unknown type",
                    format!("No argument parser was registered for the type '{tag}'"),
                );
            }
            Some(parser) => match parser.parse(message, parameter, cursor).await {
                Ok(value) => return Ok(value),
                Err(ArgumentError::Parse(parse_error)) => error = parse_error,
                Err(internal) => return Err(internal),
            },
        }
    }

    Err(error.into())
}
