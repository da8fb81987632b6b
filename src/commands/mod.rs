//! Command resolution and argument-parsing pipeline.
//!
//! This module contains the core of the bot: the registries, the token cursor,
//! the union-type parameter resolver and the dispatch state machine that ties
//! them together.
//!
//! # Architecture
//!
//! ```text
//! raw tokens
//!      │
//!      ▼
//! ┌────────────────┐   label   ┌─────────────────┐
//! │   Dispatcher   │──────────▶│ CommandRegistry │
//! └────────────────┘           └─────────────────┘
//!      │ per parameter
//!      ▼
//! ┌────────────────┐   tags    ┌─────────────────┐
//! │    resolver    │──────────▶│ ParserRegistry  │
//! └────────────────┘           └─────────────────┘
//!      │ typed arguments
//!      ▼
//! ┌────────────────┐
//! │ command handler│
//! └────────────────┘
//! ```
//!
//! Data flows one direction: tokens enter through an [`ArgumentCursor`], each
//! declared [`Parameter`](command::Parameter) is resolved against the parser
//! registry into an [`Argument`], and the completed argument list is handed to
//! the command's handler. Both registries are populated at startup and are
//! read-only afterwards from the dispatcher's point of view.
//!
//! # Module Organization
//!
//! - [`dispatcher`] - Lookup, permission check, argument resolution, execution
//! - [`registry`] - Case-insensitive command and alias lookup
//! - [`resolver`] - Ordered-alternative (union) parameter resolution
//! - [`cursor`] - Backtrackable token iterator
//! - [`arguments`] - Argument parser trait, registry and built-in parsers
//! - [`command`] - Command and parameter descriptors
//! - [`actions`] - Built-in commands (`ping`, `help`, `avatar`)
//! - [`notices`] - Builders for the dispatcher's standard notices

use anyhow::anyhow;

use crate::message::{Member, Message};

pub mod actions;
pub mod arguments;
pub mod command;
pub mod cursor;
pub mod dispatcher;
pub mod notices;
pub mod registry;
pub mod resolver;

pub use crate::commands::arguments::{ArgumentParser, ParserRegistry};
pub use crate::commands::command::{Command, Parameter};
pub use crate::commands::cursor::{ArgumentCursor, OutOfTokens};
pub use crate::commands::dispatcher::{DispatchOutcome, Dispatcher};
pub use crate::commands::registry::CommandRegistry;

/// Type tag that resolves to the triggering message itself.
///
/// It is reserved: the resolver handles it before consulting the parser
/// registry, it consumes no tokens and it never fails.
pub const MESSAGE_TYPE: &str = "message";

/// Sentinel category excluding a command from help listings.
pub const HIDDEN_CATEGORY: &str = "hidden";

/// A typed argument value produced by parameter resolution.
///
/// Handlers receive one `Argument` per declared parameter, in declaration
/// order. Optional parameters whose resolution failed carry their declared
/// default, or [`Argument::None`] when no default was declared.
#[derive(Clone, Debug)]
pub enum Argument {
    /// The triggering message, produced by the reserved `message` type
    Message(Message),
    /// A text value, produced by the `str` and `rest` parsers
    Text(String),
    /// A whole number, produced by the `int` parser
    Int(i64),
    /// A floating point number, produced by the `float` parser
    Float(f64),
    /// A resolved guild member, produced by the `member` parser
    Member(Member),
    /// No value; the fallback for optional parameters without a default
    None,
}

impl Argument {
    /// Returns the message if this argument holds one.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Argument::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the text if this argument holds one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Argument::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the member if this argument holds one.
    pub fn member(&self) -> Option<&Member> {
        match self {
            Argument::Member(member) => Some(member),
            _ => None,
        }
    }

    /// True when no value was resolved.
    pub fn is_none(&self) -> bool {
        matches!(self, Argument::None)
    }
}

/// A user-facing argument parsing failure.
///
/// Parse errors are the only failures the pipeline recovers from: the resolver
/// records them while trying union alternatives and the dispatcher either
/// reports them or falls back to an optional parameter's default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Short classification shown as the notice title, e.g. `Invalid number`
    pub heading: String,
    /// Human-readable detail shown as the notice body
    pub message: String,
    /// When true and the failing parameter is the last one declared, the
    /// dispatch aborts even if that parameter is optional. Parsers set this
    /// when a token was supplied but could not be matched, so the user gets an
    /// error instead of a silently applied default.
    pub abort_on_last_arg: bool,
}

impl ParseError {
    /// Creates a parse error that permits optional-parameter fallback.
    pub fn new(heading: impl Into<String>, message: impl Into<String>) -> Self {
        ParseError {
            heading: heading.into(),
            message: message.into(),
            abort_on_last_arg: false,
        }
    }
}

/// Failure of a single argument parser invocation.
///
/// The two arms have very different lifecycles: [`ArgumentError::Parse`] is
/// recovered at the resolver and dispatcher, everything else propagates out of
/// the dispatch untouched.
#[derive(Debug)]
pub enum ArgumentError {
    /// The tokens could not be coerced; recoverable
    Parse(ParseError),
    /// The parser itself failed; fatal for this dispatch
    Internal(anyhow::Error),
}

impl From<ParseError> for ArgumentError {
    fn from(error: ParseError) -> Self {
        ArgumentError::Parse(error)
    }
}

impl From<OutOfTokens> for ArgumentError {
    /// A cursor exhaustion that a parser did not translate into a
    /// [`ParseError`] is treated as fatal.
    fn from(error: OutOfTokens) -> Self {
        ArgumentError::Internal(anyhow!(error))
    }
}

/// Failure returned by a command handler.
///
/// Handlers distinguish problems meant for the user from internal ones:
///
/// - [`CommandError::Report`] carries an optional heading/description pair.
///   The dispatcher renders it as a notice when at least one field is set and
///   swallows it silently when both are empty (the command already handled the
///   situation itself).
/// - [`CommandError::Internal`] propagates out of the dispatcher; the host
///   front end owns top-level containment.
#[derive(Debug)]
pub enum CommandError {
    /// User-facing execution failure
    Report {
        /// Notice title, if any
        heading: Option<String>,
        /// Notice body, if any
        description: Option<String>,
    },
    /// Internal execution failure, propagated to the dispatcher's caller
    Internal(anyhow::Error),
}

impl CommandError {
    /// Creates a report with both a heading and a description.
    pub fn report(heading: impl Into<String>, description: impl Into<String>) -> Self {
        CommandError::Report {
            heading: Some(heading.into()),
            description: Some(description.into()),
        }
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(error: anyhow::Error) -> Self {
        CommandError::Internal(error)
    }
}
