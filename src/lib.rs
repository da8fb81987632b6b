//! herald - a message-driven command dispatcher for chat bots.
//!
//! herald receives a tokenized chat message, resolves it to a registered
//! command, coerces the raw tokens into typed arguments and invokes the
//! command's handler. It owns no transport: whatever connects it to a chat
//! platform tokenizes incoming text, builds a
//! [`Message`](message::Message) context and calls
//! [`Dispatcher::dispatch`](commands::Dispatcher::dispatch).
//!
//! # Overview
//!
//! A dispatch walks a fixed pipeline:
//!
//! 1. **Command lookup** - the first token, matched case-insensitively against
//!    command names and aliases; unknown labels are offered to a per-guild
//!    fallback store of canned answers
//! 2. **Permission check** - delegated to an external policy collaborator
//! 3. **Argument resolution** - each declared parameter is resolved against
//!    the shared token cursor; union type specifiers (`"member|str"`) try
//!    their alternatives in order, and optional parameters give their tokens
//!    back and fall back to a default when resolution fails
//! 4. **Execution** - the handler runs with the typed argument list;
//!    user-facing failures are reported back to the channel, internal ones
//!    surface to the caller
//!
//! # Example
//!
//! ```no_run
//! use herald::commands::actions::{help_command, ping_command};
//! use herald::commands::{CommandRegistry, Dispatcher, ParserRegistry};
//! # use herald::commands::dispatcher::{FallbackStore, PermissionChecker};
//! # async fn run(
//! #     message: herald::message::Message,
//! #     permissions: impl PermissionChecker,
//! #     fallback: impl FallbackStore,
//! # ) -> anyhow::Result<()> {
//!
//! let commands = CommandRegistry::new();
//! let parsers = ParserRegistry::new();
//! parsers.register_builtins();
//! commands.register(ping_command());
//! commands.register(help_command(commands.clone(), "!".to_string(), 0x7289DA));
//!
//! let dispatcher = Dispatcher::new(commands, parsers, permissions, fallback, 0x7289DA);
//! let tokens: Vec<String> = vec!["help".into(), "ping".into()];
//! dispatcher.dispatch(&message, &tokens).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`commands`] - Registries, token cursor, parameter resolution and the
//!   dispatch state machine
//! - [`message`] - The per-dispatch message context and outgoing payloads
//! - [`config`] - YAML configuration with environment variable support
//! - [`utils`] - Small string helpers
//!
//! Registries are populated once at startup and read-only afterwards;
//! concurrent dispatches share them without locking on the dispatch path.

pub mod commands;
pub mod config;
pub mod message;
pub mod utils;
