//! Dispatch orchestration.
//!
//! The [`Dispatcher`] ties the pipeline together: command lookup, permission
//! check, sequential parameter resolution with snapshot/restore for optional
//! parameters, handler invocation and error reporting.
//!
//! # State Machine
//!
//! ```text
//! Idle → ResolveCommand → {Unknown, CheckPermission}
//!                          {Denied, ResolveArgs}
//!                          {ParseFailed, Execute}
//!                          {ExecFailed, Done}
//! ```
//!
//! Every terminal state is visible to the caller as a [`DispatchOutcome`].
//! Only [`ParseError`](crate::commands::ParseError)s are recovered along the
//! way; internal failures surface as `anyhow::Error` and are contained by the
//! host front end, never by this module.
//!
//! # Concurrency
//!
//! A dispatcher is shared by any number of in-flight dispatches. They read the
//! registries, which are not mutated after startup, and each dispatch owns its
//! cursor and argument list, so no locking happens on the dispatch path.

use anyhow::Result;
use log::debug;
use mockall::automock;

use crate::commands::arguments::ParserRegistry;
use crate::commands::command::Command;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::registry::CommandRegistry;
use crate::commands::resolver::resolve_parameter;
use crate::commands::{Argument, ArgumentError, CommandError, notices};
use crate::message::{Message, Outgoing};

/// Permission policy collaborator.
///
/// The dispatcher treats permissions as opaque: it asks this trait and acts on
/// the boolean. The check may suspend, e.g. to query platform state.
#[automock]
pub trait PermissionChecker: Send + Sync {
    /// True when the author of `message` may run `command`.
    async fn has_permission(&self, message: &Message, command: &Command) -> bool;
}

/// Canned-answer store consulted for unknown command labels.
///
/// Guilds can map arbitrary labels to stored response payloads; an unknown
/// label is looked up here before the dispatch ends. This path never fails.
#[automock]
pub trait FallbackStore: Send + Sync {
    /// Returns the stored payload for `label` in `guild_id`, if any.
    async fn find(&self, guild_id: &str, label: &str) -> Option<serde_json::Value>;
}

/// Terminal state of one dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The message carried no guild or no command label; nothing was done
    Ignored,
    /// No command matched the label; the fallback store was consulted
    UnknownCommand,
    /// The permission check rejected the command
    PermissionDenied,
    /// Argument parsing aborted the dispatch
    ParseFailed,
    /// The handler failed and the failure was handled (reported or swallowed)
    ExecutionFailed,
    /// The handler completed successfully
    Completed,
}

/// The command dispatch state machine.
///
/// Built once at startup from populated registries and the two policy
/// collaborators, then shared read-only by every dispatch.
///
/// # Examples
///
/// ```no_run
/// # use herald::commands::{CommandRegistry, Dispatcher, ParserRegistry};
/// # use herald::commands::dispatcher::{PermissionChecker, FallbackStore};
/// # async fn run(
/// #     message: herald::message::Message,
/// #     permissions: impl PermissionChecker,
/// #     fallback: impl FallbackStore,
/// # ) -> anyhow::Result<()> {
/// let commands = CommandRegistry::new();
/// let parsers = ParserRegistry::new();
/// parsers.register_builtins();
/// // ... register commands ...
/// let dispatcher = Dispatcher::new(commands, parsers, permissions, fallback, 0x7289DA);
///
/// let tokens = vec!["ping".to_string()];
/// let outcome = dispatcher.dispatch(&message, &tokens).await?;
/// println!("dispatch ended as {outcome:?}");
/// # Ok(())
/// # }
/// ```
pub struct Dispatcher<P, F> {
    commands: CommandRegistry,
    parsers: ParserRegistry,
    permissions: P,
    fallback: F,
    color: u32,
}

impl<P: PermissionChecker, F: FallbackStore> Dispatcher<P, F> {
    /// Creates a dispatcher over the given registries and collaborators.
    ///
    /// # Arguments
    ///
    /// * `commands` - The command registry, fully populated.
    /// * `parsers` - The argument parser registry, fully populated.
    /// * `permissions` - The permission policy.
    /// * `fallback` - The canned-answer store for unknown labels.
    /// * `color` - Accent color used in the notices this dispatcher sends.
    pub fn new(
        commands: CommandRegistry,
        parsers: ParserRegistry,
        permissions: P,
        fallback: F,
        color: u32,
    ) -> Self {
        Dispatcher {
            commands,
            parsers,
            permissions,
            fallback,
            color,
        }
    }

    /// Runs one end-to-end dispatch for an incoming message.
    ///
    /// `tokens` is the already-tokenized command line, label first; the
    /// dispatcher never splits text itself. Each call attempts the dispatch
    /// exactly once.
    ///
    /// # Returns
    ///
    /// The terminal [`DispatchOutcome`]. User-facing problems (unknown
    /// commands, denials, parse failures, reported execution failures) are
    /// notified through the message's channel and end the dispatch normally.
    ///
    /// # Errors
    ///
    /// Internal failures: a parser or handler error outside the
    /// heading/description shape, or a raw cursor exhaustion. Fatal for this
    /// dispatch only; the host owns containment.
    pub async fn dispatch(
        &self,
        message: &Message,
        tokens: &[String],
    ) -> Result<DispatchOutcome> {
        let Some((label, arguments)) = tokens.split_first() else {
            return Ok(DispatchOutcome::Ignored);
        };
        // Direct messages have no guild; commands only exist in guilds
        let Some(guild_id) = message.guild_id.as_deref() else {
            return Ok(DispatchOutcome::Ignored);
        };

        let label = label.to_lowercase();
        let Some(command) = self.commands.find(&label) else {
            debug!("no command matches '{label}', consulting fallback store");
            if let Some(payload) = self.fallback.find(guild_id, &label).await {
                message.send(Outgoing::Raw(payload)).await;
            }
            return Ok(DispatchOutcome::UnknownCommand);
        };

        debug!("dispatching '{label}' as command '{}'", command.name);

        if !self.permissions.has_permission(message, &command).await {
            debug!("permission denied for '{}' on '{label}'", message.author.username);
            message
                .send(Outgoing::Notice(notices::no_permission(message, self.color)))
                .await;
            return Ok(DispatchOutcome::PermissionDenied);
        }

        // One cursor is shared by all parameters: tokens consumed by one are
        // unavailable to the next
        let mut cursor = ArgumentCursor::new(arguments.to_vec());
        let mut resolved = Vec::with_capacity(command.parameters.len());

        for (index, parameter) in command.parameters.iter().enumerate() {
            let snapshot = cursor.position();
            match resolve_parameter(message, parameter, &self.parsers, &mut cursor).await {
                Ok(value) => resolved.push(value),
                Err(ArgumentError::Parse(error)) => {
                    let is_last = index + 1 == command.parameters.len();
                    if !parameter.optional || (is_last && error.abort_on_last_arg) {
                        debug!(
                            "aborting '{}': parameter '{}' failed: {}",
                            command.name, parameter.name, error.message
                        );
                        message
                            .send(Outgoing::Notice(notices::parse_failure(&error, self.color)))
                            .await;
                        return Ok(DispatchOutcome::ParseFailed);
                    }
                    // Give the attempted tokens back and fall back to the
                    // declared default
                    cursor.seek(snapshot);
                    resolved.push(parameter.default.clone().unwrap_or(Argument::None));
                }
                Err(ArgumentError::Internal(error)) => return Err(error),
            }
        }

        match (command.handler)(resolved).await {
            Ok(()) => Ok(DispatchOutcome::Completed),
            Err(CommandError::Report {
                heading,
                description,
            }) => {
                if heading.is_some() || description.is_some() {
                    message
                        .send(Outgoing::Notice(notices::execution_report(
                            heading,
                            description,
                            message,
                            self.color,
                        )))
                        .await;
                }
                // A report with neither field was already handled by the
                // command itself
                Ok(DispatchOutcome::ExecutionFailed)
            }
            Err(CommandError::Internal(error)) => Err(error),
        }
    }
}
