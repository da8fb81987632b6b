//! Help command.
//!
//! With an argument, shows the description and usage of one command. Without,
//! shows an index of every registered command grouped by category, leaving out
//! the `hidden` ones.

use std::collections::BTreeMap;

use anyhow::anyhow;
use log::debug;

use crate::commands::command::{Command, Parameter};
use crate::commands::registry::CommandRegistry;
use crate::commands::{Argument, CommandError, HIDDEN_CATEGORY};
use crate::message::{Notice, Outgoing};
use crate::utils::capitalize_first;

/// Builds the `help` command over the given registry.
///
/// The registry handle is the same one the dispatcher reads, so help output
/// always reflects the registered command set. Asking for help on an unknown
/// name raises a reported `Unknown Command` failure.
///
/// # Arguments
///
/// * `registry` - The command registry to describe.
/// * `prefix` - The command prefix, shown in usage strings.
/// * `color` - Accent color of the help notices.
pub fn help_command(registry: CommandRegistry, prefix: String, color: u32) -> Command {
    Command {
        name: "help".to_string(),
        aliases: vec![],
        category: "misc".to_string(),
        description: "Show this help message".to_string(),
        parameters: vec![Parameter::message(), Parameter::optional("command", "str")],
        required_permissions: vec![],
        handler: Box::new(move |args| {
            let registry = registry.clone();
            let prefix = prefix.clone();
            Box::pin(async move {
                debug!("handling help command");

                let mut args = args.into_iter();
                let message = match args.next() {
                    Some(Argument::Message(message)) => message,
                    _ => return Err(anyhow!("help invoked without a message argument").into()),
                };
                let request = args.next().and_then(|arg| arg.text().map(str::to_string));

                match request {
                    Some(name) => {
                        let Some(command) = registry.find(&name) else {
                            return Err(CommandError::report(
                                "Unknown Command",
                                format!("Command not found: {name}. No help for this command"),
                            ));
                        };
                        message
                            .send(Outgoing::Notice(Notice {
                                title: Some(format!("Command `{prefix}{}`", command.name)),
                                description: Some(format!(
                                    "{}\n\nUsage: `{}`",
                                    command.description,
                                    command.usage(&prefix)
                                )),
                                color,
                                image_url: None,
                                footer: None,
                            }))
                            .await;
                    }
                    None => {
                        message
                            .send(Outgoing::Notice(Notice {
                                title: Some("Command Index".to_string()),
                                description: Some(format_index(&registry)),
                                color,
                                image_url: None,
                                footer: None,
                            }))
                            .await;
                    }
                }
                Ok(())
            })
        }),
    }
}

/// Renders the category-grouped command index.
fn format_index(registry: &CommandRegistry) -> String {
    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for command in registry.commands() {
        if command.category == HIDDEN_CATEGORY {
            continue;
        }
        by_category
            .entry(command.category.clone())
            .or_default()
            .push(command.name.clone());
    }

    let mut lines = vec!["Here are all the available commands".to_string(), String::new()];
    for (category, mut names) in by_category {
        names.sort();
        let names = names
            .iter()
            .map(|name| format!("`{name}`"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("**{}**: {names}", capitalize_first(&category)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::arguments::ParserRegistry;
    use crate::commands::dispatcher::{
        DispatchOutcome, Dispatcher, MockFallbackStore, MockPermissionChecker,
    };
    use crate::message::testing::{RecordingChannel, test_message};

    const COLOR: u32 = 0x7289DA;

    fn stub_command(name: &str, aliases: &[&str], category: &str) -> Command {
        Command {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            category: category.to_string(),
            description: format!("The {name} command"),
            parameters: vec![Parameter::message()],
            required_permissions: vec![],
            handler: Box::new(|_| Box::pin(async { Ok(()) })),
        }
    }

    fn notice(channel: &RecordingChannel) -> Notice {
        match channel.payloads().pop().expect("nothing was sent") {
            Outgoing::Notice(notice) => notice,
            Outgoing::Raw(_) => panic!("expected a notice"),
        }
    }

    #[test]
    fn test_help_descriptor() {
        let command = help_command(CommandRegistry::new(), "!".to_string(), COLOR);
        assert_eq!(command.name, "help");
        assert_eq!(command.usage("!"), "!help [command]");
    }

    #[tokio::test]
    async fn test_index_groups_by_category_and_skips_hidden() {
        let registry = CommandRegistry::new();
        registry.register(stub_command("ping", &[], "misc"));
        registry.register(stub_command("avatar", &[], "utility"));
        registry.register(stub_command("debugdump", &[], "hidden"));

        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let command = help_command(registry, "!".to_string(), COLOR);

        (command.handler)(vec![Argument::Message(message), Argument::None])
            .await
            .unwrap();

        let notice = notice(&channel);
        assert_eq!(notice.title.as_deref(), Some("Command Index"));
        let description = notice.description.unwrap();
        assert!(description.contains("**Misc**: `ping`"));
        assert!(description.contains("**Utility**: `avatar`"));
        assert!(!description.contains("debugdump"));
    }

    #[tokio::test]
    async fn test_specific_command_shows_usage() {
        let registry = CommandRegistry::new();
        registry.register(stub_command("avatar", &["profilepic"], "utility"));

        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let command = help_command(registry, "-".to_string(), COLOR);

        (command.handler)(vec![
            Argument::Message(message),
            Argument::Text("avatar".to_string()),
        ])
        .await
        .unwrap();

        let notice = notice(&channel);
        assert_eq!(notice.title.as_deref(), Some("Command `-avatar`"));
        let description = notice.description.unwrap();
        assert!(description.contains("The avatar command"));
        assert!(description.contains("Usage: `-avatar`"));
    }

    #[tokio::test]
    async fn test_aliases_resolve_in_help_lookup() {
        let registry = CommandRegistry::new();
        registry.register(stub_command("avatar", &["profilepic"], "utility"));

        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let command = help_command(registry, "!".to_string(), COLOR);

        (command.handler)(vec![
            Argument::Message(message),
            Argument::Text("profilepic".to_string()),
        ])
        .await
        .unwrap();

        // The canonical name is shown even when asked via an alias
        assert_eq!(notice(&channel).title.as_deref(), Some("Command `!avatar`"));
    }

    #[tokio::test]
    async fn test_unknown_command_raises_report() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let command = help_command(CommandRegistry::new(), "!".to_string(), COLOR);

        let error = (command.handler)(vec![
            Argument::Message(message),
            Argument::Text("foo".to_string()),
        ])
        .await
        .unwrap_err();

        match error {
            CommandError::Report {
                heading,
                description,
            } => {
                assert_eq!(heading.as_deref(), Some("Unknown Command"));
                assert!(description.unwrap().contains("foo"));
            }
            CommandError::Internal(_) => panic!("expected a report"),
        }
        assert!(channel.payloads().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_reported_through_dispatch() {
        let registry = CommandRegistry::new();
        let parsers = ParserRegistry::new();
        parsers.register_builtins();
        registry.register(help_command(registry.clone(), "!".to_string(), COLOR));

        let mut permissions = MockPermissionChecker::new();
        permissions.expect_has_permission().returning(|_, _| true);
        let mut fallback = MockFallbackStore::new();
        fallback.expect_find().returning(|_, _| None);

        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let dispatcher = Dispatcher::new(registry, parsers, permissions, fallback, COLOR);

        let outcome = dispatcher
            .dispatch(&message, &["help".to_string(), "foo".to_string()])
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::ExecutionFailed);
        let notice = notice(&channel);
        assert_eq!(notice.title.as_deref(), Some("Unknown Command"));
        assert_eq!(notice.footer.unwrap().text, "Requested by alice");
    }
}
