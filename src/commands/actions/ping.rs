//! Liveness check command.

use log::debug;

use crate::commands::command::{Command, Parameter};
use crate::commands::CommandError;

/// Builds the `ping` command.
///
/// The response travels through the execution-report path: the handler
/// "fails" with a heading/description pair and the dispatcher renders it like
/// any other reported failure, footer included. This keeps the command a
/// two-liner and exercises the reporting pipeline on every ping.
pub fn ping_command() -> Command {
    Command {
        name: "ping".to_string(),
        aliases: vec![],
        category: "misc".to_string(),
        description: "Check that the bot is alive".to_string(),
        parameters: vec![Parameter::message()],
        required_permissions: vec![],
        handler: Box::new(|_| {
            debug!("handling ping command");
            Box::pin(async {
                Err(CommandError::report(
                    "Pong!",
                    "The bot is up and handling commands",
                ))
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Argument;
    use crate::message::testing::{RecordingChannel, test_message};

    #[test]
    fn test_ping_descriptor() {
        let command = ping_command();
        assert_eq!(command.name, "ping");
        assert_eq!(command.category, "misc");
        assert_eq!(command.parameters.len(), 1);
        assert_eq!(command.usage("!"), "!ping");
    }

    #[tokio::test]
    async fn test_ping_reports_pong() {
        let command = ping_command();
        let message = test_message("alice", RecordingChannel::new());

        let error = (command.handler)(vec![Argument::Message(message)])
            .await
            .unwrap_err();
        match error {
            CommandError::Report {
                heading,
                description,
            } => {
                assert_eq!(heading.as_deref(), Some("Pong!"));
                assert!(description.is_some());
            }
            CommandError::Internal(_) => panic!("expected a report"),
        }
    }
}
