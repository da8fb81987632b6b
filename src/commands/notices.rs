//! Builders for the dispatcher's standard notices.
//!
//! These functions produce the user-facing payloads the dispatcher sends on
//! its own: permission denials, parsing errors and reported execution
//! failures. Command-specific responses are built by the commands themselves.

use crate::commands::ParseError;
use crate::message::{Footer, Message, Notice};

/// Notice sent when the permission check rejects a command.
pub fn no_permission(message: &Message, color: u32) -> Notice {
    Notice {
        title: Some("No Permission!".to_string()),
        description: Some(
            "Sorry, you or the bot is missing the permissions required to run this command :("
                .to_string(),
        ),
        color,
        image_url: None,
        footer: Some(Footer {
            text: format!("Executed by {}", message.author.username),
            icon_url: message.author.avatar_url.clone(),
        }),
    }
}

/// Notice sent when argument parsing aborts the dispatch.
pub fn parse_failure(error: &ParseError, color: u32) -> Notice {
    Notice {
        title: Some(format!("Parsing Error: {}", error.heading)),
        description: Some(error.message.clone()),
        color,
        image_url: None,
        footer: None,
    }
}

/// Notice sent when a handler reports a user-facing execution failure.
pub fn execution_report(
    heading: Option<String>,
    description: Option<String>,
    message: &Message,
    color: u32,
) -> Notice {
    Notice {
        title: heading,
        description,
        color,
        image_url: None,
        footer: Some(Footer {
            text: format!("Requested by {}", message.author.username),
            icon_url: message.author.avatar_url.clone(),
        }),
    }
}
