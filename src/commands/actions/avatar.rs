//! Avatar lookup command.

use log::debug;

use crate::commands::command::{Command, Parameter};
use crate::commands::Argument;
use crate::message::{Footer, Notice, Outgoing};

/// Builds the `avatar` command (alias `profilepic`).
///
/// Shows the avatar of the given member, or of the message author when no
/// member was named.
pub fn avatar_command(color: u32) -> Command {
    Command {
        name: "avatar".to_string(),
        aliases: vec!["profilepic".to_string()],
        category: "utility".to_string(),
        description: "Look for someone's avatar".to_string(),
        parameters: vec![Parameter::message(), Parameter::optional("member", "member")],
        required_permissions: vec![],
        handler: Box::new(move |args| {
            Box::pin(async move {
                debug!("handling avatar command");

                let mut args = args.into_iter();
                let message = match args.next() {
                    Some(Argument::Message(message)) => message,
                    _ => {
                        return Err(
                            anyhow::anyhow!("avatar invoked without a message argument").into()
                        );
                    }
                };
                // No member resolved: show the author their own avatar
                let member = match args.next() {
                    Some(Argument::Member(member)) => member,
                    _ => message.author.clone(),
                };

                message
                    .send(Outgoing::Notice(Notice {
                        title: Some(format!("Here's {}'s avatar", member.username)),
                        description: Some("Please don't do anything weird with it!".to_string()),
                        color,
                        image_url: member.avatar_url.clone(),
                        footer: Some(Footer {
                            text: format!("Requested by {}", message.author.username),
                            icon_url: message.author.avatar_url.clone(),
                        }),
                    }))
                    .await;
                Ok(())
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Member;
    use crate::message::testing::{RecordingChannel, test_message};

    const COLOR: u32 = 0x7289DA;

    fn sent_notice(channel: &RecordingChannel) -> Notice {
        match channel.payloads().pop().expect("nothing was sent") {
            Outgoing::Notice(notice) => notice,
            Outgoing::Raw(_) => panic!("expected a notice"),
        }
    }

    #[test]
    fn test_avatar_descriptor() {
        let command = avatar_command(COLOR);
        assert_eq!(command.name, "avatar");
        assert_eq!(command.aliases, vec!["profilepic".to_string()]);
        assert_eq!(command.usage("!"), "!avatar [member]");
    }

    #[tokio::test]
    async fn test_shows_named_member() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());
        let bob = Member {
            id: "2".to_string(),
            username: "bob".to_string(),
            avatar_url: Some("https://cdn.example.com/bob.png".to_string()),
        };

        let command = avatar_command(COLOR);
        (command.handler)(vec![Argument::Message(message), Argument::Member(bob)])
            .await
            .unwrap();

        let notice = sent_notice(&channel);
        assert_eq!(notice.title.as_deref(), Some("Here's bob's avatar"));
        assert_eq!(
            notice.image_url.as_deref(),
            Some("https://cdn.example.com/bob.png")
        );
        assert_eq!(notice.footer.unwrap().text, "Requested by alice");
    }

    #[tokio::test]
    async fn test_defaults_to_author() {
        let channel = RecordingChannel::new();
        let message = test_message("alice", channel.clone());

        let command = avatar_command(COLOR);
        (command.handler)(vec![Argument::Message(message), Argument::None])
            .await
            .unwrap();

        let notice = sent_notice(&channel);
        assert_eq!(notice.title.as_deref(), Some("Here's alice's avatar"));
        assert_eq!(
            notice.image_url.as_deref(),
            Some("https://cdn.example.com/alice.png")
        );
    }
}
