//! Guild member parser.
//!
//! Resolves one token (a name, a mention, an id) against an external member
//! directory. The lookup is asynchronous; on a real platform it may hit a
//! cache or the platform API.

use futures::future::BoxFuture;
use log::debug;
use mockall::automock;

use crate::commands::arguments::ArgumentParser;
use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError, ParseError};
use crate::message::{Member, Message};

/// Directory of guild members.
///
/// This trait abstracts the member lookup for easier testing with mocks.
#[automock]
pub trait MemberDirectory: Send + Sync {
    /// Resolves a query (name, mention or id) to a member of the given guild.
    fn find(&self, guild_id: &str, query: &str) -> BoxFuture<'static, Option<Member>>;
}

/// Parses one token into a guild [`Member`], registered under the `member`
/// tag.
///
/// # Failure modes
///
/// - No token available: a plain missing-argument error, so an optional member
///   parameter falls back to its default.
/// - A token is present but matches nobody: the error sets
///   `abort_on_last_arg`, so a mistyped mention in final position aborts the
///   dispatch instead of silently applying the default.
pub struct MemberParser<D> {
    directory: D,
}

impl<D: MemberDirectory> MemberParser<D> {
    /// Creates a parser backed by the given directory.
    pub fn new(directory: D) -> Self {
        MemberParser { directory }
    }
}

impl<D: MemberDirectory + 'static> ArgumentParser for MemberParser<D> {
    fn parse<'a>(
        &'a self,
        message: &'a Message,
        parameter: &'a Parameter,
        cursor: &'a mut ArgumentCursor,
    ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
        Box::pin(async move {
            if cursor.remaining() == 0 {
                return Err(ParseError::new(
                    "Missing argument",
                    format!("No member was provided for '{}'", parameter.name),
                )
                .into());
            }

            let snapshot = cursor.position();
            let token = cursor.next().map_err(ArgumentError::from)?.to_string();
            let guild_id = message.guild_id.as_deref().unwrap_or_default();

            debug!("looking up member '{token}' in guild '{guild_id}'");

            match self.directory.find(guild_id, &token).await {
                Some(member) => Ok(Argument::Member(member)),
                None => {
                    cursor.seek(snapshot);
                    Err(ParseError {
                        heading: "Unknown member".to_string(),
                        message: format!("No member matching '{token}' was found"),
                        abort_on_last_arg: true,
                    }
                    .into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::testing::{RecordingChannel, test_message};

    fn cursor(tokens: &[&str]) -> ArgumentCursor {
        ArgumentCursor::new(tokens.iter().map(|t| t.to_string()).collect())
    }

    fn bob() -> Member {
        Member {
            id: "2".to_string(),
            username: "bob".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_member() {
        let mut directory = MockMemberDirectory::new();
        directory
            .expect_find()
            .withf(|guild_id, query| guild_id == "guild-1" && query == "bob")
            .returning(|_, _| Box::pin(async { Some(bob()) }));

        let message = test_message("alice", RecordingChannel::new());
        let parameter = Parameter::optional("member", "member");
        let mut cursor = cursor(&["bob"]);

        let value = MemberParser::new(directory)
            .parse(&message, &parameter, &mut cursor)
            .await
            .unwrap();
        assert_eq!(value.member().unwrap().username, "bob");
        assert_eq!(cursor.remaining(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_token_aborts_on_last_arg() {
        let mut directory = MockMemberDirectory::new();
        directory
            .expect_find()
            .returning(|_, _| Box::pin(async { None }));

        let message = test_message("alice", RecordingChannel::new());
        let parameter = Parameter::optional("member", "member");
        let mut cursor = cursor(&["nosuchuser"]);

        let error = MemberParser::new(directory)
            .parse(&message, &parameter, &mut cursor)
            .await
            .unwrap_err();
        match error {
            ArgumentError::Parse(error) => {
                assert_eq!(error.heading, "Unknown member");
                assert!(error.abort_on_last_arg);
            }
            ArgumentError::Internal(_) => panic!("expected a parse error"),
        }
        // The unmatched token is given back
        assert_eq!(cursor.position(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_fails_plainly() {
        let directory = MockMemberDirectory::new();

        let message = test_message("alice", RecordingChannel::new());
        let parameter = Parameter::optional("member", "member");
        let mut cursor = cursor(&[]);

        let error = MemberParser::new(directory)
            .parse(&message, &parameter, &mut cursor)
            .await
            .unwrap_err();
        match error {
            ArgumentError::Parse(error) => {
                assert_eq!(error.heading, "Missing argument");
                assert!(!error.abort_on_last_arg);
            }
            ArgumentError::Internal(_) => panic!("expected a parse error"),
        }
    }
}
