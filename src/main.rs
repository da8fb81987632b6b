//! Console front end for the herald dispatcher.
//!
//! Reads command lines from stdin, tokenizes them and feeds them to the
//! dispatcher, standing in for a chat platform gateway. Responses are printed
//! to stdout. The guild, its member roster and the bot prefix come from the
//! configuration file.
//!
//! # Usage
//!
//! ```bash
//! herald --config config.yaml
//! ```
//!
//! Then type commands at the prompt:
//!
//! ```text
//! !help
//! !avatar alice
//! !ping
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)
//! - `HERALD_*` - Overrides configuration values, e.g. `HERALD_BOT__PREFIX`

use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use futures::future::BoxFuture;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use herald::commands::actions::{avatar_command, help_command, ping_command};
use herald::commands::arguments::{MemberDirectory, MemberParser};
use herald::commands::dispatcher::{FallbackStore, PermissionChecker};
use herald::commands::{Command, CommandRegistry, Dispatcher, ParserRegistry};
use herald::config::Config;
use herald::message::{Member, Message, Notice, Notifier, Outgoing};

/// Command-line arguments for the herald console.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,
}

/// Prints outgoing payloads to stdout.
struct ConsoleChannel;

impl Notifier for ConsoleChannel {
    fn send(&self, payload: Outgoing) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            match payload {
                Outgoing::Notice(notice) => print_notice(notice),
                Outgoing::Raw(value) => {
                    println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
                }
            }
        })
    }
}

fn print_notice(notice: Notice) {
    if let Some(title) = notice.title {
        println!("# {title}");
    }
    if let Some(description) = notice.description {
        println!("{description}");
    }
    if let Some(image_url) = notice.image_url {
        println!("[image] {image_url}");
    }
    if let Some(footer) = notice.footer {
        println!("-- {}", footer.text);
    }
    println!();
}

/// Everyone may run everything on the console.
struct AllowAll;

impl PermissionChecker for AllowAll {
    async fn has_permission(&self, _message: &Message, _command: &Command) -> bool {
        true
    }
}

/// The console keeps no canned answers.
struct NoCannedAnswers;

impl FallbackStore for NoCannedAnswers {
    async fn find(&self, _guild_id: &str, _label: &str) -> Option<serde_json::Value> {
        None
    }
}

/// Member lookup over the roster from the configuration file.
struct RosterDirectory {
    members: Vec<Member>,
}

impl MemberDirectory for RosterDirectory {
    fn find(&self, _guild_id: &str, query: &str) -> BoxFuture<'static, Option<Member>> {
        let found = self
            .members
            .iter()
            .find(|member| member.username.eq_ignore_ascii_case(query) || member.id == query)
            .cloned();
        Box::pin(async move { found })
    }
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting herald {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config file: {e}");
            return;
        }
    };

    let prefix = config.bot.prefix.clone();
    let color = config.bot.color;

    // Build the registries once; they are read-only from here on
    let commands = CommandRegistry::new();
    let parsers = ParserRegistry::new();
    parsers.register_builtins();
    parsers.register(
        "member",
        MemberParser::new(RosterDirectory {
            members: config.guild.members.clone(),
        }),
    );

    commands.register(ping_command());
    commands.register(avatar_command(color));
    commands.register(help_command(commands.clone(), prefix.clone(), color));

    let dispatcher = Dispatcher::new(commands, parsers, AllowAll, NoCannedAnswers, color);

    let operator = Member {
        id: "0".to_string(),
        username: "operator".to_string(),
        avatar_url: None,
    };
    let channel: Arc<dyn Notifier> = Arc::new(ConsoleChannel);

    info!("Listening on stdin with prefix '{prefix}'");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                // Only prefixed lines are commands, everything else is chatter
                let Some(rest) = line.trim().strip_prefix(&prefix) else {
                    continue;
                };
                let tokens: Vec<String> = rest.split_whitespace().map(str::to_owned).collect();

                let message = Message::new(
                    operator.clone(),
                    Some(config.guild.id.clone()),
                    "console",
                    channel.clone(),
                );
                if let Err(e) = dispatcher.dispatch(&message, &tokens).await {
                    error!("dispatch failed: {e:#}");
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("failed to read stdin: {e}");
                break;
            }
        }
    }

    info!("stdin closed, shutting down");
}
