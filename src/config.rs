//! Configuration file structures for the herald front end.
//!
//! Configuration is loaded from a YAML file, with every value overridable
//! through `HERALD_`-prefixed environment variables (sections separated by
//! `__`).
//!
//! # Configuration File Format
//!
//! ```yaml
//! bot:
//!   # Command prefix the front end listens for
//!   prefix: "!"
//!   # Accent color of notices, 0xRRGGBB
//!   color: 0x7289DA
//!
//! guild:
//!   # Identity of the guild the console session plays in
//!   id: "console"
//!   # Members resolvable by the member argument parser
//!   members:
//!     - id: "1"
//!       username: "alice"
//!       avatar_url: "https://cdn.example.com/alice.png"
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export HERALD_BOT__PREFIX="-"
//! export HERALD_BOT__COLOR="255"
//! ```

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

use crate::message::Member;

fn default_prefix() -> String {
    "!".to_string()
}

fn default_color() -> u32 {
    0x7289DA
}

fn default_guild_id() -> String {
    "console".to_string()
}

/// Root configuration structure.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Bot appearance and prefix settings
    #[serde(default)]
    pub bot: Bot,
    /// The guild the console front end simulates
    #[serde(default)]
    pub guild: Guild,
}

/// Bot settings.
#[derive(Clone, Debug, Deserialize)]
pub struct Bot {
    /// Command prefix the front end listens for.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Accent color used in notices, `0xRRGGBB`.
    #[serde(default = "default_color")]
    pub color: u32,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            prefix: default_prefix(),
            color: default_color(),
        }
    }
}

/// Guild simulated by the console front end.
///
/// The member roster backs the `member` argument parser, so commands taking a
/// member can be exercised without a chat platform.
#[derive(Clone, Debug, Deserialize)]
pub struct Guild {
    /// Guild identity passed to the dispatcher and its collaborators.
    #[serde(default = "default_guild_id")]
    pub id: String,

    /// Members resolvable by name or id.
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Default for Guild {
    fn default() -> Self {
        Guild {
            id: default_guild_id(),
            members: vec![],
        }
    }
}

impl Config {
    /// Loads the configuration from a YAML file, applying `HERALD_`
    /// environment variable overrides on top.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] when the file is missing or unreadable,
    /// or a value does not deserialize.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file_exact(path))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
    }
}
