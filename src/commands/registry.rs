//! Case-insensitive command and alias lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;

use crate::commands::command::Command;

#[derive(Default)]
struct Inner {
    commands: HashMap<String, Arc<Command>>,
    aliases: HashMap<String, Arc<Command>>,
}

/// Registry mapping command names and aliases to command descriptors.
///
/// The registry is a cheap-to-clone handle; every clone shares the same
/// underlying maps. It is populated during startup and read-only from the
/// dispatcher's perspective afterwards. Lookup is case-insensitive: keys are
/// lowercased on insertion and on lookup.
///
/// # Collisions
///
/// Registration is last-write-wins per key. Re-registering a name replaces the
/// name entry; alias entries left behind by a replaced command keep resolving
/// to the old descriptor until they are themselves overwritten. No collision
/// ever corrupts lookup.
///
/// # Examples
///
/// ```no_run
/// # use herald::commands::{Command, CommandRegistry};
/// # fn ping() -> Command { unimplemented!() }
/// let registry = CommandRegistry::new();
/// registry.register(ping());
/// assert!(registry.find("PING").is_some());
/// ```
#[derive(Clone, Default)]
pub struct CommandRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command under its name and each of its aliases.
    pub fn register(&self, command: Command) {
        debug!("registering command '{}'", command.name);

        let command = Arc::new(command);
        let mut inner = self.inner.write().unwrap();
        for alias in &command.aliases {
            inner.aliases.insert(alias.to_lowercase(), command.clone());
        }
        inner
            .commands
            .insert(command.name.to_lowercase(), command.clone());
    }

    /// Looks up a command by name, then by alias, case-insensitively.
    pub fn find(&self, label: &str) -> Option<Arc<Command>> {
        let label = label.to_lowercase();
        let inner = self.inner.read().unwrap();
        inner
            .commands
            .get(&label)
            .or_else(|| inner.aliases.get(&label))
            .cloned()
    }

    /// Canonical command entries (aliases excluded), in no particular order.
    ///
    /// Used by the help index; callers sort as needed.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.inner.read().unwrap().commands.values().cloned().collect()
    }
}
