//! Command and parameter descriptors.
//!
//! A [`Command`] is a fixed-shape record tying an identity (name, aliases,
//! category) to an ordered parameter list, an opaque permission requirement and
//! an asynchronous handler. Commands are built once at startup and registered
//! into a [`CommandRegistry`](crate::commands::CommandRegistry).

use futures::future::BoxFuture;

use crate::commands::{Argument, CommandError, MESSAGE_TYPE};

/// Future returned by a command handler.
pub type HandlerFuture = BoxFuture<'static, Result<(), CommandError>>;

/// Asynchronous command handler.
///
/// The handler receives the resolved arguments positionally, in declaration
/// order, and reports user-facing failures through
/// [`CommandError::Report`](crate::commands::CommandError).
pub type Handler = Box<dyn Fn(Vec<Argument>) -> HandlerFuture + Send + Sync>;

/// One declared parameter of a command.
#[derive(Clone, Debug)]
pub struct Parameter {
    /// Name used in error messages and usage strings
    pub name: String,
    /// Type specifier: one or more type tags joined by `|`, tried left to
    /// right. The reserved tag `message` yields the triggering message.
    pub type_spec: String,
    /// Optional parameters fall back to their default when resolution fails
    pub optional: bool,
    /// Value appended when an optional parameter fails to resolve. `None`
    /// means the handler receives [`Argument::None`].
    pub default: Option<Argument>,
}

impl Parameter {
    /// Creates a required parameter.
    pub fn required(name: &str, type_spec: &str) -> Self {
        Parameter {
            name: name.to_string(),
            type_spec: type_spec.to_string(),
            optional: false,
            default: None,
        }
    }

    /// Creates an optional parameter without a declared default.
    pub fn optional(name: &str, type_spec: &str) -> Self {
        Parameter {
            name: name.to_string(),
            type_spec: type_spec.to_string(),
            optional: true,
            default: None,
        }
    }

    /// Sets the default value used when resolution of this optional parameter
    /// fails.
    pub fn with_default(mut self, default: Argument) -> Self {
        self.default = Some(default);
        self
    }

    /// The parameter that receives the triggering message itself.
    pub fn message() -> Self {
        Parameter::required(MESSAGE_TYPE, MESSAGE_TYPE)
    }
}

/// A registered bot command.
///
/// # Identity
///
/// The name and every alias resolve case-insensitively to this command.
/// Commands whose `category` is `hidden` are excluded from help listings.
pub struct Command {
    /// Unique, case-insensitive name
    pub name: String,
    /// Alternate case-insensitive identities
    pub aliases: Vec<String>,
    /// Grouping label used by the help index; `hidden` excludes the command
    pub category: String,
    /// Short description shown in help output
    pub description: String,
    /// Ordered parameter list
    pub parameters: Vec<Parameter>,
    /// Opaque permission requirement, interpreted only by the permission
    /// checker collaborator
    pub required_permissions: Vec<String>,
    /// Handler invoked with the resolved argument list
    pub handler: Handler,
}

impl Command {
    /// Renders the usage string of this command, e.g. `!avatar [member]`.
    ///
    /// Required parameters appear as `<name>`, optional ones as `[name]`.
    /// Reserved `message` parameters take no input and are skipped.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The command prefix the front end listens for.
    pub fn usage(&self, prefix: &str) -> String {
        let mut usage = format!("{prefix}{}", self.name);
        for parameter in &self.parameters {
            if parameter.type_spec == MESSAGE_TYPE {
                continue;
            }
            if parameter.optional {
                usage.push_str(&format!(" [{}]", parameter.name));
            } else {
                usage.push_str(&format!(" <{}>", parameter.name));
            }
        }
        usage
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("category", &self.category)
            .field("parameters", &self.parameters)
            .field("required_permissions", &self.required_permissions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_command(parameters: Vec<Parameter>) -> Command {
        Command {
            name: "probe".to_string(),
            aliases: vec![],
            category: "misc".to_string(),
            description: "A test command".to_string(),
            parameters,
            required_permissions: vec![],
            handler: Box::new(|_| Box::pin(async { Ok(()) })),
        }
    }

    #[test]
    fn test_usage_with_no_parameters() {
        let command = noop_command(vec![]);
        assert_eq!(command.usage("!"), "!probe");
    }

    #[test]
    fn test_usage_skips_message_parameter() {
        let command = noop_command(vec![Parameter::message()]);
        assert_eq!(command.usage("!"), "!probe");
    }

    #[test]
    fn test_usage_marks_required_and_optional() {
        let command = noop_command(vec![
            Parameter::message(),
            Parameter::required("target", "member"),
            Parameter::optional("reason", "rest"),
        ]);
        assert_eq!(command.usage("-"), "-probe <target> [reason]");
    }

    #[test]
    fn test_parameter_with_default() {
        let parameter =
            Parameter::optional("count", "int").with_default(crate::commands::Argument::Int(1));
        assert!(parameter.optional);
        assert!(matches!(
            parameter.default,
            Some(crate::commands::Argument::Int(1))
        ));
    }
}
