//! Argument parsers and their registry.
//!
//! Each parser coerces raw tokens into one typed [`Argument`]. Parsers are
//! registered under a type-tag string and looked up by the resolver when a
//! parameter declares that tag.
//!
//! # Parser Contract
//!
//! A parser may consume any number of tokens, including zero or the whole
//! remainder of the cursor. On failure it must leave the cursor where it found
//! it; the built-in parsers snapshot the position and restore it before
//! returning an error. Failures meant for the user are
//! [`ParseError`](crate::commands::ParseError)s; anything else is fatal for the
//! dispatch.
//!
//! # Built-in Parsers
//!
//! | Tag | Value | Tokens consumed |
//! |--------|---------------------|--------------------------|
//! | `str` | [`Argument::Text`] | 1 |
//! | `int` | [`Argument::Int`] | 1 |
//! | `float`| [`Argument::Float`] | 1 |
//! | `rest` | [`Argument::Text`] | all remaining |
//! | `member` | [`Argument::Member`] | 1, resolved asynchronously |
//!
//! The reserved tag `message` is not a parser; the resolver handles it before
//! consulting the registry.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;
use log::debug;

use crate::commands::command::Parameter;
use crate::commands::cursor::ArgumentCursor;
use crate::commands::{Argument, ArgumentError};
use crate::message::Message;

mod member;
mod number;
mod rest;
mod string;

pub use member::{MemberDirectory, MemberParser, MockMemberDirectory};
pub use number::{FloatParser, IntParser};
pub use rest::RestParser;
pub use string::StringParser;

/// Coerces raw tokens into a typed [`Argument`].
///
/// Parsing is asynchronous because some parsers do external work, e.g. the
/// `member` parser resolving a name against a directory.
pub trait ArgumentParser: Send + Sync {
    /// Attempts to produce a value for `parameter` by consuming tokens from
    /// `cursor`.
    ///
    /// # Errors
    ///
    /// [`ArgumentError::Parse`] when the tokens do not match; the cursor must
    /// be left untouched in that case. [`ArgumentError::Internal`] for any
    /// other failure, which aborts the dispatch.
    fn parse<'a>(
        &'a self,
        message: &'a Message,
        parameter: &'a Parameter,
        cursor: &'a mut ArgumentCursor,
    ) -> BoxFuture<'a, Result<Argument, ArgumentError>>;
}

/// Registry mapping type tags to argument parsers.
///
/// Like the command registry, this is a cheap-to-clone handle populated at
/// startup; registration is insert-or-overwrite per tag.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    inner: Arc<RwLock<HashMap<String, Arc<dyn ArgumentParser>>>>,
}

impl ParserRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the parser for a type tag.
    pub fn register(&self, tag: &str, parser: impl ArgumentParser + 'static) {
        debug!("registering argument parser for type '{tag}'");
        self.inner
            .write()
            .unwrap()
            .insert(tag.to_string(), Arc::new(parser));
    }

    /// Returns the parser registered for a type tag, if any.
    pub fn get(&self, tag: &str) -> Option<Arc<dyn ArgumentParser>> {
        self.inner.read().unwrap().get(tag).cloned()
    }

    /// Registers the token-only built-in parsers: `str`, `int`, `float` and
    /// `rest`.
    ///
    /// The `member` parser needs a directory and is registered separately:
    ///
    /// ```no_run
    /// # use herald::commands::arguments::{MemberParser, MockMemberDirectory, ParserRegistry};
    /// # let directory = MockMemberDirectory::new();
    /// let parsers = ParserRegistry::new();
    /// parsers.register_builtins();
    /// parsers.register("member", MemberParser::new(directory));
    /// ```
    pub fn register_builtins(&self) {
        self.register("str", StringParser);
        self.register("int", IntParser);
        self.register("float", FloatParser);
        self.register("rest", RestParser);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted parsers used by resolver and dispatcher tests.

    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::commands::ParseError;

    /// Always fails with the given error, leaving the cursor untouched.
    pub struct FailParser(pub ParseError);

    impl ArgumentParser for FailParser {
        fn parse<'a>(
            &'a self,
            _message: &'a Message,
            _parameter: &'a Parameter,
            _cursor: &'a mut ArgumentCursor,
        ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
            Box::pin(async move { Err(self.0.clone().into()) })
        }
    }

    /// Succeeds with a fixed text value without consuming tokens, and records
    /// that it ran.
    pub struct ProbeParser {
        pub value: String,
        pub invoked: Arc<AtomicBool>,
    }

    impl ArgumentParser for ProbeParser {
        fn parse<'a>(
            &'a self,
            _message: &'a Message,
            _parameter: &'a Parameter,
            _cursor: &'a mut ArgumentCursor,
        ) -> BoxFuture<'a, Result<Argument, ArgumentError>> {
            self.invoked.store(true, Ordering::SeqCst);
            Box::pin(async move { Ok(Argument::Text(self.value.clone())) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FailParser;
    use super::*;
    use crate::commands::ParseError;

    #[test]
    fn test_get_unregistered_tag() {
        let registry = ParserRegistry::new();
        assert!(registry.get("str").is_none());
    }

    #[test]
    fn test_register_and_get() {
        let registry = ParserRegistry::new();
        registry.register("str", StringParser);
        assert!(registry.get("str").is_some());
    }

    #[test]
    fn test_register_overwrites() {
        let registry = ParserRegistry::new();
        registry.register("str", StringParser);
        registry.register("str", FailParser(ParseError::new("x", "y")));
        // No duplicate entries; the tag now resolves to the latest parser
        assert!(registry.get("str").is_some());
    }

    #[test]
    fn test_register_builtins() {
        let registry = ParserRegistry::new();
        registry.register_builtins();
        for tag in ["str", "int", "float", "rest"] {
            assert!(registry.get(tag).is_some(), "missing builtin '{tag}'");
        }
        assert!(registry.get("member").is_none());
    }
}
