//! Pluggable naming and walking policies.
//!
//! A [`SyntaxProvider`] decides how declared identifiers become canonical
//! argument and command names, how names compare, and how a token sequence
//! drives a [`Binder`]. The engine ships [`SimpleSyntax`]; alternative
//! providers plug in behind the same trait.

mod simple;
mod words;

pub use simple::*;
pub use words::*;

use crate::{ArgumentPack, Binder};

/// Policy trait for command syntaxes.
pub trait SyntaxProvider: Send + Sync {
    /// Make the canonical name of an argument from its word-split identifier.
    fn name_argument(&self, words: &[String]) -> String;

    /// Make the canonical name of a command from its word-split identifier.
    fn name_command(&self, words: &[String]) -> String;

    /// Whether two strings are equal under this syntax. For instance, upper
    /// case and lower case are equal in a case-insensitive syntax.
    fn syntactic_equal(&self, a: &str, b: &str) -> bool;

    /// Walk the tokens after the command name, driving the binder.
    ///
    /// The returned flag is the walk's own report of success. Note that the
    /// parse entry points do not observe it: only failures the binder itself
    /// records fail the surrounding parse.
    fn parse_walk(&self, binder: &mut Binder<'_>, args: &ArgumentPack) -> bool;
}
