//! The reference command syntax.

use super::{case_insensitive_equal, to_ascii_lower, SyntaxProvider};
use crate::{ArgumentPack, Binder};

/// The reference syntax: `/lower-cased-words` command names, `key=value`
/// named arguments, bare tokens as free arguments.
///
/// `key=true` turns a switch on. `key=false` is an explicit no-op: the field
/// keeps whatever value it already has, it is not assigned `false`. A key
/// with no matching named argument is skipped silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSyntax;

impl SyntaxProvider for SimpleSyntax {
    fn name_argument(&self, words: &[String]) -> String {
        to_ascii_lower(words).join("-")
    }

    fn name_command(&self, words: &[String]) -> String {
        format!("/{}", to_ascii_lower(words).join("-"))
    }

    fn syntactic_equal(&self, a: &str, b: &str) -> bool {
        case_insensitive_equal(a, b)
    }

    fn parse_walk(&self, binder: &mut Binder<'_>, args: &ArgumentPack) -> bool {
        for arg in args.iter().skip(1) {
            match arg.split_once('=') {
                Some((key, value)) => {
                    // Paired input: a named argument.
                    let Some(mut entry) = binder.named_entry(key) else {
                        continue;
                    };
                    if value == "true" {
                        // Switch syntax.
                        if !entry.switch_on() {
                            return false;
                        }
                    } else if value == "false" {
                        continue;
                    } else if !entry.inject(value) {
                        return false;
                    }
                }
                None => {
                    // Non-pair input: a free argument.
                    if !binder.append_free_argument(arg) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
