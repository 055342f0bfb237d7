//! The parsing facade composing profile, tokenizer, binder and syntax.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::syntax::SyntaxProvider;
use crate::{ArgumentPack, Binder, CommandError, CommandProfile, CommandRecord, SchemaError};

/// Parser for one command record type.
///
/// The profile is compiled once at construction; each parse call then runs
/// name check → tokenization → binding and either hands back a freshly bound
/// record instance or reports a categorized failure. A parser is immutable
/// and can serve any number of concurrent calls.
pub struct CommandParser<T: CommandRecord> {
    profile: CommandProfile,
    _record: PhantomData<fn() -> T>,
}

impl<T: CommandRecord> CommandParser<T> {
    /// Compile a parser for `T` under the given syntax provider.
    ///
    /// # Errors
    /// * `SchemaError` - the record's declared metadata violates a profile
    ///   invariant; no parsing can proceed
    pub fn new(provider: Arc<dyn SyntaxProvider>) -> Result<Self, SchemaError> {
        Ok(CommandParser {
            profile: CommandProfile::compile::<T>(provider)?,
            _record: PhantomData,
        })
    }

    /// The compiled profile.
    pub fn profile(&self) -> &CommandProfile {
        &self.profile
    }

    /// Whether raw message text starts with this command's name. Intended
    /// for dispatch-layer previewing before committing to a full parse.
    pub fn match_name(&self, text: &str) -> bool {
        self.profile.match_text(text)
    }

    /// Parse one line of command text.
    ///
    /// # Errors
    /// * `CommandError::NameMismatch` - the line does not start with this
    ///   command's name
    /// * `CommandError::UnterminatedQuote` - tokenization failed
    /// * `CommandError::BindingExhausted` - more bare free arguments than
    ///   declared positions, with no list receptor
    pub fn parse(&self, line: &str) -> Result<T, CommandError> {
        if !self.profile.match_text(line) {
            return Err(CommandError::NameMismatch {
                expected: self.profile.name().to_string(),
                got: line.chars().take(self.profile.name().chars().count()).collect(),
            });
        }
        let args = ArgumentPack::tokenize(line)?;
        self.bind(&args)
    }

    /// Parse an already tokenized argument pack. The pack's command name
    /// must equal this command's name exactly.
    pub fn parse_pack(&self, args: &ArgumentPack) -> Result<T, CommandError> {
        if !self.profile.match_pack(args) {
            return Err(CommandError::NameMismatch {
                expected: self.profile.name().to_string(),
                got: args.name().unwrap_or_default().to_string(),
            });
        }
        self.bind(args)
    }

    /// Parse one line, reporting every failure as `None`.
    pub fn try_parse(&self, line: &str) -> Option<T> {
        self.parse(line).ok()
    }

    /// Parse a tokenized pack, reporting every failure as `None`.
    pub fn try_parse_pack(&self, args: &ArgumentPack) -> Option<T> {
        self.parse_pack(args).ok()
    }

    fn bind(&self, args: &ArgumentPack) -> Result<T, CommandError> {
        let mut record = T::default();
        let mut binder = Binder::new(&self.profile, &mut record);
        // The walk's self-reported result is not observed; only a failure the
        // binder itself recorded fails the parse.
        let _ = self.profile.provider().parse_walk(&mut binder, args);
        if binder.is_exhausted() {
            return Err(CommandError::BindingExhausted(
                self.profile.name().to_string(),
            ));
        }
        Ok(record)
    }
}
