//! Declarative command profiles and argument binding for chat bots.
//!
//! A record type declares its arguments as field metadata — canonical name,
//! single-letter abbreviation, switch flag, free-argument position, default
//! value, documentation text. [`CommandProfile`] compiles that metadata once
//! into an immutable, queryable profile; [`CommandParser`] then binds lines
//! of command text onto freshly constructed record instances:
//!
//! ```
//! use quip_command::{Command, CommandParser, SimpleSyntax};
//! use std::sync::Arc;
//!
//! /// Laundry occupancy manager.
//! #[derive(Debug, Default, Command)]
//! #[command(name = "Laundry")]
//! struct LaundryCommand {
//!     /// `occupy`, or `help` to print this message.
//!     #[free_arg(default = "")]
//!     verb: String,
//!     /// `left-dry`, `right-dry`, `left-wash` or `right-wash`.
//!     #[free_arg(default = "")]
//!     machine: String,
//!     #[free_arg(default = 40)]
//!     minutes: i64,
//! }
//!
//! let parser = CommandParser::<LaundryCommand>::new(Arc::new(SimpleSyntax)).unwrap();
//! let cmd = parser.parse("/laundry occupy left-dry 30").unwrap();
//! assert_eq!(cmd.machine, "left-dry");
//! assert_eq!(cmd.minutes, 30);
//! ```

mod binder;
mod error;
mod field;
mod pack;
mod parser;
mod profile;
mod record;
pub mod syntax;

pub use quip_command_derive::Command;

pub use binder::*;
pub use error::*;
pub use field::*;
pub use pack::*;
pub use parser::*;
pub use profile::*;
pub use record::*;
pub use syntax::{SimpleSyntax, SyntaxProvider};
