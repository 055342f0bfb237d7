use proc_macro::TokenStream;

mod command;
mod common;

/// A derive macro that turns an annotated struct into a command record.
///
/// The macro generates the `CommandRecord` and `BindTarget` impls that
/// `CommandProfile::compile` consumes. Fields become arguments through two
/// attributes; unattributed fields are left alone. Doc comments on the
/// struct and its fields become the profile's documentation text.
///
/// # Attributes
///
/// - `#[command(name = "Name")]`: override the command name derived from
///   the struct identifier
/// - `#[arg]`: a named argument; options `name = "..."`, `abbrev = 'x'`,
///   `switch`, `default = ...`
/// - `#[free_arg]`: a positional argument; option `default = ...`
///
/// Field types must be `String`, `i64`, `f64`, `bool`, `Option<T>` or
/// `Vec<T>` over those scalars; a `Vec` field in the last free-argument
/// position collects all remaining bare tokens. The struct must also
/// implement `Default`.
///
/// # Example
///
/// ```rust
/// use quip_command::Command;
///
/// /// Laundry occupancy manager.
/// #[derive(Debug, Default, Command)]
/// #[command(name = "Laundry")]
/// struct LaundryCommand {
///     /// `occupy`, or `help` to print this message.
///     #[free_arg(default = "")]
///     verb: String,
///     #[free_arg(default = "")]
///     machine: String,
///     #[free_arg(default = 40)]
///     minutes: i64,
/// }
/// ```
#[proc_macro_derive(Command, attributes(command, arg, free_arg))]
pub fn command_derive(input: TokenStream) -> TokenStream {
    command::command_derive(input)
}
