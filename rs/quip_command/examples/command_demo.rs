use quip_command::{Command, CommandError, CommandParser, SimpleSyntax};
use std::sync::Arc;

/// Laundry occupancy manager.
#[derive(Debug, Default, Command)]
#[command(name = "Laundry")]
pub struct LaundryCommand {
    /// `occupy`, `release`, `status`, or `help` to print this message.
    #[free_arg(default = "")]
    pub verb: String,
    /// `left-dry`, `right-dry`, `left-wash` or `right-wash`.
    #[free_arg(default = "")]
    pub machine: String,
    /// Minutes the machine will be busy.
    #[free_arg(default = 40)]
    pub minutes: i64,
}

// cargo run --example command_demo
fn main() -> Result<(), CommandError> {
    // init structured logger
    structured_logger::Builder::new().init();

    let parser = CommandParser::<LaundryCommand>::new(Arc::new(SimpleSyntax))
        .expect("laundry profile should compile");

    println!("{}", parser.profile().docs());

    // The dispatch layer would preview incoming messages like this before
    // committing to a full parse.
    for line in [
        "/laundry occupy left-dry 30",
        "/laundry occupy \"left dry\"",
        "/laundry",
        "/visitors today",
    ] {
        if !parser.match_name(line) {
            log::info!("skipped {:?}: name does not match", line);
            continue;
        }
        let cmd = parser.parse(line)?;
        println!("{:?} => {:?}", line, cmd);
    }

    // The safe entry point reports failures as `None` instead of an error.
    assert!(parser.try_parse("/laundry occupy left-dry 30 extra").is_none());

    Ok(())
}
