/// A front-end control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a streaming listening attempt.
    Start,
    /// Stop the current listening attempt.
    Stop,
    /// Launch the one-shot recognition prompt.
    Once,
    /// Print the session snapshot.
    Status,
    /// Print the command list.
    Help,
    /// Leave the front end.
    Quit,
}

impl Command {
    /// Parse one input line. `None` for blank or unrecognized input.
    pub fn parse(line: &str) -> Option<Command> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "stop" => Some(Command::Stop),
            "once" | "oneshot" => Some(Command::Once),
            "status" => Some(Command::Status),
            "help" | "?" => Some(Command::Help),
            "quit" | "exit" | "q" => Some(Command::Quit),
            _ => None,
        }
    }

    pub fn help_text() -> &'static str {
        "commands:\n  start   begin a streaming listening attempt\n  stop    stop listening\n  once    run one-shot recognition\n  status  print the session snapshot\n  help    print this list\n  quit    exit"
    }
}
