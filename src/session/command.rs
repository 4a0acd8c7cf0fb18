/// Text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  name <activity>   set the activity name (n)
  start             start or resume the timer (s, resume)
  pause             pause the running timer (p)
  stop              log the activity and reset the timer (x)
  reset             drop the activity without logging it (r)
  status            show the timer
  list              show completed activities, newest first (ls)
  help              show this message (h, ?)
  quit              leave the session (q, exit)";

/// A single line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetName(String),
    Start,
    Pause,
    Stop,
    Reset,
    Status,
    List,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parses a line of input. Blank lines are not commands and give `None`.
    pub fn parse(line: &str) -> Option<Command> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        let command = match word.to_lowercase().as_str() {
            "name" | "n" => Command::SetName(rest.trim().to_string()),
            "start" | "resume" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "stop" | "x" => Command::Stop,
            "reset" | "r" => Command::Reset,
            "status" => Command::Status,
            "list" | "ls" => Command::List,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(word.to_string()),
        };
        Some(command)
    }
}
