//! Parsing of the lines typed at the prompt.

use thiserror::Error;

/// A line entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/create`
    Create,
    /// `/join <code>` (the code is normalized later)
    Join(String),
    /// `/leave`
    Leave,
    /// `/close`
    Close,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
    /// Any other non-empty line
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for the list of commands.")]
    UnknownCommand(String),

    #[error("Usage: /join <room code>")]
    MissingRoomCode,
}

impl Command {
    /// Parse one trimmed, non-empty input line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Self::Message(line.to_string()));
        };

        let (name, argument) = match rest.split_once(char::is_whitespace) {
            Some((name, argument)) => (name, argument.trim()),
            None => (rest, ""),
        };

        match name {
            "create" => Ok(Self::Create),
            "join" if argument.is_empty() => Err(CommandError::MissingRoomCode),
            "join" => Ok(Self::Join(argument.to_string())),
            "leave" => Ok(Self::Leave),
            "close" => Ok(Self::Close),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::UnknownCommand(format!("/{name}"))),
        }
    }
}
