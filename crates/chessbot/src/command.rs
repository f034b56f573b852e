//! Parsing of interactive session commands.

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// End the session.
    Quit,
    /// List the legal moves.
    Moves,
    /// Let the engine move for the side to move.
    Engine,
    /// Take back the last move.
    Undo,
    /// Start a new game.
    Reset,
    /// Print the board.
    Board,
    /// Blank line.
    Empty,
    /// Anything else, treated as a move in UCI notation.
    Move(String),
}

impl Command {
    /// Parses a line of input. Case and surrounding whitespace are ignored.
    pub fn parse(input: &str) -> Self {
        let text = input.trim().to_ascii_lowercase();
        match text.as_str() {
            "q" | "quit" | "exit" => Command::Quit,
            "m" | "moves" => Command::Moves,
            "e" | "engine" | "go" | "bot" => Command::Engine,
            "u" | "undo" => Command::Undo,
            "r" | "reset" => Command::Reset,
            "b" | "board" => Command::Board,
            "" => Command::Empty,
            _ => Command::Move(text),
        }
    }
}
