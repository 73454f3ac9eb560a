use crate::components::BoardPosition;

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(BoardPosition),
    Restart,
    Quit,
    /// An empty line; just redraw.
    Idle,
}

impl Command {
    /// Parse `row col` (space or comma separated), `r` or `q`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "" => return Some(Command::Idle),
            "q" | "quit" | "exit" => return Some(Command::Quit),
            "r" | "restart" => return Some(Command::Restart),
            _ => {}
        }
        let mut parts = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Command::Play(BoardPosition::new(row, col)))
    }
}
