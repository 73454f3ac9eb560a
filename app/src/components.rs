use triki_macros::Component;

/// A player's mark, or the absence of one on a cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => '-',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// The player moving after this one.
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

/// Where a cell sits on the 3x3 board.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BoardPosition {
    pub row: usize,
    pub col: usize,
}

impl BoardPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The contents of one board cell.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub mark: Mark,
}

/// Whose move it is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTurn {
    pub mark: Mark,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    InProgress,
    Won(Mark),
    Draw,
}

/// The state of the current game, carried by the game entity.
#[derive(Component, Debug, Default, Clone, PartialEq, Eq)]
pub struct GameStatus {
    pub outcome: Outcome,
    pub winning: Vec<BoardPosition>,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }
}
