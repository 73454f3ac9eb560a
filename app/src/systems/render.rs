use std::fmt::Write;

use triki_engine::ecs::{Coordinator, Entities, Entity, System};

use super::read_board;
use crate::components::{BoardPosition, GameStatus, Outcome, PlayerTurn};

/// The draw target for one frame.
pub struct Frame<'a> {
    /// The entity carrying [`PlayerTurn`] and [`GameStatus`].
    pub game: Entity,
    /// Text the board is drawn into.
    pub canvas: &'a mut String,
}

/// Draws the board and a status line.
///
/// Requires [`GridCell`] and [`BoardPosition`].
///
/// [`GridCell`]: crate::components::GridCell
#[derive(Default)]
pub struct RenderSystem;

impl System for RenderSystem {
    type Input<'a> = Frame<'a>;

    fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, frame: Frame<'_>) {
        let board = read_board(entities, coordinator);

        let winning = coordinator
            .component::<GameStatus>(frame.game)
            .map(|status| status.winning.clone())
            .unwrap_or_default();

        let canvas = frame.canvas;
        canvas.clear();
        // Writing into a String cannot fail.
        let _ = writeln!(canvas, "    0   1   2");
        for (row, marks) in board.iter().enumerate() {
            let _ = write!(canvas, "{row} ");
            for (col, mark) in marks.iter().enumerate() {
                let highlighted = winning.contains(&BoardPosition::new(row, col));
                let (open, close) = if highlighted { ('[', ']') } else { (' ', ' ') };
                let _ = write!(canvas, "{open}{}{close}", mark.symbol());
                if col < 2 {
                    canvas.push('|');
                }
            }
            canvas.push('\n');
            if row < 2 {
                let _ = writeln!(canvas, "  ---+---+---");
            }
        }
        canvas.push('\n');

        let status = coordinator
            .component::<GameStatus>(frame.game)
            .map(|status| status.outcome)
            .unwrap_or_default();
        let line = match status {
            Outcome::Won(mark) => format!("{} wins! Press 'r' to play again.", mark.symbol()),
            Outcome::Draw => "Draw! Press 'r' to play again.".to_string(),
            Outcome::InProgress => match coordinator.component::<PlayerTurn>(frame.game) {
                Ok(turn) => format!("{} to move. Enter 'row col'.", turn.mark.symbol()),
                Err(_) => String::new(),
            },
        };
        let _ = writeln!(canvas, "{line}");
    }
}
