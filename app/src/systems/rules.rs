use log::info;
use triki_engine::ecs::{Coordinator, Entities, Entity, System};

use super::read_board;
use crate::components::{BoardPosition, GameStatus, Mark, Outcome};

/// Every row, column and diagonal of the board.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Find a completed line, returning its owner and cells.
pub fn winner(board: &[[Mark; 3]; 3]) -> Option<(Mark, Vec<BoardPosition>)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.map(|(row, col)| board[row][col]);
        (a != Mark::Empty && a == b && b == c).then(|| {
            let cells = line
                .iter()
                .map(|&(row, col)| BoardPosition::new(row, col))
                .collect();
            (a, cells)
        })
    })
}

/// Decides whether the game was won or drawn after the latest move.
///
/// Requires [`GridCell`] and [`BoardPosition`]; the input is the game entity.
///
/// [`GridCell`]: crate::components::GridCell
#[derive(Default)]
pub struct RulesSystem;

impl System for RulesSystem {
    type Input<'a> = Entity;

    fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, game: Entity) {
        if coordinator
            .component::<GameStatus>(game)
            .is_ok_and(GameStatus::is_over)
        {
            return;
        }

        let board = read_board(entities, coordinator);

        let status = if let Some((mark, winning)) = winner(&board) {
            info!("{} wins!", mark.symbol());
            GameStatus {
                outcome: Outcome::Won(mark),
                winning,
            }
        } else if board.iter().flatten().all(|&mark| mark != Mark::Empty) {
            info!("Draw");
            GameStatus {
                outcome: Outcome::Draw,
                winning: Vec::new(),
            }
        } else {
            return;
        };

        if let Ok(current) = coordinator.component_mut::<GameStatus>(game) {
            *current = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    #[test]
    fn no_winner_on_open_board() {
        // Given
        let board = [[X, O, E], [E, X, E], [O, E, E]];

        // Then
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn diagonal_winner() {
        // Given
        let board = [[O, X, X], [E, X, O], [X, O, E]];

        // When
        let result = winner(&board);

        // Then
        assert_eq!(
            result,
            Some((
                X,
                vec![
                    BoardPosition::new(0, 2),
                    BoardPosition::new(1, 1),
                    BoardPosition::new(2, 0)
                ]
            ))
        );
    }

    #[test]
    fn column_winner() {
        // Given
        let board = [[X, O, E], [X, O, E], [E, O, X]];

        // Then
        assert_eq!(winner(&board).map(|(mark, _)| mark), Some(O));
    }

    #[test]
    fn empty_line_is_not_a_win() {
        // Given
        let board = [[E, E, E], [X, O, X], [O, X, O]];

        // Then
        assert_eq!(winner(&board), None);
    }
}
