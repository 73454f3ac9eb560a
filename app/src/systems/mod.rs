mod input;
mod render;
mod rules;

pub use input::{InputSystem, Turn};
pub use render::{Frame, RenderSystem};
pub use rules::RulesSystem;

use triki_engine::ecs::{Coordinator, Entities};

use crate::components::{BoardPosition, GridCell, Mark};

/// Collect the marks of every cell in `entities` into a 3x3 grid.
fn read_board(entities: &Entities, coordinator: &Coordinator) -> [[Mark; 3]; 3] {
    let mut board = [[Mark::Empty; 3]; 3];
    for &entity in entities {
        let (Ok(position), Ok(cell)) = (
            coordinator.component::<BoardPosition>(entity),
            coordinator.component::<GridCell>(entity),
        ) else {
            continue;
        };
        if let Some(slot) = board
            .get_mut(position.row)
            .and_then(|row| row.get_mut(position.col))
        {
            *slot = cell.mark;
        }
    }
    board
}
