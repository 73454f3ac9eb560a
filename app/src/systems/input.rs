use log::{info, warn};
use triki_engine::ecs::{Coordinator, Entities, Entity, System};

use crate::components::{BoardPosition, GameStatus, GridCell, Mark, PlayerTurn};

/// One frame of player input.
#[derive(Debug, Clone, Copy)]
pub struct Turn {
    /// The entity carrying [`PlayerTurn`] and [`GameStatus`].
    pub game: Entity,
    /// The cell clicked this frame, if any.
    pub click: Option<BoardPosition>,
}

/// Places the current player's mark on the clicked cell and passes the turn.
///
/// Requires [`BoardPosition`] and [`GridCell`].
#[derive(Default)]
pub struct InputSystem;

impl System for InputSystem {
    type Input<'a> = Turn;

    fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, turn: Turn) {
        let Some(click) = turn.click else {
            return;
        };
        if coordinator
            .component::<GameStatus>(turn.game)
            .is_ok_and(GameStatus::is_over)
        {
            warn!("The game is over, press 'r' to play again");
            return;
        }
        let Ok(player) = coordinator.component::<PlayerTurn>(turn.game).map(|t| t.mark) else {
            return;
        };

        let clicked = entities.iter().copied().find(|&entity| {
            coordinator
                .component::<BoardPosition>(entity)
                .is_ok_and(|position| *position == click)
        });
        let Some(cell) = clicked else {
            warn!("No cell at ({}, {})", click.row, click.col);
            return;
        };

        match coordinator.component_mut::<GridCell>(cell) {
            Ok(grid) if grid.mark == Mark::Empty => grid.mark = player,
            Ok(_) => {
                warn!("Cell ({}, {}) is already taken", click.row, click.col);
                return;
            }
            Err(error) => {
                warn!("Unable to mark cell: {error}");
                return;
            }
        }
        info!("{} plays ({}, {})", player.symbol(), click.row, click.col);

        if let Ok(next) = coordinator.component_mut::<PlayerTurn>(turn.game) {
            next.mark = player.opponent();
        }
    }
}
