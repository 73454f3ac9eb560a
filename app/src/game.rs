use log::info;
use triki_engine::ecs::{Config, Coordinator, Entity, Result};

use crate::{
    components::{BoardPosition, GameStatus, GridCell, Mark, PlayerTurn},
    systems::{Frame, InputSystem, RenderSystem, RulesSystem, Turn},
};

/// A game of tic-tac-toe built on a [`Coordinator`].
///
/// The board is nine cell entities carrying [`BoardPosition`] and [`GridCell`]. A separate game
/// entity carries [`PlayerTurn`] and [`GameStatus`].
pub struct Game {
    coordinator: Coordinator,
    game: Entity,
    cells: Vec<Entity>,
}

impl Game {
    /// Register components and systems, then spawn a fresh board.
    pub fn new() -> Result<Self> {
        let mut coordinator = Coordinator::with_config(
            Config::new()
                .with_max_entities(16)
                .with_max_component_types(8),
        );

        coordinator.register_component::<BoardPosition>()?;
        coordinator.register_component::<GridCell>()?;
        coordinator.register_component::<PlayerTurn>()?;
        coordinator.register_component::<GameStatus>()?;

        coordinator.register_system::<InputSystem>()?;
        let signature = coordinator.signature_of::<(BoardPosition, GridCell)>()?;
        coordinator.set_system_signature::<InputSystem>(signature)?;

        coordinator.register_system::<RulesSystem>()?;
        let signature = coordinator.signature_of::<GridCell>()?;
        coordinator.set_system_signature::<RulesSystem>(signature)?;

        coordinator.register_system::<RenderSystem>()?;
        let signature = coordinator.signature_of::<(GridCell, BoardPosition)>()?;
        coordinator.set_system_signature::<RenderSystem>(signature)?;

        let mut game = Self {
            coordinator,
            game: Entity::new(0),
            cells: Vec::with_capacity(9),
        };
        game.spawn()?;
        Ok(game)
    }

    fn spawn(&mut self) -> Result<()> {
        self.game = self.coordinator.create_entity()?;
        self.coordinator
            .add_component(self.game, PlayerTurn { mark: Mark::X })?;
        self.coordinator
            .add_component(self.game, GameStatus::default())?;
        for row in 0..3 {
            for col in 0..3 {
                let cell = self.coordinator.create_entity()?;
                self.coordinator
                    .add_component(cell, BoardPosition::new(row, col))?;
                self.coordinator.add_component(cell, GridCell::default())?;
                self.cells.push(cell);
            }
        }
        Ok(())
    }

    /// Destroy every entity and start over with X to move.
    pub fn restart(&mut self) -> Result<()> {
        self.coordinator.destroy_entity(self.game)?;
        for cell in self.cells.drain(..) {
            self.coordinator.destroy_entity(cell)?;
        }
        self.spawn()?;
        info!("New game");
        Ok(())
    }

    /// Run one frame: apply the click, check the rules, and draw the board into `canvas`.
    pub fn frame(&mut self, click: Option<BoardPosition>, canvas: &mut String) -> Result<()> {
        let game = self.game;
        self.coordinator
            .update::<InputSystem>(Turn { game, click })?;
        self.coordinator.update::<RulesSystem>(game)?;
        self.coordinator
            .update::<RenderSystem>(Frame { game, canvas })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Outcome;

    impl Game {
        fn status(&self) -> Result<&GameStatus> {
            self.coordinator.component::<GameStatus>(self.game)
        }

        fn turn(&self) -> Result<Mark> {
            self.coordinator
                .component::<PlayerTurn>(self.game)
                .map(|turn| turn.mark)
        }

        fn mark_at(&self, position: BoardPosition) -> Option<Mark> {
            self.cells.iter().find_map(|&cell| {
                let at = self.coordinator.component::<BoardPosition>(cell).ok()?;
                if *at != position {
                    return None;
                }
                self.coordinator
                    .component::<GridCell>(cell)
                    .ok()
                    .map(|grid| grid.mark)
            })
        }

        fn coordinator(&self) -> &Coordinator {
            &self.coordinator
        }
    }

    fn play(game: &mut Game, moves: &[(usize, usize)]) -> String {
        let mut canvas = String::new();
        for &(row, col) in moves {
            game.frame(Some(BoardPosition::new(row, col)), &mut canvas)
                .unwrap();
        }
        canvas
    }

    #[test]
    fn new_game() {
        // Given
        let mut game = Game::new().unwrap();

        // When
        let canvas = play(&mut game, &[]);
        let mut idle = String::new();
        game.frame(None, &mut idle).unwrap();

        // Then
        assert_eq!(game.coordinator().living_entities(), 10);
        assert_eq!(game.turn(), Ok(Mark::X));
        assert_eq!(game.status().unwrap().outcome, Outcome::InProgress);
        assert!(canvas.is_empty());
        assert!(idle.contains("X to move"));
        assert_eq!(
            game.coordinator()
                .system_entities::<InputSystem>()
                .unwrap()
                .len(),
            9
        );
    }

    #[test]
    fn moves_alternate() {
        // Given
        let mut game = Game::new().unwrap();

        // When
        play(&mut game, &[(1, 1), (0, 0)]);

        // Then
        assert_eq!(game.mark_at(BoardPosition::new(1, 1)), Some(Mark::X));
        assert_eq!(game.mark_at(BoardPosition::new(0, 0)), Some(Mark::O));
        assert_eq!(game.turn(), Ok(Mark::X));
    }

    #[test]
    fn occupied_cell_keeps_turn() {
        // Given
        let mut game = Game::new().unwrap();
        play(&mut game, &[(1, 1)]);

        // When
        play(&mut game, &[(1, 1)]);

        // Then
        assert_eq!(game.mark_at(BoardPosition::new(1, 1)), Some(Mark::X));
        assert_eq!(game.turn(), Ok(Mark::O));
    }

    #[test]
    fn off_board_click_ignored() {
        // Given
        let mut game = Game::new().unwrap();

        // When
        play(&mut game, &[(3, 0)]);

        // Then
        assert_eq!(game.turn(), Ok(Mark::X));
    }

    #[test]
    fn row_win() {
        // Given
        let mut game = Game::new().unwrap();

        // When
        let canvas = play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        // Then
        let status = game.status().unwrap();
        assert_eq!(status.outcome, Outcome::Won(Mark::X));
        assert_eq!(
            status.winning,
            vec![
                BoardPosition::new(0, 0),
                BoardPosition::new(0, 1),
                BoardPosition::new(0, 2)
            ]
        );
        assert!(canvas.contains("X wins!"));
        assert!(canvas.contains("[X]"));
    }

    #[test]
    fn no_moves_after_win() {
        // Given
        let mut game = Game::new().unwrap();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        // When
        play(&mut game, &[(2, 2)]);

        // Then
        assert_eq!(game.mark_at(BoardPosition::new(2, 2)), Some(Mark::Empty));
        assert_eq!(game.status().unwrap().outcome, Outcome::Won(Mark::X));
    }

    #[test]
    fn draw() {
        // Given
        let mut game = Game::new().unwrap();

        // When - X O X / X O O / O X X
        let canvas = play(
            &mut game,
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 1),
                (1, 0),
                (1, 2),
                (2, 1),
                (2, 0),
                (2, 2),
            ],
        );

        // Then
        assert_eq!(game.status().unwrap().outcome, Outcome::Draw);
        assert!(canvas.contains("Draw!"));
    }

    #[test]
    fn restart_resets_board() {
        // Given
        let mut game = Game::new().unwrap();
        play(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        // When
        game.restart().unwrap();

        // Then - Ids were recycled and the board is clear
        assert_eq!(game.coordinator().living_entities(), 10);
        assert_eq!(game.status().unwrap(), &GameStatus::default());
        assert_eq!(game.turn(), Ok(Mark::X));
        assert_eq!(game.mark_at(BoardPosition::new(0, 0)), Some(Mark::Empty));
        assert_eq!(
            game.coordinator()
                .system_entities::<RulesSystem>()
                .unwrap()
                .len(),
            9
        );
    }
}
