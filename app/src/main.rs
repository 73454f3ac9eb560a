mod command;
mod components;
mod game;
mod systems;

use std::io::{Write, stdout};

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::{LevelFilter, warn};
use rustyline::{Editor, error::ReadlineError};
use triki_engine::logging::{self, LogMessage};

use command::Command;
use game::Game;

/// How many log lines stay on screen under the board.
const LOG_LINES: usize = 8;

fn main() -> Result<()> {
    let log_recv = logging::init(LevelFilter::Info).context("failed to install the logger")?;
    let mut game = Game::new().context("failed to set up the board")?;
    let mut editor = Editor::<()>::new();
    let mut log_data = Vec::<String>::new();
    let mut canvas = String::new();

    game.frame(None, &mut canvas)?;
    draw(&canvas, &mut log_data, &log_recv)?;

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };
        editor.add_history_entry(line.as_str());

        let click = match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::Restart) => {
                game.restart()?;
                None
            }
            Some(Command::Play(position)) => Some(position),
            Some(Command::Idle) => None,
            None => {
                warn!("Unrecognized command '{}'", line.trim());
                None
            }
        };
        game.frame(click, &mut canvas)?;
        draw(&canvas, &mut log_data, &log_recv)?;
    }
    Ok(())
}

/// Clear the screen and print the board followed by the most recent log lines.
fn draw(canvas: &str, log_data: &mut Vec<String>, log_recv: &Receiver<LogMessage>) -> Result<()> {
    log_data.extend(log_recv.try_iter().map(|msg| msg.message));
    if log_data.len() > LOG_LINES {
        *log_data = log_data.split_off(log_data.len() - LOG_LINES);
    }

    let mut out = stdout();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in canvas.lines().chain(log_data.iter().map(String::as_str)) {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    out.flush()?;
    Ok(())
}
