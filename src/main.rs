mod board;
mod canvas;
mod config;
mod error;
mod game;
mod input;
mod mouse;
mod snake;
mod term;
mod timer;

use std::{cell::Cell, fs::File};

use clap::Parser;
use log::info;
use simplelog::{LevelFilter, WriteLogger};

use config::{Cli, GameConfig};
use game::{Exit, Game};
use input::is_ctrl_c;
use term::{Keyboard, Terminal};

/// Block index on the board
pub type Coords = (i32, i32);
/// Pixel position on the canvas
pub type Point = (f64, f64);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The terminal is busy drawing the game, so logs only go to a file
    if let Some(path) = &cli.log_file {
        WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), File::create(path)?)?;
    }

    let config = cli.to_config();
    config.validate()?;
    info!("starting with {:?}", config);

    play(config)?;
    Ok(())
}

fn play(config: GameConfig) -> error::Result<()> {
    let rounds = Cell::new(0u32);
    let config = GameConfig { initialize: false, ..config };
    let mut game = Game::new(Terminal::new()?, config, || rounds.set(rounds.get() + 1))?;
    let mut keyboard = Keyboard;

    game.canvas_mut().show_message(&[
        "Arrow keys to move",
        "Esc to end the round",
        "CTRL+C to quit",
        "",
        "Press any key to begin"
    ])?;

    if is_ctrl_c(&keyboard.read_key_blocking()?) {
        return Ok(());
    }

    game.canvas_mut().hide_message()?;

    loop {
        game.init();

        // The round takes care of exiting on CTRL+C
        if game.run(&mut keyboard)? == Exit::Interrupted {
            return Ok(());
        }

        let round = format!("Round {}", rounds.get());
        let score = format!("Score: {}", game.score());
        game.canvas_mut().show_message(&[
            "Game over!",
            &round,
            &score,
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;

        if is_ctrl_c(&keyboard.read_key_blocking()?) {
            return Ok(());
        }

        game.canvas_mut().hide_message()?;
    }
}
