//! The engine: one board, one snake, one mouse and the tick that moves them.
//!
//! Every tick classifies where the snake's head is, applies the effect of that
//! (move, grow and speed up, or end the round), then redraws the whole canvas.
//! Key presses are handled between ticks on the same thread.

use std::time::Instant;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::Coords;
use crate::board::Board;
use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::error::Result;
use crate::input::{Command, KeySource};
use crate::mouse::Mouse;
use crate::snake::{Snake, Heading};
use crate::timer::Ticker;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Initializing,
    Running,
    Ended,
}

/// Where the snake's head is at the start of a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Clear,
    HitMouse,
    HitBorder,
    HitSelf,
}

/// Why `Game::run` returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Ended,
    Interrupted,
}

pub struct Game<C: Canvas, F: FnMut()> {
    config: GameConfig,
    canvas: C,
    on_end: F,
    board: Board,
    snake: Snake,
    mouse: Mouse,
    rng: StdRng,
    ticker: Ticker,
    frame_length: f64,
    score: u32,
    state: GameState,
}

impl<C: Canvas, F: FnMut()> Game<C, F> {
    /// Sets up the canvas and, unless `config.initialize` is false, starts a round.
    ///
    /// `on_end` is called once each time a round ends.
    pub fn new(mut canvas: C, config: GameConfig, on_end: F) -> Result<Self> {
        config.validate()?;
        canvas.resize(config.canvas_width, config.canvas_height, config.block_size, config.canvas_border)?;

        let board = Board::new(config.canvas_width, config.canvas_height, config.block_size);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = spawn_snake(&config);
        let mouse = Mouse::new(&board, config.mouse.color, &mut rng);

        let mut game = Game {
            frame_length: config.frame_length,
            config,
            canvas,
            on_end,
            board,
            snake,
            mouse,
            rng,
            ticker: Ticker::new(),
            score: 0,
            state: GameState::Initializing,
        };

        if game.config.initialize {
            game.init();
        }

        Ok(game)
    }

    /// Starts a fresh round, whatever state the game is in.
    pub fn init(&mut self) {
        self.snake = spawn_snake(&self.config);
        self.mouse.randomize(&mut self.rng);
        self.score = 0;
        self.frame_length = self.config.frame_length;
        self.ticker.restart(self.frame_length, Instant::now());
        self.state = GameState::Running;

        info!("{} of size {} starts at {:?}, {} at {:?}",
            self.config.snake.kind, self.snake.len(), self.snake.head(),
            self.config.mouse.kind, self.mouse.position());

        self.draw();
        self.show_score(Location::Clear);
    }

    /// Runs one step. Returns `None` when no round is running.
    pub fn tick(&mut self) -> Option<Location> {
        if self.state != GameState::Running {
            return None;
        }

        let location = classify(&self.board, self.snake.body(), self.mouse.position());
        debug!("head at {:?} going {:?}: {:?}", self.snake.head(), self.snake.heading(), location);

        match location {
            Location::Clear => self.snake.move_step(),
            Location::HitMouse => {
                self.snake.grow();
                self.mouse.relocate(&mut self.rng);
                self.speed_up();
                self.score += 1;
                info!("caught the {}, score {}, {:.2} ticks/s", self.config.mouse.kind, self.score, self.frame_length);
            },
            Location::HitBorder | Location::HitSelf => self.end(),
        }

        self.draw();
        self.show_score(location);
        Some(location)
    }

    pub fn handle(&mut self, command: Command) {
        if self.state != GameState::Running {
            return;
        }

        match command {
            Command::Turn(heading) => self.turn(heading),
            Command::Quit => self.end(),
            Command::Interrupt | Command::Ignore => {},
        }
    }

    /// Ticks on schedule and feeds key presses in between, until the round ends
    /// or Ctrl+C is pressed. Starts a round first if none was started.
    pub fn run<K: KeySource>(&mut self, keys: &mut K) -> Result<Exit> {
        if self.state == GameState::Initializing {
            self.init();
        }

        self.canvas.present()?;

        while self.state == GameState::Running {
            let wait = self.ticker.remaining(Instant::now()).unwrap_or_default();

            if let Some(key_ev) = keys.next_key(wait)? {
                match Command::from(key_ev) {
                    Command::Interrupt => {
                        self.ticker.stop();
                        return Ok(Exit::Interrupted);
                    },
                    command => self.handle(command),
                }
                continue;
            }

            if self.ticker.poll(Instant::now()) {
                self.tick();
                self.canvas.present()?;
            }
        }

        self.canvas.present()?;
        Ok(Exit::Ended)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current ticks per second.
    pub fn frame_length(&self) -> f64 {
        self.frame_length
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    ///////////////////////////////////////////////////////////////////////////

    fn turn(&mut self, heading: Heading) {
        self.snake.set_heading(heading);
    }

    fn speed_up(&mut self) {
        self.frame_length *= self.config.speed_factor;
        self.ticker.restart(self.frame_length, Instant::now());
    }

    fn end(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        self.ticker.stop();
        self.state = GameState::Ended;
        info!("round over with score {}", self.score);
        (self.on_end)();
    }

    fn draw(&mut self) {
        let bs = self.board.block_size();

        self.canvas.clear();
        self.draw_border();
        self.snake.draw(&mut self.canvas, bs);
        self.mouse.draw(&mut self.canvas, bs);
    }

    fn draw_border(&mut self) {
        let [top_left, top_right, bottom_right, bottom_left] = *self.board.corners();
        let path = [bottom_left, top_left, top_right, bottom_right];
        self.canvas.stroke_closed(&path, self.board.block_size() as f64, self.config.border_color);
    }

    /// Called after the tick's effects, so a capture already shows the new score.
    fn show_score(&mut self, location: Location) {
        if self.config.game_text {
            self.canvas.set_status(&status_text(self.score, location));
        }
    }
}

/// Checks the wall first, then the body, then the mouse.
pub fn classify(board: &Board, body: &[Coords], mouse: Coords) -> Location {
    let head = body[0];

    if !board.contains(head) {
        Location::HitBorder
    } else if body[1..].contains(&head) {
        Location::HitSelf
    } else if head == mouse {
        Location::HitMouse
    } else {
        Location::Clear
    }
}

pub fn status_text(score: u32, location: Location) -> String {
    let suffix = match location {
        Location::HitBorder => ", you just hit a wall!",
        Location::HitSelf => ", you just hit yourself!",
        Location::Clear | Location::HitMouse => "",
    };

    format!("Your Score: {}{}", score, suffix)
}

fn spawn_snake(config: &GameConfig) -> Snake {
    let size = config.snake.size;
    Snake::new(Snake::spawn_head(size), size, Heading::Right, config.snake.color)
}
