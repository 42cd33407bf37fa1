use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("block size must be at least one pixel")]
    ZeroBlockSize,
    #[error("a {width}x{height} canvas is too small for {block_size}px blocks, it needs at least 3 blocks per side")]
    CanvasTooSmall { width: u32, height: u32, block_size: u32 },
    #[error("the snake needs at least one segment")]
    EmptySnake,
    #[error("a snake of {size} blocks does not fit on a board {max} blocks across")]
    SnakeTooLong { size: usize, max: usize },
    #[error("frame length must be a positive number of ticks per second with a representable tick interval, got {0}")]
    InvalidFrameLength(f64),
    #[error("speed factor must be a finite number of at least 1, got {0}")]
    InvalidSpeedFactor(f64),
    #[error("terminal is {available:?} cells but the canvas needs {needed:?}")]
    TerminalTooSmall { needed: (u16, u16), available: (u16, u16) },
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
