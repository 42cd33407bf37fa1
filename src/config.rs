//! Game settings. Every field has a default and can be overridden from the command line.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use crossterm::style::Color;

use crate::error::{Error, Result};

/// Options shared by the snake and the mouse.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityOptions {
    /// Label used when logging about the entity
    pub kind: String,
    /// Initial number of blocks. Only the snake's size affects the game.
    pub size: usize,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Start the round as soon as the game is constructed
    pub initialize: bool,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Frame drawn around the canvas, if any
    pub canvas_border: Option<Color>,
    /// Show the score line under the canvas
    pub game_text: bool,
    /// Initial ticks per second
    pub frame_length: f64,
    /// Multiplier applied to `frame_length` on every capture
    pub speed_factor: f64,
    pub border_color: Color,
    /// Edge length of one block, in pixels
    pub block_size: u32,
    pub snake: EntityOptions,
    pub mouse: EntityOptions,
    /// Fixed seed for mouse placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initialize: true,
            canvas_width: 500,
            canvas_height: 500,
            canvas_border: None,
            game_text: true,
            frame_length: 8.0,
            speed_factor: 1.1,
            border_color: Color::White,
            block_size: 20,
            snake: EntityOptions { kind: "snake".to_string(), size: 3, color: Color::White },
            mouse: EntityOptions { kind: "mouse".to_string(), size: 1, color: Color::White },
            seed: None,
        }
    }
}

impl GameConfig {
    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::ZeroBlockSize);
        }

        let min_side = self.block_size.saturating_mul(3);
        if self.canvas_width < min_side || self.canvas_height < min_side {
            return Err(Error::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                block_size: self.block_size,
            });
        }

        if self.snake.size == 0 {
            return Err(Error::EmptySnake);
        }

        let max_size = (self.canvas_width / self.block_size) as usize;
        if self.snake.size > max_size {
            return Err(Error::SnakeTooLong { size: self.snake.size, max: max_size });
        }

        if !self.frame_length.is_finite() || self.frame_length <= 0.0
            || Duration::try_from_secs_f64(1.0 / self.frame_length).is_err() {
            return Err(Error::InvalidFrameLength(self.frame_length));
        }

        // Captures only ever speed the game up
        if !self.speed_factor.is_finite() || self.speed_factor < 1.0 {
            return Err(Error::InvalidSpeedFactor(self.speed_factor));
        }

        Ok(())
    }
}

/// Play snake in the terminal.
///
/// Arrow keys steer, Esc ends the round and Ctrl+C quits.
#[derive(Parser, Debug)]
#[command(name = "canvas-snake", version, about)]
pub struct Cli {
    /// Canvas width in pixels
    #[arg(long, value_name = "PX")]
    canvas_width: Option<u32>,
    /// Canvas height in pixels
    #[arg(long, value_name = "PX")]
    canvas_height: Option<u32>,
    /// Draw a frame of this color around the canvas
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    canvas_border: Option<Color>,
    /// Hide the score line
    #[arg(long)]
    no_status: bool,
    /// Initial ticks per second
    #[arg(long, value_name = "TPS")]
    frame_length: Option<f64>,
    /// Speed multiplier applied after every capture
    #[arg(long, value_name = "FACTOR")]
    speed_factor: Option<f64>,
    /// Wall color (#RGB, #RRGGBB or a color name)
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    border_color: Option<Color>,
    /// Block size in pixels
    #[arg(long = "blocks", value_name = "PX")]
    block_size: Option<u32>,
    /// Initial snake length in blocks
    #[arg(long, value_name = "BLOCKS")]
    snake_size: Option<usize>,
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    snake_color: Option<Color>,
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    mouse_color: Option<Color>,
    /// Seed for mouse placement
    #[arg(long)]
    seed: Option<u64>,
    /// Write a log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Applies the given flags over the defaults.
    pub fn to_config(&self) -> GameConfig {
        let mut config = GameConfig::default();

        if let Some(w) = self.canvas_width { config.canvas_width = w; }
        if let Some(h) = self.canvas_height { config.canvas_height = h; }
        if self.canvas_border.is_some() { config.canvas_border = self.canvas_border; }
        if self.no_status { config.game_text = false; }
        if let Some(f) = self.frame_length { config.frame_length = f; }
        if let Some(f) = self.speed_factor { config.speed_factor = f; }
        if let Some(c) = self.border_color { config.border_color = c; }
        if let Some(b) = self.block_size { config.block_size = b; }
        if let Some(s) = self.snake_size { config.snake.size = s; }
        if let Some(c) = self.snake_color { config.snake.color = c; }
        if let Some(c) = self.mouse_color { config.mouse.color = c; }
        config.seed = self.seed;

        config
    }
}

/// Parses `#RGB`, `#RRGGBB` or one of the basic terminal color names.
pub fn parse_color(s: &str) -> std::result::Result<Color, String> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        let digits: Option<Vec<u8>> = hex.chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect();

        return match digits.as_deref() {
            Some(&[r, g, b]) => Ok(Color::Rgb { r: r * 17, g: g * 17, b: b * 17 }),
            Some(&[r1, r2, g1, g2, b1, b2]) => Ok(Color::Rgb {
                r: r1 * 16 + r2,
                g: g1 * 16 + g2,
                b: b1 * 16 + b2,
            }),
            _ => Err(format!("invalid hex color {:?}", s)),
        };
    }

    let color = match s.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        _ => return Err(format!("unknown color {:?}", s)),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = GameConfig::default();
        assert!(config.initialize);
        assert_eq!((config.canvas_width, config.canvas_height), (500, 500));
        assert_eq!(config.block_size, 20);
        assert_eq!(config.frame_length, 8.0);
        assert_eq!(config.speed_factor, 1.1);
        assert_eq!(config.snake.size, 3);
        assert_eq!(config.mouse.size, 1);
        assert_eq!(config.canvas_border, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_block_size() {
        let config = GameConfig { block_size: 0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::ZeroBlockSize)));
    }

    #[test]
    fn rejects_canvas_smaller_than_three_blocks() {
        let config = GameConfig { canvas_width: 59, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::CanvasTooSmall { width: 59, .. })));

        let config = GameConfig { canvas_width: 60, canvas_height: 60, ..GameConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_rates_and_sizes() {
        let mut config = GameConfig::default();
        config.snake.size = 0;
        assert!(matches!(config.validate(), Err(Error::EmptySnake)));

        let config = GameConfig { frame_length: 0.0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidFrameLength(_))));

        let config = GameConfig { frame_length: 1e-30, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidFrameLength(_))));

        let config = GameConfig { speed_factor: f64::NAN, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidSpeedFactor(_))));

        let config = GameConfig { speed_factor: 0.5, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidSpeedFactor(_))));

        let config = GameConfig { speed_factor: 1.0, ..GameConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_snake_longer_than_the_board() {
        let mut config = GameConfig::default();
        config.snake.size = 1 << 32;
        assert!(matches!(config.validate(), Err(Error::SnakeTooLong { max: 25, .. })));

        config.snake.size = 26;
        assert!(matches!(config.validate(), Err(Error::SnakeTooLong { size: 26, max: 25 })));

        config.snake.size = 25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_colors() {
        assert_eq!(parse_color("#FFF"), Ok(Color::Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(parse_color("#1a2B3c"), Ok(Color::Rgb { r: 0x1a, g: 0x2b, b: 0x3c }));
        assert_eq!(parse_color("Red"), Ok(Color::Red));
        assert!(parse_color("#12").is_err());
        assert!(parse_color("#GGG").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    #[test]
    fn cli_overrides_only_given_fields() {
        let cli = Cli::parse_from(["canvas-snake", "--blocks", "10", "--snake-color", "#f00", "--no-status"]);
        let config = cli.to_config();

        assert_eq!(config.block_size, 10);
        assert_eq!(config.snake.color, Color::Rgb { r: 255, g: 0, b: 0 });
        assert!(!config.game_text);
        assert_eq!(config.canvas_width, 500);
        assert_eq!(config.frame_length, 8.0);
    }
}
