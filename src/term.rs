use crate::Point;
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::input::KeySource;
use std::{cmp::max, io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};
use log::error;

type TermCoords = (u16, u16);

// Blocks are two columns wide so they look roughly square
const COLS_PER_BLOCK: i64 = 2;

const FILL_GLYPH: [char; 2] = ['█', '█'];
const WALL_GLYPH: [char; 2] = ['▒', '▒'];
const CIRCLE_GLYPH: [char; 2] = ['(', ')'];

#[derive(Copy, Clone, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

/// Back buffer for the canvas: pixel shapes rasterized onto terminal cells.
struct Grid {
    cols: u16,
    rows: u16,
    scale: f64,
    cells: Vec<Cell>,
}

impl Grid {
    fn new(cols: u16, rows: u16, scale: u32) -> Self {
        Grid { cols, rows, scale: scale as f64, cells: vec![BLANK; cols as usize * rows as usize] }
    }

    fn get(&self, col: u16, row: u16) -> Cell {
        self.cells[self.cols as usize * row as usize + col as usize]
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = BLANK);
    }

    fn block_of(&self, px: f64) -> i64 {
        (px / self.scale).floor() as i64
    }

    /// Paints one block; anything off the grid is clipped.
    fn set_block(&mut self, bx: i64, by: i64, glyph: [char; 2], color: Color) {
        if by < 0 || by >= self.rows as i64 {
            return;
        }

        for (i, &ch) in glyph.iter().enumerate() {
            let col = bx * COLS_PER_BLOCK + i as i64;
            if col >= 0 && col < self.cols as i64 {
                let idx = self.cols as usize * by as usize + col as usize;
                self.cells[idx] = Cell { ch, color };
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let (x0, y0) = (self.block_of(x), self.block_of(y));
        let x1 = ((x + w) / self.scale).ceil() as i64;
        let y1 = ((y + h) / self.scale).ceil() as i64;

        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_block(bx, by, FILL_GLYPH, color);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, _r: f64, color: Color) {
        let (bx, by) = (self.block_of(x), self.block_of(y));
        self.set_block(bx, by, CIRCLE_GLYPH, color);
    }

    fn stroke_closed(&mut self, points: &[Point], color: Color) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.stroke_line(from, to, color);
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        let (x0, y0) = (self.block_of(from.0), self.block_of(from.1));
        let (x1, y1) = (self.block_of(to.0), self.block_of(to.1));
        let steps = max((x1 - x0).abs(), (y1 - y0).abs());

        for step in 0..=steps {
            let t = if steps == 0 { 0.0 } else { step as f64 / steps as f64 };
            let bx = x0 + ((x1 - x0) as f64 * t).round() as i64;
            let by = y0 + ((y1 - y0) as f64 * t).round() as i64;
            self.set_block(bx, by, WALL_GLYPH, color);
        }
    }
}

/// Crossterm-backed canvas. Owns the terminal while alive.
pub struct Terminal {
    width: u16,
    height: u16,
    stdout: Stdout,
    origin: TermCoords,
    frame: Option<Color>,
    grid: Grid,
    shown: Vec<Option<Cell>>,
    status: String,
    shown_status: Option<String>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: TermCoords,
    width: u16,
    height: u16,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let mut term = Terminal {
            width,
            height,
            stdout: stdout(),
            origin: (0, 0),
            frame: None,
            grid: Grid::new(0, 0, 1),
            shown: vec![],
            status: String::new(),
            shown_status: None,
            current_msg: None,
        };

        term.setup()?;
        Ok(term)
    }

    /// Shows a box of centered lines over the canvas until `hide_message`.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let center = self.canvas_center();
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        // Empty top and bottom lines
        let blank = " ".repeat(msg_width as usize);
        for &y in &[top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::ResetColor, style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::ResetColor, style::Print(padded_line))?;
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    /// Removes the message box, putting the canvas back underneath it.
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        let (left, top) = msg.top_left;
        queue!(self.stdout, style::ResetColor)?;
        for y in top..top + msg.height {
            queue!(self.stdout, cursor::MoveTo(left, y), style::Print(" ".repeat(msg.width as usize)))?;
        }

        // Force a repaint of every canvas cell that was covered
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                if msg.covers(self.to_term((col, row))) {
                    self.shown[self.grid.cols as usize * row as usize + col as usize] = None;
                }
            }
        }
        self.shown_status = None;

        if self.frame.is_some() {
            self.draw_frame()?;
        }
        self.present_cells()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn to_term(&self, (col, row): TermCoords) -> TermCoords {
        (self.origin.0 + col, self.origin.1 + row)
    }

    fn canvas_center(&self) -> TermCoords {
        self.to_term((self.grid.cols / 2, self.grid.rows / 2))
    }

    fn status_row(&self) -> u16 {
        let frame = if self.frame.is_some() { 1 } else { 0 };
        self.origin.1 + self.grid.rows + frame
    }

    fn draw_frame(&mut self) -> Result<()> {
        let color = match self.frame {
            Some(color) => color,
            None => return Ok(()),
        };

        let width = self.grid.cols + 2;
        let height = self.grid.rows + 2;
        let (end_x, end_y) = (width - 1, height - 1);

        queue!(self.stdout, style::SetForegroundColor(color))?;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, 0), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, end_y), style::Print(ch))?;
        }

        for y in 1..end_y {
            queue!(self.stdout, cursor::MoveTo(0, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(end_x, y), style::Print('|'))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        Ok(())
    }

    /// Writes the cells that changed since the last call.
    fn present_cells(&mut self) -> Result<()> {
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let pos = self.to_term((col, row));
                if self.current_msg.as_ref().map_or(false, |msg| msg.covers(pos)) {
                    continue;
                }

                let idx = self.grid.cols as usize * row as usize + col as usize;
                let cell = self.grid.get(col, row);
                if self.shown[idx] != Some(cell) {
                    queue!(self.stdout, cursor::MoveTo(pos.0, pos.1),
                        style::SetForegroundColor(cell.color), style::Print(cell.ch))?;
                    self.shown[idx] = Some(cell);
                }
            }
        }

        if self.shown_status.as_deref() != Some(self.status.as_str()) {
            let row = self.status_row();
            let status = self.status.clone();
            queue!(self.stdout, cursor::MoveTo(0, row), style::ResetColor,
                terminal::Clear(ClearType::CurrentLine), style::Print(&status))?;
            self.shown_status = Some(status);
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()?;
        Ok(())
    }
}

impl Canvas for Terminal {
    fn resize(&mut self, width: u32, height: u32, scale: u32, frame: Option<Color>) -> Result<()> {
        let cols = (width / scale) * COLS_PER_BLOCK as u32;
        let rows = height / scale;
        let border = if frame.is_some() { 2 } else { 0 };

        // One extra row for the status line
        let needed = (cols + border, rows + border + 1);
        if needed.0 > self.width as u32 || needed.1 > self.height as u32 {
            return Err(Error::TerminalTooSmall {
                needed: (needed.0.min(u16::MAX as u32) as u16, needed.1.min(u16::MAX as u32) as u16),
                available: (self.width, self.height),
            });
        }

        self.grid = Grid::new(cols as u16, rows as u16, scale);
        self.shown = vec![None; self.grid.cells.len()];
        self.frame = frame;
        self.origin = if frame.is_some() { (1, 1) } else { (0, 0) };
        self.shown_status = None;

        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.draw_frame()?;
        self.flush()?;
        Ok(())
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.grid.fill_rect(x, y, w, h, color);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        self.grid.fill_circle(x, y, r, color);
    }

    fn stroke_closed(&mut self, points: &[Point], _line_width: f64, color: Color) {
        self.grid.stroke_closed(points, color);
    }

    fn set_status(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }

    fn present(&mut self) -> Result<()> {
        self.present_cells()
    }
}

/// Key presses from the terminal's event queue.
pub struct Keyboard;

impl Keyboard {
    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}

impl KeySource for Keyboard {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            error!("failed to restore the terminal: {}", err);
        }
    }
}

impl Message {
    fn covers(&self, (x, y): TermCoords) -> bool {
        let (left, top) = self.top_left;
        x >= left && x < left + self.width && y >= top && y < top + self.height
    }
}
