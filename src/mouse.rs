use crossterm::style::Color;
use rand::Rng;

use crate::Coords;
use crate::board::Board;
use crate::canvas::Canvas;

/// The prey. Its position is a block index inside the wall.
pub struct Mouse {
    position: Coords,
    max: Coords,
    color: Color,
}

impl Mouse {
    pub fn new<R: Rng + ?Sized>(board: &Board, color: Color, rng: &mut R) -> Self {
        let mut mouse = Mouse { position: (1, 1), max: board.max_block(), color };
        mouse.randomize(rng);
        mouse
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    /// Picks a uniformly random playable cell.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position = (rng.gen_range(1..=self.max.0), rng.gen_range(1..=self.max.1));
    }

    /// Picks a random playable cell other than the current one, when there is one.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let old = self.position;

        if self.max == (1, 1) {
            return;
        }

        while self.position == old {
            self.randomize(rng);
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, block_size: u32) {
        let radius = block_size as f64 / 2.0;
        let x = self.position.0 as f64 * block_size as f64 + radius;
        let y = self.position.1 as f64 * block_size as f64 + radius;
        canvas.fill_circle(x, y, radius, self.color);
    }

    #[cfg(test)]
    pub fn place(&mut self, position: Coords) {
        self.position = position;
    }
}
