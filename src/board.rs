use crate::{Coords, Point};

/// The walled, playable area of the canvas.
///
/// The wall is stroked with a line as wide as one block, so its corners sit half a
/// block inside the canvas edge. Cells strictly inside the wall are playable.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    block_size: u32,
    corners: [Point; 4],
}

impl Board {
    pub fn new(canvas_width: u32, canvas_height: u32, block_size: u32) -> Self {
        let bs = block_size as f64;
        let width = (block_size * (canvas_width / block_size)) as f64;
        let height = (block_size * (canvas_height / block_size)) as f64;
        let offset = bs / 2.0;

        let corners = [
            (offset, offset),                  // top left
            (width - offset, offset),          // top right
            (width - offset, height - offset), // bottom right
            (offset, height - offset),         // bottom left
        ];

        Board { block_size, corners }
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Top left, top right, bottom right, bottom left.
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn border_width(&self) -> f64 {
        self.corners[2].0
    }

    pub fn border_height(&self) -> f64 {
        self.corners[2].1
    }

    /// Largest playable block index on each axis. The smallest is always 1.
    pub fn max_block(&self) -> Coords {
        let bs = self.block_size as f64;
        let max_x = (self.border_width() / bs).floor() as i32 - 1;
        let max_y = (self.border_height() / bs).floor() as i32 - 1;
        (max_x, max_y)
    }

    /// Whether a cell lies inside the wall.
    pub fn contains(&self, cell: Coords) -> bool {
        let (max_x, max_y) = self.max_block();
        (1..=max_x).contains(&cell.0) && (1..=max_y).contains(&cell.1)
    }
}
