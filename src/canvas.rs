use crossterm::style::Color;

use crate::Point;
use crate::error::Result;

/// A 2D drawing surface addressed in pixels, plus the line of text under it.
pub trait Canvas {
    /// Sets the pixel size of the surface. `scale` is the pixel edge of one block.
    fn resize(&mut self, width: u32, height: u32, scale: u32, frame: Option<Color>) -> Result<()>;

    fn clear(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color);

    /// Strokes a closed path through `points` with square caps.
    fn stroke_closed(&mut self, points: &[Point], line_width: f64, color: Color);

    fn set_status(&mut self, text: &str);

    /// Makes everything drawn since the last call visible.
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear,
        FillRect { x: f64, y: f64, w: f64, h: f64, color: Color },
        FillCircle { x: f64, y: f64, r: f64, color: Color },
        StrokeClosed { points: Vec<Point>, line_width: f64, color: Color },
    }

    /// Canvas that remembers what was drawn since the last clear.
    #[derive(Default)]
    pub struct Recorder {
        pub size: Option<(u32, u32)>,
        pub ops: Vec<Op>,
        pub status: Option<String>,
        pub presented: usize,
    }

    impl Canvas for Recorder {
        fn resize(&mut self, width: u32, height: u32, _scale: u32, _frame: Option<Color>) -> Result<()> {
            self.size = Some((width, height));
            Ok(())
        }

        fn clear(&mut self) {
            self.ops.clear();
            self.ops.push(Op::Clear);
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
            self.ops.push(Op::FillRect { x, y, w, h, color });
        }

        fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
            self.ops.push(Op::FillCircle { x, y, r, color });
        }

        fn stroke_closed(&mut self, points: &[Point], line_width: f64, color: Color) {
            self.ops.push(Op::StrokeClosed { points: points.to_vec(), line_width, color });
        }

        fn set_status(&mut self, text: &str) {
            self.status = Some(text.to_string());
        }

        fn present(&mut self) -> Result<()> {
            self.presented += 1;
            Ok(())
        }
    }
}
