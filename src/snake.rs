use crossterm::style::Color;

use crate::Coords;
use crate::canvas::Canvas;
use Heading::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right
}

impl Heading {
    /// One block in this direction.
    pub fn delta(self) -> Coords {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}

/// The player. Cells are block indices, head first.
pub struct Snake {
    body: Vec<Coords>,
    heading: Heading,
    color: Color,
}

impl Snake {
    /// Lays out `size` cells behind `head`, opposite to `heading`.
    pub fn new(head: Coords, size: usize, heading: Heading, color: Color) -> Self {
        let diff = heading.delta();

        let body = (0..size as i32)
            .map(|i| (head.0 - diff.0 * i, head.1 - diff.1 * i))
            .collect();
        Snake { body, heading, color }
    }

    /// Head cell of a freshly spawned snake of the given size heading right, offset
    /// diagonally from the top left corner so the whole body starts on the board.
    pub fn spawn_head(size: usize) -> Coords {
        let offset = size as i32 + 2;
        (offset + size as i32, offset)
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Turns only onto the other axis; anything else is ignored.
    pub fn set_heading(&mut self, requested: Heading) {
        if requested.is_horizontal() != self.heading.is_horizontal() {
            self.heading = requested;
        }
    }

    /// Advances one block, dropping the tail.
    pub fn move_step(&mut self) {
        self.advance_head();
        self.body.pop();
    }

    /// Advances one block, keeping the tail.
    pub fn grow(&mut self) {
        self.advance_head();
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, block_size: u32) {
        let bs = block_size as f64;

        for &(x, y) in &self.body {
            canvas.fill_rect(x as f64 * bs, y as f64 * bs, bs, bs, self.color);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn advance_head(&mut self) {
        let old_head = self.head();
        let (dx, dy) = self.heading.delta();
        self.body.insert(0, (old_head.0 + dx, old_head.1 + dy));
    }

    #[cfg(test)]
    pub fn from_cells(body: Vec<Coords>, heading: Heading) -> Self {
        Snake { body, heading, color: Color::White }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{Op, Recorder};

    const ALL: [Heading; 4] = [Up, Down, Left, Right];

    #[test]
    fn new_lays_body_behind_head() {
        let snake = Snake::new((5, 5), 3, Right, Color::White);
        assert_eq!(snake.body(), &[(5, 5), (4, 5), (3, 5)]);
        assert_eq!(snake.head(), (5, 5));

        let snake = Snake::new((5, 5), 2, Up, Color::White);
        assert_eq!(snake.body(), &[(5, 5), (5, 6)]);
    }

    #[test]
    fn spawn_head_is_offset_diagonally() {
        // Cells at pixel x = bs*(size+2) + bs*i for i in size..1
        assert_eq!(Snake::spawn_head(3), (8, 5));
        let snake = Snake::new(Snake::spawn_head(3), 3, Right, Color::White);
        assert_eq!(snake.body(), &[(8, 5), (7, 5), (6, 5)]);
    }

    #[test]
    fn heading_changes_only_across_axes() {
        for &current in &ALL {
            for &requested in &ALL {
                let mut snake = Snake::new((5, 5), 3, current, Color::White);
                snake.set_heading(requested);

                let perpendicular = current.is_horizontal() != requested.is_horizontal();
                let expected = if perpendicular { requested } else { current };
                assert_eq!(snake.heading(), expected, "{:?} -> {:?}", current, requested);
            }
        }
    }

    #[test]
    fn move_keeps_length() {
        for &heading in &ALL {
            let mut snake = Snake::new((5, 5), 3, heading, Color::White);
            let old_head = snake.head();
            snake.move_step();

            let (dx, dy) = heading.delta();
            assert_eq!(snake.len(), 3);
            assert_eq!(snake.head(), (old_head.0 + dx, old_head.1 + dy));
            assert_eq!(snake.body()[1], old_head);
        }
    }

    #[test]
    fn grow_adds_exactly_one_cell() {
        let mut snake = Snake::new((5, 5), 3, Right, Color::White);
        snake.set_heading(Down);
        snake.grow();

        assert_eq!(snake.body(), &[(5, 6), (5, 5), (4, 5), (3, 5)]);
    }

    #[test]
    fn draws_one_square_per_cell() {
        let snake = Snake::new((2, 1), 2, Right, Color::Green);
        let mut canvas = Recorder::default();
        snake.draw(&mut canvas, 20);

        assert_eq!(canvas.ops, vec![
            Op::FillRect { x: 40.0, y: 20.0, w: 20.0, h: 20.0, color: Color::Green },
            Op::FillRect { x: 20.0, y: 20.0, w: 20.0, h: 20.0, color: Color::Green },
        ]);
    }
}
