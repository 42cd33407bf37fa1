use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::Result;
use crate::snake::Heading;

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Heading),
    /// End the round
    Quit,
    /// Leave the program
    Interrupt,
    Ignore,
}

impl From<KeyEvent> for Command {
    fn from(ev: KeyEvent) -> Self {
        if is_ctrl_c(&ev) {
            return Command::Interrupt;
        }

        match ev.code {
            KeyCode::Up => Command::Turn(Heading::Up),
            KeyCode::Down => Command::Turn(Heading::Down),
            KeyCode::Left => Command::Turn(Heading::Left),
            KeyCode::Right => Command::Turn(Heading::Right),
            KeyCode::Esc => Command::Quit,
            _ => Command::Ignore,
        }
    }
}

/// Source of key presses for the run loop.
pub trait KeySource {
    /// Waits up to `timeout` for a key press.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>>;
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}


#[cfg(test)]
mod tests {
    use super::*;
    use super::scripted::key;

    #[test]
    fn arrows_turn() {
        assert_eq!(Command::from(key(KeyCode::Up)), Command::Turn(Heading::Up));
        assert_eq!(Command::from(key(KeyCode::Down)), Command::Turn(Heading::Down));
        assert_eq!(Command::from(key(KeyCode::Left)), Command::Turn(Heading::Left));
        assert_eq!(Command::from(key(KeyCode::Right)), Command::Turn(Heading::Right));
    }

    #[test]
    fn escape_quits_and_ctrl_c_interrupts() {
        assert_eq!(Command::from(key(KeyCode::Esc)), Command::Quit);

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(Command::from(ctrl_c), Command::Interrupt);
        assert_eq!(Command::from(key(KeyCode::Char('c'))), Command::Ignore);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(Command::from(key(KeyCode::Char('w'))), Command::Ignore);
        assert_eq!(Command::from(key(KeyCode::Enter)), Command::Ignore);
    }
}
