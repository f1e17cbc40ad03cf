//! Key decoding and the non-blocking key source used by the game loop.

use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Command;

/// Map a key press to a command.  Anything unrecognised is `None`.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Tab => Some(Command::Rotate),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}

/// Something the loop can ask for at most one pending command per tick.
pub trait KeySource {
    /// Never blocks.  Consumes at most one key press.
    fn poll_command(&mut self) -> Option<Command>;
}

/// Events come from a dedicated reader thread, so draining the channel
/// with `try_recv` never waits on the terminal.
impl KeySource for mpsc::Receiver<Event> {
    fn poll_command(&mut self) -> Option<Command> {
        while let Ok(event) = self.try_recv() {
            if let Event::Key(key) = event {
                // Release/repeat events are skipped; only a press is consumed.
                if key.kind == KeyEventKind::Press {
                    return command_for(&key);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_space_and_tab_are_mapped() {
        assert_eq!(command_for(&press(KeyCode::Left)), Some(Command::MoveLeft));
        assert_eq!(command_for(&press(KeyCode::Right)), Some(Command::MoveRight));
        assert_eq!(command_for(&press(KeyCode::Char(' '))), Some(Command::Fire));
        assert_eq!(command_for(&press(KeyCode::Tab)), Some(Command::Rotate));
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c), Some(Command::Quit));
        assert_eq!(command_for(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn only_one_key_consumed_per_poll() {
        let (tx, mut rx) = mpsc::channel();
        tx.send(Event::Key(press(KeyCode::Left))).unwrap();
        tx.send(Event::Key(press(KeyCode::Right))).unwrap();

        assert_eq!(rx.poll_command(), Some(Command::MoveLeft));
        assert_eq!(rx.poll_command(), Some(Command::MoveRight));
        assert_eq!(rx.poll_command(), None);
    }

    #[test]
    fn unknown_key_is_consumed_and_ignored() {
        let (tx, mut rx) = mpsc::channel();
        tx.send(Event::Key(press(KeyCode::Char('z')))).unwrap();
        tx.send(Event::Key(press(KeyCode::Tab))).unwrap();

        assert_eq!(rx.poll_command(), None);
        assert_eq!(rx.poll_command(), Some(Command::Rotate));
    }

    #[test]
    fn non_key_events_are_skipped() {
        let (tx, mut rx) = mpsc::channel();
        tx.send(Event::Resize(80, 24)).unwrap();
        tx.send(Event::Key(press(KeyCode::Char(' ')))).unwrap();

        assert_eq!(rx.poll_command(), Some(Command::Fire));
    }
}
