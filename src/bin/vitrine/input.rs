//! Input thread forwarding terminal events to the main loop.
//!
//! The thread only reads and forwards; every state mutation stays on the
//! event-loop thread.

use crossbeam_channel::Sender;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

/// Rows a wheel notch scrolls.
const WHEEL_ROWS: i16 = 3;

/// Events the main loop consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Key(KeyEvent),
    Click { column: u16, row: u16 },
    Wheel { delta_rows: i16 },
    Resize { cols: u16, rows: u16 },
}

/// Map a raw terminal event to a loop event, dropping what we ignore
/// (key releases, mouse movement, focus changes).
#[must_use]
pub(crate) fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(InputEvent::Key(key)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(InputEvent::Click { column, row }),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            ..
        }) => Some(InputEvent::Wheel {
            delta_rows: -WHEEL_ROWS,
        }),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..
        }) => Some(InputEvent::Wheel {
            delta_rows: WHEEL_ROWS,
        }),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

/// Spawn the reader thread. It exits when the receiver hangs up or the
/// terminal read fails.
pub(crate) fn spawn_input_thread(tx: Sender<InputEvent>) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || loop {
        let event = match event::read() {
            Ok(event) => event,
            Err(_) => return,
        };
        if let Some(mapped) = map_event(event) {
            if tx.send(mapped).is_err() {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn key_presses_pass_through() {
        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(map_event(Event::Key(key)), Some(InputEvent::Key(key)));
    }

    #[test]
    fn key_releases_are_dropped() {
        let mut key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_event(Event::Key(key)), None);
    }

    #[test]
    fn left_click_maps_with_coordinates() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_event(Event::Mouse(mouse)),
            Some(InputEvent::Click { column: 12, row: 4 })
        );
    }

    #[test]
    fn right_click_is_dropped() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(map_event(Event::Mouse(mouse)), None);
    }

    #[test]
    fn wheel_maps_to_row_deltas() {
        let up = MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        let down = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            map_event(Event::Mouse(up)),
            Some(InputEvent::Wheel { delta_rows: -3 })
        );
        assert_eq!(
            map_event(Event::Mouse(down)),
            Some(InputEvent::Wheel { delta_rows: 3 })
        );
    }

    #[test]
    fn resize_passes_dimensions() {
        assert_eq!(
            map_event(Event::Resize(120, 40)),
            Some(InputEvent::Resize {
                cols: 120,
                rows: 40
            })
        );
    }
}
