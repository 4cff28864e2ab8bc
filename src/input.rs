use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Game-level input, independent of where keys come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum InputEvent {
    Cancel,
    Confirm,
    SelectOnePlayer,
    SelectTwoPlayers,
    Yes,
    No,
}

/// Translates a terminal key press into a game input.
///
/// `c` is also "confirm" so Ctrl-C is checked first.
pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Cancel);
    }

    match key.code {
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Char('c' | 'C') => Some(InputEvent::Confirm),
        KeyCode::Char('1') => Some(InputEvent::SelectOnePlayer),
        KeyCode::Char('2') => Some(InputEvent::SelectTwoPlayers),
        KeyCode::Char('y' | 'Y') => Some(InputEvent::Yes),
        KeyCode::Char('n' | 'N') => Some(InputEvent::No),
        _ => None,
    }
}

/// Keys that steer the simulated tracked object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectControl {
    Nudge { dx: i32, dy: i32 },
    ToggleVisible,
}

pub fn map_object_control(key: &KeyEvent, step: i32) -> Option<ObjectControl> {
    let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
        step * 4
    } else {
        step
    };

    match key.code {
        KeyCode::Left | KeyCode::Char('a') => Some(ObjectControl::Nudge { dx: -step, dy: 0 }),
        KeyCode::Right | KeyCode::Char('d') => Some(ObjectControl::Nudge { dx: step, dy: 0 }),
        KeyCode::Up | KeyCode::Char('w') => Some(ObjectControl::Nudge { dx: 0, dy: -step }),
        KeyCode::Down | KeyCode::Char('s') => Some(ObjectControl::Nudge { dx: 0, dy: step }),
        KeyCode::Char(' ') => Some(ObjectControl::ToggleVisible),
        _ => None,
    }
}
