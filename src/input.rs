//! Raw input → abstract actions, with key-repeat throttling

use crate::terminal::InputEvent;
use crossterm::event::{KeyCode, KeyModifiers};
use std::time::Duration;

/// Quiet time after which a held key counts as released. Longer than the
/// usual OS auto-repeat delay so a held key never looks like a new press.
const IDLE_RESET: Duration = Duration::from_secs(1);

/// Continuous actions fire on every Nth repeat of a held key
const REPEAT_STRIDE: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    WindLeft,
    WindRight,
    IncreaseFuel,
    DecreaseFuel,
    Reset,
    TogglePause,
    CycleColors,
    ToggleHelp,
    ToggleStats,
    Ignite { x: u16, y: u16 },
}

impl Action {
    /// Actions that may auto-repeat while their key is held
    fn is_continuous(self) -> bool {
        matches!(
            self,
            Action::WindLeft | Action::WindRight | Action::IncreaseFuel | Action::DecreaseFuel
        )
    }
}

/// Identity of a raw input for repeat detection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawKey {
    Key(KeyCode, KeyModifiers),
    Click,
    Scroll(i8),
}

/// Key-to-action table plus the (last key, repeat count) debounce state
pub struct InputMapper {
    last_key: Option<RawKey>,
    repeat_count: u32,
    idle_frames: u32,
    idle_reset_frames: u32,
}

impl InputMapper {
    /// Mapper for a loop polling once per frame at `fps`
    pub fn new(fps: u32) -> Self {
        let frames = (IDLE_RESET.as_secs_f32() * fps as f32).ceil() as u32;
        Self {
            last_key: None,
            repeat_count: 0,
            idle_frames: 0,
            idle_reset_frames: frames.max(1),
        }
    }

    /// Map one polled event (or its absence) to an action
    pub fn process(&mut self, event: Option<InputEvent>) -> Action {
        let Some(event) = event else {
            self.idle_frames += 1;
            if self.idle_frames >= self.idle_reset_frames {
                self.last_key = None;
                self.repeat_count = 0;
            }
            return Action::None;
        };

        let (raw, action) = match event {
            InputEvent::Key(code, modifiers) => {
                (RawKey::Key(code, modifiers), map_key(code, modifiers))
            }
            InputEvent::Click { x, y } => (RawKey::Click, Action::Ignite { x, y }),
            InputEvent::Scroll(dir) if dir > 0 => (RawKey::Scroll(1), Action::IncreaseFuel),
            InputEvent::Scroll(_) => (RawKey::Scroll(-1), Action::DecreaseFuel),
            InputEvent::Resize(..) => return Action::None,
        };

        self.idle_frames = 0;
        if self.accept(raw, action) {
            action
        } else {
            Action::None
        }
    }

    fn accept(&mut self, raw: RawKey, action: Action) -> bool {
        if self.last_key == Some(raw) {
            self.repeat_count += 1;
            if action.is_continuous() {
                self.repeat_count % REPEAT_STRIDE == 0
            } else {
                self.repeat_count == 1
            }
        } else {
            self.last_key = Some(raw);
            self.repeat_count = 1;
            true
        }
    }
}

/// Fixed key table
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => Action::Quit,
            _ => Action::None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Left => Action::WindLeft,
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Right => Action::WindRight,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::IncreaseFuel,
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => Action::DecreaseFuel,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::CycleColors,
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('s') | KeyCode::Char('S') => Action::ToggleStats,
        _ => Action::None,
    }
}
