use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::config::MIN_SWIPE_CELLS;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit `(dx, dy)` step, with `y` growing downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    PauseToggle,
    Start,
    Quit,
}

/// Translates a terminal key event into a game input.
///
/// Only presses are considered so key repeat on release-reporting terminals
/// does not double up.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ' | 'p' | 'P') => GameInput::PauseToggle,
        KeyCode::Enter | KeyCode::Char('r' | 'R') => GameInput::Start,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Turns a mouse drag into a direction, mirroring touch swipes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one mouse event; returns a direction when a swipe completes.
    pub fn observe(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(_) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(_) => {
                let (start_x, start_y) = self.start.take()?;
                let delta_x = i32::from(event.column) - i32::from(start_x);
                let delta_y = i32::from(event.row) - i32::from(start_y);
                swipe_direction(delta_x, delta_y)
            }
            _ => None,
        }
    }

    /// Forgets a drag in progress.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

fn swipe_direction(delta_x: i32, delta_y: i32) -> Option<Direction> {
    if delta_x.abs() > delta_y.abs() {
        if delta_x.abs() <= MIN_SWIPE_CELLS {
            return None;
        }
        Some(if delta_x > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        if delta_y.abs() <= MIN_SWIPE_CELLS {
            return None;
        }
        Some(if delta_y > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}
