//! Terminal input adapter.
//!
//! Turns crossterm key and mouse events into quest [`InputEvent`]s and
//! measures frame time. Most terminals never report key releases, so when
//! release reporting is unavailable a held Space is released once no press
//! or auto-repeat has arrived for [`RELEASE_GRACE`]. A press only counts as
//! auto-repeat when it follows the previous one within [`REPEAT_INTERVAL`];
//! anything slower is a fresh tap.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use kosh::core::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use kosh::core::{InputEvent, InputSource, Key, Vec2};
use ratatui::layout::Rect;
use std::io;
use std::time::{Duration, Instant};

/// Longest gap between two auto-repeat presses of a held key.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(100);

/// Silence after the last press before a held key counts as released.
/// Shorter than the Da Wire grip target, so a tap never passes for a hold.
pub const RELEASE_GRACE: Duration = Duration::from_millis(150);

pub struct TerminalInput {
    last_frame: Instant,
    pending: Vec<InputEvent>,
    pointer: Vec2,
    /// Cells the logical 800x600 stage was last drawn into.
    stage: Rect,
    reports_release: bool,
    /// Keys with a synthesized release pending, and when they were last seen.
    held: Vec<(Key, Instant)>,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            last_frame: Instant::now(),
            pending: Vec::new(),
            pointer: Vec2::ZERO,
            stage: Rect::default(),
            reports_release,
            held: Vec::new(),
        }
    }

    pub fn set_stage(&mut self, stage: Rect) {
        self.stage = stage;
    }

    /// Wait up to `timeout` for terminal events and translate everything
    /// that is ready.
    pub fn collect(&mut self, timeout: Duration) -> io::Result<()> {
        if event::poll(timeout)? {
            loop {
                let ev = event::read()?;
                self.translate(ev, Instant::now());
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        self.expire_holds(Instant::now());
        Ok(())
    }

    fn translate(&mut self, ev: Event, now: Instant) {
        match ev {
            Event::Key(key_event) => self.on_key(key_event, now),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            _ => {}
        }
    }

    fn on_key(&mut self, key_event: KeyEvent, now: Instant) {
        let key = map_key(key_event.code);
        match key_event.kind {
            KeyEventKind::Press => {
                // Without release reporting, auto-repeat shows up as more presses.
                if self.refresh_hold(key, now) {
                    return;
                }
                if self.held.iter().any(|(k, _)| *k == key) {
                    self.held.retain(|(k, _)| *k != key);
                    self.pending.push(InputEvent::KeyUp(key));
                }
                self.pending.push(InputEvent::KeyDown(key));
                if !self.reports_release && key == Key::Action {
                    self.held.push((key, now));
                }
            }
            KeyEventKind::Repeat => {
                if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == key) {
                    entry.1 = now;
                }
            }
            KeyEventKind::Release => {
                self.held.retain(|(k, _)| *k != key);
                self.pending.push(InputEvent::KeyUp(key));
            }
        }
    }

    /// Extend a hold when `now` is close enough to its last press to be
    /// auto-repeat.
    fn refresh_hold(&mut self, key: Key, now: Instant) -> bool {
        match self.held.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) if now.duration_since(entry.1) <= REPEAT_INTERVAL => {
                entry.1 = now;
                true
            }
            _ => false,
        }
    }

    fn expire_holds(&mut self, now: Instant) {
        let pending = &mut self.pending;
        self.held.retain(|(key, seen)| {
            if now.duration_since(*seen) >= RELEASE_GRACE {
                pending.push(InputEvent::KeyUp(*key));
                false
            } else {
                true
            }
        });
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let Some(pos) = self.to_logical(mouse.column, mouse.row) else {
            return;
        };
        self.pointer = pos;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pending.push(InputEvent::Click(pos)),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pending.push(InputEvent::PointerMoved(pos))
            }
            _ => {}
        }
    }

    /// Map a terminal cell to the center of its patch of logical screen.
    fn to_logical(&self, column: u16, row: u16) -> Option<Vec2> {
        let stage = self.stage;
        if stage.width == 0
            || stage.height == 0
            || column < stage.x
            || row < stage.y
            || column >= stage.x + stage.width
            || row >= stage.y + stage.height
        {
            return None;
        }
        let x = (f64::from(column - stage.x) + 0.5) / f64::from(stage.width) * SCREEN_WIDTH;
        let y = (f64::from(row - stage.y) + 0.5) / f64::from(stage.height) * SCREEN_HEIGHT;
        Some(Vec2::new(x, y))
    }
}

impl InputSource for TerminalInput {
    fn elapsed(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        // Clamp after a stall so timers do not skip whole phases.
        dt.min(0.1)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }
}

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Key::Up,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Key::Down,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Char(' ') => Key::Action,
        KeyCode::Esc => Key::Exit,
        _ => Key::Other,
    }
}
