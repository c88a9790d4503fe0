//! UI-agnostic input: the keys quests understand and the pull-based source
//! that feeds them.

use super::geometry::Vec2;
use std::collections::VecDeque;

/// Input actions, independent of the physical device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    /// Enter: confirm a menu choice, dismiss a dialog.
    Confirm,
    /// Space: the quest's main action (lick/grip, make a trip).
    Action,
    /// Esc: abandon the quest.
    Exit,
    Other,
}

/// A discrete input event, delivered between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Click(Vec2),
    PointerMoved(Vec2),
}

/// Pull-based clock and input adapter. Each frame the consumer asks for the
/// elapsed time first, then drains the events that arrived since.
pub trait InputSource {
    /// Seconds since the previous call.
    fn elapsed(&mut self) -> f64;

    /// Events received since the previous poll, oldest first.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Last known pointer position in screen space.
    fn pointer_position(&self) -> Vec2;
}

/// Replays a prepared list of frames; used by tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<(f64, Vec<InputEvent>)>,
    pending: Vec<InputEvent>,
    pointer: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame: `dt` seconds elapse, then `events` arrive.
    pub fn frame(mut self, dt: f64, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.frames.push_back((dt, events.into_iter().collect()));
        self
    }

    /// Queue `count` empty frames of `dt` seconds each.
    pub fn idle(mut self, dt: f64, count: usize) -> Self {
        for _ in 0..count {
            self.frames.push_back((dt, Vec::new()));
        }
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty() && self.pending.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn elapsed(&mut self) -> f64 {
        match self.frames.pop_front() {
            Some((dt, events)) => {
                self.pending.extend(events);
                dt
            }
            None => 0.0,
        }
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            if let InputEvent::Click(pos) | InputEvent::PointerMoved(pos) = event {
                self.pointer = *pos;
            }
        }
        events
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }
}
