//! Finger-count state machine with time-based gesture debouncing.
//!
//! Mode changes are immediate; the hold timer and cooldown gate only the
//! color-cycling gestures, which are momentary actions rather than modes.

use std::time::{Duration, Instant};

use super::mode::{ColorAction, InputMode};
use crate::config::GestureConfig;
use crate::draw::Color;
use crate::draw::color::{PALETTE, palette_color, palette_name};
use log::{debug, info};

/// Outcome of feeding one finger-count sample to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeUpdate {
    /// Mode after the sample, possibly unchanged
    pub mode: InputMode,
    /// Whether this sample switched modes
    pub mode_changed: bool,
    /// Color action fired by this sample, if any
    pub color_action: Option<ColorAction>,
}

/// Translates per-sample finger counts into modes and color actions.
///
/// One instance per session; [`update`](Self::update) is called once per
/// pointer sample with a monotonic timestamp.
#[derive(Debug, Clone)]
pub struct InputModeController {
    mode: InputMode,
    color_index: usize,
    last_finger_count: Option<u8>,
    gesture_start: Option<Instant>,
    gesture_confirmed: bool,
    last_color_change: Option<Instant>,
    hold_time: Duration,
    color_cooldown: Duration,
}

impl InputModeController {
    /// Creates a controller in `Idle` mode on the first palette color.
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            mode: InputMode::default(),
            color_index: 0,
            last_finger_count: None,
            gesture_start: None,
            gesture_confirmed: false,
            last_color_change: None,
            hold_time: Duration::from_secs_f64(config.hold_time_secs),
            color_cooldown: Duration::from_secs_f64(config.color_cooldown_secs),
        }
    }

    /// Feeds one finger-count sample taken at `now`.
    ///
    /// Counts outside 0..=5 are ignored entirely. Counts 0, 1, 2 and 5
    /// switch the mode immediately; 3 and 4 cycle the palette once the
    /// count has been held for the hold time, subject to the cooldown.
    /// A gesture that fires, or that is blocked by the cooldown, disarms;
    /// re-arming requires the finger count to change.
    pub fn update(&mut self, finger_count: u8, now: Instant) -> ModeUpdate {
        if finger_count > 5 {
            debug!("Ignoring finger count {finger_count}");
            return ModeUpdate {
                mode: self.mode,
                mode_changed: false,
                color_action: None,
            };
        }

        if self.last_finger_count != Some(finger_count) {
            self.last_finger_count = Some(finger_count);
            self.gesture_start = Some(now);
            self.gesture_confirmed = false;
        }

        if !self.gesture_confirmed
            && let Some(start) = self.gesture_start
            && now.duration_since(start) >= self.hold_time
        {
            self.gesture_confirmed = true;
        }

        let mode_changed = match InputMode::from_finger_count(finger_count) {
            Some(mode) if mode != self.mode => {
                info!("Mode {} -> {}", self.mode.name(), mode.name());
                self.mode = mode;
                true
            }
            _ => false,
        };

        let color_action = match finger_count {
            3 => self.try_color_action(ColorAction::Next, now),
            4 => self.try_color_action(ColorAction::Prev, now),
            _ => None,
        };

        ModeUpdate {
            mode: self.mode,
            mode_changed,
            color_action,
        }
    }

    /// Attempts a confirmed color gesture against the cooldown.
    fn try_color_action(&mut self, action: ColorAction, now: Instant) -> Option<ColorAction> {
        if !self.gesture_confirmed {
            return None;
        }
        // Confirmed gestures disarm whether they fire or the cooldown
        // blocks them; only a count change re-arms
        self.gesture_confirmed = false;
        self.gesture_start = None;

        if let Some(last) = self.last_color_change
            && now.duration_since(last) <= self.color_cooldown
        {
            debug!("Color gesture blocked by cooldown");
            return None;
        }

        let len = PALETTE.len();
        self.color_index = match action {
            ColorAction::Next => (self.color_index + 1) % len,
            ColorAction::Prev => (self.color_index + len - 1) % len,
        };
        self.last_color_change = Some(now);
        info!("Color gesture: {} -> {}", action.name(), self.color_name());
        Some(action)
    }

    /// Current mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Current palette index.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Current pen color.
    pub fn color(&self) -> Color {
        palette_color(self.color_index)
    }

    /// Name of the current pen color.
    pub fn color_name(&self) -> &'static str {
        palette_name(self.color_index)
    }

    /// Jumps directly to a palette index, bypassing gesture debouncing.
    ///
    /// Used by the control plane; the index must come from
    /// [`palette_index`](crate::draw::color::palette_index).
    pub fn set_color_index(&mut self, index: usize) {
        self.color_index = index % PALETTE.len();
    }
}
