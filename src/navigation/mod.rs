//! Navigation input translation
//!
//! External-facing shim between raw presentation-layer input and the
//! coordinator's typed events. The presentation layer reports taps by
//! x-position, button presses, and lifecycle callbacks; this module turns
//! them into [`InputEvent`]s. Screen presentation itself (modals,
//! transitions, view composition) stays outside the core.
//!
//! Tap rule: a tap on the right half of the viewport advances, anything
//! else (including the exact midpoint) rewinds.

use crate::coordinator::{CoordinatorHandle, Direction, InputEvent};
use tracing::{debug, warn};

/// Translates raw input into coordinator events
pub struct NavigationController {
    coordinator: CoordinatorHandle,
}

impl NavigationController {
    /// Wrap a session handle
    pub fn new(coordinator: CoordinatorHandle) -> Self {
        Self { coordinator }
    }

    /// Translate a tap at `x` within a viewport of `width`
    ///
    /// Right half advances, left half (midpoint included) rewinds.
    /// Degenerate widths are logged and ignored.
    pub fn handle_tap(&self, x: f64, width: f64) {
        if !width.is_finite() || width <= 0.0 || !x.is_finite() {
            warn!("Ignoring tap with degenerate geometry (x: {x}, width: {width})");
            return;
        }

        let direction = if x > width / 2.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        debug!("Tap at {x}/{width} -> {direction:?}");
        self.coordinator.send(InputEvent::Direction(direction));
    }

    /// Next-button press: same advance path as a right-half tap
    pub fn next_pressed(&self) {
        self.coordinator.send(InputEvent::Direction(Direction::Forward));
    }

    /// The presentation became visible
    pub fn appeared(&self) {
        self.coordinator.send(InputEvent::Start);
    }

    /// The presentation was dismissed or moved offscreen
    pub fn dismissed(&self) {
        self.coordinator.send(InputEvent::Stop);
    }
}
