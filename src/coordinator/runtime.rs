//! Coordinator runtime: the owning context for a presentation session
//!
//! The runtime moves the [`TransitionCoordinator`] onto a dedicated pump
//! thread, which is the single context that mutates session state. Input
//! events arrive from any thread through a cloneable
//! [`CoordinatorHandle`]; timer ticks arrive on their own channel, posted
//! there by the timer's sink closure. The pump blocks on the input
//! channel with a short timeout and drains pending ticks each iteration,
//! so ticks and direction events are applied strictly sequentially and
//! can never race.
//!
//! No locking is involved anywhere: the pump owns the coordinator by
//! move, and every other participant only sends messages.

use crate::config::TimingConfig;
use crate::coordinator::transition::{
    Direction, RenderCommand, TimerTick, TransitionCoordinator,
};
use crate::deck::SlideDeck;
use crate::error::Result;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long the pump waits for input before draining pending timer ticks
const TICK_DRAIN_INTERVAL: Duration = Duration::from_millis(25);

/// Input events consumed by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Begin (or resume) automatic advancement
    Start,
    /// Pause automatic advancement in place
    Stop,
    /// Manual navigation
    Direction(Direction),
}

enum PumpMessage {
    Event(InputEvent),
    Shutdown,
}

/// Cloneable sender for driving a running session from any thread
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<PumpMessage>,
}

impl CoordinatorHandle {
    /// Deliver an input event to the session
    pub fn send(&self, event: InputEvent) {
        if let Err(e) = self.tx.send(PumpMessage::Event(event)) {
            warn!("Coordinator runtime is gone; input event dropped: {e}");
        }
    }

    /// Begin (or resume) automatic advancement
    pub fn start(&self) {
        self.send(InputEvent::Start);
    }

    /// Pause automatic advancement in place
    pub fn stop(&self) {
        self.send(InputEvent::Stop);
    }

    /// Advance to the next slide
    pub fn forward(&self) {
        self.send(InputEvent::Direction(Direction::Forward));
    }

    /// Rewind to the previous slide
    pub fn backward(&self) {
        self.send(InputEvent::Direction(Direction::Backward));
    }

    /// End the session; the pump thread drops the coordinator and exits
    pub fn shutdown(&self) {
        if self.tx.send(PumpMessage::Shutdown).is_err() {
            debug!("Coordinator runtime already shut down");
        }
    }
}

/// A presentation session running on its own pump thread
pub struct CoordinatorRuntime {
    handle: CoordinatorHandle,
    thread: Option<JoinHandle<()>>,
}

impl CoordinatorRuntime {
    /// Build the coordinator and spawn the pump thread that owns it
    ///
    /// `output` receives the session's [`RenderCommand`]s. Fails fast on
    /// an empty deck or invalid timing, before any thread is spawned.
    pub fn spawn(
        deck: Arc<SlideDeck>,
        timing: TimingConfig,
        output: mpsc::Sender<RenderCommand>,
    ) -> Result<Self> {
        let (input_tx, input_rx) = mpsc::channel::<PumpMessage>();
        let (tick_tx, tick_rx) = mpsc::channel::<TimerTick>();

        let coordinator = TransitionCoordinator::new(deck, timing, output, move |generation| {
            // Marshal the tick onto the pump's queue; the pump applies it
            let _ = tick_tx.send(TimerTick { generation });
        })?;

        let thread = std::thread::spawn(move || run_pump(coordinator, &input_rx, &tick_rx));

        Ok(Self {
            handle: CoordinatorHandle { tx: input_tx },
            thread: Some(thread),
        })
    }

    /// Handle for driving the session
    pub fn handle(&self) -> CoordinatorHandle {
        self.handle.clone()
    }

    /// End the session and wait for the pump thread to exit
    pub fn shutdown(mut self) {
        self.handle.shutdown();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("Coordinator pump thread panicked during shutdown");
        }
    }
}

impl Drop for CoordinatorRuntime {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.handle.shutdown();
            let _ = thread.join();
        }
    }
}

fn run_pump(
    mut coordinator: TransitionCoordinator,
    input_rx: &mpsc::Receiver<PumpMessage>,
    tick_rx: &mpsc::Receiver<TimerTick>,
) {
    use std::sync::mpsc::{RecvTimeoutError, TryRecvError};

    info!("Entering coordinator pump (input events + advance ticks)");
    loop {
        // Wait for input with a timeout so pending ticks still drain promptly
        match input_rx.recv_timeout(TICK_DRAIN_INTERVAL) {
            Ok(PumpMessage::Event(event)) => apply_input(&mut coordinator, event),
            Ok(PumpMessage::Shutdown) => {
                debug!("Shutdown requested");
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                // Timeout is normal; fall through to the tick drain
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("All coordinator handles dropped without shutdown; exiting pump");
                break;
            }
        }

        // Apply all pending ticks (non-blocking drain)
        loop {
            match tick_rx.try_recv() {
                Ok(tick) => coordinator.handle_tick(tick.generation),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The timer (and its sink) lives inside the coordinator,
                    // so this only happens during teardown
                    break;
                }
            }
        }
    }
    info!("Coordinator pump exited");
}

fn apply_input(coordinator: &mut TransitionCoordinator, event: InputEvent) {
    match event {
        InputEvent::Start => coordinator.start(),
        InputEvent::Stop => coordinator.stop(),
        InputEvent::Direction(direction) => coordinator.handle_direction(direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{ImageHandle, Slide};
    use crate::progress::SlotState;

    fn deck(n: usize) -> Arc<SlideDeck> {
        let slides = (0..n)
            .map(|i| Slide::new(ImageHandle::new(format!("img/{i}")), format!("Slide {i}")))
            .collect();
        Arc::new(SlideDeck::new(slides))
    }

    fn long_timing() -> TimingConfig {
        TimingConfig {
            period_ms: 60_000,
            startup_leeway_ms: 1000,
        }
    }

    fn recv(rx: &mpsc::Receiver<RenderCommand>) -> RenderCommand {
        rx.recv_timeout(Duration::from_secs(2))
            .expect("expected a render command")
    }

    #[test]
    fn test_spawn_rejects_empty_deck() {
        let (tx, _rx) = mpsc::channel();
        assert!(CoordinatorRuntime::spawn(deck(0), long_timing(), tx).is_err());
    }

    #[test]
    fn test_start_through_runtime_renders_first_slide() {
        let (tx, rx) = mpsc::channel();
        let runtime = CoordinatorRuntime::spawn(deck(3), long_timing(), tx).unwrap();

        runtime.handle().start();
        let first = recv(&rx);
        assert!(matches!(
            first,
            RenderCommand::RenderSlide { index: 0, .. }
        ));
        assert_eq!(
            recv(&rx),
            RenderCommand::SlotStateChanged {
                index: 0,
                state: SlotState::Running,
            }
        );

        runtime.shutdown();
    }

    #[test]
    fn test_events_are_applied_in_order() {
        let (tx, rx) = mpsc::channel();
        let runtime = CoordinatorRuntime::spawn(deck(3), long_timing(), tx).unwrap();
        let handle = runtime.handle();

        handle.start();
        handle.forward();
        handle.forward();

        let mut render_indices = Vec::new();
        while render_indices.len() < 3 {
            if let RenderCommand::RenderSlide { index, .. } = recv(&rx) {
                render_indices.push(index);
            }
        }
        assert_eq!(render_indices, vec![0, 1, 2]);

        runtime.shutdown();
    }

    #[test]
    fn test_auto_advance_fires_without_input() {
        let (tx, rx) = mpsc::channel();
        let timing = TimingConfig {
            period_ms: 50,
            startup_leeway_ms: 50,
        };
        let runtime = CoordinatorRuntime::spawn(deck(3), timing, tx).unwrap();

        runtime.handle().start();

        let mut render_indices = Vec::new();
        while render_indices.len() < 2 {
            if let RenderCommand::RenderSlide { index, .. } = recv(&rx) {
                render_indices.push(index);
            }
        }
        // Slide 0 from start(), slide 1 from the repeating timer
        assert_eq!(render_indices, vec![0, 1]);

        runtime.shutdown();
    }

    #[test]
    fn test_stop_silences_output() {
        let (tx, rx) = mpsc::channel();
        let timing = TimingConfig {
            period_ms: 40,
            startup_leeway_ms: 40,
        };
        let runtime = CoordinatorRuntime::spawn(deck(3), timing, tx).unwrap();
        let handle = runtime.handle();

        handle.start();
        handle.stop();

        // Drain whatever was emitted before the stop was applied, then
        // verify silence over several would-be periods
        while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

        runtime.shutdown();
    }

    #[test]
    fn test_shutdown_is_clean_while_running() {
        let (tx, rx) = mpsc::channel();
        let timing = TimingConfig {
            period_ms: 30,
            startup_leeway_ms: 30,
        };
        let runtime = CoordinatorRuntime::spawn(deck(2), timing, tx).unwrap();
        runtime.handle().start();
        let _ = recv(&rx);
        runtime.shutdown();
    }
}
