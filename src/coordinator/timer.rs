//! Advance timer implementation
//!
//! A background-thread repeating timer controlled over a channel. The
//! timer never touches coordinator state itself: each tick is tagged with
//! the generation it was armed under and handed to an injected sink, which
//! is expected to marshal it onto the coordinator's owning context. The
//! coordinator discards ticks whose generation no longer matches, so a
//! tick already in flight when the timer is cancelled or re-armed is
//! harmless.
//!
//! Cadence: deadlines advance by one period from the previous deadline,
//! keeping a fixed rhythm. A tick that fires later than the permitted
//! leeway re-anchors the cadence to the current instant instead of
//! producing a burst of catch-up ticks.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Schedule parameters for arming the timer
#[derive(Debug, Clone, Copy)]
pub struct TimerSchedule {
    /// Generation stamped on every tick fired under this schedule
    pub generation: u64,
    /// Delay before the first tick
    pub first_delay: Duration,
    /// Interval between subsequent ticks
    pub period: Duration,
    /// Permitted tick lateness before the cadence re-anchors
    pub leeway: Duration,
}

enum TimerControl {
    Arm(TimerSchedule),
    Cancel,
}

/// Repeating advance timer running on its own thread
///
/// Dropping the timer disconnects the control channel; the thread notices
/// and exits, and `Drop` joins it.
pub struct AdvanceTimer {
    control: Option<mpsc::Sender<TimerControl>>,
    handle: Option<JoinHandle<()>>,
}

impl AdvanceTimer {
    /// Spawn the timer thread, initially disarmed
    ///
    /// `sink` receives the generation of each fired tick and must deliver
    /// it to the owning context (typically by sending into the pump's
    /// channel).
    pub fn spawn<F>(sink: F) -> Self
    where
        F: Fn(u64) + Send + 'static,
    {
        let (control_tx, control_rx) = mpsc::channel();
        let handle = thread::spawn(move || run_timer(&control_rx, &sink));
        Self {
            control: Some(control_tx),
            handle: Some(handle),
        }
    }

    /// Arm (or re-arm) the timer with a fresh schedule
    ///
    /// Replaces any previous schedule; the previous generation's pending
    /// tick, if it already fired, is filtered out by the coordinator.
    pub fn arm(&self, schedule: TimerSchedule) {
        self.send(TimerControl::Arm(schedule));
    }

    /// Disarm the timer
    pub fn cancel(&self) {
        self.send(TimerControl::Cancel);
    }

    fn send(&self, control: TimerControl) {
        if let Some(tx) = &self.control
            && let Err(e) = tx.send(control)
        {
            warn!("Advance timer thread is gone; control message dropped: {e}");
        }
    }
}

impl Drop for AdvanceTimer {
    fn drop(&mut self) {
        // Disconnect the control channel so the thread unblocks and exits
        drop(self.control.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct Armed {
    generation: u64,
    deadline: Instant,
    period: Duration,
    leeway: Duration,
}

impl Armed {
    fn new(schedule: TimerSchedule) -> Self {
        Self {
            generation: schedule.generation,
            deadline: Instant::now() + schedule.first_delay,
            period: schedule.period,
            leeway: schedule.leeway,
        }
    }
}

fn run_timer<F: Fn(u64)>(control: &mpsc::Receiver<TimerControl>, sink: &F) {
    let mut armed: Option<Armed> = None;
    loop {
        let Some(state) = &mut armed else {
            // Disarmed: block until the next control message
            match control.recv() {
                Ok(TimerControl::Arm(schedule)) => armed = Some(Armed::new(schedule)),
                Ok(TimerControl::Cancel) => {}
                Err(_) => break,
            }
            continue;
        };

        let now = Instant::now();
        if now >= state.deadline {
            debug!(generation = state.generation, "Advance tick fired");
            sink(state.generation);

            let next = state.deadline + state.period;
            state.deadline = if now > state.deadline + state.leeway {
                // Lagging beyond the leeway: re-anchor instead of bursting
                now + state.period
            } else {
                next
            };
            continue;
        }

        match control.recv_timeout(state.deadline - now) {
            Ok(TimerControl::Arm(schedule)) => armed = Some(Armed::new(schedule)),
            Ok(TimerControl::Cancel) => armed = None,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Deadline reached; the tick fires on the next iteration
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Advance timer thread exited");
}
