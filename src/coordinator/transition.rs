//! Transition coordinator implementation
//!
//! This module implements the state machine at the center of a
//! presentation session: it owns the current slide index, the advance
//! timer, and the per-slide progress slots, and it reconciles automatic
//! ticks with manual navigation so the two can never disagree about what
//! is on screen.
//!
//! All methods are synchronous and must be invoked from a single owning
//! context (the runtime pump, or the test thread). The only asynchronous
//! collaborator is the [`AdvanceTimer`], whose ticks re-enter through
//! [`TransitionCoordinator::handle_tick`] carrying the generation they
//! were armed under; a stale generation means the timer was re-armed or
//! stopped after the tick fired, and the tick is discarded.

use crate::config::TimingConfig;
use crate::coordinator::timer::{AdvanceTimer, TimerSchedule};
use crate::deck::{Slide, SlideDeck};
use crate::error::{Result, SlideLoopError};
use crate::progress::{ProgressSlot, SlotState};
use std::sync::Arc;
use std::sync::mpsc;
use tracing::{debug, info, warn};

/// Direction of a manual navigation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Advance to the next slide (right-half tap, next button, timer tick)
    Forward,
    /// Rewind to the previous slide (left-half tap)
    Backward,
}

/// Commands emitted to the presentation layer
///
/// The coordinator signals discrete state only; cross-fades and fill
/// animations are the presentation layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Display the given slide
    RenderSlide {
        /// Position of the slide in the deck
        index: usize,
        /// The slide content to display
        slide: Slide,
    },
    /// A progress slot changed state
    SlotStateChanged {
        /// Position of the slot (aligned to the deck)
        index: usize,
        /// The slot's new state
        state: SlotState,
    },
}

/// Tick identifier delivered by the advance timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    /// Generation the timer was armed under when this tick fired
    pub generation: u64,
}

/// Where an advance originated; manual advances re-arm the timer, ticks
/// ride the repeating schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdvanceOrigin {
    Timer,
    User,
}

/// Coordinator for timed slide transitions and progress slot state
///
/// Owns the current index, the advance timer, and one [`ProgressSlot`] per
/// slide. Emits [`RenderCommand`]s on the output channel supplied at
/// construction.
pub struct TransitionCoordinator {
    deck: Arc<SlideDeck>,
    slots: Vec<ProgressSlot>,
    /// Current slide position; `None` until the first reveal
    current: Option<usize>,
    /// Whether the advance timer is meant to be live
    running: bool,
    /// Tick-validity epoch; bumped on every re-arm and on stop
    generation: u64,
    timing: TimingConfig,
    timer: AdvanceTimer,
    output: mpsc::Sender<RenderCommand>,
}

impl TransitionCoordinator {
    /// Create a coordinator for the given deck
    ///
    /// Fails fast with [`SlideLoopError::EmptyDeck`] for a zero-slide deck
    /// and with [`SlideLoopError::ConfigError`] for invalid timing. The
    /// timer thread is spawned disarmed; `tick_sink` receives the
    /// generation of each fired tick and must marshal it back to the
    /// owning context, which re-enters through [`Self::handle_tick`].
    pub fn new<F>(
        deck: Arc<SlideDeck>,
        timing: TimingConfig,
        output: mpsc::Sender<RenderCommand>,
        tick_sink: F,
    ) -> Result<Self>
    where
        F: Fn(u64) + Send + 'static,
    {
        if deck.is_empty() {
            return Err(SlideLoopError::EmptyDeck);
        }
        timing.validate()?;

        let slots = vec![ProgressSlot::new(); deck.len()];
        let timer = AdvanceTimer::spawn(tick_sink);

        info!(
            "Transition coordinator created for {} slides, period {:?}",
            deck.len(),
            timing.period()
        );

        Ok(Self {
            deck,
            slots,
            current: None,
            running: false,
            generation: 0,
            timing,
            timer,
            output,
        })
    }

    /// Current slide position, `None` before the first reveal
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Whether the coordinator is live (timer armed)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// State of the progress slot at `index`, if it exists
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(ProgressSlot::state)
    }

    /// Snapshot of all slot states, aligned to the deck
    pub fn slot_states(&self) -> Vec<SlotState> {
        self.slots.iter().map(ProgressSlot::state).collect()
    }

    /// Start (or resume) automatic advancement
    ///
    /// Performs the immediate first reveal synchronously: a cold start
    /// advances onto slide 0; a resume re-renders the current slide and
    /// re-starts its slot. Then arms the repeating timer so the next
    /// automatic tick is one full period away. No-op while already
    /// running.
    pub fn start(&mut self) {
        if self.running {
            debug!("start() while already running; ignored");
            return;
        }
        self.running = true;

        match self.current {
            None => {
                info!("Starting presentation from the first slide");
                self.advance();
            }
            Some(index) => {
                info!("Resuming presentation at slide {index}");
                self.reveal(index);
            }
        }

        self.rearm_timer();
    }

    /// Stop automatic advancement
    ///
    /// Cancels the timer without touching the index or slot states, so a
    /// later `start()` resumes in place. Bumping the generation here
    /// guarantees that a tick already in flight is discarded: after
    /// `stop()` returns, no command is emitted until the next input.
    /// No-op while already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            debug!("stop() while already stopped; ignored");
            return;
        }
        info!("Stopping automatic advancement");
        self.running = false;
        self.generation = self.generation.wrapping_add(1);
        self.timer.cancel();
    }

    /// Consume a manual navigation event
    ///
    /// Valid whether running or stopped; a direction event while stopped
    /// updates index, slots, and render output but leaves the timer
    /// disarmed. While running, any manual interaction re-arms the timer
    /// with a fresh full period.
    pub fn handle_direction(&mut self, direction: Direction) {
        debug!("Direction event: {direction:?}");
        match direction {
            Direction::Forward => self.advance(),
            Direction::Backward => self.rewind(),
        }
        if self.running {
            self.rearm_timer();
        }
    }

    /// Apply a timer tick
    ///
    /// Identical to [`Direction::Forward`] except that the repeating timer
    /// keeps its own cadence instead of being re-armed. Ticks from a
    /// cancelled or superseded schedule are discarded here.
    pub fn handle_tick(&mut self, generation: u64) {
        if !self.running || generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                running = self.running,
                "Discarding stale advance tick"
            );
            return;
        }
        self.advance_from(AdvanceOrigin::Timer);
    }

    fn advance(&mut self) {
        self.advance_from(AdvanceOrigin::User);
    }

    /// The single advance path shared by ticks and manual Forward events
    fn advance_from(&mut self, origin: AdvanceOrigin) {
        let next = match self.current {
            None => 0,
            Some(index) => {
                if self.slots[index].complete() {
                    self.emit_slot(index);
                }
                (index + 1) % self.deck.len()
            }
        };

        let wrapped = self.current.is_some() && next == 0;
        if wrapped {
            debug!("Wrapping past the last slide; resetting all slots");
            for index in 0..self.slots.len() {
                if self.slots[index].reset() {
                    self.emit_slot(index);
                }
            }
        }

        debug!("Advancing to slide {next} (origin: {origin:?})");
        self.reveal(next);
    }

    /// Rewind to the previous slide, clamped at slide 0
    ///
    /// The slide being left and the one being returned to both reset to
    /// `Idle` before the target restarts, so the target's indicator
    /// animates from empty again.
    fn rewind(&mut self) {
        let target = match self.current {
            None => 0,
            Some(index) => {
                if self.slots[index].reset() {
                    self.emit_slot(index);
                }
                if index > 0 {
                    if self.slots[index - 1].reset() {
                        self.emit_slot(index - 1);
                    }
                    index - 1
                } else {
                    0
                }
            }
        };

        debug!("Rewinding to slide {target}");
        self.reveal(target);
    }

    /// Make `index` the current slide: render it and start its slot
    fn reveal(&mut self, index: usize) {
        self.current = Some(index);

        let slide = self
            .deck
            .get(index)
            .expect("advance arithmetic stays within deck bounds")
            .clone();
        self.emit(RenderCommand::RenderSlide { index, slide });

        if self.slots[index].start() {
            self.emit_slot(index);
        }

        #[cfg(debug_assertions)]
        self.assert_slot_partition();
    }

    /// Re-arm the timer with a fresh full period under a new generation
    fn rearm_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.timer.arm(TimerSchedule {
            generation: self.generation,
            first_delay: self.timing.period(),
            period: self.timing.period(),
            leeway: self.timing.startup_leeway(),
        });
    }

    fn emit_slot(&self, index: usize) {
        self.emit(RenderCommand::SlotStateChanged {
            index,
            state: self.slots[index].state(),
        });
    }

    fn emit(&self, command: RenderCommand) {
        if let Err(e) = self.output.send(command) {
            warn!("Render command receiver disconnected: {e}");
        }
    }

    /// Slots strictly before the current index must be `Complete`, the
    /// current one `Running`, everything after `Idle`.
    #[cfg(debug_assertions)]
    fn assert_slot_partition(&self) {
        let Some(current) = self.current else {
            return;
        };
        for (index, slot) in self.slots.iter().enumerate() {
            let expected = match index.cmp(&current) {
                std::cmp::Ordering::Less => SlotState::Complete,
                std::cmp::Ordering::Equal => SlotState::Running,
                std::cmp::Ordering::Greater => SlotState::Idle,
            };
            assert_eq!(
                slot.state(),
                expected,
                "slot {index} out of step with current slide {current}"
            );
        }
    }
}
