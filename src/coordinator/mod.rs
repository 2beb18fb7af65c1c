//! Transition coordination module
//!
//! This module owns the state machine at the core of a presentation
//! session: the current slide index, the repeating advance timer, and the
//! per-slide progress slots, plus the runtime that drives it all from a
//! single thread.
//!
//! # Overview
//!
//! The coordination system provides:
//! - **Automatic advancement** on a repeating timer with a configurable
//!   period
//! - **Manual navigation** (forward/backward) reconciled with the timer so
//!   a user who just interacted is not auto-advanced a moment later
//! - **Progress slot synchronization**: the indicator row always matches
//!   the displayed slide (completed before, running at, idle after)
//! - **Command output**: discrete render/slot-state commands on a channel,
//!   leaving animation timing to the presentation layer
//!
//! # Architecture
//!
//! - [`TransitionCoordinator`]: the state machine; synchronous, single-owner
//! - [`AdvanceTimer`]: background-thread repeating timer with
//!   generation-tagged ticks
//! - [`CoordinatorRuntime`] / [`CoordinatorHandle`]: pump thread owning the
//!   coordinator and the cloneable way in
//!
//! # Event Flow
//!
//! ```text
//! NavigationController → InputEvent  → pump thread ┐
//! AdvanceTimer (thread) → TimerTick  → pump thread ┤→ TransitionCoordinator
//!                                                  │        ↓
//!                                     RenderCommand channel → presentation
//! ```
//!
//! # Tick reconciliation
//!
//! Every time the timer is armed the coordinator bumps a generation
//! counter and stamps it on the schedule; ticks carry it back. A tick
//! whose generation no longer matches — because the user navigated (fresh
//! period) or the session stopped — is discarded before it can touch
//! state. `stop()` therefore guarantees that no tick mutates state after
//! it returns, without any cross-thread locking.

pub mod runtime;
pub mod timer;
pub mod transition;

pub use runtime::{CoordinatorHandle, CoordinatorRuntime, InputEvent};
pub use timer::{AdvanceTimer, TimerSchedule};
pub use transition::{Direction, RenderCommand, TimerTick, TransitionCoordinator};
