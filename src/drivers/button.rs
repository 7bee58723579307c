//! Polled, debounced button driver with long-press timing.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  The control loop
//! samples the pin once per tick (see [`super::input`]) and feeds the level
//! into [`DebouncedEdgeDetector::poll`].
//!
//! ## Debounce
//!
//! Sample-then-recheck: a `Released → Asserted` transition opens a settle
//! window, and the press is confirmed only if every sample up to the end of
//! the window still reads asserted.  Release is read directly, without a
//! settle window; a bounced release that briefly looks like a re-press is
//! absorbed by the state machines' re-trigger guard.
//!
//! ## Gesture classification
//!
//! | Gesture          | Condition                         | Result              |
//! |------------------|-----------------------------------|---------------------|
//! | Short press      | Released before the threshold     | `ShortPress`        |
//! | Long press       | Held >= threshold (3 s default)   | `LongPressReached`  |

use log::{debug, info};

use super::input::InputLevel;

/// Confirmed button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEvent {
    /// Press survived the settle window.  `at_ms` is when the edge was first seen.
    PressConfirmed { at_ms: u64 },
    /// Button released after a confirmed press.
    ReleaseConfirmed { held_ms: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Idle,
    Settling { since_ms: u64 },
    Held { since_ms: u64 },
}

pub struct DebouncedEdgeDetector {
    debounce_ms: u64,
    last_level: InputLevel,
    state: DetectorState,
    bounces_rejected: u32,
}

impl DebouncedEdgeDetector {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms: debounce_ms as u64,
            last_level: InputLevel::Released,
            state: DetectorState::Idle,
            bounces_rejected: 0,
        }
    }

    /// Feed one sample.  Call once per control tick with a monotonic `now_ms`.
    pub fn poll(&mut self, level: InputLevel, now_ms: u64) -> Option<EdgeEvent> {
        let edge = match self.state {
            DetectorState::Idle => {
                if self.last_level == InputLevel::Released && level == InputLevel::Asserted {
                    self.state = DetectorState::Settling { since_ms: now_ms };
                }
                None
            }

            DetectorState::Settling { since_ms } => {
                if level == InputLevel::Released {
                    self.state = DetectorState::Idle;
                    self.bounces_rejected = self.bounces_rejected.saturating_add(1);
                    debug!(
                        "button: bounce rejected after {} ms",
                        now_ms.saturating_sub(since_ms)
                    );
                    None
                } else if now_ms.saturating_sub(since_ms) >= self.debounce_ms {
                    self.state = DetectorState::Held { since_ms };
                    Some(EdgeEvent::PressConfirmed { at_ms: since_ms })
                } else {
                    None
                }
            }

            DetectorState::Held { since_ms } => {
                if level == InputLevel::Released {
                    self.state = DetectorState::Idle;
                    Some(EdgeEvent::ReleaseConfirmed {
                        held_ms: now_ms.saturating_sub(since_ms),
                    })
                } else {
                    None
                }
            }
        };

        // Unconditional so a missed edge can never carry over to the next poll.
        self.last_level = level;
        edge
    }

    /// True between a confirmed press and its release.
    pub fn is_held(&self) -> bool {
        matches!(self.state, DetectorState::Held { .. })
    }

    /// Candidate presses discarded as contact bounce.
    pub fn bounces_rejected(&self) -> u32 {
        self.bounces_rejected
    }
}

// ── Long-press timing ─────────────────────────────────────────

/// One timed press, from confirmation to release or threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressSession {
    pub start_ms: u64,
    pub active: bool,
}

/// Outcome of a timed press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressClass {
    ShortPress { held_ms: u64 },
    LongPressReached { held_ms: u64 },
}

/// Measures a [`PressSession`] against the long-press threshold.
///
/// Evaluated once per poll by comparing elapsed time, never by sleeping,
/// so sampling and blink feedback keep running while the user holds.
pub struct LongPressTimer {
    threshold_ms: u64,
    session: Option<PressSession>,
}

impl LongPressTimer {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            threshold_ms: threshold_ms as u64,
            session: None,
        }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// Open or close a session from a confirmed edge.
    ///
    /// A release first seen on or after the threshold poll still counts as
    /// the long press: `held_ms` of a `ShortPress` is always below threshold.
    pub fn on_edge(&mut self, edge: EdgeEvent) -> Option<PressClass> {
        match edge {
            EdgeEvent::PressConfirmed { at_ms } => {
                if self.session.is_some() {
                    debug!("button: replacing stale press session");
                }
                self.session = Some(PressSession {
                    start_ms: at_ms,
                    active: true,
                });
                None
            }
            EdgeEvent::ReleaseConfirmed { held_ms } => match self.session.take() {
                Some(session) if session.active && held_ms >= self.threshold_ms => {
                    info!("button: long press released at {} ms", held_ms);
                    Some(PressClass::LongPressReached { held_ms })
                }
                Some(session) if session.active => Some(PressClass::ShortPress { held_ms }),
                _ => None,
            },
        }
    }

    /// Check the running session against the threshold.  Fires at most once
    /// per session: the session is closed as soon as the threshold is met.
    pub fn evaluate(&mut self, now_ms: u64) -> Option<PressClass> {
        let session = self.session.as_mut()?;
        if !session.active {
            return None;
        }

        let held_ms = now_ms.saturating_sub(session.start_ms);
        if held_ms < self.threshold_ms {
            return None;
        }

        session.active = false;
        self.session = None;
        info!("button: long press reached after {} ms", held_ms);
        Some(PressClass::LongPressReached { held_ms })
    }

    pub fn session(&self) -> Option<PressSession> {
        self.session
    }

    /// True while a press is being timed and has not reached the threshold.
    pub fn is_timing(&self) -> bool {
        self.session.is_some_and(|s| s.active)
    }
}
