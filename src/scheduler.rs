//! Autosave scheduling state machine.
//!
//! A single timer decides when saves fire. The host drives it by calling
//! [`AutosaveScheduler::tick`] from its own heartbeat; the scheduler never
//! spawns threads or performs I/O on the tick path. While the host is in
//! an incompatible runtime mode a due fire is held, not dropped: the next
//! fire time stays put until the host is free again.

use crate::host::Host;
use crate::settings::{SaveMode, Settings};
use std::time::{Duration, Instant};
use tracing::debug;

/// Scheduler phase.
///
/// `Due` and `Saving` are transient within a single tick; after every tick
/// the scheduler rests in `Idle` or `Suspended`. Every entered phase has
/// an unconditional exit, so the machine cannot wedge mid-save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the timer to elapse.
    Idle,
    /// Timer elapsed; save about to be attempted this tick.
    Due,
    /// Timer elapsed but the host is busy; fire is held, not rescheduled.
    Suspended,
    /// Save operations are being invoked.
    Saving,
}

/// Timer-driven save scheduler.
#[derive(Debug)]
pub struct AutosaveScheduler {
    /// When the next save fires. Always derived as
    /// `(last fire or settings change) + interval`.
    next_fire_at: Instant,
    /// Deduplicates the suspension notice: true only while suspended.
    suspended_warning_logged: bool,
    phase: Phase,
}

impl AutosaveScheduler {
    /// Create a scheduler armed from `now` with the configured interval.
    pub fn new(now: Instant, settings: &Settings) -> Self {
        Self {
            next_fire_at: now + Duration::from_secs(settings.interval_secs),
            suspended_warning_logged: false,
            phase: Phase::Idle,
        }
    }

    /// When the next save will fire.
    pub fn next_fire_at(&self) -> Instant {
        self.next_fire_at
    }

    /// Current phase (after the most recent tick).
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` when the timer has elapsed at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_fire_at
    }

    /// Re-arm from `now`, independent of current phase.
    ///
    /// Called on every settings apply and on enable-toggle so that a
    /// stale due fire from before the change cannot go off immediately.
    pub fn rearm(&mut self, now: Instant, settings: &Settings) {
        self.next_fire_at = now + Duration::from_secs(settings.interval_secs);
        self.suspended_warning_logged = false;
        self.phase = Phase::Idle;
    }

    /// Evaluate one host heartbeat. O(1), no I/O.
    ///
    /// Fires at most one save. Host-reported save failures are the host's
    /// to log; the scheduler re-arms regardless.
    pub fn tick(&mut self, now: Instant, settings: &Settings, host: &mut dyn Host) {
        if !settings.enabled {
            self.suspended_warning_logged = false;
            self.phase = Phase::Idle;
            return;
        }

        if !self.is_due(now) {
            self.phase = Phase::Idle;
            return;
        }
        self.phase = Phase::Due;

        if host.is_busy() {
            if !self.suspended_warning_logged {
                if settings.show_debug_logs {
                    debug!("save due but host is busy; holding until it finishes");
                }
                self.suspended_warning_logged = true;
            }
            // next_fire_at deliberately untouched: the fire is delayed,
            // never dropped.
            self.phase = Phase::Suspended;
            return;
        }

        self.suspended_warning_logged = false;
        self.phase = Phase::Saving;

        if settings.show_debug_logs {
            debug!(mode = %settings.save_mode, "autosave starting");
        }

        let message = match settings.save_mode {
            SaveMode::Scene => {
                host.save_open_scenes();
                "Saved open scenes."
            }
            SaveMode::Assets => {
                host.save_pending_assets();
                "Saved pending assets."
            }
            SaveMode::All => {
                host.save_open_scenes();
                host.save_pending_assets();
                "Saved scenes and assets."
            }
        };

        if settings.show_notifications {
            host.notify(message);
        }
        if settings.show_debug_logs {
            debug!("autosave finished");
        }

        self.next_fire_at = now + Duration::from_secs(settings.interval_secs);
        self.phase = Phase::Idle;
    }
}
