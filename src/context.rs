//! Top-level controller owning all autosave state.
//!
//! The host creates one [`SchedulerContext`] at startup and keeps it on
//! its UI/tick thread. Everything the settings panel and the heartbeat
//! need goes through this one object; there are no module globals.

use crate::error::Result;
use crate::host::{Host, RestartChoice};
use crate::prefs::PrefStore;
use crate::scheduler::AutosaveScheduler;
use crate::settings::Settings;
use crate::update::{UpdateEndpoints, UpdateOutcome, UpdateService, UpdateState};
use std::time::Instant;

/// Single owner of settings, the save scheduler, and the update service.
pub struct SchedulerContext {
    settings: Settings,
    scheduler: AutosaveScheduler,
    updates: UpdateService,
}

impl SchedulerContext {
    /// Create a context from explicit settings, armed from `now`.
    pub fn new(now: Instant, settings: Settings, endpoints: UpdateEndpoints) -> Self {
        let scheduler = AutosaveScheduler::new(now, &settings);
        Self {
            settings,
            scheduler,
            updates: UpdateService::new(endpoints),
        }
    }

    /// Create a context from persisted settings (defaults when absent).
    pub fn load(now: Instant, store: &dyn PrefStore, endpoints: UpdateEndpoints) -> Self {
        Self::new(now, Settings::load(store), endpoints)
    }

    /// Live settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The save scheduler.
    pub fn scheduler(&self) -> &AutosaveScheduler {
        &self.scheduler
    }

    /// Current update availability state.
    pub fn update_state(&self) -> &UpdateState {
        self.updates.state()
    }

    /// One host heartbeat: evaluate the save timer, then drain at most
    /// one completed update operation.
    pub fn tick(&mut self, now: Instant, host: &mut dyn Host) {
        self.scheduler.tick(now, &self.settings, host);

        if let Some(outcome) = self.updates.poll() {
            self.handle_update_outcome(outcome, host);
        }
    }

    /// Apply new settings: validate, persist, swap live, re-arm from `now`.
    ///
    /// Re-arming is unconditional so interval changes and enable-toggles
    /// take effect from the moment of the change, never from the last
    /// fire.
    ///
    /// # Errors
    ///
    /// Returns an error when the interval is out of range or the store
    /// cannot be flushed; the live settings stay unchanged in that case.
    pub fn apply_settings(
        &mut self,
        now: Instant,
        settings: Settings,
        store: &mut dyn PrefStore,
    ) -> Result<()> {
        settings.save(store)?;
        self.settings = settings;
        self.scheduler.rearm(now, &self.settings);
        Ok(())
    }

    /// User action: start a version check.
    ///
    /// # Errors
    ///
    /// Returns an error when another update operation is in flight.
    pub fn check_for_updates(&mut self) -> Result<()> {
        self.updates.begin_check()
    }

    /// User action: download the remote payload and replace the artifact.
    ///
    /// # Errors
    ///
    /// Returns an error when no update is available or another operation
    /// is in flight.
    pub fn download_and_update(&mut self) -> Result<()> {
        self.updates.begin_download()
    }

    fn handle_update_outcome(&mut self, outcome: UpdateOutcome, host: &mut dyn Host) {
        match outcome {
            UpdateOutcome::Checked { latest, available } => {
                if available {
                    host.notify(&format!("New version available: {latest}. Please update!"));
                } else {
                    host.notify("You have the latest version.");
                }
            }
            UpdateOutcome::CheckFailed(e) => {
                host.notify(&format!("Update check failed: {e}"));
            }
            UpdateOutcome::Installed { version } => {
                host.reload_artifact();
                host.notify(&format!(
                    "Update to {version} installed. Restart to load it."
                ));
                if host.prompt_restart(&version) == RestartChoice::Now {
                    host.request_restart();
                }
            }
            UpdateOutcome::InstallFailed(e) => {
                host.notify(&format!("Update failed: {e}"));
            }
        }
    }
}
