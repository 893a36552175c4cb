//! Host integration surface.
//!
//! The scheduler and updater have no dependency on any concrete editor
//! API; everything they need from the surrounding application is injected
//! through the [`Host`] trait. Save operations are fire-and-forget: the
//! host logs its own failures and never propagates them back into the
//! scheduler.

/// User response to the post-update restart prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartChoice {
    /// Restart immediately to load the new artifact.
    Now,
    /// Keep running the old code until the next natural restart.
    Later,
}

/// Capabilities the host application provides to the autosave runtime.
pub trait Host {
    /// Returns `true` while the host is in a runtime mode incompatible
    /// with saving (for example, executing an interactive simulation).
    fn is_busy(&self) -> bool;

    /// Save open scene documents. May be a no-op when nothing is dirty.
    fn save_open_scenes(&mut self);

    /// Save pending asset changes. May be a no-op when nothing is dirty.
    fn save_pending_assets(&mut self);

    /// Surface a user-facing message.
    fn notify(&mut self, message: &str);

    /// Reindex/reload the replaced artifact after a successful update.
    fn reload_artifact(&mut self);

    /// Ask the user whether to restart now or later.
    fn prompt_restart(&mut self, latest_version: &str) -> RestartChoice;

    /// Restart the host process. Called only after [`RestartChoice::Now`].
    fn request_restart(&mut self);
}
