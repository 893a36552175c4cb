//! Transient update availability state.
//!
//! Reset on process start; a check has to succeed at least once before
//! `update_available` can become true.

/// Placeholder shown before the first successful check.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Version knowledge for the running scheduler artifact.
#[derive(Debug, Clone)]
pub struct UpdateState {
    current_version: String,
    latest_known_version: String,
    update_available: bool,
}

impl UpdateState {
    /// Create state for an arbitrary running version (tests, embedders).
    pub fn new(current_version: impl Into<String>) -> Self {
        Self {
            current_version: current_version.into(),
            latest_known_version: UNKNOWN_VERSION.to_owned(),
            update_available: false,
        }
    }

    /// Create state for the crate's own version.
    pub fn current() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }

    /// The version this process is running.
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// The most recently fetched remote marker, or [`UNKNOWN_VERSION`].
    pub fn latest_known_version(&self) -> &str {
        &self.latest_known_version
    }

    /// Whether the last successful check saw a different remote version.
    pub fn update_available(&self) -> bool {
        self.update_available
    }

    /// Record a successful check result.
    ///
    /// Comparison is plain string inequality on the trimmed marker; the
    /// protocol carries no ordering, so "different" is all we can detect.
    pub fn record_check(&mut self, remote_marker: &str) {
        let trimmed = remote_marker.trim();
        self.latest_known_version = trimmed.to_owned();
        self.update_available = trimmed != self.current_version;
    }
}
