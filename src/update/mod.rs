//! Self-update system for the scheduler artifact.
//!
//! A manual, best-effort protocol: the user triggers a version check
//! against a remote plaintext marker, and — when the marker differs from
//! the running version — a payload download that replaces the local
//! artifact and prompts for a host restart.
//!
//! Fetches run on a worker thread. Their completions travel through a
//! single-consumer channel and are drained by [`UpdateService::poll`] on
//! the host tick thread, so every state mutation happens on that one
//! thread. At most one operation is in flight per service.

pub mod applier;
pub mod checker;
pub mod state;

pub use state::{UNKNOWN_VERSION, UpdateState};

use crate::error::{AutosaveError, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::path::PathBuf;
use tracing::{info, warn};

/// Remote endpoints and the local artifact they replace.
#[derive(Debug, Clone)]
pub struct UpdateEndpoints {
    /// HTTP URL of the plaintext version marker.
    pub version_url: String,
    /// HTTP URL of the full replacement payload.
    pub payload_url: String,
    /// Local path the host loads the running code from.
    pub artifact_path: PathBuf,
}

impl UpdateEndpoints {
    /// Bundle the two remote URLs with the local artifact path.
    pub fn new(
        version_url: impl Into<String>,
        payload_url: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            version_url: version_url.into(),
            payload_url: payload_url.into(),
            artifact_path: artifact_path.into(),
        }
    }
}

/// Raw completion sent from the fetch worker thread.
enum FetchEvent {
    CheckFinished(Result<String>),
    PayloadFetched(Result<String>),
}

/// A completed update operation, as observed on the tick thread.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Version check succeeded.
    Checked {
        /// Trimmed remote marker.
        latest: String,
        /// Whether it differs from the running version.
        available: bool,
    },
    /// Version check failed; prior state untouched.
    CheckFailed(AutosaveError),
    /// Payload fetched and installed over the artifact.
    Installed {
        /// The version the artifact now holds (loaded after restart).
        version: String,
    },
    /// Download or install failed; `update_available` stays true.
    InstallFailed(AutosaveError),
}

/// Update checker and applier with single-flight fetches.
pub struct UpdateService {
    endpoints: UpdateEndpoints,
    state: UpdateState,
    tx: Sender<FetchEvent>,
    rx: Receiver<FetchEvent>,
    in_flight: bool,
}

impl UpdateService {
    /// Create a service for the crate's own version.
    pub fn new(endpoints: UpdateEndpoints) -> Self {
        Self::with_state(endpoints, UpdateState::current())
    }

    /// Create a service with explicit version state (tests, embedders).
    pub fn with_state(endpoints: UpdateEndpoints, state: UpdateState) -> Self {
        let (tx, rx) = unbounded();
        Self {
            endpoints,
            state,
            tx,
            rx,
            in_flight: false,
        }
    }

    /// Current version knowledge.
    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    /// Whether a fetch is currently in flight.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a version check on the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`AutosaveError::Update`] when another operation is
    /// already in flight.
    pub fn begin_check(&mut self) -> Result<()> {
        self.reserve_flight()?;

        let tx = self.tx.clone();
        let url = self.endpoints.version_url.clone();
        std::thread::spawn(move || {
            // A send failure means the service was dropped; the late
            // completion is simply discarded.
            let _ = tx.send(FetchEvent::CheckFinished(checker::fetch_latest_version(&url)));
        });

        Ok(())
    }

    /// Start a payload download on the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`AutosaveError::Update`] when no update is available or
    /// another operation is already in flight.
    pub fn begin_download(&mut self) -> Result<()> {
        if !self.state.update_available() {
            return Err(AutosaveError::Update(
                "no update available; run a version check first".to_owned(),
            ));
        }
        self.reserve_flight()?;

        let tx = self.tx.clone();
        let url = self.endpoints.payload_url.clone();
        std::thread::spawn(move || {
            let _ = tx.send(FetchEvent::PayloadFetched(checker::fetch_payload(&url)));
        });

        Ok(())
    }

    /// Drain at most one completed operation.
    ///
    /// Must be called from the host tick thread; this is where check
    /// results land in [`UpdateState`] and where a fetched payload is
    /// installed over the artifact.
    pub fn poll(&mut self) -> Option<UpdateOutcome> {
        let event = self.rx.try_recv().ok()?;
        self.in_flight = false;

        match event {
            FetchEvent::CheckFinished(Ok(marker)) => {
                self.state.record_check(&marker);
                let latest = self.state.latest_known_version().to_owned();
                let available = self.state.update_available();
                if available {
                    info!(
                        "new version available: {latest} (current: {})",
                        self.state.current_version()
                    );
                } else {
                    info!("running the latest version ({latest})");
                }
                Some(UpdateOutcome::Checked { latest, available })
            }
            FetchEvent::CheckFinished(Err(e)) => {
                warn!("update check failed: {e}");
                Some(UpdateOutcome::CheckFailed(e))
            }
            FetchEvent::PayloadFetched(Ok(payload)) => {
                match applier::install_payload(&payload, &self.endpoints.artifact_path) {
                    Ok(()) => Some(UpdateOutcome::Installed {
                        version: self.state.latest_known_version().to_owned(),
                    }),
                    Err(e) => {
                        warn!("update install failed: {e}");
                        Some(UpdateOutcome::InstallFailed(e))
                    }
                }
            }
            FetchEvent::PayloadFetched(Err(e)) => {
                warn!("update download failed: {e}");
                Some(UpdateOutcome::InstallFailed(e))
            }
        }
    }

    fn reserve_flight(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(AutosaveError::Update(
                "an update operation is already in flight".to_owned(),
            ));
        }
        self.in_flight = true;
        Ok(())
    }
}
