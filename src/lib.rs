//! Timer-driven project autosave with remote self-update.
//!
//! This crate embeds a background save scheduler into an interactive host
//! application (an editor-style program with its own idle/heartbeat loop):
//!
//! - **Autosave**: a state machine fires scene/asset saves on a configurable
//!   interval, suspends while the host is in a runtime mode incompatible
//!   with saving, and re-arms after every fire or settings change.
//! - **Self-update**: a manual version probe against a remote plaintext
//!   marker plus a payload download that atomically replaces the local
//!   artifact and asks the host to restart.
//!
//! The host drives everything through [`SchedulerContext`]: it calls
//! [`SchedulerContext::tick`] from its heartbeat and implements the
//! [`Host`] trait for saves, notifications, and restart prompts. Network
//! fetches run on a worker thread; their completions are drained on the
//! tick thread, so all shared state stays single-threaded.

pub mod context;
pub mod error;
pub mod host;
pub mod logging;
pub mod prefs;
pub mod scheduler;
pub mod settings;
pub mod update;

pub use context::SchedulerContext;
pub use error::{AutosaveError, Result};
pub use host::{Host, RestartChoice};
pub use prefs::{FilePrefs, MemoryPrefs, PrefStore};
pub use scheduler::{AutosaveScheduler, Phase};
pub use settings::{SaveMode, Settings};
pub use update::{UpdateEndpoints, UpdateOutcome, UpdateService, UpdateState};
