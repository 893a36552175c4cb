//! End-to-end tests for the autosave context.
//!
//! Drives a [`SchedulerContext`] the way a host heartbeat would: persisted
//! settings, timed ticks with a mock host, and the full check → download →
//! install → restart-prompt update flow against a mock HTTP server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use autosave::{
    FilePrefs, Host, Phase, RestartChoice, SaveMode, SchedulerContext, Settings, UpdateEndpoints,
};
use std::time::{Duration, Instant};

#[derive(Default)]
struct MockHost {
    busy: bool,
    scene_saves: usize,
    asset_saves: usize,
    notifications: Vec<String>,
    reloads: usize,
    restarts: usize,
    restart_now: bool,
}

impl Host for MockHost {
    fn is_busy(&self) -> bool {
        self.busy
    }
    fn save_open_scenes(&mut self) {
        self.scene_saves += 1;
    }
    fn save_pending_assets(&mut self) {
        self.asset_saves += 1;
    }
    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }
    fn reload_artifact(&mut self) {
        self.reloads += 1;
    }
    fn prompt_restart(&mut self, _latest_version: &str) -> RestartChoice {
        if self.restart_now {
            RestartChoice::Now
        } else {
            RestartChoice::Later
        }
    }
    fn request_restart(&mut self) {
        self.restarts += 1;
    }
}

/// Tick until the pending update operation produces a notification.
fn tick_until_notified(context: &mut SchedulerContext, host: &mut MockHost, base: Instant) {
    let before = host.notifications.len();
    for _ in 0..600 {
        context.tick(base, host);
        if host.notifications.len() > before {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("update operation never completed");
}

#[test]
fn settings_survive_a_restart_via_the_preference_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut prefs = FilePrefs::load(path.clone());
    let settings = Settings {
        interval_secs: 120,
        save_mode: SaveMode::All,
        show_debug_logs: true,
        ..Default::default()
    };
    settings.save(&mut prefs).unwrap();

    // "Restart": a fresh store and context pick up the persisted values.
    let reopened = FilePrefs::load(path);
    let context = SchedulerContext::load(
        Instant::now(),
        &reopened,
        UpdateEndpoints::new("http://localhost/v", "http://localhost/p", "/tmp/a"),
    );

    assert_eq!(context.settings().interval_secs, 120);
    assert_eq!(context.settings().save_mode, SaveMode::All);
    assert!(context.settings().show_debug_logs);
}

#[test]
fn autosave_cadence_with_suspension_episode() {
    let now = Instant::now();
    let prefs = autosave::MemoryPrefs::new();
    let mut context = SchedulerContext::load(
        now,
        &prefs,
        UpdateEndpoints::new("http://localhost/v", "http://localhost/p", "/tmp/a"),
    );
    let mut host = MockHost::default();

    // Default interval is 300s; nothing before that.
    context.tick(now + Duration::from_secs(299), &mut host);
    assert_eq!(host.scene_saves, 0);
    assert_eq!(context.scheduler().phase(), Phase::Idle);

    // Due, but the host is mid-simulation: held, not dropped.
    host.busy = true;
    context.tick(now + Duration::from_secs(300), &mut host);
    context.tick(now + Duration::from_secs(310), &mut host);
    assert_eq!(host.scene_saves, 0);
    assert_eq!(context.scheduler().phase(), Phase::Suspended);

    // First tick after the mode ends fires the held save.
    host.busy = false;
    let fire = now + Duration::from_secs(320);
    context.tick(fire, &mut host);
    assert_eq!(host.scene_saves, 1);
    assert_eq!(
        context.scheduler().next_fire_at(),
        fire + Duration::from_secs(300)
    );
}

#[test]
fn full_update_flow_with_restart_now() {
    let mut server = mockito::Server::new();
    let _version = server
        .mock("GET", "/version.txt")
        .with_status(200)
        .with_body("9.9.9\n")
        .create();
    let _payload = server
        .mock("GET", "/payload")
        .with_status(200)
        .with_body("replacement source")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("scheduler.src");
    std::fs::write(&artifact, "running source").unwrap();

    let now = Instant::now();
    let mut context = SchedulerContext::new(
        now,
        Settings::default(),
        UpdateEndpoints::new(
            format!("{}/version.txt", server.url()),
            format!("{}/payload", server.url()),
            artifact.clone(),
        ),
    );
    let mut host = MockHost::default();
    host.restart_now = true;

    context.check_for_updates().unwrap();
    tick_until_notified(&mut context, &mut host, now);
    assert!(context.update_state().update_available());
    assert_eq!(context.update_state().latest_known_version(), "9.9.9");
    assert!(host.notifications[0].contains("New version available: 9.9.9"));

    context.download_and_update().unwrap();
    tick_until_notified(&mut context, &mut host, now);

    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "replacement source");
    assert_eq!(host.reloads, 1);
    assert_eq!(host.restarts, 1);
    // The running session is still on the old code; availability persists.
    assert!(context.update_state().update_available());
}

#[test]
fn restart_later_defers_without_touching_the_new_artifact() {
    let mut server = mockito::Server::new();
    let _version = server
        .mock("GET", "/version.txt")
        .with_status(200)
        .with_body("2.0.0")
        .create();
    let _payload = server
        .mock("GET", "/payload")
        .with_status(200)
        .with_body("v2 source")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("scheduler.src");

    let now = Instant::now();
    let mut context = SchedulerContext::new(
        now,
        Settings::default(),
        UpdateEndpoints::new(
            format!("{}/version.txt", server.url()),
            format!("{}/payload", server.url()),
            artifact.clone(),
        ),
    );
    let mut host = MockHost::default();

    context.check_for_updates().unwrap();
    tick_until_notified(&mut context, &mut host, now);
    context.download_and_update().unwrap();
    tick_until_notified(&mut context, &mut host, now);

    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "v2 source");
    assert_eq!(host.reloads, 1);
    assert_eq!(host.restarts, 0);
}

#[test]
fn download_failure_keeps_artifact_and_retry_path_open() {
    let mut server = mockito::Server::new();
    let _version = server
        .mock("GET", "/version.txt")
        .with_status(200)
        .with_body("2.0.0")
        .create();
    let _payload = server.mock("GET", "/payload").with_status(503).create();

    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("scheduler.src");
    std::fs::write(&artifact, "running source").unwrap();

    let now = Instant::now();
    let mut context = SchedulerContext::new(
        now,
        Settings::default(),
        UpdateEndpoints::new(
            format!("{}/version.txt", server.url()),
            format!("{}/payload", server.url()),
            artifact.clone(),
        ),
    );
    let mut host = MockHost::default();

    context.check_for_updates().unwrap();
    tick_until_notified(&mut context, &mut host, now);
    context.download_and_update().unwrap();
    tick_until_notified(&mut context, &mut host, now);

    assert!(host.notifications.last().unwrap().starts_with("Update failed:"));
    assert_eq!(std::fs::read_to_string(&artifact).unwrap(), "running source");
    assert_eq!(host.reloads, 0);
    // Retry stays possible.
    assert!(context.update_state().update_available());
    assert!(context.download_and_update().is_ok());
}

#[test]
fn up_to_date_check_reports_latest_version() {
    let mut server = mockito::Server::new();
    let _version = server
        .mock("GET", "/version.txt")
        .with_status(200)
        .with_body(format!("{}\n", env!("CARGO_PKG_VERSION")))
        .create();

    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut context = SchedulerContext::new(
        now,
        Settings::default(),
        UpdateEndpoints::new(
            format!("{}/version.txt", server.url()),
            format!("{}/payload", server.url()),
            dir.path().join("scheduler.src"),
        ),
    );
    let mut host = MockHost::default();

    context.check_for_updates().unwrap();
    tick_until_notified(&mut context, &mut host, now);

    assert_eq!(host.notifications, vec!["You have the latest version."]);
    assert!(!context.update_state().update_available());
    assert!(context.download_and_update().is_err());
}
