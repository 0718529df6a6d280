#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use plantcare::errors::AppResult;
use plantcare::reminder::{Notification, NotificationChannel, Notifier};
use std::cell::{Cell, RefCell};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn pc() -> Command {
    cargo_bin_cmd!("plantcare")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_plantcare.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB and add plant #1 "Ficus"
pub fn init_db_with_plant(db_path: &str) {
    pc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    pc().args(["--db", db_path, "plant", "add", "Ficus", "--type", "Ficus benjamina"])
        .assert()
        .success();
}

/// 2025-06-01 09:00:00 UTC, the reference "now" of library tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// Notifier that keeps what it was asked to show.
pub struct RecordingNotifier {
    permitted: bool,
    pub shown: RefCell<Vec<Notification>>,
    pub channels: Cell<usize>,
    pub registered: RefCell<Vec<NotificationChannel>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::with_permission(true)
    }

    pub fn with_permission(permitted: bool) -> Self {
        Self {
            permitted,
            shown: RefCell::new(Vec::new()),
            channels: Cell::new(0),
            registered: RefCell::new(Vec::new()),
        }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.shown.borrow().iter().map(|n| n.body.clone()).collect()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.shown.borrow().iter().map(|n| n.id).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn ensure_channel(&self, channel: &NotificationChannel) -> AppResult<()> {
        self.channels.set(self.channels.get() + 1);
        self.registered.borrow_mut().push(channel.clone());
        Ok(())
    }

    fn has_permission(&self) -> bool {
        self.permitted
    }

    fn notify(&self, notification: &Notification) -> AppResult<()> {
        self.shown.borrow_mut().push(notification.clone());
        Ok(())
    }
}
