//! Shared fixtures for the router integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tierlog::{HostEnvironment, Identity, LogRouter, MemorySink, Settings, StaticProvider};

/// Temporary directory holding one log file.
pub struct LogFixture {
    dir: TempDir,
    path: PathBuf,
}

impl LogFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("session.log");
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default settings pointing the file channel at this fixture.
    pub fn settings(&self) -> Settings {
        Settings {
            log_file_path: self.path.display().to_string(),
            ..Settings::default()
        }
    }

    /// Builds a router capturing debug output.
    pub fn router(&self, settings: Settings) -> (LogRouter, MemorySink) {
        let sink = MemorySink::new();
        let router = LogRouter::builder()
            .debug_sink(sink.clone())
            .build(StaticProvider::new(settings, environment()));
        (router, sink)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn read(&self) -> String {
        fs::read_to_string(&self.path).expect("read log file")
    }

    /// Messages of every timestamped line, without the stamp.
    pub fn messages(&self) -> Vec<String> {
        body_lines(&self.read())
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }
}

pub fn environment() -> HostEnvironment {
    HostEnvironment::new(Identity::new("Harness", "4.2.0", "LinuxPlayer"))
}

/// Splits every `"{stamp} | {message}"` line of a log file.
pub fn body_lines(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.split_once(" | "))
        .map(|(stamp, message)| (stamp.to_owned(), message.to_owned()))
        .collect()
}

/// Converts an `HH:MM:SS.mmm` stamp into milliseconds.
pub fn stamp_millis(stamp: &str) -> u64 {
    let (clock, millis) = stamp.split_once('.').expect("millisecond separator");
    let mut fields = clock.split(':').map(|field| field.parse::<u64>().expect("number"));
    let hours = fields.next().expect("hours");
    let minutes = fields.next().expect("minutes");
    let seconds = fields.next().expect("seconds");
    ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis.parse::<u64>().expect("millis")
}
