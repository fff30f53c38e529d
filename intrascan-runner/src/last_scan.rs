//! Caller-owned cache of the most recent scan.
//!
//! The scanner itself keeps nothing between runs. A UI or CLI that wants to
//! redisplay or explain the previous result holds a `LastScan`.

use chrono::{DateTime, Duration, Local};

use crate::result::{ScanResult, Setup};

#[derive(Debug, Clone, Default)]
pub struct LastScan {
    entry: Option<(ScanResult, DateTime<Local>)>,
}

impl LastScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held result, stamping it with the current time.
    pub fn record(&mut self, result: ScanResult) {
        self.record_at(result, Local::now());
    }

    pub fn record_at(&mut self, result: ScanResult, at: DateTime<Local>) {
        self.entry = Some((result, at));
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.entry.as_ref().map(|(r, _)| r)
    }

    pub fn recorded_at(&self) -> Option<DateTime<Local>> {
        self.entry.as_ref().map(|(_, at)| *at)
    }

    /// Time since the result was recorded, as of `now`.
    pub fn age(&self, now: DateTime<Local>) -> Option<Duration> {
        self.recorded_at().map(|at| now - at)
    }

    pub fn top_setups(&self) -> &[Setup] {
        self.result().map(|r| r.top_setups.as_slice()).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
