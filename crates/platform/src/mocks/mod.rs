//! Mock implementations for testing
//!
//! [`MockHost`] implements every host service in memory: the UI is a real
//! [`Scene`], time is whatever the test sets, sent dictionaries and log
//! lines are recorded for inspection.

#![cfg(any(test, feature = "std"))]

use std::string::String;
use std::vec::Vec;

use crate::resources::ResourceEntry;
use crate::*;

/// One recorded log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity
    pub level: LogLevel,
    /// Formatted message
    pub message: String,
}

/// In-memory host.
#[derive(Debug)]
pub struct MockHost {
    scene: Scene,
    now: WallTime,
    use_24h: bool,
    subscription: Option<TimeUnits>,
    limits: Option<MessageLimits>,
    open_result: DeliveryResult,
    next_send: Option<DeliveryResult>,
    sent: Vec<Dictionary>,
    logs: Vec<LogRecord>,
}

impl MockHost {
    /// Monochrome host with no bundled resources, 24-hour clock at the epoch.
    pub fn new() -> Self {
        Self::with_display(DisplayCaps::MONOCHROME, &[])
    }

    /// Host with the given display and resource table.
    pub fn with_display(caps: DisplayCaps, resources: &'static [ResourceEntry]) -> Self {
        Self {
            scene: Scene::new(caps, resources),
            now: WallTime::EPOCH,
            use_24h: true,
            subscription: None,
            limits: None,
            open_result: DeliveryResult::Ok,
            next_send: None,
            sent: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Set the wall clock.
    pub fn set_time(&mut self, now: WallTime) {
        self.now = now;
    }

    /// Set the 12/24-hour preference.
    pub fn set_24h(&mut self, use_24h: bool) {
        self.use_24h = use_24h;
    }

    /// Make the next [`Messaging::open`] report `result` (and stay closed
    /// unless it is `Ok`).
    pub fn fail_open(&mut self, result: DeliveryResult) {
        self.open_result = result;
    }

    /// Make the next [`Messaging::send`] report `result` instead of `Ok`.
    pub fn fail_next_send(&mut self, result: DeliveryResult) {
        self.next_send = Some(result);
    }

    /// The scene backing the UI toolkit.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene, for tests that inject allocation failures.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Dictionaries accepted by `send`, oldest first.
    pub fn sent(&self) -> &[Dictionary] {
        &self.sent
    }

    /// Every recorded log line.
    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    /// Number of log lines at `level`.
    pub fn log_count(&self, level: LogLevel) -> usize {
        self.logs.iter().filter(|r| r.level == level).count()
    }

    /// Forget recorded log lines.
    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockHost {
    fn now(&self) -> WallTime {
        self.now
    }

    fn is_24h_style(&self) -> bool {
        self.use_24h
    }
}

impl TickService for MockHost {
    fn tick_subscribe(&mut self, units: TimeUnits) {
        self.subscription = Some(units);
    }

    fn tick_unsubscribe(&mut self) {
        self.subscription = None;
    }

    fn tick_subscription(&self) -> Option<TimeUnits> {
        self.subscription
    }
}

impl Messaging for MockHost {
    fn open(&mut self, inbox_size: u16, outbox_size: u16) -> DeliveryResult {
        let result = core::mem::replace(&mut self.open_result, DeliveryResult::Ok);
        if result.is_ok() {
            self.limits = Some(MessageLimits::new(inbox_size, outbox_size));
        }
        result
    }

    fn close(&mut self) {
        self.limits = None;
    }

    fn limits(&self) -> Option<MessageLimits> {
        self.limits
    }

    fn send(&mut self, dict: &Dictionary) -> DeliveryResult {
        let Some(limits) = self.limits else {
            return DeliveryResult::Closed;
        };
        if let Some(result) = self.next_send.take() {
            return result;
        }
        let admitted = limits.admits_outbound(dict);
        if admitted.is_ok() {
            self.sent.push(dict.clone());
        }
        admitted
    }
}

impl HostLog for MockHost {
    fn log(&mut self, level: LogLevel, args: core::fmt::Arguments<'_>) {
        self.logs.push(LogRecord {
            level,
            message: std::format!("{args}"),
        });
    }
}

impl Host for MockHost {
    type Ui = Scene;

    fn ui(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn ui_ref(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_send_requires_open() {
        let mut host = MockHost::new();
        assert_eq!(host.send(&Dictionary::new()), DeliveryResult::Closed);
        assert!(host.open(64, 64).is_ok());
        assert!(host.send(&Dictionary::new()).is_ok());
        assert_eq!(host.sent().len(), 1);
    }

    #[test]
    fn test_scripted_send_failure_applies_once() {
        let mut host = MockHost::new();
        let _ = host.open(64, 64);
        host.fail_next_send(DeliveryResult::Busy);
        assert_eq!(host.send(&Dictionary::new()), DeliveryResult::Busy);
        assert!(host.send(&Dictionary::new()).is_ok());
        assert_eq!(host.sent().len(), 1);
    }

    #[test]
    fn test_failed_open_stays_closed() {
        let mut host = MockHost::new();
        host.fail_open(DeliveryResult::OutOfMemory);
        assert_eq!(host.open(64, 64), DeliveryResult::OutOfMemory);
        assert!(host.limits().is_none());
    }

    #[test]
    fn test_log_records_formatted_message() {
        let mut host = MockHost::new();
        let key = 99u32;
        crate::app_log!(&mut host, Error, "Key {} not recognized!", key);
        assert_eq!(host.log_count(LogLevel::Error), 1);
        assert_eq!(host.logs()[0].message, "Key 99 not recognized!");
    }
}
