//! Simulated watch host.
//!
//! Time only moves when the simulator advances it. Sent dictionaries are
//! queued in their postcard wire form until the simulator collects them,
//! and host log records go to `tracing`.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use platform::dictionary::WIRE_CAPACITY;
use platform::resources::ResourceEntry;
use platform::{
    Clock, DeliveryResult, Dictionary, DisplayCaps, Host, HostLog, LogLevel, MessageLimits,
    Messaging, Scene, TickService, TimeUnits, WallTime,
};
use ui::{format_time, BoundedText, HourStyle};

/// Messages the companion has not acknowledged yet.
const OUTBOX_DEPTH: usize = 4;

pub struct SimHost {
    scene: Scene,
    now: NaiveDateTime,
    use_24h: bool,
    subscription: Option<TimeUnits>,
    limits: Option<MessageLimits>,
    outbox: VecDeque<Vec<u8>>,
}

impl SimHost {
    pub fn new(
        caps: DisplayCaps,
        resources: &'static [ResourceEntry],
        start: NaiveDateTime,
        use_24h: bool,
    ) -> Result<Self> {
        to_wall_time(start).context("start time out of range")?;
        Ok(Self {
            scene: Scene::new(caps, resources),
            now: start,
            use_24h,
            subscription: None,
            limits: None,
            outbox: VecDeque::with_capacity(OUTBOX_DEPTH),
        })
    }

    /// Move the clock forward and return the new time.
    pub fn advance_minutes(&mut self, minutes: i64) -> Result<WallTime> {
        self.now = self
            .now
            .checked_add_signed(TimeDelta::minutes(minutes))
            .context("clock overflow")?;
        to_wall_time(self.now)
    }

    /// Drain everything sent since the last call, decoding it the way the
    /// companion would.
    pub fn take_outbox(&mut self) -> Vec<Dictionary> {
        self.outbox
            .drain(..)
            .filter_map(|bytes| match Dictionary::decode(&bytes) {
                Ok(dict) => Some(dict),
                Err(err) => {
                    tracing::warn!(len = bytes.len(), %err, "undecodable outbox message");
                    None
                }
            })
            .collect()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The clock the status bar shows.
    pub fn status_clock(&self) -> String {
        let mut text = BoundedText::<8>::new();
        if let Ok(now) = to_wall_time(self.now) {
            format_time(&mut text, &now, HourStyle::from_24h(self.use_24h));
        }
        text.as_str().to_owned()
    }
}

fn to_wall_time(time: NaiveDateTime) -> Result<WallTime> {
    let narrow = |v: u32| u8::try_from(v).context("time field out of range");
    let year = u16::try_from(time.year()).context("year out of range")?;
    Ok(WallTime::new(
        year,
        narrow(time.month())?,
        narrow(time.day())?,
        narrow(time.hour())?,
        narrow(time.minute())?,
        narrow(time.second())?,
    )?)
}

impl Clock for SimHost {
    fn now(&self) -> WallTime {
        to_wall_time(self.now).unwrap_or(WallTime::EPOCH)
    }

    fn is_24h_style(&self) -> bool {
        self.use_24h
    }
}

impl TickService for SimHost {
    fn tick_subscribe(&mut self, units: TimeUnits) {
        tracing::debug!(?units, "tick subscribe");
        self.subscription = Some(units);
    }

    fn tick_unsubscribe(&mut self) {
        tracing::debug!("tick unsubscribe");
        self.subscription = None;
    }

    fn tick_subscription(&self) -> Option<TimeUnits> {
        self.subscription
    }
}

impl Messaging for SimHost {
    fn open(&mut self, inbox_size: u16, outbox_size: u16) -> DeliveryResult {
        tracing::debug!(inbox_size, outbox_size, "messaging open");
        self.limits = Some(MessageLimits::new(inbox_size, outbox_size));
        DeliveryResult::Ok
    }

    fn close(&mut self) {
        tracing::debug!(dropped = self.outbox.len(), "messaging close");
        self.limits = None;
        self.outbox.clear();
    }

    fn limits(&self) -> Option<MessageLimits> {
        self.limits
    }

    fn send(&mut self, dict: &Dictionary) -> DeliveryResult {
        let Some(limits) = self.limits else {
            return DeliveryResult::Closed;
        };
        if self.outbox.len() >= OUTBOX_DEPTH {
            return DeliveryResult::Busy;
        }
        let admitted = limits.admits_outbound(dict);
        if !admitted.is_ok() {
            return admitted;
        }
        let mut buf = [0u8; WIRE_CAPACITY];
        match dict.encode(&mut buf) {
            Ok(bytes) => {
                self.outbox.push_back(bytes.to_vec());
                DeliveryResult::Ok
            }
            Err(_) => DeliveryResult::BufferOverflow,
        }
    }
}

impl HostLog for SimHost {
    fn log(&mut self, level: LogLevel, args: core::fmt::Arguments<'_>) {
        match level {
            LogLevel::Error => tracing::error!(target: "app", "{args}"),
            LogLevel::Warning => tracing::warn!(target: "app", "{args}"),
            LogLevel::Info => tracing::info!(target: "app", "{args}"),
            LogLevel::Debug => tracing::debug!(target: "app", "{args}"),
            LogLevel::Verbose => tracing::trace!(target: "app", "{args}"),
        }
    }
}

impl Host for SimHost {
    type Ui = Scene;

    fn ui(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn ui_ref(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(23, 58, 0)
            .unwrap()
    }

    #[test]
    fn test_advance_rolls_over_midnight() {
        let mut host = SimHost::new(DisplayCaps::COLOR, &[], start(), true).unwrap();
        let t = host.advance_minutes(3).unwrap();
        assert_eq!((t.day(), t.hour(), t.minute()), (17, 0, 1));
    }

    #[test]
    fn test_outbox_bounded() {
        let mut host = SimHost::new(DisplayCaps::COLOR, &[], start(), true).unwrap();
        assert_eq!(host.send(&Dictionary::new()), DeliveryResult::Closed);
        let _ = host.open(64, 64);
        for _ in 0..OUTBOX_DEPTH {
            assert!(host.send(&Dictionary::new()).is_ok());
        }
        assert_eq!(host.send(&Dictionary::new()), DeliveryResult::Busy);
        assert_eq!(host.take_outbox().len(), OUTBOX_DEPTH);
        assert!(host.send(&Dictionary::new()).is_ok());
    }

    #[test]
    fn test_outbox_round_trips_wire_form() {
        let mut host = SimHost::new(DisplayCaps::COLOR, &[], start(), true).unwrap();
        let _ = host.open(64, 64);
        let mut request = Dictionary::new();
        request.push_int32(0, 0).unwrap();
        request.push_text(7, "AAPL").unwrap();
        assert!(host.send(&request).is_ok());

        let sent = host.take_outbox();
        assert_eq!(sent, [request]);
        assert!(host.take_outbox().is_empty());
    }

    #[test]
    fn test_status_clock_follows_preference() {
        let host = SimHost::new(DisplayCaps::COLOR, &[], start(), false).unwrap();
        assert_eq!(host.status_clock(), "11:58");
    }
}
