//! The watchface application.
//!
//! [`WatchFace`] implements [`AppHandler`] for any [`Host`]. State lives in
//! the struct and each callback gets `&mut self`, so there is no global
//! state and handlers cannot interleave.

use platform::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use platform::{
    app_log, AppHandler, DeliveryResult, Dictionary, Host, TimeUnits, TupleValue, UiToolkit,
    WallTime,
};
use ui::{
    compose_quote, compose_weather, format_date, format_temperature, format_time, trend_color,
    Element, HourStyle, SignStyle,
};

use crate::config::FaceConfig;
use crate::error::StartError;
use crate::keys::{MessageKey, REQUEST_KEY, REQUEST_VALUE};
use crate::layers::{screen_frame, FaceLayers};
use crate::state::FaceState;

/// The running face.
#[derive(Debug)]
pub struct WatchFace {
    config: FaceConfig,
    state: FaceState,
    layers: Option<FaceLayers>,
}

impl WatchFace {
    /// A face that has not started yet.
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            state: FaceState::new(),
            layers: None,
        }
    }

    /// Display buffers.
    pub fn state(&self) -> &FaceState {
        &self.state
    }

    /// Host handles while running.
    pub fn layers(&self) -> Option<&FaceLayers> {
        self.layers.as_ref()
    }

    /// `true` between a successful `init` and `deinit`.
    pub fn is_running(&self) -> bool {
        self.layers.is_some()
    }

    fn publish<H: Host>(&self, host: &mut H, element: Element, text: &str) {
        let Some(layer) = self.layers.as_ref().and_then(|l| l.text_layer(element)) else {
            return;
        };
        if let Err(err) = host.ui().text_layer_set_text(layer, text) {
            app_log!(host, Error, "Failed to show {}: {}", element, err);
        }
    }

    fn show_time<H: Host>(&mut self, host: &mut H, now: &WallTime) {
        let style = HourStyle::from_24h(host.is_24h_style());
        format_time(&mut self.state.time, now, style);
        format_date(&mut self.state.date, now);
        self.publish(host, Element::Time, self.state.time.as_str());
        self.publish(host, Element::Date, self.state.date.as_str());
    }

    fn request_refresh<H: Host>(&mut self, host: &mut H) {
        let mut request = Dictionary::new();
        if let Err(err) = request.push_int32(REQUEST_KEY, REQUEST_VALUE) {
            app_log!(host, Error, "Could not build refresh request: {}", err);
            return;
        }
        match host.send(&request) {
            DeliveryResult::Ok => app_log!(host, Debug, "Refresh requested"),
            reason => app_log!(host, Error, "Refresh request not sent: {}", reason),
        }
    }

    /// Apply one inbound dictionary. Each known key writes only its own
    /// buffer; composite lines are rebuilt once after the walk, so the
    /// result does not depend on tuple order.
    fn ingest<H: Host>(&mut self, host: &mut H, dictionary: &Dictionary) {
        let revision = self.config.revision;
        let mut weather_touched = false;
        let mut stock_touched = false;
        let mut sign_seen = false;

        for tuple in dictionary {
            let Some(key) = MessageKey::from_raw(tuple.key, revision) else {
                app_log!(host, Error, "Key {} not recognized!", tuple.key);
                continue;
            };
            let expected = key.expected_kind();
            let actual = tuple.value.kind();
            if actual != expected {
                app_log!(
                    host,
                    Error,
                    "Key {} expects {}, got {}",
                    tuple.key,
                    expected.as_str(),
                    actual.as_str()
                );
                continue;
            }

            let state = &mut self.state;
            let fitted = match (key, &tuple.value) {
                (MessageKey::Temperature, TupleValue::Int32(celsius)) => {
                    format_temperature(&mut state.temperature, *celsius)
                }
                (MessageKey::Conditions, TupleValue::Text(text)) => state.conditions.set(text),
                (MessageKey::Price, TupleValue::Text(text)) => state.price.set(text),
                (MessageKey::Change, TupleValue::Text(text)) => state.change.set(text),
                (MessageKey::Negative, TupleValue::Int32(flag)) => {
                    state.negative = *flag != 0;
                    sign_seen = true;
                    true
                }
                // kinds were checked above
                _ => continue,
            };
            if !fitted {
                app_log!(host, Warning, "Value for key {} truncated", tuple.key);
            }
            weather_touched |= key.is_weather();
            stock_touched |= key.is_stock();
        }

        if weather_touched {
            let state = &mut self.state;
            let fitted = compose_weather(
                &mut state.weather,
                state.temperature.as_str(),
                state.conditions.as_str(),
            );
            if !fitted {
                app_log!(host, Warning, "Weather line truncated");
            }
            self.publish(host, Element::Weather, self.state.weather.as_str());
        }
        if stock_touched {
            self.show_quote(host, sign_seen);
        }
    }

    fn show_quote<H: Host>(&mut self, host: &mut H, sign_seen: bool) {
        let color = host.ui_ref().supports_color();
        let state = &mut self.state;
        let fitted = compose_quote(
            &mut state.quote,
            state.price.as_str(),
            state.change.as_str(),
            state.negative,
            SignStyle::for_display(color),
        );
        if !fitted {
            app_log!(host, Warning, "Stock line truncated");
        }
        if !sign_seen {
            app_log!(host, Debug, "No sign in message, keeping negative={}", self.state.negative);
        }
        if color {
            let layer = self.layers.as_ref().and_then(|l| l.text_layer(Element::Stock));
            if let Some(layer) = layer {
                let tint = trend_color(self.state.negative);
                if let Err(err) = host.ui().text_layer_set_text_color(layer, tint) {
                    app_log!(host, Error, "Failed to recolour quote: {}", err);
                }
            }
        }
        self.publish(host, Element::Stock, self.state.quote.as_str());
    }

    fn rollback<H: Host>(&mut self, host: &mut H, layers: FaceLayers) {
        if self.config.revision.has_clock() {
            host.tick_unsubscribe();
        }
        if let Err(err) = layers.release(host.ui()) {
            app_log!(host, Error, "Release failed: {}", err);
        }
    }
}

impl<H: Host> AppHandler<H> for WatchFace {
    type Error = StartError;

    fn init(&mut self, host: &mut H) -> Result<(), StartError> {
        if self.layers.is_some() {
            app_log!(host, Debug, "Already running, init ignored");
            return Ok(());
        }
        let screen = screen_frame(SCREEN_WIDTH, SCREEN_HEIGHT);
        let layers = match FaceLayers::acquire(host.ui(), &self.config, screen) {
            Ok(layers) => layers,
            Err(err) => {
                app_log!(host, Error, "Window setup failed: {}", err);
                return Err(StartError::Ui(err));
            }
        };
        self.layers = Some(layers);
        app_log!(host, Debug, "Just pushed a window!");

        let revision = self.config.revision;
        if revision.has_clock() {
            let now = host.now();
            self.show_time(host, &now);
            host.tick_subscribe(TimeUnits::MINUTE);
        }
        if revision.uses_messaging() {
            let opened = host.open(self.config.inbox_size, self.config.outbox_size);
            if !opened.is_ok() {
                app_log!(host, Error, "Messaging open failed: {}", opened);
                if let Some(layers) = self.layers.take() {
                    self.rollback(host, layers);
                }
                return Err(StartError::Messaging(opened));
            }
        }
        app_log!(host, Info, "{} face started", revision);
        Ok(())
    }

    fn deinit(&mut self, host: &mut H) {
        let Some(layers) = self.layers.take() else {
            app_log!(host, Debug, "Not running, deinit ignored");
            return;
        };
        if self.config.revision.uses_messaging() {
            host.close();
        }
        self.rollback(host, layers);
        app_log!(host, Info, "{} face stopped", self.config.revision);
    }

    fn on_tick(&mut self, host: &mut H, time: &WallTime, _changed: TimeUnits) {
        if self.layers.is_none() || !self.config.revision.has_clock() {
            return;
        }
        self.show_time(host, time);
        let refresh = self.state.record_tick(self.config.refresh_interval);
        if refresh && self.config.revision.uses_messaging() {
            self.request_refresh(host);
        }
    }

    fn on_inbox_received(&mut self, host: &mut H, dictionary: &Dictionary) {
        if self.layers.is_none() {
            return;
        }
        self.ingest(host, dictionary);
    }

    fn on_inbox_dropped(&mut self, host: &mut H, reason: DeliveryResult) {
        app_log!(host, Error, "Message dropped: {}", reason);
    }

    fn on_outbox_failed(&mut self, host: &mut H, _dictionary: &Dictionary, reason: DeliveryResult) {
        app_log!(host, Error, "Outbox send failed: {}", reason);
    }

    fn on_outbox_sent(&mut self, host: &mut H, _dictionary: &Dictionary) {
        app_log!(host, Info, "Outbox send success!");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::assets::RESOURCES;
    use crate::config::Revision;
    use platform::mocks::MockHost;
    use platform::{Clock, DisplayCaps, LogLevel, Messaging, TickService};

    fn host() -> MockHost {
        MockHost::with_display(DisplayCaps::MONOCHROME, &RESOURCES)
    }

    #[test]
    fn test_second_init_is_noop() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Clock));
        face.init(&mut host).unwrap();
        let live = host.scene().live_objects();
        face.init(&mut host).unwrap();
        assert_eq!(host.scene().live_objects(), live);
    }

    #[test]
    fn test_second_deinit_is_noop() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Showcase));
        face.init(&mut host).unwrap();
        face.deinit(&mut host);
        let releases = host.scene().stats().releases;
        face.deinit(&mut host);
        assert_eq!(host.scene().stats().releases, releases);
        assert_eq!(host.scene().stats().stale_releases, 0);
    }

    #[test]
    fn test_init_formats_time_immediately() {
        let mut host = host();
        host.set_time(WallTime::new(2026, 10, 16, 9, 7, 0).unwrap());
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Clock));
        face.init(&mut host).unwrap();
        assert_eq!(face.state().time, "09:07");
        assert_eq!(face.state().date, "10/16");
        assert_eq!(host.tick_subscription(), Some(TimeUnits::MINUTE));
    }

    #[test]
    fn test_greeting_revision_has_no_services() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Greeting));
        face.init(&mut host).unwrap();
        assert_eq!(host.tick_subscription(), None);
        assert!(host.limits().is_none());
        assert_eq!(host.log_count(LogLevel::Debug), 1);
    }

    #[test]
    fn test_messaging_failure_rolls_back() {
        let mut host = host();
        host.fail_open(DeliveryResult::OutOfMemory);
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Weather));
        let err = face.init(&mut host).unwrap_err();
        assert_eq!(err, StartError::Messaging(DeliveryResult::OutOfMemory));
        assert!(!face.is_running());
        assert_eq!(host.scene().live_objects(), 0);
        assert_eq!(host.tick_subscription(), None);
    }

    #[test]
    fn test_kind_mismatch_is_logged_and_skipped() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Weather));
        face.init(&mut host).unwrap();
        host.clear_logs();
        let mut dict = Dictionary::new();
        dict.push_text(MessageKey::Temperature.raw(), "warm").unwrap();
        face.on_inbox_received(&mut host, &dict);
        assert_eq!(host.log_count(LogLevel::Error), 1);
        assert!(face.state().temperature.is_empty());
        assert!(face.state().weather.is_empty());
    }

    #[test]
    fn test_refresh_send_refusal_is_logged() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Weather));
        face.init(&mut host).unwrap();
        host.clear_logs();
        host.fail_next_send(DeliveryResult::Busy);
        let now = host.now();
        for _ in 0..5 {
            face.on_tick(&mut host, &now, TimeUnits::MINUTE);
        }
        assert_eq!(host.log_count(LogLevel::Error), 1);
        assert!(host.sent().is_empty());
    }

    #[test]
    fn test_outcome_callbacks_only_log() {
        let mut host = host();
        let mut face = WatchFace::new(FaceConfig::for_revision(Revision::Weather));
        face.init(&mut host).unwrap();
        host.clear_logs();
        let dict = Dictionary::new();
        face.on_inbox_dropped(&mut host, DeliveryResult::BufferOverflow);
        face.on_outbox_failed(&mut host, &dict, DeliveryResult::SendTimeout);
        face.on_outbox_sent(&mut host, &dict);
        assert_eq!(host.log_count(LogLevel::Error), 2);
        assert_eq!(host.log_count(LogLevel::Info), 1);
        assert!(face.state().weather.is_empty());
        assert!(host.sent().is_empty());
    }
}
