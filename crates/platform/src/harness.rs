//! Single-threaded event loop driving an [`AppHandler`] against a [`Host`].
//!
//! Events are queued in a fixed 16-entry deque and dispatched one at a time,
//! so a handler never runs while another is in progress. The loop applies
//! the host's delivery rules before calling into the app:
//!
//! - ticks reach the app only while subscribed, and only when a subscribed
//!   unit changed (a coarser unit changing counts, see
//!   [`TimeUnits::changed_between`])
//! - inbox traffic is delivered only while messaging is open
//! - an inbound dictionary larger than the declared inbox is converted into
//!   an inbox-dropped event with [`DeliveryResult::BufferOverflow`]

use heapless::Deque;

use crate::app::AppHandler;
use crate::clock::{TimeUnits, WallTime};
use crate::dictionary::Dictionary;
use crate::host::Host;
use crate::log::HostLog;
use crate::messaging::DeliveryResult;

/// Maximum number of undelivered events.
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Every unit; reported on the first tick after launch.
const ALL_UNITS: TimeUnits = TimeUnits::SECOND
    .union(TimeUnits::MINUTE)
    .union(TimeUnits::HOUR)
    .union(TimeUnits::DAY)
    .union(TimeUnits::MONTH)
    .union(TimeUnits::YEAR);

/// Something the host delivers to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Wall-clock tick
    Tick {
        /// Current time
        time: WallTime,
        /// Units that changed since the previous tick
        changed: TimeUnits,
    },
    /// Dictionary received from the companion
    InboxReceived(Dictionary),
    /// Inbound message dropped by the host
    InboxDropped(DeliveryResult),
    /// Outbound message acknowledged
    OutboxSent(Dictionary),
    /// Outbound message failed
    OutboxFailed {
        /// The dictionary that was sent
        dictionary: Dictionary,
        /// Why delivery failed
        reason: DeliveryResult,
    },
}

/// Startup failed; the host and app are handed back untouched by the loop.
#[derive(Debug)]
pub struct LaunchFailure<H, A, E> {
    /// The host, as left by the failed init
    pub host: H,
    /// The application value
    pub app: A,
    /// Error returned by `init`
    pub error: E,
}

/// Event loop owning a host and a running application.
pub struct EventLoop<H, A> {
    host: H,
    app: A,
    queue: Deque<HostEvent, EVENT_QUEUE_DEPTH>,
    last_tick: Option<WallTime>,
}

impl<H, A> EventLoop<H, A>
where
    H: Host,
    A: AppHandler<H>,
{
    /// Run the app's `init` and, on success, return a loop ready to accept
    /// events.
    pub fn launch(mut host: H, mut app: A) -> Result<Self, LaunchFailure<H, A, A::Error>> {
        match app.init(&mut host) {
            Ok(()) => Ok(Self {
                host,
                app,
                queue: Deque::new(),
                last_tick: None,
            }),
            Err(error) => Err(LaunchFailure { host, app, error }),
        }
    }

    /// Queue an event. A full queue hands the event back.
    pub fn post(&mut self, event: HostEvent) -> Result<(), HostEvent> {
        self.queue.push_back(event)
    }

    /// Queue a tick at `time`, computing the changed units from the previous
    /// queued tick. Returns `Ok(false)` when nothing changed.
    ///
    /// A tick refused by a full queue is not remembered, so posting the same
    /// time again after draining still delivers it.
    pub fn post_tick(&mut self, time: WallTime) -> Result<bool, HostEvent> {
        let changed = self
            .last_tick
            .map_or(ALL_UNITS, |prev| TimeUnits::changed_between(&prev, &time));
        if changed.is_empty() {
            return Ok(false);
        }
        self.post(HostEvent::Tick { time, changed })?;
        self.last_tick = Some(time);
        Ok(true)
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch the oldest queued event. Returns `false` if the queue was
    /// empty.
    pub fn dispatch_one(&mut self) -> bool {
        let Some(event) = self.queue.pop_front() else {
            return false;
        };
        self.dispatch(event);
        true
    }

    /// Dispatch until the queue is empty; returns how many events ran.
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0usize;
        while self.dispatch_one() {
            count = count.saturating_add(1);
        }
        count
    }

    fn dispatch(&mut self, event: HostEvent) {
        let host = &mut self.host;
        match event {
            HostEvent::Tick { time, changed } => {
                let subscribed = host.tick_subscription();
                if subscribed.is_some_and(|units| units.intersects(changed)) {
                    self.app.on_tick(host, &time, changed);
                }
            }
            HostEvent::InboxReceived(dictionary) => {
                let Some(limits) = host.limits() else {
                    drop_closed(host, "inbound dictionary");
                    return;
                };
                match limits.admits_inbound(&dictionary) {
                    DeliveryResult::Ok => self.app.on_inbox_received(host, &dictionary),
                    reason => self.app.on_inbox_dropped(host, reason),
                }
            }
            HostEvent::InboxDropped(reason) => {
                if host.limits().is_some() {
                    self.app.on_inbox_dropped(host, reason);
                } else {
                    drop_closed(host, "inbox drop");
                }
            }
            HostEvent::OutboxSent(dictionary) => {
                if host.limits().is_some() {
                    self.app.on_outbox_sent(host, &dictionary);
                } else {
                    drop_closed(host, "outbox ack");
                }
            }
            HostEvent::OutboxFailed { dictionary, reason } => {
                if host.limits().is_some() {
                    self.app.on_outbox_failed(host, &dictionary, reason);
                } else {
                    drop_closed(host, "outbox failure");
                }
            }
        }
    }

    /// Host accessor.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host accessor, for scripting the host between events.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Application accessor.
    pub fn app(&self) -> &A {
        &self.app
    }

    /// Discard queued events, run the app's `deinit` and hand both values
    /// back.
    pub fn shutdown(mut self) -> (H, A) {
        self.queue.clear();
        self.app.deinit(&mut self.host);
        (self.host, self.app)
    }
}

fn drop_closed<H: HostLog + ?Sized>(host: &mut H, what: &str) {
    crate::app_log!(host, Verbose, "messaging closed, dropping {}", what);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::clock::TickService;
    use crate::messaging::Messaging;
    use crate::mocks::MockHost;

    #[derive(Debug, Default)]
    struct Recorder {
        init_calls: usize,
        deinit_calls: usize,
        ticks: std::vec::Vec<TimeUnits>,
        received: usize,
        dropped: std::vec::Vec<DeliveryResult>,
        sent: usize,
        failed: usize,
        fail_init: bool,
    }

    impl AppHandler<MockHost> for Recorder {
        type Error = ();

        fn init(&mut self, host: &mut MockHost) -> Result<(), ()> {
            self.init_calls += 1;
            if self.fail_init {
                return Err(());
            }
            host.tick_subscribe(TimeUnits::MINUTE);
            let _ = host.open(64, 16);
            Ok(())
        }

        fn deinit(&mut self, host: &mut MockHost) {
            self.deinit_calls += 1;
            host.tick_unsubscribe();
            host.close();
        }

        fn on_tick(&mut self, _host: &mut MockHost, _time: &WallTime, changed: TimeUnits) {
            self.ticks.push(changed);
        }

        fn on_inbox_received(&mut self, _host: &mut MockHost, _dictionary: &Dictionary) {
            self.received += 1;
        }

        fn on_inbox_dropped(&mut self, _host: &mut MockHost, reason: DeliveryResult) {
            self.dropped.push(reason);
        }

        fn on_outbox_failed(&mut self, _host: &mut MockHost, _d: &Dictionary, _r: DeliveryResult) {
            self.failed += 1;
        }

        fn on_outbox_sent(&mut self, _host: &mut MockHost, _dictionary: &Dictionary) {
            self.sent += 1;
        }
    }

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(2024, 3, 9, hour, minute, second).unwrap()
    }

    #[test]
    fn test_launch_failure_returns_parts() {
        let app = Recorder {
            fail_init: true,
            ..Recorder::default()
        };
        let failure = match EventLoop::launch(MockHost::new(), app) {
            Ok(_) => panic!("init should fail"),
            Err(failure) => failure,
        };
        assert_eq!(failure.app.init_calls, 1);
        assert_eq!(failure.app.deinit_calls, 0);
    }

    #[test]
    fn test_ticks_filtered_by_subscription() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        assert!(lp.post_tick(at(14, 15, 0)).unwrap());
        // only the second changed: not a minute tick
        assert!(lp.post_tick(at(14, 15, 30)).unwrap());
        assert!(lp.post_tick(at(14, 16, 0)).unwrap());
        // identical time: nothing posted
        assert!(!lp.post_tick(at(14, 16, 0)).unwrap());
        assert_eq!(lp.run_until_idle(), 3);
        assert_eq!(lp.app().ticks.len(), 2);
        assert!(lp.app().ticks[1].contains(TimeUnits::MINUTE));
    }

    #[test]
    fn test_hour_jump_with_same_minute_reaches_minute_subscriber() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        assert!(lp.post_tick(at(8, 5, 0)).unwrap());
        assert!(lp.post_tick(at(9, 5, 0)).unwrap());
        assert_eq!(lp.run_until_idle(), 2);
        assert_eq!(lp.app().ticks.len(), 2);
        assert!(lp.app().ticks[1].contains(TimeUnits::HOUR | TimeUnits::MINUTE));
    }

    #[test]
    fn test_tick_refused_by_full_queue_can_be_retried() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        assert!(lp.post_tick(at(8, 5, 0)).unwrap());
        lp.run_until_idle();
        for _ in 0..EVENT_QUEUE_DEPTH {
            lp.post(HostEvent::InboxDropped(DeliveryResult::Busy)).unwrap();
        }
        assert!(lp.post_tick(at(8, 6, 0)).is_err());
        lp.run_until_idle();

        assert!(lp.post_tick(at(8, 6, 0)).unwrap());
        lp.run_until_idle();
        assert_eq!(lp.app().ticks.len(), 2);
        assert!(lp.app().ticks[1].contains(TimeUnits::MINUTE));
    }

    #[test]
    fn test_no_ticks_after_unsubscribe() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        lp.host_mut().tick_unsubscribe();
        lp.post_tick(at(9, 0, 0)).unwrap();
        lp.run_until_idle();
        assert!(lp.app().ticks.is_empty());
    }

    #[test]
    fn test_oversize_inbound_becomes_drop() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        let mut big = Dictionary::new();
        for key in 0..4 {
            big.push_text(key, "0123456789abcdef0123456789").unwrap();
        }
        let mut small = Dictionary::new();
        small.push_int32(0, 21).unwrap();
        lp.post(HostEvent::InboxReceived(big)).unwrap();
        lp.post(HostEvent::InboxReceived(small)).unwrap();
        lp.run_until_idle();
        assert_eq!(lp.app().received, 1);
        assert_eq!(lp.app().dropped, [DeliveryResult::BufferOverflow]);
    }

    #[test]
    fn test_closed_messaging_delivers_nothing() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        lp.host_mut().close();
        lp.post(HostEvent::InboxReceived(Dictionary::new())).unwrap();
        lp.post(HostEvent::OutboxSent(Dictionary::new())).unwrap();
        lp.run_until_idle();
        assert_eq!(lp.app().received, 0);
        assert_eq!(lp.app().sent, 0);
    }

    #[test]
    fn test_outbox_events_delivered() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        lp.post(HostEvent::OutboxSent(Dictionary::new())).unwrap();
        lp.post(HostEvent::OutboxFailed {
            dictionary: Dictionary::new(),
            reason: DeliveryResult::SendTimeout,
        })
        .unwrap();
        lp.run_until_idle();
        assert_eq!(lp.app().sent, 1);
        assert_eq!(lp.app().failed, 1);
    }

    #[test]
    fn test_queue_full_hands_event_back() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        for _ in 0..EVENT_QUEUE_DEPTH {
            lp.post(HostEvent::InboxDropped(DeliveryResult::Busy)).unwrap();
        }
        let overflow = HostEvent::InboxDropped(DeliveryResult::Closed);
        assert_eq!(lp.post(overflow.clone()), Err(overflow));
        assert_eq!(lp.pending(), EVENT_QUEUE_DEPTH);
    }

    #[test]
    fn test_shutdown_runs_deinit_once() {
        let mut lp = EventLoop::launch(MockHost::new(), Recorder::default()).unwrap();
        lp.post(HostEvent::InboxDropped(DeliveryResult::Busy)).unwrap();
        let (host, app) = lp.shutdown();
        assert_eq!(app.deinit_calls, 1);
        assert!(app.dropped.is_empty());
        assert!(host.tick_subscription().is_none());
        assert!(host.limits().is_none());
    }
}
