//! Application lifecycle and event handlers.
//!
//! An application is a value implementing [`AppHandler`]. The host calls
//! [`AppHandler::init`] once at launch, then delivers events one at a time
//! on the same thread, and finally calls [`AppHandler::deinit`] before exit.
//! Handlers never run concurrently with each other.

use crate::clock::{TimeUnits, WallTime};
use crate::dictionary::Dictionary;
use crate::messaging::DeliveryResult;

/// Callbacks the host invokes on an application.
///
/// Every event handler has an empty default so an app only overrides what it
/// subscribes to.
pub trait AppHandler<H: ?Sized> {
    /// Error returned when startup fails.
    type Error;

    /// Build the UI, subscribe to services and open messaging.
    ///
    /// On error the application must leave no host object allocated.
    fn init(&mut self, host: &mut H) -> Result<(), Self::Error>;

    /// Release everything acquired in [`init`](Self::init).
    fn deinit(&mut self, host: &mut H);

    /// A subscribed tick fired. `changed` holds the units that changed
    /// since the previous tick.
    fn on_tick(&mut self, _host: &mut H, _time: &WallTime, _changed: TimeUnits) {}

    /// A dictionary arrived from the companion.
    fn on_inbox_received(&mut self, _host: &mut H, _dictionary: &Dictionary) {}

    /// An inbound message was dropped by the host before delivery.
    fn on_inbox_dropped(&mut self, _host: &mut H, _reason: DeliveryResult) {}

    /// An outbound message failed to deliver.
    fn on_outbox_failed(
        &mut self,
        _host: &mut H,
        _dictionary: &Dictionary,
        _reason: DeliveryResult,
    ) {
    }

    /// An outbound message was acknowledged by the companion.
    fn on_outbox_sent(&mut self, _host: &mut H, _dictionary: &Dictionary) {}
}
