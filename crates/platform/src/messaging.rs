//! Inbox/outbox messaging with the paired companion device.
//!
//! Outbound sends are asynchronous: [`Messaging::send`] only reports whether
//! the host accepted the dictionary into its outbox. Whether it was delivered
//! arrives later as an `OutboxSent` / `OutboxFailed` event.

use crate::dictionary::{Dictionary, WIRE_CAPACITY};

/// Result codes reported by the messaging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum DeliveryResult {
    /// Accepted / delivered
    Ok,
    /// The companion did not acknowledge in time
    SendTimeout,
    /// The companion refused the message
    SendRejected,
    /// No companion connected
    NotConnected,
    /// The companion app is not running
    AppNotRunning,
    /// Invalid arguments supplied to the service
    InvalidArgs,
    /// A previous message is still in flight
    Busy,
    /// The dictionary exceeds the declared inbox/outbox size
    BufferOverflow,
    /// Messaging has already been closed
    Closed,
    /// The host could not allocate message buffers
    OutOfMemory,
    /// Unexpected host failure
    InternalError,
}

impl DeliveryResult {
    /// `true` for [`DeliveryResult::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl core::fmt::Display for DeliveryResult {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Self::Ok => "ok",
            Self::SendTimeout => "send timed out",
            Self::SendRejected => "send rejected",
            Self::NotConnected => "not connected",
            Self::AppNotRunning => "companion app not running",
            Self::InvalidArgs => "invalid arguments",
            Self::Busy => "busy",
            Self::BufferOverflow => "buffer overflow",
            Self::Closed => "closed",
            Self::OutOfMemory => "out of memory",
            Self::InternalError => "internal error",
        };
        f.write_str(text)
    }
}

/// Inbox/outbox sizes declared when messaging is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageLimits {
    inbox: u16,
    outbox: u16,
}

impl MessageLimits {
    /// Declare sizes; both are clamped to the host's wire capacity.
    pub fn new(inbox: u16, outbox: u16) -> Self {
        let cap = u16::try_from(WIRE_CAPACITY).unwrap_or(u16::MAX);
        Self {
            inbox: inbox.min(cap),
            outbox: outbox.min(cap),
        }
    }

    /// Inbox size in encoded bytes.
    pub const fn inbox(self) -> u16 {
        self.inbox
    }

    /// Outbox size in encoded bytes.
    pub const fn outbox(self) -> u16 {
        self.outbox
    }

    /// Check an inbound dictionary against the inbox size.
    pub fn admits_inbound(self, dict: &Dictionary) -> DeliveryResult {
        Self::fits(dict, self.inbox)
    }

    /// Check an outbound dictionary against the outbox size.
    pub fn admits_outbound(self, dict: &Dictionary) -> DeliveryResult {
        Self::fits(dict, self.outbox)
    }

    fn fits(dict: &Dictionary, limit: u16) -> DeliveryResult {
        match dict.encoded_len() {
            Ok(len) if len <= usize::from(limit) => DeliveryResult::Ok,
            _ => DeliveryResult::BufferOverflow,
        }
    }
}

/// Host messaging service.
pub trait Messaging {
    /// Open the inbox and outbox with the given maximum sizes.
    fn open(&mut self, inbox_size: u16, outbox_size: u16) -> DeliveryResult;

    /// Close both directions; pending outbound messages are discarded.
    fn close(&mut self);

    /// Limits declared by the last successful [`Messaging::open`], or
    /// `None` while closed.
    fn limits(&self) -> Option<MessageLimits>;

    /// Queue a dictionary for delivery to the companion.
    fn send(&mut self, dict: &Dictionary) -> DeliveryResult;
}
