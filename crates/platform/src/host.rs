//! The complete host an application runs against.

use crate::clock::{Clock, TickService};
use crate::log::HostLog;
use crate::messaging::Messaging;
use crate::toolkit::UiToolkit;

/// Every host service behind one bound.
///
/// The UI toolkit is reached through [`Host::ui`] so that hosts can share a
/// single toolkit implementation (usually [`Scene`](crate::Scene)) while
/// providing their own clock, messaging and log sink.
pub trait Host: Clock + TickService + Messaging + HostLog {
    /// Toolkit implementation.
    type Ui: UiToolkit;

    /// Mutable access to the UI toolkit.
    fn ui(&mut self) -> &mut Self::Ui;

    /// Shared access to the UI toolkit.
    fn ui_ref(&self) -> &Self::Ui;
}
