//! Startup errors.

use platform::{DeliveryResult, HostError};

/// Why the face could not start. Nothing stays allocated on the host when
/// one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError {
    /// The host refused a UI allocation or operation
    #[error("UI setup failed: {0}")]
    Ui(#[from] HostError),
    /// Messaging could not be opened
    #[error("messaging open failed: {0}")]
    Messaging(DeliveryResult),
}
