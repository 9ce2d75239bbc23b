//! Opaque handles to host-owned objects.
//!
//! A handle is a slot index plus the generation the slot had when the object
//! was created. Once the object is destroyed the slot's generation moves on,
//! so any copy of the old handle is detected as stale instead of silently
//! addressing whatever object reuses the slot.

/// Slot index + generation pair shared by all handle kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handle {
    index: u8,
    generation: u16,
}

impl Handle {
    pub(crate) const fn new(index: u8, generation: u16) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the host's table.
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Slot generation at creation time.
    pub const fn generation(self) -> u16 {
        self.generation
    }
}

/// A window: the root of a layer tree, pushed onto the window stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowId(pub(crate) Handle);

/// A drawable layer (text, bitmap or status bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerId(pub(crate) Handle);

/// A bitmap loaded from the application's bundled resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitmapId(pub(crate) Handle);

impl WindowId {
    /// Underlying handle.
    pub const fn handle(self) -> Handle {
        self.0
    }
}

impl LayerId {
    /// Underlying handle.
    pub const fn handle(self) -> Handle {
        self.0
    }
}

impl BitmapId {
    /// Underlying handle.
    pub const fn handle(self) -> Handle {
        self.0
    }
}
