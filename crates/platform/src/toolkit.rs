//! UI toolkit abstraction layer
//!
//! Windows own a root layer; text, bitmap and status-bar layers are attached
//! to it and drawn in attachment order. The topmost window of the window
//! stack is what the user sees.

use embedded_graphics::primitives::Rectangle;

use crate::graphics::{Color, FontKey, TextAlignment};
use crate::handles::{BitmapId, LayerId, WindowId};
use crate::resources::ResourceId;

/// Toolkit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostError {
    /// No free slot for another object of this kind
    #[error("host out of memory")]
    OutOfMemory,
    /// The handle refers to an object that was already destroyed
    #[error("stale handle")]
    StaleHandle,
    /// The layer exists but is not of the kind the call expects
    #[error("layer kind mismatch")]
    WrongLayerKind,
    /// The layer is already attached to a window
    #[error("layer already attached")]
    AlreadyAttached,
    /// The window cannot hold more child layers
    #[error("too many child layers")]
    TooManyChildren,
    /// No resource with this identifier is bundled
    #[error("unknown resource")]
    UnknownResource,
    /// The window stack is full
    #[error("window stack full")]
    StackFull,
    /// The window is already on the window stack
    #[error("window already on stack")]
    AlreadyPushed,
    /// The text does not fit the layer's text storage
    #[error("text too long for layer")]
    TextTooLong,
}

/// Host UI toolkit.
///
/// Every creating call can fail with [`HostError::OutOfMemory`]; every call
/// taking a handle fails with [`HostError::StaleHandle`] once the object has
/// been destroyed.
pub trait UiToolkit {
    // ── Windows ──────────────────────────────────────────────────────────

    /// Create an empty window.
    fn window_create(&mut self) -> Result<WindowId, HostError>;

    /// Destroy a window. It is removed from the window stack if present;
    /// attached layers are detached but not destroyed.
    fn window_destroy(&mut self, window: WindowId) -> Result<(), HostError>;

    /// Set the window's background fill.
    fn window_set_background_color(
        &mut self,
        window: WindowId,
        color: Color,
    ) -> Result<(), HostError>;

    /// Push a window onto the window stack, making it visible.
    fn window_stack_push(&mut self, window: WindowId, animated: bool) -> Result<(), HostError>;

    /// Pop the topmost window.
    fn window_stack_pop(&mut self, animated: bool) -> Option<WindowId>;

    /// Attach `layer` as the last child of the window's root layer.
    fn layer_add_child(&mut self, window: WindowId, layer: LayerId) -> Result<(), HostError>;

    /// Destroy a layer of any kind, detaching it from its window first.
    fn layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError>;

    // ── Text layers ──────────────────────────────────────────────────────

    /// Create a text layer covering `frame`.
    fn text_layer_create(&mut self, frame: Rectangle) -> Result<LayerId, HostError>;

    /// Replace the displayed text (copied into host storage).
    fn text_layer_set_text(&mut self, layer: LayerId, text: &str) -> Result<(), HostError>;

    /// Set the font.
    fn text_layer_set_font(&mut self, layer: LayerId, font: FontKey) -> Result<(), HostError>;

    /// Set horizontal alignment.
    fn text_layer_set_alignment(
        &mut self,
        layer: LayerId,
        alignment: TextAlignment,
    ) -> Result<(), HostError>;

    /// Set the text colour.
    fn text_layer_set_text_color(&mut self, layer: LayerId, color: Color)
        -> Result<(), HostError>;

    /// Set the background fill behind the text.
    fn text_layer_set_background_color(
        &mut self,
        layer: LayerId,
        color: Color,
    ) -> Result<(), HostError>;

    // ── Bitmaps ──────────────────────────────────────────────────────────

    /// Load a bundled bitmap.
    fn bitmap_load(&mut self, resource: ResourceId) -> Result<BitmapId, HostError>;

    /// Release a loaded bitmap.
    fn bitmap_destroy(&mut self, bitmap: BitmapId) -> Result<(), HostError>;

    /// Create a bitmap layer covering `frame`.
    fn bitmap_layer_create(&mut self, frame: Rectangle) -> Result<LayerId, HostError>;

    /// Show `bitmap` in a bitmap layer.
    fn bitmap_layer_set_bitmap(
        &mut self,
        layer: LayerId,
        bitmap: BitmapId,
    ) -> Result<(), HostError>;

    // ── Status bar ───────────────────────────────────────────────────────

    /// Create a status bar layer across the top of the screen.
    fn status_bar_create(&mut self) -> Result<LayerId, HostError>;

    /// Set status bar colours.
    fn status_bar_set_colors(
        &mut self,
        layer: LayerId,
        background: Color,
        foreground: Color,
    ) -> Result<(), HostError>;

    // ── Capabilities ─────────────────────────────────────────────────────

    /// `true` if the display renders colour.
    fn supports_color(&self) -> bool;
}
