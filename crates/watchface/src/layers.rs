//! Host objects owned by the face.
//!
//! [`FaceLayers::acquire`] creates the window and its layers in drawing
//! order: background bitmap layer, text layers top to bottom, status bar.
//! If any step fails, everything created so far is released before the
//! error is returned. [`FaceLayers::release`] consumes the value, so a set
//! of handles can only be released once.

use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use platform::graphics::rect;
use platform::{BitmapId, Color, HostError, LayerId, TextAlignment, UiToolkit, WindowId};
use ui::layout::{CLASSIC_FONT, MAX_ELEMENTS};
use ui::Element;

use crate::config::{FaceConfig, Revision};

/// Placeholder shown until the first tick.
pub const TIME_PLACEHOLDER: &str = "00:00";
/// Placeholder shown until the companion answers.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

/// Every handle the face holds.
#[derive(Debug)]
pub struct FaceLayers {
    window: WindowId,
    background: Option<LayerId>,
    background_bitmap: Option<BitmapId>,
    texts: Vec<(Element, LayerId), MAX_ELEMENTS>,
    status_bar: Option<LayerId>,
}

impl FaceLayers {
    /// Create and attach every object `config` asks for, then push the
    /// window.
    pub fn acquire<U: UiToolkit + ?Sized>(
        ui: &mut U,
        config: &FaceConfig,
        screen: Rectangle,
    ) -> Result<Self, HostError> {
        let window = ui.window_create()?;
        let mut layers = Self {
            window,
            background: None,
            background_bitmap: None,
            texts: Vec::new(),
            status_bar: None,
        };
        match layers.populate(ui, config, screen) {
            Ok(()) => Ok(layers),
            Err(err) => {
                // report the first error
                let _ = layers.release(ui);
                Err(err)
            }
        }
    }

    fn populate<U: UiToolkit + ?Sized>(
        &mut self,
        ui: &mut U,
        config: &FaceConfig,
        screen: Rectangle,
    ) -> Result<(), HostError> {
        ui.window_set_background_color(self.window, config.window_color)?;

        if let Some(resource) = config.background {
            let bitmap = ui.bitmap_load(resource)?;
            self.background_bitmap = Some(bitmap);
            let layer = ui.bitmap_layer_create(screen)?;
            self.background = Some(layer);
            ui.bitmap_layer_set_bitmap(layer, bitmap)?;
            ui.layer_add_child(self.window, layer)?;
        }

        let layout = config.layout(screen.size.width);
        for element in layout.elements() {
            let Some(frame) = layout.frame(element) else {
                continue;
            };
            let layer = ui.text_layer_create(frame)?;
            self.texts
                .push((element, layer))
                .map_err(|_| HostError::TooManyChildren)?;
            let font = if config.revision == Revision::Greeting {
                CLASSIC_FONT
            } else {
                element.font()
            };
            ui.text_layer_set_font(layer, font)?;
            ui.text_layer_set_alignment(layer, TextAlignment::Center)?;
            ui.text_layer_set_background_color(layer, Color::Clear)?;
            ui.text_layer_set_text_color(layer, Color::Black)?;
            let initial = match element {
                Element::Greeting => config.greeting,
                Element::Time => TIME_PLACEHOLDER,
                Element::Weather | Element::Stock => LOADING_PLACEHOLDER,
                Element::Date => "",
            };
            ui.text_layer_set_text(layer, initial)?;
            ui.layer_add_child(self.window, layer)?;
        }

        if config.status_bar {
            let layer = ui.status_bar_create()?;
            self.status_bar = Some(layer);
            ui.status_bar_set_colors(layer, Color::Black, Color::White)?;
            ui.layer_add_child(self.window, layer)?;
        }

        ui.window_stack_push(self.window, true)
    }

    /// Destroy everything, children before the window and each bitmap after
    /// the layer showing it. Every object is attempted; the first failure is
    /// returned.
    pub fn release<U: UiToolkit + ?Sized>(self, ui: &mut U) -> Result<(), HostError> {
        let mut first_error = None;
        let mut note = |result: Result<(), HostError>| {
            if let Err(err) = result {
                first_error.get_or_insert(err);
            }
        };

        if let Some(layer) = self.status_bar {
            note(ui.layer_destroy(layer));
        }
        for (_, layer) in self.texts.iter().rev() {
            note(ui.layer_destroy(*layer));
        }
        if let Some(layer) = self.background {
            note(ui.layer_destroy(layer));
        }
        if let Some(bitmap) = self.background_bitmap {
            note(ui.bitmap_destroy(bitmap));
        }
        note(ui.window_destroy(self.window));

        first_error.map_or(Ok(()), Err)
    }

    /// The face window.
    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Text layer showing `element`.
    pub fn text_layer(&self, element: Element) -> Option<LayerId> {
        self.texts
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, layer)| *layer)
    }

    /// Status bar layer, if created.
    pub fn status_bar(&self) -> Option<LayerId> {
        self.status_bar
    }

    /// Background bitmap layer, if created.
    pub fn background(&self) -> Option<LayerId> {
        self.background
    }

    /// Number of host objects held.
    pub fn object_count(&self) -> usize {
        let optional = [
            self.background.is_some(),
            self.background_bitmap.is_some(),
            self.status_bar.is_some(),
        ]
        .into_iter()
        .filter(|held| *held)
        .count();
        self.texts.len().saturating_add(optional).saturating_add(1)
    }
}

/// Whole-screen frame for a `width` × `height` display.
pub const fn screen_frame(width: u32, height: u32) -> Rectangle {
    rect(0, 0, width, height)
}
