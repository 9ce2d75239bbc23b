//! In-memory scene: the host side of the UI toolkit.
//!
//! [`Scene`] implements [`UiToolkit`] over fixed-capacity slot tables, one
//! per object kind. Running out of slots is how allocation failure shows up,
//! and generational handles make use-after-destroy and double-destroy
//! detectable instead of undefined.
//!
//! ```text
//! windows ─┬─ WindowNode { background, children: [LayerId] }
//!          │
//! layers  ─┼─ LayerNode  { frame, parent, Text | Bitmap | StatusBar }
//!          │
//! bitmaps ─┴─ BitmapNode { resource, Bitmap }          stack: [WindowId]
//! ```
//!
//! Both the simulator host and [`MockHost`](crate::mocks::MockHost) own a
//! `Scene`; the renderer reads it.

use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::graphics::{rect, Color, FontKey, TextAlignment};
use crate::handles::{BitmapId, Handle, LayerId, WindowId};
use crate::resources::{Bitmap, ResourceEntry, ResourceId};
use crate::toolkit::{HostError, UiToolkit};
use crate::window_stack::WindowStack;

/// Window slots.
pub const MAX_WINDOWS: usize = 4;
/// Layer slots (all kinds).
pub const MAX_LAYERS: usize = 16;
/// Loaded bitmap slots.
pub const MAX_BITMAPS: usize = 4;
/// Child layers per window.
pub const MAX_CHILDREN: usize = 12;
/// Bytes of text a text layer can hold.
pub const LAYER_TEXT_CAPACITY: usize = 48;
/// Height of the status bar strip.
pub const STATUS_BAR_HEIGHT: u32 = 16;

// ── Capabilities ─────────────────────────────────────────────────────────────

/// Display properties of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayCaps {
    /// Renders colour (otherwise black and white only)
    pub color: bool,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl DisplayCaps {
    /// Black-and-white 144×168 display.
    pub const MONOCHROME: Self = Self {
        color: false,
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    };

    /// Colour 144×168 display.
    pub const COLOR: Self = Self {
        color: true,
        width: SCREEN_WIDTH,
        height: SCREEN_HEIGHT,
    };
}

// ── Slot table ───────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Slot<T> {
    generation: u16,
    value: Option<T>,
}

#[derive(Debug)]
struct Slots<T, const N: usize> {
    entries: Vec<Slot<T>, N>,
}

impl<T, const N: usize> Slots<T, N> {
    const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn insert(&mut self, value: T) -> Result<Handle, HostError> {
        let free = self
            .entries
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.value.is_none());
        if let Some((index, slot)) = free {
            let index = u8::try_from(index).map_err(|_| HostError::OutOfMemory)?;
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            return Ok(Handle::new(index, slot.generation));
        }
        let index = u8::try_from(self.entries.len()).map_err(|_| HostError::OutOfMemory)?;
        self.entries
            .push(Slot {
                generation: 0,
                value: Some(value),
            })
            .map_err(|_| HostError::OutOfMemory)?;
        Ok(Handle::new(index, 0))
    }

    fn slot(&self, handle: Handle) -> Option<&Slot<T>> {
        self.entries
            .get(usize::from(handle.index()))
            .filter(|slot| slot.generation == handle.generation())
    }

    fn get(&self, handle: Handle) -> Result<&T, HostError> {
        self.slot(handle)
            .and_then(|slot| slot.value.as_ref())
            .ok_or(HostError::StaleHandle)
    }

    fn get_mut(&mut self, handle: Handle) -> Result<&mut T, HostError> {
        self.entries
            .get_mut(usize::from(handle.index()))
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.as_mut())
            .ok_or(HostError::StaleHandle)
    }

    fn remove(&mut self, handle: Handle) -> Result<T, HostError> {
        self.entries
            .get_mut(usize::from(handle.index()))
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.value.take())
            .ok_or(HostError::StaleHandle)
    }

    fn live(&self) -> usize {
        self.entries.iter().filter(|s| s.value.is_some()).count()
    }

    fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().filter_map(|s| s.value.as_mut())
    }
}

// ── Nodes ────────────────────────────────────────────────────────────────────

/// A window and its ordered child layers.
#[derive(Debug)]
pub struct WindowNode {
    background: Color,
    children: Vec<LayerId, MAX_CHILDREN>,
}

impl WindowNode {
    /// Background fill.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Attached layers, bottom first.
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }
}

/// Text layer state.
#[derive(Debug, Clone)]
pub struct TextContent {
    /// Displayed text
    pub text: heapless::String<LAYER_TEXT_CAPACITY>,
    /// Font
    pub font: FontKey,
    /// Alignment within the frame
    pub alignment: TextAlignment,
    /// Glyph colour
    pub text_color: Color,
    /// Fill behind the text
    pub background: Color,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: heapless::String::new(),
            font: FontKey::Gothic18,
            alignment: TextAlignment::Left,
            text_color: Color::Black,
            background: Color::White,
        }
    }
}

/// What a layer draws.
#[derive(Debug, Clone)]
pub enum LayerContent {
    /// Text layer
    Text(TextContent),
    /// Bitmap layer and the bitmap it shows, if any
    Bitmap(Option<BitmapId>),
    /// Status bar with its colours
    StatusBar {
        /// Strip fill
        background: Color,
        /// Clock text colour
        foreground: Color,
    },
}

/// A layer and where it is attached.
#[derive(Debug)]
pub struct LayerNode {
    frame: Rectangle,
    parent: Option<WindowId>,
    content: LayerContent,
}

impl LayerNode {
    /// Frame in screen coordinates.
    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// Owning window, if attached.
    pub fn parent(&self) -> Option<WindowId> {
        self.parent
    }

    /// Drawing content.
    pub fn content(&self) -> &LayerContent {
        &self.content
    }
}

#[derive(Debug)]
struct BitmapNode {
    resource: ResourceId,
    bitmap: Bitmap,
}

// ── Scene ────────────────────────────────────────────────────────────────────

/// Object allocation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Successful creations (windows, layers, bitmaps)
    pub allocations: usize,
    /// Successful destructions
    pub releases: usize,
    /// Destroy calls on already-destroyed handles
    pub stale_releases: usize,
}

/// The host's object tables, window stack and resource bundle.
#[derive(Debug)]
pub struct Scene {
    caps: DisplayCaps,
    resources: &'static [ResourceEntry],
    windows: Slots<WindowNode, MAX_WINDOWS>,
    layers: Slots<LayerNode, MAX_LAYERS>,
    bitmaps: Slots<BitmapNode, MAX_BITMAPS>,
    stack: WindowStack,
    stats: SceneStats,
    allocation_budget: Option<usize>,
}

impl Scene {
    /// Create an empty scene for a display with `caps`, serving bitmaps from
    /// the application's `resources` table.
    pub const fn new(caps: DisplayCaps, resources: &'static [ResourceEntry]) -> Self {
        Self {
            caps,
            resources,
            windows: Slots::new(),
            layers: Slots::new(),
            bitmaps: Slots::new(),
            stack: WindowStack::new(),
            stats: SceneStats {
                allocations: 0,
                releases: 0,
                stale_releases: 0,
            },
            allocation_budget: None,
        }
    }

    /// Display capabilities.
    pub fn caps(&self) -> DisplayCaps {
        self.caps
    }

    /// Allocation counters.
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Objects currently alive (windows + layers + bitmaps).
    pub fn live_objects(&self) -> usize {
        self.windows
            .live()
            .saturating_add(self.layers.live())
            .saturating_add(self.bitmaps.live())
    }

    /// Allow only `budget` more allocations before reporting
    /// [`HostError::OutOfMemory`]; `None` removes the limit.
    pub fn set_allocation_budget(&mut self, budget: Option<usize>) {
        self.allocation_budget = budget;
    }

    /// Topmost window on the stack.
    pub fn top_window(&self) -> Option<WindowId> {
        self.stack.top()
    }

    /// Number of stacked windows.
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Look up a live window.
    pub fn window(&self, window: WindowId) -> Option<&WindowNode> {
        self.windows.get(window.0).ok()
    }

    /// Look up a live layer.
    pub fn layer(&self, layer: LayerId) -> Option<&LayerNode> {
        self.layers.get(layer.0).ok()
    }

    /// Text shown by a live text layer.
    pub fn text(&self, layer: LayerId) -> Option<&str> {
        match self.layer(layer)?.content() {
            LayerContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        }
    }

    /// Text layer state of a live text layer.
    pub fn text_content(&self, layer: LayerId) -> Option<&TextContent> {
        match self.layer(layer)?.content() {
            LayerContent::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Pixels of a live bitmap.
    pub fn bitmap(&self, bitmap: BitmapId) -> Option<&Bitmap> {
        self.bitmaps.get(bitmap.0).ok().map(|node| &node.bitmap)
    }

    /// Resource a live bitmap was loaded from.
    pub fn bitmap_resource(&self, bitmap: BitmapId) -> Option<ResourceId> {
        self.bitmaps.get(bitmap.0).ok().map(|node| node.resource)
    }

    fn reserve(&mut self) -> Result<(), HostError> {
        match self.allocation_budget {
            Some(0) => Err(HostError::OutOfMemory),
            Some(n) => {
                self.allocation_budget = Some(n.saturating_sub(1));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn allocated(&mut self) {
        self.stats.allocations = self.stats.allocations.saturating_add(1);
    }

    fn released<T>(&mut self, result: Result<T, HostError>) -> Result<T, HostError> {
        match result {
            Ok(value) => {
                self.stats.releases = self.stats.releases.saturating_add(1);
                Ok(value)
            }
            Err(e) => {
                self.stats.stale_releases = self.stats.stale_releases.saturating_add(1);
                Err(e)
            }
        }
    }

    fn create_layer(
        &mut self,
        frame: Rectangle,
        content: LayerContent,
    ) -> Result<LayerId, HostError> {
        self.reserve()?;
        let handle = self.layers.insert(LayerNode {
            frame,
            parent: None,
            content,
        })?;
        self.allocated();
        Ok(LayerId(handle))
    }

    fn text_mut(&mut self, layer: LayerId) -> Result<&mut TextContent, HostError> {
        match &mut self.layers.get_mut(layer.0)?.content {
            LayerContent::Text(t) => Ok(t),
            _ => Err(HostError::WrongLayerKind),
        }
    }
}

impl UiToolkit for Scene {
    fn window_create(&mut self) -> Result<WindowId, HostError> {
        self.reserve()?;
        let handle = self.windows.insert(WindowNode {
            background: Color::White,
            children: Vec::new(),
        })?;
        self.allocated();
        Ok(WindowId(handle))
    }

    fn window_destroy(&mut self, window: WindowId) -> Result<(), HostError> {
        let removed = self.windows.remove(window.0);
        let node = self.released(removed)?;
        self.stack.remove(window);
        for child in &node.children {
            if let Ok(layer) = self.layers.get_mut(child.0) {
                layer.parent = None;
            }
        }
        Ok(())
    }

    fn window_set_background_color(
        &mut self,
        window: WindowId,
        color: Color,
    ) -> Result<(), HostError> {
        self.windows.get_mut(window.0)?.background = color;
        Ok(())
    }

    fn window_stack_push(&mut self, window: WindowId, _animated: bool) -> Result<(), HostError> {
        self.windows.get(window.0)?;
        self.stack.push(window)
    }

    fn window_stack_pop(&mut self, _animated: bool) -> Option<WindowId> {
        self.stack.pop()
    }

    fn layer_add_child(&mut self, window: WindowId, layer: LayerId) -> Result<(), HostError> {
        let node = self.layers.get_mut(layer.0)?;
        if node.parent.is_some() {
            return Err(HostError::AlreadyAttached);
        }
        let parent = self.windows.get_mut(window.0)?;
        parent
            .children
            .push(layer)
            .map_err(|_| HostError::TooManyChildren)?;
        node.parent = Some(window);
        Ok(())
    }

    fn layer_destroy(&mut self, layer: LayerId) -> Result<(), HostError> {
        let removed = self.layers.remove(layer.0);
        let node = self.released(removed)?;
        if let Some(window) = node.parent {
            if let Ok(parent) = self.windows.get_mut(window.0) {
                parent.children.retain(|child| *child != layer);
            }
        }
        Ok(())
    }

    fn text_layer_create(&mut self, frame: Rectangle) -> Result<LayerId, HostError> {
        self.create_layer(frame, LayerContent::Text(TextContent::default()))
    }

    fn text_layer_set_text(&mut self, layer: LayerId, text: &str) -> Result<(), HostError> {
        let mut stored = heapless::String::new();
        stored.push_str(text).map_err(|_| HostError::TextTooLong)?;
        self.text_mut(layer)?.text = stored;
        Ok(())
    }

    fn text_layer_set_font(&mut self, layer: LayerId, font: FontKey) -> Result<(), HostError> {
        self.text_mut(layer)?.font = font;
        Ok(())
    }

    fn text_layer_set_alignment(
        &mut self,
        layer: LayerId,
        alignment: TextAlignment,
    ) -> Result<(), HostError> {
        self.text_mut(layer)?.alignment = alignment;
        Ok(())
    }

    fn text_layer_set_text_color(
        &mut self,
        layer: LayerId,
        color: Color,
    ) -> Result<(), HostError> {
        self.text_mut(layer)?.text_color = color;
        Ok(())
    }

    fn text_layer_set_background_color(
        &mut self,
        layer: LayerId,
        color: Color,
    ) -> Result<(), HostError> {
        self.text_mut(layer)?.background = color;
        Ok(())
    }

    fn bitmap_load(&mut self, resource: ResourceId) -> Result<BitmapId, HostError> {
        let bitmap = self
            .resources
            .iter()
            .find(|(id, _)| *id == resource)
            .map(|(_, bitmap)| *bitmap)
            .ok_or(HostError::UnknownResource)?;
        self.reserve()?;
        let handle = self.bitmaps.insert(BitmapNode { resource, bitmap })?;
        self.allocated();
        Ok(BitmapId(handle))
    }

    fn bitmap_destroy(&mut self, bitmap: BitmapId) -> Result<(), HostError> {
        let removed = self.bitmaps.remove(bitmap.0);
        self.released(removed)?;
        for layer in self.layers.values_mut() {
            if let LayerContent::Bitmap(shown) = &mut layer.content {
                if *shown == Some(bitmap) {
                    *shown = None;
                }
            }
        }
        Ok(())
    }

    fn bitmap_layer_create(&mut self, frame: Rectangle) -> Result<LayerId, HostError> {
        self.create_layer(frame, LayerContent::Bitmap(None))
    }

    fn bitmap_layer_set_bitmap(
        &mut self,
        layer: LayerId,
        bitmap: BitmapId,
    ) -> Result<(), HostError> {
        self.bitmaps.get(bitmap.0)?;
        match &mut self.layers.get_mut(layer.0)?.content {
            LayerContent::Bitmap(shown) => {
                *shown = Some(bitmap);
                Ok(())
            }
            _ => Err(HostError::WrongLayerKind),
        }
    }

    fn status_bar_create(&mut self) -> Result<LayerId, HostError> {
        let frame = rect(0, 0, self.caps.width, STATUS_BAR_HEIGHT);
        self.create_layer(
            frame,
            LayerContent::StatusBar {
                background: Color::Black,
                foreground: Color::White,
            },
        )
    }

    fn status_bar_set_colors(
        &mut self,
        layer: LayerId,
        background: Color,
        foreground: Color,
    ) -> Result<(), HostError> {
        match &mut self.layers.get_mut(layer.0)?.content {
            LayerContent::StatusBar {
                background: bg,
                foreground: fg,
            } => {
                *bg = background;
                *fg = foreground;
                Ok(())
            }
            _ => Err(HostError::WrongLayerKind),
        }
    }

    fn supports_color(&self) -> bool {
        self.caps.color
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    static TILE: [u8; 1] = [0b1000_0001];
    static RESOURCES: [ResourceEntry; 1] = [(
        ResourceId(7),
        match Bitmap::new(8, 1, &TILE) {
            Some(b) => b,
            None => panic!("bad tile"),
        },
    )];

    fn scene() -> Scene {
        Scene::new(DisplayCaps::MONOCHROME, &RESOURCES)
    }

    #[test]
    fn test_text_layer_defaults_and_setters() {
        let mut scene = scene();
        let layer = scene.text_layer_create(rect(0, 0, 144, 20)).unwrap();
        scene.text_layer_set_text(layer, "00:00").unwrap();
        scene.text_layer_set_font(layer, FontKey::Bitham42Bold).unwrap();
        scene.text_layer_set_alignment(layer, TextAlignment::Center).unwrap();
        let content = scene.text_content(layer).unwrap();
        assert_eq!(content.text.as_str(), "00:00");
        assert_eq!(content.font, FontKey::Bitham42Bold);
        assert_eq!(content.alignment, TextAlignment::Center);
        assert_eq!(content.text_color, Color::Black);
    }

    #[test]
    fn test_stale_handle_after_destroy() {
        let mut scene = scene();
        let layer = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        scene.layer_destroy(layer).unwrap();
        assert_eq!(scene.text_layer_set_text(layer, "x"), Err(HostError::StaleHandle));
        assert_eq!(scene.layer_destroy(layer), Err(HostError::StaleHandle));
        assert_eq!(scene.stats().stale_releases, 1);
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_handle() {
        let mut scene = scene();
        let old = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        scene.layer_destroy(old).unwrap();
        let new = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        assert_eq!(old.handle().index(), new.handle().index());
        assert_ne!(old, new);
        assert!(scene.layer(old).is_none());
        assert!(scene.layer(new).is_some());
    }

    #[test]
    fn test_add_child_and_destroy_detaches() {
        let mut scene = scene();
        let window = scene.window_create().unwrap();
        let a = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        let b = scene.text_layer_create(rect(0, 10, 10, 10)).unwrap();
        scene.layer_add_child(window, a).unwrap();
        scene.layer_add_child(window, b).unwrap();
        assert_eq!(scene.layer_add_child(window, a), Err(HostError::AlreadyAttached));
        scene.layer_destroy(a).unwrap();
        assert_eq!(scene.window(window).unwrap().children(), &[b]);
    }

    #[test]
    fn test_window_destroy_removes_from_stack() {
        let mut scene = scene();
        let window = scene.window_create().unwrap();
        scene.window_stack_push(window, true).unwrap();
        assert_eq!(scene.top_window(), Some(window));
        scene.window_destroy(window).unwrap();
        assert_eq!(scene.top_window(), None);
        assert_eq!(scene.live_objects(), 0);
    }

    #[test]
    fn test_allocation_budget_reports_out_of_memory() {
        let mut scene = scene();
        scene.set_allocation_budget(Some(1));
        scene.window_create().unwrap();
        assert_eq!(scene.text_layer_create(rect(0, 0, 1, 1)), Err(HostError::OutOfMemory));
        assert_eq!(scene.stats().allocations, 1);
    }

    #[test]
    fn test_slot_exhaustion_is_out_of_memory() {
        let mut scene = scene();
        for _ in 0..MAX_WINDOWS {
            scene.window_create().unwrap();
        }
        assert_eq!(scene.window_create(), Err(HostError::OutOfMemory));
    }

    #[test]
    fn test_bitmap_load_and_show() {
        let mut scene = scene();
        assert_eq!(scene.bitmap_load(ResourceId(1)), Err(HostError::UnknownResource));
        let bitmap = scene.bitmap_load(ResourceId(7)).unwrap();
        assert_eq!(scene.bitmap_resource(bitmap), Some(ResourceId(7)));
        let layer = scene.bitmap_layer_create(rect(0, 0, 144, 168)).unwrap();
        scene.bitmap_layer_set_bitmap(layer, bitmap).unwrap();
        assert!(matches!(
            scene.layer(layer).unwrap().content(),
            LayerContent::Bitmap(Some(b)) if *b == bitmap
        ));
        assert_eq!(scene.text_layer_set_text(layer, "x"), Err(HostError::WrongLayerKind));
        scene.bitmap_destroy(bitmap).unwrap();
        assert!(matches!(
            scene.layer(layer).unwrap().content(),
            LayerContent::Bitmap(None)
        ));
    }

    #[test]
    fn test_text_longer_than_layer_storage_rejected() {
        let mut scene = scene();
        let layer = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        let long = "y".repeat(LAYER_TEXT_CAPACITY + 1);
        assert_eq!(scene.text_layer_set_text(layer, &long), Err(HostError::TextTooLong));
    }
}
