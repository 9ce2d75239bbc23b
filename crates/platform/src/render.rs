//! Reference renderer: draws the topmost window of a [`Scene`].
//!
//! Layers are painted bottom-up in attachment order. Text uses the ISO 8859-1
//! mono fonts from embedded-graphics so the degree sign renders; bitmaps are
//! tiled across their layer frame. The status bar draws the clock text the
//! host passes in.

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_7X13, FONT_9X18_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::graphics::{Color, FontKey, TextAlignment};
use crate::resources::Bitmap;
use crate::scene::{LayerContent, Scene, TextContent};

fn font(key: FontKey) -> &'static MonoFont<'static> {
    match key {
        FontKey::Gothic18 => &FONT_7X13,
        FontKey::Gothic24Bold => &FONT_9X18_BOLD,
        FontKey::Gothic28Bold | FontKey::Bitham42Bold => &FONT_10X20,
    }
}

fn alignment(align: TextAlignment) -> Alignment {
    match align {
        TextAlignment::Left => Alignment::Left,
        TextAlignment::Center => Alignment::Center,
        TextAlignment::Right => Alignment::Right,
    }
}

fn anchor(frame: &Rectangle, align: TextAlignment) -> Point {
    let top = frame.top_left.y;
    match align {
        TextAlignment::Left => frame.top_left,
        TextAlignment::Center => Point::new(frame.center().x, top),
        TextAlignment::Right => frame
            .bottom_right()
            .map_or(frame.top_left, |br| Point::new(br.x, top)),
    }
}

fn fill<D>(
    display: &mut D,
    frame: &Rectangle,
    color: Color,
    color_display: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if let Some(rgb) = color.to_rgb565(color_display) {
        frame
            .into_styled(PrimitiveStyle::with_fill(rgb))
            .draw(display)?;
    }
    Ok(())
}

fn draw_text<D>(
    display: &mut D,
    frame: &Rectangle,
    text: &TextContent,
    color_display: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    fill(display, frame, text.background, color_display)?;
    let Some(rgb) = text.text_color.to_rgb565(color_display) else {
        return Ok(());
    };
    let char_style = MonoTextStyle::new(font(text.font), rgb);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment(text.alignment))
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(
        text.text.as_str(),
        anchor(frame, text.alignment),
        char_style,
        text_style,
    )
    .draw(&mut display.clipped(frame))?;
    Ok(())
}

fn draw_tiled<D>(
    display: &mut D,
    frame: &Rectangle,
    bitmap: &Bitmap,
    ink: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let origin = frame.top_left;
    let pixels = frame.points().filter_map(|p| {
        let dx = u32::try_from(p.x.saturating_sub(origin.x)).ok()?;
        let dy = u32::try_from(p.y.saturating_sub(origin.y)).ok()?;
        let x = dx.checked_rem(bitmap.width())?;
        let y = dy.checked_rem(bitmap.height())?;
        bitmap.pixel(x, y).then_some(Pixel(p, ink))
    });
    display.draw_iter(pixels)
}

/// Render the topmost window of `scene` onto `display`.
///
/// With no window on the stack the screen is cleared to black.
pub fn render_scene<D>(scene: &Scene, status_clock: &str, display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let color_display = scene.caps().color;
    let Some(window) = scene.top_window().and_then(|id| scene.window(id)) else {
        display.clear(Rgb565::BLACK)?;
        return Ok(());
    };
    display.clear(window.background().to_rgb565(color_display).unwrap_or(Rgb565::BLACK))?;

    for layer in window.children().iter().filter_map(|id| scene.layer(*id)) {
        let frame = layer.frame();
        match layer.content() {
            LayerContent::Text(text) => draw_text(display, &frame, text, color_display)?,
            LayerContent::Bitmap(Some(bitmap)) => {
                if let Some(bitmap) = scene.bitmap(*bitmap) {
                    let ink = Color::DarkGray
                        .to_rgb565(color_display)
                        .unwrap_or(Rgb565::BLACK);
                    draw_tiled(display, &frame, bitmap, ink)?;
                }
            }
            LayerContent::Bitmap(None) => {}
            LayerContent::StatusBar {
                background,
                foreground,
            } => {
                let clock = TextContent {
                    text: heapless::String::try_from(status_clock).unwrap_or_default(),
                    font: FontKey::Gothic18,
                    alignment: TextAlignment::Center,
                    text_color: *foreground,
                    background: *background,
                };
                draw_text(display, &frame, &clock, color_display)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use crate::graphics::rect;
    use crate::resources::{ResourceEntry, ResourceId};
    use crate::scene::DisplayCaps;
    use crate::toolkit::UiToolkit;

    struct TestDisplay {
        width: u32,
        height: u32,
        pixel_count: usize,
        colors: std::collections::HashSet<u16>,
    }

    impl TestDisplay {
        fn new() -> Self {
            Self {
                width: 144,
                height: 168,
                pixel_count: 0,
                colors: std::collections::HashSet::new(),
            }
        }
    }

    impl DrawTarget for TestDisplay {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(_, color) in pixels {
                self.pixel_count += 1;
                self.colors.insert(color.into_storage());
            }
            Ok(())
        }
    }

    impl OriginDimensions for TestDisplay {
        fn size(&self) -> Size {
            Size::new(self.width, self.height)
        }
    }

    static TILE: [u8; 2] = [0xAA, 0x55];
    static RESOURCES: [ResourceEntry; 1] = [(
        ResourceId(1),
        match Bitmap::new(8, 2, &TILE) {
            Some(b) => b,
            None => panic!("bad tile"),
        },
    )];

    #[test]
    fn test_empty_stack_clears_screen() {
        let scene = Scene::new(DisplayCaps::MONOCHROME, &[]);
        let mut display = TestDisplay::new();
        render_scene(&scene, "", &mut display).unwrap();
        assert_eq!(display.pixel_count, 144 * 168);
    }

    #[test]
    fn test_text_layer_draws_glyph_pixels() {
        let mut scene = Scene::new(DisplayCaps::MONOCHROME, &[]);
        let window = scene.window_create().unwrap();
        let layer = scene.text_layer_create(rect(0, 40, 144, 30)).unwrap();
        scene.text_layer_set_background_color(layer, Color::Clear).unwrap();
        scene.text_layer_set_alignment(layer, TextAlignment::Center).unwrap();
        scene.text_layer_set_text(layer, "14:15").unwrap();
        scene.layer_add_child(window, layer).unwrap();
        scene.window_stack_push(window, true).unwrap();

        let mut display = TestDisplay::new();
        render_scene(&scene, "", &mut display).unwrap();
        assert!(display.pixel_count > 144 * 168, "glyphs drawn over the background");
        assert!(display.colors.contains(&Rgb565::BLACK.into_storage()));
    }

    #[test]
    fn test_colour_text_uses_colour() {
        let mut scene = Scene::new(DisplayCaps::COLOR, &[]);
        let window = scene.window_create().unwrap();
        let layer = scene.text_layer_create(rect(0, 0, 144, 30)).unwrap();
        scene.text_layer_set_text_color(layer, Color::Red).unwrap();
        scene.text_layer_set_text(layer, "102.50 1.20").unwrap();
        scene.layer_add_child(window, layer).unwrap();
        scene.window_stack_push(window, false).unwrap();

        let mut display = TestDisplay::new();
        render_scene(&scene, "", &mut display).unwrap();
        let red = Color::Red.to_rgb565(true).unwrap().into_storage();
        assert!(display.colors.contains(&red));
    }

    #[test]
    fn test_bitmap_and_status_bar_render() {
        let mut scene = Scene::new(DisplayCaps::COLOR, &RESOURCES);
        let window = scene.window_create().unwrap();
        let bitmap = scene.bitmap_load(ResourceId(1)).unwrap();
        let layer = scene.bitmap_layer_create(rect(0, 0, 144, 168)).unwrap();
        scene.bitmap_layer_set_bitmap(layer, bitmap).unwrap();
        let bar = scene.status_bar_create().unwrap();
        scene.layer_add_child(window, layer).unwrap();
        scene.layer_add_child(window, bar).unwrap();
        scene.window_stack_push(window, false).unwrap();

        let mut display = TestDisplay::new();
        render_scene(&scene, "14:15", &mut display).unwrap();
        let ink = Color::DarkGray.to_rgb565(true).unwrap().into_storage();
        assert!(display.colors.contains(&ink));
        assert!(display.colors.contains(&Rgb565::WHITE.into_storage()));
    }
}
