use macroquad::prelude::*;

fn params(font: Option<&Font>, font_size: u16, color: Color) -> TextParams<'_> {
    TextParams {
        font,
        font_size,
        color,
        ..Default::default()
    }
}

/// Draws text with its top-left corner at `(x, y)` instead of on the baseline.
pub fn text_top_left(font: Option<&Font>, text: &str, x: f32, y: f32, font_size: u16, color: Color) {
    let size = measure_text(text, font, font_size, 1.0);
    draw_text_ex(text, x, y + size.offset_y, params(font, font_size, color));
}

/// Draws text centred horizontally in the `width` wide band starting at `x`.
pub fn text_centered(
    font: Option<&Font>,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    font_size: u16,
    color: Color,
) {
    let size = measure_text(text, font, font_size, 1.0);
    let centered_x = x + ((width - size.width) / 2.0).floor();
    draw_text_ex(text, centered_x, y + size.offset_y, params(font, font_size, color));
}

/// Centred text over a drop shadow drawn `shadow_offset` away.
#[allow(clippy::too_many_arguments)]
pub fn text_centered_with_shadow(
    font: Option<&Font>,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    font_size: u16,
    color: Color,
    shadow_offset: Vec2,
) {
    let shadow = Color::from_rgba(0, 0, 0, 225);
    text_centered(font, text, x + shadow_offset.x, y + shadow_offset.y, width, font_size, shadow);
    text_centered(font, text, x, y, width, font_size, color);
}
