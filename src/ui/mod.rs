use log::warn;
use macroquad::prelude::*;
use std::path::Path;
use std::time::Duration;

use crate::components::{text_centered, text_centered_with_shadow, text_top_left};
use crate::nav::{list_row_y, LIST_LEFT_MARGIN, LIST_LINE_HEIGHT, LIST_TOP_MARGIN};
use crate::session::{Session, SessionEnd};
use crate::texture::{TextureBackend, TextureCache};
use crate::utils::ellipsize;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;

const TEXT_SIZE: u16 = 24;
const TITLE_SIZE: u16 = 38;
const MAX_NAME_CHARS: usize = 48;
const BAR_HEIGHT: f32 = 40.0;
/// Screenshots this small are placeholders and are not shown.
const MIN_ART_SIZE: u32 = 32;
/// Rows this far outside the screen are not drawn.
const ROW_CULL_MARGIN: f32 = 35.0;
const DIM_AFTER: f32 = 0.34;

const TEXT_COLOR: Color = WHITE;
const CORE_NAME_COLOR: Color = Color::new(1.0, 1.0, 1.0, 80.0 / 255.0);
const TITLE_COLOR: Color = Color::new(200.0 / 255.0, 175.0 / 255.0, 25.0 / 255.0, 1.0);
const SELECTED_TEXT_COLOR: Color = Color::new(220.0 / 255.0, 190.0 / 255.0, 25.0 / 255.0, 1.0);
const SELECTED_ROW_COLOR: Color = Color::new(1.0, 1.0, 1.0, 25.0 / 255.0);

// ===================================
// THEME
// ===================================

/// Images and font the switcher is drawn with.
pub struct Theme {
    pub background: String,
    pub header: String,
    pub footer: String,
    pub font: Option<Font>,
}

impl Theme {
    pub async fn load(assets_dir: &Path) -> Self {
        let asset = |relative: &str| assets_dir.join(relative).to_string_lossy().into_owned();

        let font_path = asset("font/jgs5.ttf");
        let font = match load_ttf_font(&font_path).await {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("could not load {font_path}, using the built-in font: {e}");
                None
            }
        };

        Theme {
            background: asset("theme/bg.png"),
            header: asset("theme/header.png"),
            footer: asset("theme/footer.png"),
            font,
        }
    }
}

// ===================================
// LAYOUT
// ===================================

fn row_visible(y: f32) -> bool {
    y > -ROW_CULL_MARGIN && y < SCREEN_HEIGHT as f32 + ROW_CULL_MARGIN
}

fn art_large_enough(width: u32, height: u32) -> bool {
    width > MIN_ART_SIZE && height > MIN_ART_SIZE
}

/// Black overlay while the power button is held, darker once the hold is deliberate.
fn power_dim(hold: f32) -> Option<Color> {
    if hold <= 0.0 {
        None
    } else if hold > DIM_AFTER {
        Some(Color::from_rgba(0, 0, 0, 32))
    } else {
        Some(Color::from_rgba(0, 0, 0, 5))
    }
}

/// Overlay for the last frame of a session and how long it stays up.
/// A launch dims the screen, leaving the switcher blacks it out.
pub fn closing_frame(end: &SessionEnd) -> (Color, Duration) {
    match end {
        SessionEnd::Launch(_) => (Color::from_rgba(0, 0, 0, 180), Duration::from_millis(100)),
        SessionEnd::Exit => (BLACK, Duration::from_millis(50)),
        SessionEnd::Shutdown => (BLACK, Duration::from_millis(200)),
    }
}

// ===================================
// SCREEN RENDERING
// ===================================

pub fn render<B: TextureBackend>(session: &Session, textures: &mut TextureCache<B>, theme: &Theme) {
    let (width, height) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
    let closing = session.end().map(|end| closing_frame(end).0);
    if let Some(color) = closing.filter(|color| color.a >= 1.0) {
        textures.draw_rect(0.0, 0.0, width, height, color);
        return;
    }
    textures.draw(&theme.background, 0.0, 0.0, width, height);

    if session.nav.view().is_picture() {
        render_picture_view(session, textures, theme);
    } else {
        render_list_view(session, textures, theme);
    }

    textures.draw(&theme.footer, 0.0, height - BAR_HEIGHT, width, BAR_HEIGHT);

    if let Some(dim) = closing.or_else(|| power_dim(session.power_hold())) {
        textures.draw_rect(0.0, 0.0, width, height, dim);
    }
}

fn render_picture_view<B: TextureBackend>(session: &Session, textures: &mut TextureCache<B>, theme: &Theme) {
    let nav = &session.nav;
    let cam_x = nav.camera.x.current;
    let cam_y = nav.camera.y.current;
    let font = theme.font.as_ref();
    let selected = nav.selected();

    if selected.active {
        text_centered(
            font,
            &selected.core_name,
            -cam_x * 0.5,
            216.0 - cam_y,
            SCREEN_WIDTH as f32,
            TEXT_SIZE,
            CORE_NAME_COLOR,
        );
    }

    let art = nav.art();
    if art.active {
        let show = textures
            .get(&art.path)
            .is_some_and(|entry| art_large_enough(entry.width, entry.height));
        if show {
            textures.draw_preserve_aspect(&art.path, 320.0 - cam_x, 240.0 - cam_y, 640.0, 400.0, 0.0, 1.0);
        }
    }

    textures.draw(&theme.header, 0.0, 0.0, SCREEN_WIDTH as f32, BAR_HEIGHT);
    if selected.active {
        text_centered_with_shadow(
            font,
            &ellipsize(&selected.name, MAX_NAME_CHARS),
            0.0,
            4.0,
            SCREEN_WIDTH as f32,
            TEXT_SIZE,
            TEXT_COLOR,
            vec2(2.0, 3.0),
        );
    }
}

fn render_list_view<B: TextureBackend>(session: &Session, textures: &mut TextureCache<B>, theme: &Theme) {
    let nav = &session.nav;
    let cam_y = nav.camera.y.current;
    let font = theme.font.as_ref();

    text_top_left(font, nav.view().title(), LIST_LEFT_MARGIN, LIST_TOP_MARGIN - cam_y, TITLE_SIZE, TITLE_COLOR);

    for (i, game) in nav.active_list().iter().enumerate() {
        let y = list_row_y(i as i32) - cam_y;
        if !row_visible(y) {
            continue;
        }

        let name = ellipsize(&game.name, MAX_NAME_CHARS);
        if i as i32 == nav.selected_index() {
            textures.draw_rect(0.0, y - 5.0, SCREEN_WIDTH as f32, LIST_LINE_HEIGHT, SELECTED_ROW_COLOR);
            text_top_left(font, &name, LIST_LEFT_MARGIN, y, TEXT_SIZE, SELECTED_TEXT_COLOR);
        } else {
            text_top_left(font, &name, LIST_LEFT_MARGIN, y, TEXT_SIZE, TEXT_COLOR);
        }
    }
}
