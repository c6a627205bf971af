use log::warn;
use macroquad::prelude::{Color, Rect};
use std::collections::HashMap;

use crate::error::TextureError;

/// Pixels straight out of the image decoder, RGBA8.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The drawing primitives the cache sits on top of.
pub trait TextureBackend {
    type Handle;

    fn decode(&mut self, path: &str) -> Result<DecodedImage, TextureError>;
    fn upload(&mut self, path: &str, image: &DecodedImage) -> Result<Self::Handle, TextureError>;
    /// `rotation` is in degrees, about the centre of `dest`.
    fn blit(&mut self, handle: &Self::Handle, dest: Rect, rotation: f32);
    fn fill_rect(&mut self, dest: Rect, color: Color);
}

/// An uploaded texture. The decoded pixels are dropped once the GPU has them.
pub struct TextureEntry<H> {
    pub handle: H,
    pub width: u32,
    pub height: u32,
    pub aspect: f32,
}

/// Rectangle of size `(w, h) * scale` centred on `(center_x, center_y)`.
pub fn scaled_rect(center_x: f32, center_y: f32, w: f32, h: f32, scale: f32) -> Rect {
    Rect::new(
        center_x - w * 0.5 * scale,
        center_y - h * 0.5 * scale,
        w * scale,
        h * scale,
    )
}

/// Fits an image of the given aspect ratio to a `w` x `h` box.
///
/// Portrait images keep the width, everything else keeps the height; the
/// other side may end up larger than the box.
pub fn preserve_aspect_size(aspect: f32, w: f32, h: f32) -> (f32, f32) {
    if aspect < 1.0 {
        (w, w / aspect)
    } else {
        (h * aspect, h)
    }
}

/// Lazily loaded textures keyed by path.
///
/// Failed loads are not remembered, so a missing screenshot is retried the
/// next time it is asked for. Entries live until the cache is dropped.
pub struct TextureCache<B: TextureBackend> {
    pub(crate) backend: B,
    entries: HashMap<String, TextureEntry<B::Handle>>,
}

impl<B: TextureBackend> TextureCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, path: &str) -> Option<&TextureEntry<B::Handle>> {
        if !self.ensure_loaded(path) {
            return None;
        }
        self.entries.get(path)
    }

    fn ensure_loaded(&mut self, path: &str) -> bool {
        if self.entries.contains_key(path) {
            return true;
        }
        match self.load(path) {
            Ok(entry) => {
                self.entries.insert(path.to_string(), entry);
                true
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    fn load(&mut self, path: &str) -> Result<TextureEntry<B::Handle>, TextureError> {
        let image = self.backend.decode(path)?;
        if image.width == 0 || image.height == 0 {
            return Err(TextureError::Empty { path: path.to_string() });
        }
        let handle = self.backend.upload(path, &image)?;
        Ok(TextureEntry {
            aspect: image.width as f32 / image.height as f32,
            width: image.width,
            height: image.height,
            handle,
        })
    }

    /// Stretches the texture into the rectangle. Missing textures draw nothing.
    pub fn draw(&mut self, path: &str, x: f32, y: f32, w: f32, h: f32) {
        if !self.ensure_loaded(path) {
            return;
        }
        if let Some(entry) = self.entries.get(path) {
            self.backend.blit(&entry.handle, Rect::new(x, y, w, h), 0.0);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_scaled(
        &mut self,
        path: &str,
        center_x: f32,
        center_y: f32,
        w: f32,
        h: f32,
        rotation: f32,
        scale: f32,
    ) {
        if !self.ensure_loaded(path) {
            return;
        }
        if let Some(entry) = self.entries.get(path) {
            let dest = scaled_rect(center_x, center_y, w, h, scale);
            self.backend.blit(&entry.handle, dest, rotation);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_preserve_aspect(
        &mut self,
        path: &str,
        center_x: f32,
        center_y: f32,
        w: f32,
        h: f32,
        rotation: f32,
        scale: f32,
    ) {
        let Some(aspect) = self.get(path).map(|entry| entry.aspect) else {
            return;
        };
        let (fit_w, fit_h) = preserve_aspect_size(aspect, w, h);
        self.draw_scaled(path, center_x, center_y, fit_w, fit_h, rotation, scale);
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.backend.fill_rect(Rect::new(x, y, w, h), color);
    }
}
