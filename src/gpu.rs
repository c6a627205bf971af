use macroquad::prelude::*;

use crate::error::TextureError;
use crate::texture::{DecodedImage, TextureBackend};

/// Decodes with the `image` crate and draws through macroquad.
///
/// Must only be used from the thread running the macroquad main loop.
pub struct MacroquadBackend;

impl TextureBackend for MacroquadBackend {
    type Handle = Texture2D;

    fn decode(&mut self, path: &str) -> Result<DecodedImage, TextureError> {
        let decoded = ::image::open(path)
            .map_err(|source| TextureError::Decode { path: path.to_string(), source })?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(DecodedImage {
            pixels: decoded.into_raw(),
            width,
            height,
        })
    }

    fn upload(&mut self, path: &str, image: &DecodedImage) -> Result<Texture2D, TextureError> {
        let too_large = || TextureError::TooLarge {
            path: path.to_string(),
            width: image.width,
            height: image.height,
        };
        let width = u16::try_from(image.width).map_err(|_| too_large())?;
        let height = u16::try_from(image.height).map_err(|_| too_large())?;

        let texture = Texture2D::from_rgba8(width, height, &image.pixels);
        texture.set_filter(FilterMode::Linear);
        Ok(texture)
    }

    fn blit(&mut self, texture: &Texture2D, dest: Rect, rotation: f32) {
        draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                rotation: rotation.to_radians(),
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, dest: Rect, color: Color) {
        draw_rectangle(dest.x, dest.y, dest.w, dest.h, color);
    }
}
