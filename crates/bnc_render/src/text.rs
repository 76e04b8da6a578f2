//! Single-line text rasterization into an RGBA image.
//!
//! Glyphs are laid out along one baseline with kerning and drawn "solid":
//! a pixel is either fully the text colour or fully transparent, depending
//! on whether glyph coverage reaches one half. No anti-aliasing is applied.

use std::fs;
use std::path::Path;

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

const SOLID_COVERAGE: f32 = 0.5;

pub struct GlyphRasterizer {
    font: FontVec,
    scale: PxScale,
    color: Rgba<u8>,
}

impl GlyphRasterizer {
    pub fn from_path(path: &Path, size_px: f32, color: [u8; 3]) -> Result<Self, String> {
        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read font {}: {e}", path.display()))?;
        Self::from_bytes(bytes, size_px, color).map_err(|e| format!("{e} ({})", path.display()))
    }

    pub fn from_bytes(bytes: Vec<u8>, size_px: f32, color: [u8; 3]) -> Result<Self, String> {
        if size_px.is_nan() || size_px <= 0.0 {
            return Err(format!("Invalid font size {size_px}"));
        }
        let font = FontVec::try_from_vec(bytes).map_err(|e| format!("Invalid font data: {e}"))?;
        Ok(Self {
            font,
            scale: PxScale::from(size_px),
            color: Rgba([color[0], color[1], color[2], 255]),
        })
    }

    /// Position every glyph of `text` and return them with the pixel size of
    /// the line box.
    fn layout(&self, text: &str) -> (Vec<Glyph>, u32, u32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = caret.ceil().max(0.0) as u32;
        let height = scaled.height().ceil().max(0.0) as u32;
        (glyphs, width, height)
    }

    pub fn rasterize(&self, text: &str) -> Result<RgbaImage, String> {
        if text.is_empty() {
            return Err("Cannot rasterize empty text".to_string());
        }
        let (glyphs, width, height) = self.layout(text);
        if width == 0 || height == 0 {
            return Err(format!("Text '{text}' has an empty line box"));
        }

        let mut image = RgbaImage::new(width, height);
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                // Whitespace has no outline.
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                if coverage < SOLID_COVERAGE {
                    return;
                }
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                    image.put_pixel(x as u32, y as u32, self.color);
                }
            });
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

    fn rasterizer() -> GlyphRasterizer {
        GlyphRasterizer::from_bytes(FONT.to_vec(), 20.0, [255, 0, 0]).expect("bundled font")
    }

    #[test]
    fn fps_text_rasterizes_solid_red() {
        let image = rasterizer().rasterize("FPS: 30.0").expect("rasterize");
        assert!(image.width() > 40);
        assert!((18..=26).contains(&image.height()));
        let mut inked = 0;
        for pixel in image.pixels() {
            match pixel.0 {
                [255, 0, 0, 255] => inked += 1,
                [0, 0, 0, 0] => {}
                other => panic!("non-solid pixel {other:?}"),
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn longer_text_is_wider() {
        let r = rasterizer();
        let short = r.rasterize("FPS: 9.0").expect("short");
        let long = r.rasterize("FPS: 999.0").expect("long");
        assert!(long.width() > short.width());
        assert_eq!(long.height(), short.height());
    }

    #[test]
    fn empty_text_fails() {
        assert!(rasterizer().rasterize("").is_err());
    }

    #[test]
    fn whitespace_only_has_blank_box() {
        let image = rasterizer().rasterize("   ").expect("spaces still advance");
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = GlyphRasterizer::from_bytes(b"not a font".to_vec(), 20.0, [255, 0, 0])
            .err()
            .expect("garbage font must fail");
        assert!(err.contains("Invalid font data"));
    }

    #[test]
    fn bad_size_is_rejected_before_parsing() {
        let err = GlyphRasterizer::from_bytes(Vec::new(), 0.0, [255, 0, 0])
            .err()
            .expect("zero size must fail");
        assert!(err.contains("Invalid font size"));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("bnc_text_test_definitely_missing.ttf");
        let err = GlyphRasterizer::from_path(&path, 20.0, [255, 0, 0])
            .err()
            .expect("missing font must fail");
        assert!(err.contains("Failed to read font"));
    }
}
