use crate::backend::RenderBackend;
use crate::fps::{format_fps, FpsCounter};
use crate::sprite::SpriteRect;

/// Gap between the FPS text and the top-right window corner.
pub const OVERLAY_MARGIN: i32 = 10;

/// FPS readout drawn over the scene. Holds the last successfully rasterized
/// text texture; a failed rasterization leaves it untouched and the frame
/// count keeps running into the next reading.
pub struct FpsOverlay<T> {
    counter: FpsCounter,
    texture: Option<T>,
    rect: SpriteRect,
    last_fps: Option<f32>,
}

impl<T> FpsOverlay<T> {
    pub fn new(start_ms: u64, interval_ms: u64) -> Self {
        Self {
            counter: FpsCounter::new(start_ms, interval_ms),
            texture: None,
            rect: SpriteRect::default(),
            last_fps: None,
        }
    }

    /// Count a presented frame and, once per interval, re-render the text.
    pub fn update<B>(&mut self, now_ms: u64, backend: &mut B) -> Option<f32>
    where
        B: RenderBackend<Texture = T>,
    {
        let fps = self.counter.tick(now_ms)?;
        self.last_fps = Some(fps);

        let text = format_fps(fps);
        match backend.render_text(&text) {
            Ok(texture) => {
                let (w, h) = backend.texture_size(&texture);
                let (x, y) = overlay_position(backend.output_size().width, w);
                self.rect = SpriteRect::new(x, y, w, h);
                // Assigning drops the previous texture.
                self.texture = Some(texture);
                self.counter.reset();
                log::debug!("{text}");
            }
            Err(err) => {
                log::error!("Couldn't render '{text}': {err}");
            }
        }
        Some(fps)
    }

    pub fn current(&self) -> Option<(&T, SpriteRect)> {
        self.texture.as_ref().map(|t| (t, self.rect))
    }

    pub fn last_fps(&self) -> Option<f32> {
        self.last_fps
    }
}

/// Top-left corner for text `text_width` pixels wide pinned to the top-right.
pub fn overlay_position(window_width: u32, text_width: u32) -> (i32, i32) {
    (
        window_width as i32 - text_width as i32 - OVERLAY_MARGIN,
        OVERLAY_MARGIN,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_to_top_right() {
        assert_eq!(overlay_position(800, 90), (700, 10));
        assert_eq!(overlay_position(1920, 0), (1910, 10));
    }

    #[test]
    fn text_wider_than_window_goes_negative() {
        assert_eq!(overlay_position(50, 90), (-50, 10));
    }
}
