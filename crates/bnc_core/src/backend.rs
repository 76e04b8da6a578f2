use std::path::Path;

use crate::sprite::{SpriteRect, Viewport};

/// Per-frame numbers handed to the backend at present time, mostly for the
/// debug panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frame: u64,
    pub frame_time_ms: f64,
    /// Most recent FPS reading, `None` until the first window closes.
    pub fps: Option<f32>,
    pub sprite_count: usize,
    pub viewport: Viewport,
}

/// The drawing surface the frame driver talks to. Implemented over wgpu by
/// the demo binary and by a counting mock in tests.
///
/// Textures are owned values: dropping one releases it.
pub trait RenderBackend {
    type Texture;

    /// Decode an image file and upload it.
    fn load_sprite(&mut self, path: &Path) -> Result<Self::Texture, String>;

    /// Rasterize one line of text with the backend's font.
    fn render_text(&mut self, text: &str) -> Result<Self::Texture, String>;

    fn texture_size(&self, texture: &Self::Texture) -> (u32, u32);

    /// Current renderable output size in pixels.
    fn output_size(&self) -> Viewport;

    fn clear(&mut self);

    /// Queue `texture` stretched over `dst` for the frame being built.
    fn copy(&mut self, texture: &Self::Texture, dst: SpriteRect);

    fn present(&mut self, stats: &FrameStats);
}
