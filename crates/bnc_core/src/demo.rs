//! Frame driver: owns the backend, the shared sprite texture, the sprite
//! field and the FPS overlay.
//!
//! One call to [`Demo::frame`] is one loop iteration after input polling:
//!
//!   1. query the viewport, clear
//!   2. step every sprite and queue its draw
//!   3. queue the overlay, present
//!   4. sample the tick clock, count the frame and refresh the FPS text
//!      once per interval
//!
//! Fields are declared in reverse acquisition order so that dropping a
//! `Demo` releases the overlay text, then the sprite texture, then the
//! backend itself.

use std::path::Path;

use crate::backend::{FrameStats, RenderBackend};
use crate::config::DemoConfig;
use crate::error::{InitError, InitResult};
use crate::overlay::FpsOverlay;
use crate::spawn::{seed_from_clock, spawn_sprites, SpawnParams};
use crate::sprite::SpriteField;
use crate::time::FrameClock;

pub struct Demo<B: RenderBackend> {
    overlay: FpsOverlay<B::Texture>,
    field: SpriteField,
    sprite_texture: B::Texture,
    backend: B,
}

impl<B: RenderBackend> Demo<B> {
    /// Load the sprite through `backend` and lay out the sprites. On failure
    /// the backend is dropped before the error is returned.
    pub fn new(mut backend: B, config: &DemoConfig, start_ms: u64) -> InitResult<Self> {
        let sprite_texture = backend
            .load_sprite(Path::new(&config.sprite_image_path))
            .map_err(InitError::Sprite)?;
        let sprite_size = backend.texture_size(&sprite_texture);

        let seed = config.seed.unwrap_or_else(seed_from_clock);
        let field = spawn_sprites(&SpawnParams {
            count: config.sprite_count,
            sprite_size,
            bounds: backend.output_size(),
            max_speed: config.max_speed,
            seed,
        });
        log::info!(
            "Spawned {} sprites of {}x{} (seed {seed})",
            field.len(),
            sprite_size.0,
            sprite_size.1
        );

        Ok(Self {
            overlay: FpsOverlay::new(start_ms, config.fps_interval_ms),
            field,
            sprite_texture,
            backend,
        })
    }

    /// `now_ms` is the tick clock, read once after `present` returns.
    pub fn frame(&mut self, clock: &FrameClock, now_ms: impl FnOnce() -> u64) -> FrameStats {
        let viewport = self.backend.output_size();
        let stats = FrameStats {
            frame: clock.frame_count,
            frame_time_ms: clock.smoothed_frame_time_ms,
            fps: self.overlay.last_fps(),
            sprite_count: self.field.len(),
            viewport,
        };
        if viewport.is_empty() {
            return stats;
        }

        self.backend.clear();
        self.field.step(viewport);
        for sprite in self.field.sprites() {
            self.backend.copy(&self.sprite_texture, sprite.rect);
        }
        if let Some((text, rect)) = self.overlay.current() {
            self.backend.copy(text, rect);
        }
        self.backend.present(&stats);

        self.overlay.update(now_ms(), &mut self.backend);
        stats
    }

    pub fn field(&self) -> &SpriteField {
        &self.field
    }

    pub fn overlay(&self) -> &FpsOverlay<B::Texture> {
        &self.overlay
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
