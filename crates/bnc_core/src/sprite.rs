//! Sprite store and the per-frame motion/collision step.
//!
//! Every sprite shares the same pixel size (all of them are drawn from one
//! source image). Bouncing is **reactive**: the velocity is applied first, and
//! only if the box left the viewport on an axis is that axis' velocity negated
//! and applied once more. There is no clamping, so a sprite can overshoot an
//! edge by at most `|velocity|` pixels on that axis before coming back.

/// Axis-aligned box in window pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl SpriteRect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Integer pixels per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

/// Current renderable output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rect: SpriteRect,
    pub velocity: Velocity,
}

impl Sprite {
    /// Advance one frame inside `viewport`.
    pub fn step(&mut self, viewport: Viewport) {
        let max_x = viewport.width as i32 - self.rect.w as i32;
        let max_y = viewport.height as i32 - self.rect.h as i32;

        self.rect.x += self.velocity.dx;
        self.rect.y += self.velocity.dy;

        if self.rect.x < 0 || self.rect.x > max_x {
            self.velocity.dx = -self.velocity.dx;
            self.rect.x += self.velocity.dx;
        }
        if self.rect.y < 0 || self.rect.y > max_y {
            self.velocity.dy = -self.velocity.dy;
            self.rect.y += self.velocity.dy;
        }
    }
}

/// Fixed-length set of sprites. The length is decided at construction and
/// never changes afterwards.
#[derive(Debug, Clone)]
pub struct SpriteField {
    sprite_size: (u32, u32),
    sprites: Box<[Sprite]>,
}

impl SpriteField {
    pub fn new(sprite_size: (u32, u32), sprites: Vec<Sprite>) -> Self {
        Self {
            sprite_size,
            sprites: sprites.into_boxed_slice(),
        }
    }

    pub fn sprite_size(&self) -> (u32, u32) {
        self.sprite_size
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Run the motion/collision step on every sprite.
    pub fn step(&mut self, viewport: Viewport) {
        for sprite in self.sprites.iter_mut() {
            sprite.step(viewport);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    fn sprite(x: i32, y: i32, dx: i32, dy: i32) -> Sprite {
        Sprite {
            rect: SpriteRect::new(x, y, 32, 32),
            velocity: Velocity { dx, dy },
        }
    }

    #[test]
    fn free_motion_adds_velocity() {
        let mut s = sprite(100, 200, 3, -2);
        s.step(VIEW);
        assert_eq!((s.rect.x, s.rect.y), (103, 198));
        assert_eq!(s.velocity, Velocity { dx: 3, dy: -2 });
    }

    #[test]
    fn right_edge_overshoot_flips_and_reapplies() {
        let max_x = VIEW.width as i32 - 32;
        let mut s = sprite(max_x + 2, 100, 3, 1);
        s.step(VIEW);
        assert_eq!(s.velocity.dx, -3);
        // +3 takes it to max_x + 5, the flipped -3 brings it back.
        assert_eq!(s.rect.x, max_x + 2 + 3 - 3);
        assert_eq!(s.rect.y, 101);
    }

    #[test]
    fn left_edge_bounce() {
        let mut s = sprite(1, 50, -3, 1);
        s.step(VIEW);
        assert_eq!(s.velocity.dx, 3);
        assert_eq!(s.rect.x, 1);
    }

    #[test]
    fn bottom_and_top_edges_bounce_independently() {
        let max_y = VIEW.height as i32 - 32;
        let mut s = sprite(10, max_y, 2, 2);
        s.step(VIEW);
        assert_eq!(s.velocity, Velocity { dx: 2, dy: -2 });
        assert_eq!((s.rect.x, s.rect.y), (12, max_y));

        let mut s = sprite(10, 0, 2, -1);
        s.step(VIEW);
        assert_eq!(s.velocity.dy, 1);
        assert_eq!(s.rect.y, 0);
    }

    #[test]
    fn exact_boundary_is_in_bounds() {
        let max_x = VIEW.width as i32 - 32;
        let mut s = sprite(max_x - 3, 10, 3, 1);
        s.step(VIEW);
        assert_eq!(s.rect.x, max_x);
        assert_eq!(s.velocity.dx, 3);
    }

    #[test]
    fn viewport_smaller_than_sprite_does_not_panic() {
        let mut s = sprite(0, 0, 2, 2);
        for _ in 0..10 {
            s.step(Viewport::new(16, 16));
        }
        assert!(s.rect.x.abs() <= 2 && s.rect.y.abs() <= 2);
    }

    #[test]
    fn in_bounds_sprites_never_overshoot_more_than_speed() {
        let mut field = SpriteField::new(
            (32, 32),
            vec![
                sprite(0, 0, 3, 3),
                sprite(768, 568, -1, 2),
                sprite(400, 300, -3, -3),
                sprite(767, 1, 1, -1),
            ],
        );
        for _ in 0..5_000 {
            field.step(VIEW);
            for s in field.sprites() {
                let max_x = VIEW.width as i32 - 32;
                let max_y = VIEW.height as i32 - 32;
                let over_x = (-s.rect.x).max(s.rect.x - max_x).max(0);
                let over_y = (-s.rect.y).max(s.rect.y - max_y).max(0);
                assert!(over_x <= s.velocity.dx.abs());
                assert!(over_y <= s.velocity.dy.abs());
            }
        }
    }

    #[test]
    fn empty_field_steps() {
        let mut field = SpriteField::new((32, 32), Vec::new());
        field.step(VIEW);
        assert!(field.is_empty());
        assert_eq!(field.len(), 0);
    }
}
