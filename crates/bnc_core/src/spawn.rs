use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::sprite::{Sprite, SpriteField, SpriteRect, Velocity, Viewport};

/// Inputs for the randomized sprite layout.
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub count: usize,
    pub sprite_size: (u32, u32),
    pub bounds: Viewport,
    pub max_speed: i32,
    pub seed: u64,
}

/// Lay out `count` sprites at uniform positions inside `bounds` with uniform
/// velocities in `[-max_speed, max_speed]`. A zero component is coerced to 1
/// so that every sprite keeps moving forever.
pub fn spawn_sprites(params: &SpawnParams) -> SpriteField {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let (w, h) = params.sprite_size;
    let max_x = params.bounds.width.saturating_sub(w) as i32;
    let max_y = params.bounds.height.saturating_sub(h) as i32;
    let speed = params.max_speed.abs();

    let sprites = (0..params.count)
        .map(|_| {
            let x = rng.gen_range(0..=max_x);
            let y = rng.gen_range(0..=max_y);
            let mut dx = rng.gen_range(-speed..=speed);
            let mut dy = rng.gen_range(-speed..=speed);
            if dx == 0 {
                dx = 1;
            }
            if dy == 0 {
                dy = 1;
            }
            Sprite {
                rect: SpriteRect::new(x, y, w, h),
                velocity: Velocity { dx, dy },
            }
        })
        .collect();

    SpriteField::new(params.sprite_size, sprites)
}

/// Seed used when the configuration does not pin one.
pub fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> SpawnParams {
        SpawnParams {
            count: 200,
            sprite_size: (32, 32),
            bounds: Viewport::new(800, 600),
            max_speed: 3,
            seed,
        }
    }

    #[test]
    fn velocities_are_never_zero() {
        for seed in 0..50 {
            let field = spawn_sprites(&params(seed));
            for s in field.sprites() {
                assert_ne!(s.velocity.dx, 0, "seed {seed}");
                assert_ne!(s.velocity.dy, 0, "seed {seed}");
                assert!(s.velocity.dx.abs() <= 3 && s.velocity.dy.abs() <= 3);
            }
        }
    }

    #[test]
    fn zero_max_speed_still_moves() {
        let mut p = params(7);
        p.max_speed = 0;
        let field = spawn_sprites(&p);
        assert!(field
            .sprites()
            .iter()
            .all(|s| s.velocity == Velocity { dx: 1, dy: 1 }));
    }

    #[test]
    fn positions_fit_inside_bounds() {
        let field = spawn_sprites(&params(42));
        assert_eq!(field.len(), 200);
        for s in field.sprites() {
            assert!((0..=768).contains(&s.rect.x));
            assert!((0..=568).contains(&s.rect.y));
            assert_eq!((s.rect.w, s.rect.h), (32, 32));
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = spawn_sprites(&params(1234));
        let b = spawn_sprites(&params(1234));
        assert_eq!(a.sprites(), b.sprites());

        let c = spawn_sprites(&params(1235));
        assert_ne!(a.sprites(), c.sprites());
    }

    #[test]
    fn sprite_larger_than_window_spawns_at_origin() {
        let mut p = params(3);
        p.sprite_size = (1000, 1000);
        let field = spawn_sprites(&p);
        assert!(field.sprites().iter().all(|s| s.rect.x == 0 && s.rect.y == 0));
    }

    #[test]
    fn zero_count_is_empty() {
        let mut p = params(9);
        p.count = 0;
        assert!(spawn_sprites(&p).is_empty());
    }
}
