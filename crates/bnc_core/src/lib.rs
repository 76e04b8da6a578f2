pub mod backend;
pub mod config;
pub mod demo;
pub mod error;
pub mod fps;
pub mod overlay;
pub mod spawn;
pub mod sprite;
pub mod time;

pub use backend::{FrameStats, RenderBackend};
pub use config::{load_config_from_path, DemoConfig};
pub use demo::Demo;
pub use error::{InitError, InitResult};
pub use sprite::{Sprite, SpriteField, SpriteRect, Velocity, Viewport};
pub use time::FrameClock;
