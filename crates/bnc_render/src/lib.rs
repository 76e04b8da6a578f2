pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod sprite_pipeline;
pub mod text;
pub mod texture;
pub mod vertex;

pub use batch::{DrawCall, SpriteBatch};
pub use camera::{CameraUniform, PixelCamera};
pub use gpu_context::GpuContext;
pub use sprite_pipeline::SpritePipeline;
pub use text::GlyphRasterizer;
pub use texture::Texture;
pub use vertex::QuadVertex;
