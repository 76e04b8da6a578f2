pub mod debug_overlay;

pub use debug_overlay::{DebugOverlay, RendererStats};
