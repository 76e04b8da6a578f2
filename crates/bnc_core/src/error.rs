use thiserror::Error;

/// Startup failure. Each variant names the stage that failed; the binary
/// logs it and exits with status 1.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("window creation failed: {0}")]
    Window(String),

    #[error("renderer creation failed: {0}")]
    Renderer(String),

    #[error("font load failed: {0}")]
    Font(String),

    #[error("sprite load failed: {0}")]
    Sprite(String),
}

pub type InitResult<T> = Result<T, InitError>;
