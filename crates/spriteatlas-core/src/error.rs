use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteAtlasError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Nothing to pack")]
    Empty,
    #[error("Computed atlas canvas has no extent ({width}x{height})")]
    ZeroExtent { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SpriteAtlasError>;
