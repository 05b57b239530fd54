//! Host errors.

use inkboard_core::BoardError;
use inkboard_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Config(#[source] serde_json::Error),
    #[error("Invalid script: {0}")]
    Script(#[source] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Render(#[from] RendererError),
}
