//! Application-level errors.

use sketchboard_core::CanvasError;
use sketchboard_render::RendererError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Usage: sketchboard <script.json> [config.json]")]
    Usage,
}

pub type AppResult<T> = Result<T, AppError>;
