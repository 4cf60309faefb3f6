mod app;
mod config;
mod effects;
mod persistence;
pub mod ui;

use std::path::PathBuf;

use thiserror::Error;

pub use app::{iso_timestamp, run_app, Clock, FormSession, SubmitResult};
pub use config::{AppConfig, Cli, FieldConfig, LogTarget, DEFAULT_CONFIG_FILENAME};
pub use effects::EffectRunner;
pub use persistence::{Draft, DraftStore};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },
    #[error("could not read draft {path:?}: {source}")]
    DraftRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid draft {path:?}: {message}")]
    DraftParse { path: PathBuf, message: String },
    #[error("could not encode draft: {0}")]
    DraftEncode(String),
    #[error("could not write draft {path:?}: {source}")]
    DraftWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not start the submission worker: {0}")]
    Gateway(#[from] std::io::Error),
}
