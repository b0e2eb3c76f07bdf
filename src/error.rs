use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::ListError;

/// Top-level error for a grocer run
#[derive(Debug, Error)]
pub enum GrocerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    List(#[from] ListError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
