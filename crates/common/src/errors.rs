use std::fmt::Debug;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
