use thiserror::Error;

/// Crate-specific error enum
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The configured timeout is not a valid number of seconds.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error(transparent)]
    /// [reqwest::Error]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    /// [satsearch::Error]
    Satsearch(#[from] satsearch::Error),
}
