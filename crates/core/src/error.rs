use thiserror::Error;

/// Error enum for crate-specific errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The search API returned a non-success status.
    ///
    /// The message is the raw response body, verbatim.
    #[error("{0}")]
    Api(String),

    /// Returned when searching by id without a `collection=<id>` query.
    #[error("Collection required when searching by id")]
    CollectionRequired,

    /// This string is not a valid sort directive.
    #[error("invalid sortby: {0:?}")]
    InvalidSortby(String),

    /// Returned when there is not a required field on a response.
    #[error("no \"{0}\" field in the JSON object")]
    MissingField(&'static str),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// An error from the transport behind an [Executor](crate::Executor).
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// [url::ParseError]
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}
