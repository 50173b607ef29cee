//! Blocking HTTP transport and configuration for [satsearch].
//!
//! # Examples
//!
//! ```no_run
//! use satsearch::Parameters;
//! use satsearch_io::Config;
//!
//! let config = Config::from_env().unwrap();
//! let parameters = Parameters::new()
//!     .collection("landsat-8-l1")
//!     .property("eo:cloud_cover<10")
//!     .datetime("2018-02-01/2018-02-10");
//! let session = satsearch_io::session(parameters, &config).unwrap();
//! let result_set = session.items(100).unwrap();
//! ```

#![warn(missing_docs, unused_qualifications)]

mod config;
mod error;
mod http;

pub use {
    config::{Config, DEFAULT_URL, TIMEOUT_ENV_VAR, URL_ENV_VAR},
    error::Error,
    http::HttpExecutor,
};

use satsearch::{Search, Session};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Creates a session that searches the configured API over HTTP.
///
/// [Parameters](satsearch::Parameters) are normalized on the way in.
///
/// # Examples
///
/// ```
/// use satsearch::Parameters;
/// use satsearch_io::Config;
///
/// let config = Config::new("https://sat-api.test");
/// let session = satsearch_io::session(Parameters::new().collection("landsat-8-l1"), &config).unwrap();
/// assert_eq!(session.search().collection().unwrap(), "landsat-8-l1");
/// ```
pub fn session(search: impl Into<Search>, config: &Config) -> Result<Session<HttpExecutor>> {
    let executor = HttpExecutor::from_config(config)?;
    Ok(Session::new(search, config.url_builder()?, executor))
}

/// Returns a string suitable for use as a HTTP user agent.
pub fn user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}
