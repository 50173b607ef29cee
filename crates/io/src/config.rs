use crate::{Error, Result};
use satsearch::UrlBuilder;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The API used when nothing else is configured.
pub const DEFAULT_URL: &str = "https://sat-api.developmentseed.org";

/// Environment variable holding the API root url.
pub const URL_ENV_VAR: &str = "SATUTILS_API_URL";

/// Environment variable holding the request timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "SATUTILS_TIMEOUT";

/// Where to search, and how patiently.
///
/// Resolve this once at startup, e.g. with [Config::from_env], and hand it to
/// whatever builds sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The root url of the search API.
    pub url: String,

    /// The request timeout, in seconds. No timeout if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl Config {
    /// Creates a new configuration for the API at `url`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch_io::Config;
    ///
    /// let config = Config::new("https://sat-api.test");
    /// assert!(config.timeout.is_none());
    /// ```
    pub fn new(url: impl ToString) -> Config {
        Config {
            url: url.to_string(),
            timeout: None,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// [URL_ENV_VAR] defaults to [DEFAULT_URL]; [TIMEOUT_ENV_VAR] is optional.
    pub fn from_env() -> Result<Config> {
        Config::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let url = var(URL_ENV_VAR).unwrap_or_else(|| DEFAULT_URL.to_string());
        let timeout = var(TIMEOUT_ENV_VAR)
            .map(|timeout| {
                timeout
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| Error::InvalidTimeout(timeout.clone()))
            })
            .transpose()?;
        let config = Config { url, timeout };
        let _ = config.timeout_duration()?;
        Ok(config)
    }

    /// Returns a url builder rooted at this configuration's url.
    pub fn url_builder(&self) -> Result<UrlBuilder> {
        UrlBuilder::new(&self.url).map_err(Error::from)
    }

    /// Returns the timeout as a [Duration].
    pub fn timeout_duration(&self) -> Result<Option<Duration>> {
        self.timeout
            .map(|seconds| {
                Duration::try_from_secs_f64(seconds)
                    .map_err(|_| Error::InvalidTimeout(seconds.to_string()))
            })
            .transpose()
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new(DEFAULT_URL)
    }
}
