use crate::{Config, Result};
use reqwest::{
    StatusCode,
    blocking::{Client, Response},
};
use satsearch::Executor;
use serde_json::Value;
use url::Url;

/// An [Executor] that talks to a search API over blocking HTTP.
///
/// Every request is made once. A response other than `200 OK` becomes a
/// [satsearch::Error::Api] holding the response text.
#[derive(Debug, Clone)]
pub struct HttpExecutor(Client);

impl HttpExecutor {
    /// Creates a new executor with no timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch_io::HttpExecutor;
    ///
    /// let executor = HttpExecutor::new().unwrap();
    /// ```
    pub fn new() -> Result<HttpExecutor> {
        HttpExecutor::from_config(&Config::default())
    }

    /// Creates a new executor using the configuration's timeout.
    pub fn from_config(config: &Config) -> Result<HttpExecutor> {
        let mut builder = Client::builder().user_agent(crate::user_agent());
        if let Some(timeout) = config.timeout_duration()? {
            builder = builder.timeout(timeout);
        }
        Ok(HttpExecutor(builder.build()?))
    }
}

impl From<Client> for HttpExecutor {
    fn from(client: Client) -> HttpExecutor {
        HttpExecutor(client)
    }
}

impl Executor for HttpExecutor {
    fn post(&self, url: &Url, body: &Value) -> satsearch::Result<Value> {
        let response = self
            .0
            .post(url.clone())
            .json(body)
            .send()
            .map_err(transport)?;
        into_json(response)
    }

    fn get(&self, url: &Url) -> satsearch::Result<Value> {
        let response = self.0.get(url.clone()).send().map_err(transport)?;
        into_json(response)
    }
}

fn into_json(response: Response) -> satsearch::Result<Value> {
    let status = response.status();
    if status == StatusCode::OK {
        response.json().map_err(transport)
    } else {
        let url = response.url().clone();
        let text = response.text().map_err(transport)?;
        tracing::debug!("request failed url={url} status={status}");
        Err(satsearch::Error::Api(text))
    }
}

fn transport(err: reqwest::Error) -> satsearch::Error {
    satsearch::Error::Transport(Box::new(err))
}
