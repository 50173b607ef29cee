use crate::Result;
use serde_json::Value;
use url::Url;

/// The transport a [Session](crate::Session) issues its requests through.
///
/// Implementations return the decoded JSON body of a successful (200)
/// response. Any other status must be returned as
/// [Error::Api](crate::Error::Api) carrying the raw response text, and
/// transport failures as [Error::Transport](crate::Error::Transport).
/// Executors don't retry.
pub trait Executor {
    /// POSTs a JSON body, e.g. a search to `<root>/search`.
    fn post(&self, url: &Url, body: &Value) -> Result<Value>;

    /// GETs a single resource, e.g. `<root>/collections/<id>`.
    fn get(&self, url: &Url) -> Result<Value>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn post(&self, url: &Url, body: &Value) -> Result<Value> {
        (**self).post(url, body)
    }

    fn get(&self, url: &Url) -> Result<Value> {
        (**self).get(url)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn post(&self, url: &Url, body: &Value) -> Result<Value> {
        (**self).post(url, body)
    }

    fn get(&self, url: &Url) -> Result<Value> {
        (**self).get(url)
    }
}
