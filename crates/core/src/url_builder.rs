use crate::{Error, Result};
use url::{ParseError, Url};

/// Builds urls to the endpoints of a search API.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlBuilder {
    root: Url,
    search: Url,
}

impl UrlBuilder {
    /// Creates a new url builder for the API rooted at `url`.
    ///
    /// A trailing slash on the root is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::UrlBuilder;
    ///
    /// let url_builder = UrlBuilder::new("https://sat-api.test/stac").unwrap();
    /// assert_eq!(url_builder.search().as_str(), "https://sat-api.test/stac/search");
    /// ```
    pub fn new(url: &str) -> Result<UrlBuilder> {
        let mut root = Url::parse(url)?;
        if root.cannot_be_a_base() {
            return Err(Error::UrlParse(ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let search = join(&root, &["search"]);
        Ok(UrlBuilder { root, search })
    }

    /// Returns the root url, always with a trailing slash.
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Returns the search url.
    pub fn search(&self) -> &Url {
        &self.search
    }

    /// Returns the url of a collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::UrlBuilder;
    ///
    /// let url_builder = UrlBuilder::new("https://sat-api.test/").unwrap();
    /// assert_eq!(
    ///     url_builder.collection("landsat-8-l1").as_str(),
    ///     "https://sat-api.test/collections/landsat-8-l1"
    /// );
    /// ```
    pub fn collection(&self, id: &str) -> Url {
        join(&self.root, &["collections", id])
    }

    /// Returns the url of an item in a collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::UrlBuilder;
    ///
    /// let url_builder = UrlBuilder::new("https://sat-api.test").unwrap();
    /// assert_eq!(
    ///     url_builder.item("landsat-8-l1", "an-id").as_str(),
    ///     "https://sat-api.test/collections/landsat-8-l1/items/an-id"
    /// );
    /// ```
    pub fn item(&self, collection_id: &str, item_id: &str) -> Url {
        join(&self.root, &["collections", collection_id, "items", item_id])
    }
}

fn join(root: &Url, segments: &[&str]) -> Url {
    let mut url = root.clone();
    if let Ok(mut path_segments) = url.path_segments_mut() {
        let _ = path_segments.pop_if_empty().extend(segments);
    }
    url
}
