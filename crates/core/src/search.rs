use crate::{Query, Sortby};
use geojson::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A normalized search, serialized as the body of a `POST /search` request.
///
/// Build one with [Parameters::normalize](crate::Parameters::normalize), or
/// directly with the builder methods if the query is already canonical.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Search {
    /// Array of Item ids to return.
    ///
    /// When present, even if empty, the search retrieves these items one by
    /// one instead of paging through `/search`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Property comparisons, `field -> {operator -> value}`.
    #[serde(skip_serializing_if = "Query::is_empty", default)]
    pub query: Query,

    /// Sort directives, in priority order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sort: Vec<Sortby>,

    /// Single date+time, or a range ('/' separator).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Searches items by performing intersection between their geometry and provided GeoJSON geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<Geometry>,

    /// The page to return, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// The maximum number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Passthrough fields, sent as-is.
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Search {
    /// Creates a new, empty search.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Search;
    ///
    /// let search = Search::new();
    /// ```
    pub fn new() -> Search {
        Search::default()
    }

    /// Sets the ids field of this search.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Search;
    /// let search = Search::new().ids(vec!["an-id".to_string()]);
    /// ```
    pub fn ids(mut self, ids: Vec<String>) -> Search {
        self.ids = Some(ids);
        self
    }

    /// Sets the query of this search.
    pub fn query(mut self, query: Query) -> Search {
        self.query = query;
        self
    }

    /// Sets the sort of this search.
    pub fn sort(mut self, sort: Vec<Sortby>) -> Search {
        self.sort = sort;
        self
    }

    /// Sets the time of this search.
    pub fn time(mut self, time: impl ToString) -> Search {
        self.time = Some(time.to_string());
        self
    }

    /// Sets the page of this search.
    pub fn page(mut self, page: u64) -> Search {
        self.page = Some(page);
        self
    }

    /// Sets the limit of this search.
    pub fn limit(mut self, limit: u64) -> Search {
        self.limit = Some(limit);
        self
    }

    /// Returns the collection this search is pinned to by `collection.eq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Parameters;
    ///
    /// let search = Parameters::new().collection("landsat-8-l1").normalize();
    /// assert_eq!(search.collection().unwrap(), "landsat-8-l1");
    /// ```
    pub fn collection(&self) -> Option<&str> {
        self.query.collection()
    }

    /// Returns a copy of this search with `page` and `limit` filled in where unset.
    ///
    /// Values already on the search take precedence.
    pub fn with_defaults(&self, page: u64, limit: u64) -> Search {
        let mut search = self.clone();
        let _ = search.page.get_or_insert(page);
        let _ = search.limit.get_or_insert(limit);
        search
    }
}
