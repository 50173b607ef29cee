use crate::Item;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page of search results.
#[derive(Debug, Deserialize, Serialize)]
pub struct Page {
    /// The items on this page.
    #[serde(default)]
    pub features: Vec<Item>,

    /// Counts for the whole search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Additional fields.
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// Counts reported alongside a page of results.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Meta {
    /// The total number of items matching the search, across all pages.
    pub found: u64,

    /// The page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// The page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// The number of items on this page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned: Option<u64>,
}

impl Page {
    /// Returns the total number of matching items, if the server reported it.
    pub fn found(&self) -> Option<u64> {
        self.meta.map(|meta| meta.found)
    }
}
