use crate::{Collection, Item, Search};
use serde::{Deserialize, Serialize};

/// The items found by a search, with the collections they belong to.
///
/// Serializes as a GeoJSON FeatureCollection with two extra members:
/// `collections`, and `properties.search` holding the originating search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct ResultSet {
    #[serde(rename = "features")]
    items: Vec<Item>,

    #[serde(default)]
    collections: Vec<Collection>,

    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Properties {
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<Search>,
}

impl ResultSet {
    /// Creates a new result set.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::ResultSet;
    ///
    /// let result_set = ResultSet::new(Vec::new(), Vec::new(), None);
    /// assert!(result_set.is_empty());
    /// ```
    pub fn new(items: Vec<Item>, collections: Vec<Collection>, search: Option<Search>) -> ResultSet {
        ResultSet {
            items,
            collections,
            properties: Properties { search },
        }
    }

    /// Returns the items, in the order the server returned them.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the distinct collections referenced by the items.
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Returns the search that produced these results.
    ///
    /// Results fetched directly by id don't have one.
    pub fn search(&self) -> Option<&Search> {
        self.properties.search.as_ref()
    }

    /// Returns a collection by id.
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|collection| collection.id() == id)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Consumes this result set, returning its items.
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

impl Properties {
    fn is_empty(&self) -> bool {
        self.search.is_none()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
