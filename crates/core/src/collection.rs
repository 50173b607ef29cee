use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named grouping of items, as returned by `/collections/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    id: String,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl Collection {
    /// Returns this collection's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a field of the collection, e.g. `"title"` or `"license"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Collection;
    /// use serde_json::json;
    ///
    /// let collection = Collection::try_from(json!({
    ///     "id": "landsat-8-l1",
    ///     "title": "Landsat 8 L1"
    /// })).unwrap();
    /// assert_eq!(collection.get("title").unwrap(), "Landsat 8 L1");
    /// ```
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.additional_fields.get(key)
    }

    /// Returns the fields of this collection other than `id`.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}

impl TryFrom<Value> for Collection {
    type Error = Error;

    fn try_from(value: Value) -> Result<Collection> {
        serde_json::from_value(value).map_err(Error::from)
    }
}
