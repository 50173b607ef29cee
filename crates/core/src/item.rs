use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single catalog record, e.g. one scene.
///
/// Items are read-only views of the JSON returned by the server. The fields
/// this crate doesn't interpret are kept as-is and written back out on
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    id: String,

    #[serde(default)]
    properties: Map<String, Value>,

    #[serde(flatten)]
    additional_fields: Map<String, Value>,
}

impl Item {
    /// Returns this item's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns this item's properties.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Returns a property by name.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Returns the id of the collection this item belongs to.
    ///
    /// Only `properties.collection` is a reference. A top-level `collection`
    /// field is kept in [Item::additional_fields] but not read here.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Item;
    /// use serde_json::json;
    ///
    /// let item = Item::try_from(json!({
    ///     "id": "an-id",
    ///     "properties": {"collection": "landsat-8-l1"}
    /// })).unwrap();
    /// assert_eq!(item.collection().unwrap(), "landsat-8-l1");
    /// ```
    pub fn collection(&self) -> Option<&str> {
        self.properties.get("collection").and_then(Value::as_str)
    }

    /// Returns the fields of this item other than `id` and `properties`.
    pub fn additional_fields(&self) -> &Map<String, Value> {
        &self.additional_fields
    }
}

impl TryFrom<Value> for Item {
    type Error = Error;

    fn try_from(value: Value) -> Result<Item> {
        serde_json::from_value(value).map_err(Error::from)
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Value {
        let mut map = item.additional_fields;
        let _ = map.insert("id".to_string(), Value::String(item.id));
        let _ = map.insert("properties".to_string(), Value::Object(item.properties));
        Value::Object(map)
    }
}
