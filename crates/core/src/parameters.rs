use crate::{Comparison, Query, Search, Sortby, merge_query_fragment};
use geojson::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User-facing search parameters, before normalization.
///
/// These are the loose, command-line friendly forms of a search: property
/// expressions like `eo:cloud_cover<10`, sort directives like `<datetime`,
/// and a `collection` shortcut. [Parameters::normalize] turns them into the
/// canonical [Search] body sent to the server.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct Parameters {
    /// Item ids to fetch one by one.
    ///
    /// Searching by id also requires a collection, either through
    /// [Parameters::collection] or a `collection=<id>` property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Shortcut for a `collection=<id>` property expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Property comparisons of the form `<field><operator><value>`.
    ///
    /// Operators are `=`, `>`, `<`, `>=` and `<=`. Expressions that do not
    /// contain exactly one operator are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<String>>,

    /// Sort directives, a field name optionally prefixed with `>`
    /// (descending, the default) or `<` (ascending).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,

    /// An already-canonical query. Property expressions are merged on top.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,

    /// Single date+time, or a range ('/' separator).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Alias for `time`, which wins over `time` when both are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// A GeoJSON geometry that items must intersect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<Geometry>,

    /// The page to start from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,

    /// The page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Anything else, passed through to the search body untouched.
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Parameters {
    /// Creates new, empty parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Parameters;
    ///
    /// let parameters = Parameters::new();
    /// ```
    pub fn new() -> Parameters {
        Parameters::default()
    }

    /// Sets the ids to fetch.
    pub fn ids(mut self, ids: Vec<String>) -> Parameters {
        self.ids = Some(ids);
        self
    }

    /// Sets the collection shortcut.
    pub fn collection(mut self, collection: impl ToString) -> Parameters {
        self.collection = Some(collection.to_string());
        self
    }

    /// Adds a property expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Parameters;
    ///
    /// let parameters = Parameters::new().property("eo:cloud_cover<10");
    /// ```
    pub fn property(mut self, expression: impl ToString) -> Parameters {
        self.property
            .get_or_insert_with(Vec::new)
            .push(expression.to_string());
        self
    }

    /// Adds a sort directive.
    pub fn sort(mut self, directive: impl ToString) -> Parameters {
        self.sort
            .get_or_insert_with(Vec::new)
            .push(directive.to_string());
        self
    }

    /// Sets the canonical query.
    pub fn query(mut self, query: Query) -> Parameters {
        self.query = Some(query);
        self
    }

    /// Sets the datetime.
    pub fn datetime(mut self, datetime: impl ToString) -> Parameters {
        self.datetime = Some(datetime.to_string());
        self
    }

    /// Sets the intersects geometry.
    pub fn intersects(mut self, intersects: impl Into<Geometry>) -> Parameters {
        self.intersects = Some(intersects.into());
        self
    }

    /// Sets the page.
    pub fn page(mut self, page: u64) -> Parameters {
        self.page = Some(page);
        self
    }

    /// Sets the limit.
    pub fn limit(mut self, limit: u64) -> Parameters {
        self.limit = Some(limit);
        self
    }

    /// Normalizes these parameters into a canonical [Search].
    ///
    /// In order:
    ///
    /// 1. `datetime` is renamed to `time`.
    /// 2. `collection` becomes a `collection=<id>` property expression.
    /// 3. Property expressions are parsed and merged into `query`.
    /// 4. Sort directives become [Sortby] objects, in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::{Direction, Parameters};
    ///
    /// let search = Parameters::new()
    ///     .collection("landsat-8-l1")
    ///     .property("eo:cloud_cover<10")
    ///     .sort("<eo:cloud_cover")
    ///     .datetime("2018-01-01/2018-02-01")
    ///     .normalize();
    /// assert_eq!(search.collection().unwrap(), "landsat-8-l1");
    /// assert_eq!(search.query.value("eo:cloud_cover", "lt").unwrap(), "10");
    /// assert_eq!(search.sort[0].direction, Direction::Asc);
    /// assert_eq!(search.time.unwrap(), "2018-01-01/2018-02-01");
    /// ```
    pub fn normalize(self) -> Search {
        let Parameters {
            ids,
            collection,
            mut property,
            sort,
            query,
            mut time,
            datetime,
            intersects,
            page,
            limit,
            additional_fields,
        } = self;
        if datetime.is_some() {
            time = datetime;
        }
        if let Some(collection) = collection {
            property
                .get_or_insert_with(Vec::new)
                .push(format!("collection={collection}"));
        }
        let query = property.unwrap_or_default().iter().fold(
            query.unwrap_or_default(),
            |query, expression| match Comparison::parse(expression) {
                Some(comparison) => merge_query_fragment(
                    query,
                    comparison.field,
                    comparison.operator,
                    comparison.value,
                ),
                None => {
                    tracing::debug!("ignoring property expression without an operator: {expression}");
                    query
                }
            },
        );
        let sort = sort
            .unwrap_or_default()
            .iter()
            .filter_map(|directive| match directive.parse::<Sortby>() {
                Ok(sortby) => Some(sortby),
                Err(err) => {
                    tracing::debug!("ignoring sort directive: {err}");
                    None
                }
            })
            .collect();
        Search {
            ids,
            query,
            sort,
            time,
            intersects,
            page,
            limit,
            additional_fields,
        }
    }
}

impl From<Parameters> for Search {
    fn from(parameters: Parameters) -> Search {
        parameters.normalize()
    }
}
