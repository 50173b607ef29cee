//! Property comparisons and the `query` mapping they expand into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Operator symbols, in the order they are tried when splitting an expression.
///
/// Two-character symbols come first so that `a>=5` is never read as `a` `>`
/// `=5`.
///
/// # Examples
///
/// ```
/// use satsearch::{OPERATORS, Operator};
///
/// assert_eq!(OPERATORS[0], (">=", Operator::Gte));
/// ```
pub const OPERATORS: [(&str, Operator); 5] = [
    (">=", Operator::Gte),
    ("<=", Operator::Lte),
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
];

/// A comparison operator of the query extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Equal to.
    Eq,

    /// Greater than.
    Gt,

    /// Less than.
    Lt,

    /// Greater than or equal to.
    Gte,

    /// Less than or equal to.
    Lte,
}

/// A single `<field><operator><value>` expression, e.g. `eo:cloud_cover<10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison<'a> {
    /// The property name.
    pub field: &'a str,

    /// The operator.
    pub operator: Operator,

    /// The right-hand side, kept as a string.
    pub value: &'a str,
}

/// The `query` member of a search body: `field -> {operator -> value}`.
///
/// Insertion order is preserved, so the body sent to the server follows the
/// order the expressions were given in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(IndexMap<String, Map<String, Value>>);

impl Operator {
    /// Returns the name of this operator as used in a query body.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Operator;
    ///
    /// assert_eq!(Operator::Gte.as_str(), "gte");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
        }
    }

    /// Returns the symbol used for this operator in an expression.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Comparison<'a> {
    /// Parses an expression, returning `None` if no operator splits it cleanly.
    ///
    /// Each symbol of [OPERATORS] is tried in turn, and the first one that
    /// splits the expression into exactly two non-empty parts wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::{Comparison, Operator};
    ///
    /// let comparison = Comparison::parse("alpha>=5").unwrap();
    /// assert_eq!(comparison.field, "alpha");
    /// assert_eq!(comparison.operator, Operator::Gte);
    /// assert_eq!(comparison.value, "5");
    /// assert!(Comparison::parse("no-operator").is_none());
    /// ```
    pub fn parse(expression: &'a str) -> Option<Comparison<'a>> {
        OPERATORS.iter().find_map(|&(symbol, operator)| {
            let mut parts = expression.split(symbol);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(field), Some(value), None) if !field.is_empty() && !value.is_empty() => {
                    Some(Comparison {
                        field,
                        operator,
                        value,
                    })
                }
                _ => None,
            }
        })
    }
}

impl Display for Comparison<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator.symbol(), self.value)
    }
}

impl Query {
    /// Creates a new, empty query.
    pub fn new() -> Query {
        Query::default()
    }

    /// Returns true if there are no fields in this query.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of fields in this query.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the comparisons for a field.
    pub fn get(&self, field: &str) -> Option<&Map<String, Value>> {
        self.0.get(field)
    }

    /// Returns the value compared against for a field and operator name.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::{Operator, Query, merge_query_fragment};
    ///
    /// let query = merge_query_fragment(Query::new(), "eo:cloud_cover", Operator::Lt, "10");
    /// assert_eq!(query.value("eo:cloud_cover", "lt").unwrap(), "10");
    /// ```
    pub fn value(&self, field: &str, operator: &str) -> Option<&Value> {
        self.0.get(field).and_then(|ops| ops.get(operator))
    }

    /// Returns the collection id this query is pinned to, if `collection.eq` is a string.
    pub fn collection(&self) -> Option<&str> {
        self.value("collection", Operator::Eq.as_str())
            .and_then(Value::as_str)
    }

    /// Iterates over the fields and their comparisons.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
        self.0.iter()
    }
}

impl From<IndexMap<String, Map<String, Value>>> for Query {
    fn from(map: IndexMap<String, Map<String, Value>>) -> Query {
        Query(map)
    }
}

impl<'a> FromIterator<Comparison<'a>> for Query {
    fn from_iter<T: IntoIterator<Item = Comparison<'a>>>(iter: T) -> Query {
        iter.into_iter().fold(Query::new(), |query, comparison| {
            merge_query_fragment(
                query,
                comparison.field,
                comparison.operator,
                comparison.value,
            )
        })
    }
}

/// Merges a single `{field: {operator: value}}` fragment into a query.
///
/// A new field is appended. An existing field gains the operator key and
/// keeps its other operators. The same field and operator is last-write-wins.
///
/// # Examples
///
/// ```
/// use satsearch::{Operator, Query, merge_query_fragment};
///
/// let query = merge_query_fragment(Query::new(), "a", Operator::Gt, "1");
/// let query = merge_query_fragment(query, "a", Operator::Lt, "5");
/// assert_eq!(query.get("a").unwrap().len(), 2);
/// ```
pub fn merge_query_fragment(
    mut existing: Query,
    field: impl Into<String>,
    operator: Operator,
    value: impl Into<Value>,
) -> Query {
    let _ = existing
        .0
        .entry(field.into())
        .or_default()
        .insert(operator.as_str().to_string(), value.into());
    existing
}
