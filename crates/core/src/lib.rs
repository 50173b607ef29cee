//! Query construction and pagination for STAC search APIs.
//!
//! This crate **is**:
//!
//! - A normalizer that turns loose, command-line style search parameters into
//!   a canonical search body
//! - A search session that pages through results and gathers the collections
//!   the items belong to
//!
//! This crate **is not**:
//!
//! - An HTTP client. Requests go through an [Executor]; see
//!   [satsearch-io](https://docs.rs/satsearch-io) for one backed by `reqwest`.
//!
//! # Normalizing
//!
//! Property expressions, sort directives and the `collection` shortcut are
//! expanded into a [Search]:
//!
//! ```
//! use satsearch::Parameters;
//! use serde_json::json;
//!
//! let search = Parameters::new()
//!     .collection("landsat-8-l1")
//!     .property("eo:cloud_cover<10")
//!     .sort("<eo:cloud_cover")
//!     .normalize();
//! assert_eq!(
//!     serde_json::to_value(&search).unwrap(),
//!     json!({
//!         "query": {
//!             "eo:cloud_cover": {"lt": "10"},
//!             "collection": {"eq": "landsat-8-l1"}
//!         },
//!         "sort": [{"field": "eo:cloud_cover", "direction": "asc"}]
//!     })
//! );
//! ```
//!
//! # Searching
//!
//! A [Session] binds a search to an API root and an [Executor], then
//! [Session::found] counts matches and [Session::items] collects them into a
//! [ResultSet].

#![warn(missing_docs, unused_qualifications)]

mod collection;
mod error;
mod executor;
mod item;
mod page;
mod parameters;
mod query;
mod result_set;
mod search;
mod session;
mod sort;
mod url_builder;

pub use {
    collection::Collection,
    error::Error,
    executor::Executor,
    item::Item,
    page::{Meta, Page},
    parameters::Parameters,
    query::{Comparison, OPERATORS, Operator, Query, merge_query_fragment},
    result_set::ResultSet,
    search::Search,
    session::{PAGE_SIZE, Session},
    sort::{Direction, Sortby},
    url_builder::UrlBuilder,
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Return this crate's version.
///
/// # Examples
///
/// ```
/// println!("{}", satsearch::version());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
