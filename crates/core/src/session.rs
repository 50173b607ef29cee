use crate::{Collection, Error, Executor, Item, Page, Result, ResultSet, Search, UrlBuilder};
use indexmap::IndexSet;

/// The largest page size requested from the server.
pub const PAGE_SIZE: u64 = 1000;

/// One search against an API, possibly spanning many pages.
///
/// A session owns its [Search] and issues every request through its
/// [Executor]. It is not meant to be shared between threads.
///
/// # Examples
///
/// ```no_run
/// use satsearch::{Executor, Parameters, Session, UrlBuilder};
///
/// fn first_hundred(executor: impl Executor) -> satsearch::Result<()> {
///     let parameters = Parameters::new()
///         .collection("landsat-8-l1")
///         .property("eo:cloud_cover<10");
///     let url_builder = UrlBuilder::new("https://sat-api.developmentseed.org")?;
///     let session = Session::new(parameters, url_builder, executor);
///     println!("found {} items", session.found()?);
///     let result_set = session.items(100)?;
///     for item in &result_set {
///         println!("{}", item.id());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Session<E> {
    search: Search,
    url_builder: UrlBuilder,
    executor: E,
}

impl<E: Executor> Session<E> {
    /// The default maximum number of items returned by [Session::items].
    pub const DEFAULT_LIMIT: u64 = 1000;

    /// Creates a new session.
    ///
    /// [Parameters](crate::Parameters) are normalized on the way in.
    pub fn new(search: impl Into<Search>, url_builder: UrlBuilder, executor: E) -> Session<E> {
        Session {
            search: search.into(),
            url_builder,
            executor,
        }
    }

    /// Returns this session's search.
    pub fn search(&self) -> &Search {
        &self.search
    }

    /// Returns this session's url builder.
    pub fn url_builder(&self) -> &UrlBuilder {
        &self.url_builder
    }

    /// Returns the total number of items matching this search.
    ///
    /// When searching by id this is the number of ids, and no request is
    /// made. Otherwise one search is sent with `page=1` and `limit=0` filled
    /// in, unless the search already sets them.
    pub fn found(&self) -> Result<u64> {
        if let Some(ids) = self.search.ids.as_ref() {
            return Ok(ids.len() as u64);
        }
        let page = self.query(&self.search.with_defaults(1, 0))?;
        let found = page.found().ok_or(Error::MissingField("meta"))?;
        tracing::info!("found={found}");
        Ok(found)
    }

    /// Sends a single search to the server and returns the page of results.
    pub fn query(&self, search: &Search) -> Result<Page> {
        let url = self.url_builder.search();
        let body = serde_json::to_value(search)?;
        tracing::debug!("query url={url} body={body}");
        let value = self.executor.post(url, &body)?;
        serde_json::from_value(value).map_err(Error::from)
    }

    /// Fetches a collection by id.
    pub fn collection(&self, id: &str) -> Result<Collection> {
        let url = self.url_builder.collection(id);
        tracing::debug!("collection url={url}");
        let value = self.executor.get(&url)?;
        Collection::try_from(value)
    }

    /// Fetches items one by one from a single collection.
    ///
    /// The collection is fetched once, then each item in `ids` order. The
    /// returned result set has no search attached.
    pub fn items_by_id(&self, ids: &[String], collection_id: &str) -> Result<ResultSet> {
        let (items, collection) = self.fetch_by_id(ids, collection_id)?;
        Ok(ResultSet::new(items, vec![collection], None))
    }

    /// Returns up to `limit` items matching this search, and their collections.
    ///
    /// When searching by id, the search must be pinned to a collection with
    /// `collection=<id>`, and `limit` is ignored.
    ///
    /// Otherwise pages are requested in order, starting at the search's page
    /// (or 1), until at least `min(found, limit)` items have been collected.
    /// Whole pages are kept, so the result can overshoot `limit` when the
    /// page size doesn't divide it. Each distinct collection referenced by
    /// the items is then fetched once. Any failed request fails the whole
    /// call.
    pub fn items(&self, limit: u64) -> Result<ResultSet> {
        if let Some(ids) = self.search.ids.as_ref() {
            let collection_id = self.search.collection().ok_or(Error::CollectionRequired)?;
            let (items, collection) = self.fetch_by_id(ids, collection_id)?;
            return Ok(ResultSet::new(
                items,
                vec![collection],
                Some(self.search.clone()),
            ));
        }

        let max_items = self.found()?.min(limit);
        let max_len = usize::try_from(max_items).unwrap_or(usize::MAX);
        let mut search = self.search.clone();
        search.limit = Some(match self.search.limit {
            Some(limit) if limit > 0 => limit,
            _ => PAGE_SIZE.min(max_items),
        });
        let mut page = self.search.page.unwrap_or(1);
        let mut items: Vec<Item> = Vec::new();
        while items.len() < max_len {
            search.page = Some(page);
            let features = self.query(&search)?.features;
            if features.is_empty() {
                tracing::warn!(
                    "page={page} was empty, stopping with {} of {max_items} items",
                    items.len()
                );
                break;
            }
            items.extend(features);
            tracing::info!("page={page} items={}/{max_items}", items.len());
            page += 1;
        }

        let collections = self.referenced_collections(&items)?;
        Ok(ResultSet::new(items, collections, Some(self.search.clone())))
    }

    /// Returns up to [Session::DEFAULT_LIMIT] items.
    pub fn items_with_default_limit(&self) -> Result<ResultSet> {
        self.items(Self::DEFAULT_LIMIT)
    }

    /// Consumes this session, returning its search.
    pub fn into_search(self) -> Search {
        self.search
    }

    fn fetch_by_id(&self, ids: &[String], collection_id: &str) -> Result<(Vec<Item>, Collection)> {
        let collection = self.collection(collection_id)?;
        let items = ids
            .iter()
            .map(|id| {
                let url = self.url_builder.item(collection_id, id);
                tracing::debug!("item url={url}");
                Item::try_from(self.executor.get(&url)?)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((items, collection))
    }

    fn referenced_collections(&self, items: &[Item]) -> Result<Vec<Collection>> {
        let ids: IndexSet<&str> = items.iter().filter_map(Item::collection).collect();
        ids.into_iter().map(|id| self.collection(id)).collect()
    }
}
