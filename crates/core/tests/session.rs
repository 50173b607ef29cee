use rstest::rstest;
use satsearch::{Error, Executor, Parameters, Result, Search, Session, UrlBuilder};
use serde_json::{Value, json};
use std::cell::RefCell;
use url::Url;

/// An in-memory search API that records every request.
#[derive(Debug)]
struct MockApi {
    found: u64,
    available: u64,
    page_cap: u64,
    collections: Vec<Option<&'static str>>,
    /// Items from this index on belong to the given collection instead.
    collection_from: Option<(u64, &'static str)>,
    fail_on_page: Option<u64>,
    posts: RefCell<Vec<Value>>,
    gets: RefCell<Vec<String>>,
}

impl MockApi {
    fn new(found: u64) -> MockApi {
        MockApi {
            found,
            available: found,
            page_cap: u64::MAX,
            collections: vec![Some("landsat-8-l1")],
            collection_from: None,
            fail_on_page: None,
            posts: RefCell::new(Vec::new()),
            gets: RefCell::new(Vec::new()),
        }
    }

    fn item(&self, index: u64) -> Value {
        let collection = match self.collection_from {
            Some((from, collection)) if index >= from => Some(collection),
            _ => self.collections[(index as usize) % self.collections.len()],
        };
        let mut properties = json!({"datetime": "2018-02-08T18:02:15Z"});
        if let Some(collection) = collection {
            properties["collection"] = collection.into();
        }
        json!({
            "type": "Feature",
            "id": format!("item-{index}"),
            "geometry": null,
            "properties": properties
        })
    }

    /// The (page, limit) of every search after the first, which only counts.
    fn page_requests(&self) -> Vec<(u64, u64)> {
        self.posts
            .borrow()
            .iter()
            .skip(1)
            .map(|body| (body["page"].as_u64().unwrap(), body["limit"].as_u64().unwrap()))
            .collect()
    }

    fn collection_requests(&self) -> Vec<String> {
        self.gets
            .borrow()
            .iter()
            .filter(|path| !path.contains("/items/"))
            .cloned()
            .collect()
    }
}

impl Executor for MockApi {
    fn post(&self, url: &Url, body: &Value) -> Result<Value> {
        assert_eq!(url.path(), "/search");
        self.posts.borrow_mut().push(body.clone());
        let page = body["page"].as_u64().unwrap();
        let limit = body["limit"].as_u64().unwrap();
        if limit > 0 && self.fail_on_page == Some(page) {
            return Err(Error::Api(r#"{"message": "internal server error"}"#.to_string()));
        }
        let size = limit.min(self.page_cap);
        let start = (page - 1) * size;
        let end = (start + size).min(self.available);
        let features: Vec<Value> = (start..end).map(|index| self.item(index)).collect();
        Ok(json!({
            "type": "FeatureCollection",
            "meta": {"found": self.found, "page": page, "limit": limit, "returned": features.len()},
            "features": features
        }))
    }

    fn get(&self, url: &Url) -> Result<Value> {
        self.gets.borrow_mut().push(url.path().to_string());
        let segments: Vec<&str> = url.path_segments().unwrap().collect();
        match segments.as_slice() {
            ["collections", "missing"] => Err(Error::Api("Collection not found".to_string())),
            ["collections", "landsat-8-l1"] => Ok(read_json("data/landsat-8-l1.json")),
            ["collections", id] => Ok(json!({"id": id})),
            ["collections", "landsat-8-l1", "items", "LC80370332018039LGN00"] => {
                Ok(read_json("data/LC80370332018039LGN00.json"))
            }
            ["collections", collection, "items", id] => {
                Ok(json!({"id": id, "properties": {"collection": collection}}))
            }
            _ => Err(Error::Api("Not found".to_string())),
        }
    }
}

fn read_json(path: &str) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

fn url_builder() -> UrlBuilder {
    UrlBuilder::new("http://sat-api.test").unwrap()
}

fn session(search: impl Into<Search>, api: &MockApi) -> Session<&MockApi> {
    Session::new(search, url_builder(), api)
}

#[test]
fn found_with_ids_makes_no_requests() {
    let api = MockApi::new(0);
    let parameters = Parameters::new().ids(vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(session(parameters, &api).found().unwrap(), 3);
    assert!(api.posts.borrow().is_empty());
    assert!(api.gets.borrow().is_empty());
}

#[test]
fn found() {
    let api = MockApi::new(120);
    let parameters = Parameters::new()
        .collection("landsat-8-l1")
        .property("eo:cloud_cover<10");
    assert_eq!(session(parameters, &api).found().unwrap(), 120);
    let posts = api.posts.borrow();
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0],
        json!({
            "query": {
                "eo:cloud_cover": {"lt": "10"},
                "collection": {"eq": "landsat-8-l1"}
            },
            "page": 1,
            "limit": 0
        })
    );
}

#[test]
fn found_keeps_callers_page_and_limit() {
    let api = MockApi::new(120);
    let parameters = Parameters::new().page(3).limit(5);
    let _ = session(parameters, &api).found().unwrap();
    let posts = api.posts.borrow();
    assert_eq!(posts[0]["page"], 3);
    assert_eq!(posts[0]["limit"], 5);
}

#[test]
fn found_without_meta() {
    struct NoMeta;
    impl Executor for NoMeta {
        fn post(&self, _: &Url, _: &Value) -> Result<Value> {
            Ok(json!({"features": []}))
        }
        fn get(&self, _: &Url) -> Result<Value> {
            unreachable!()
        }
    }
    let session = Session::new(Search::new(), url_builder(), NoMeta);
    assert!(matches!(
        session.found().unwrap_err(),
        Error::MissingField("meta")
    ));
}

#[test]
fn items_stop_at_limit() {
    let api = MockApi::new(120);
    let result_set = session(Search::new(), &api).items(50).unwrap();
    assert_eq!(result_set.len(), 50);
    assert_eq!(api.page_requests(), vec![(1, 50)]);
    assert_eq!(result_set.items()[0].id(), "item-0");
    assert_eq!(result_set.items()[49].id(), "item-49");
}

#[test]
fn items_page_through_results() {
    let api = MockApi::new(2500);
    let result_set = session(Search::new(), &api).items(2500).unwrap();
    assert_eq!(result_set.len(), 2500);
    assert_eq!(api.page_requests(), vec![(1, 1000), (2, 1000), (3, 1000)]);
    let ids: Vec<_> = result_set.iter().map(|item| item.id().to_string()).collect();
    let expected: Vec<_> = (0..2500).map(|index| format!("item-{index}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn items_use_callers_page_size() {
    let api = MockApi::new(120);
    let result_set = session(Parameters::new().limit(20), &api)
        .items(50)
        .unwrap();
    assert_eq!(api.page_requests(), vec![(1, 20), (2, 20), (3, 20)]);
    assert_eq!(result_set.len(), 60);
    assert_eq!(result_set.items()[59].id(), "item-59");
}

#[test]
fn items_keep_whole_pages_and_their_collections() {
    let mut api = MockApi::new(120);
    api.collections = vec![Some("a")];
    api.collection_from = Some((50, "b"));
    let result_set = session(Parameters::new().limit(20), &api)
        .items(50)
        .unwrap();
    assert_eq!(result_set.len(), 60);
    let ids: Vec<_> = result_set
        .collections()
        .iter()
        .map(|collection| collection.id())
        .collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(api.collection_requests(), ["/collections/a", "/collections/b"]);
}

#[test]
fn items_start_at_callers_page() {
    let api = MockApi::new(120);
    let result_set = session(Parameters::new().page(2).limit(10), &api)
        .items(20)
        .unwrap();
    assert_eq!(api.page_requests(), vec![(2, 10), (3, 10)]);
    assert_eq!(result_set.items()[0].id(), "item-10");
}

#[test]
fn items_keep_requesting_after_short_pages() {
    let mut api = MockApi::new(120);
    api.page_cap = 10;
    let result_set = session(Search::new(), &api).items(50).unwrap();
    assert_eq!(
        api.page_requests(),
        vec![(1, 50), (2, 50), (3, 50), (4, 50), (5, 50)]
    );
    assert_eq!(result_set.len(), 50);
}

#[test]
fn items_stop_on_empty_page() {
    let mut api = MockApi::new(100);
    api.available = 30;
    let result_set = session(Search::new(), &api).items(1000).unwrap();
    assert_eq!(api.page_requests(), vec![(1, 100), (2, 100)]);
    assert_eq!(result_set.len(), 30);
}

#[test]
fn items_when_nothing_is_found() {
    let api = MockApi::new(0);
    let result_set = session(Search::new(), &api).items(1000).unwrap();
    assert!(result_set.is_empty());
    assert!(result_set.collections().is_empty());
    assert!(api.page_requests().is_empty());
    assert!(api.gets.borrow().is_empty());
}

#[test]
fn items_with_default_limit() {
    let api = MockApi::new(1500);
    let result_set = session(Search::new(), &api)
        .items_with_default_limit()
        .unwrap();
    assert_eq!(result_set.len(), 1000);
    assert_eq!(api.page_requests(), vec![(1, 1000)]);
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![Some("landsat-8-l1")], 1)]
#[case(vec![Some("a"), Some("b"), None, Some("c"), Some("a")], 3)]
fn collections_are_fetched_once(
    #[case] collections: Vec<Option<&'static str>>,
    #[case] count: usize,
) {
    let mut api = MockApi::new(if collections.is_empty() { 0 } else { 100 });
    if !collections.is_empty() {
        api.collections = collections;
    }
    let result_set = session(Search::new(), &api).items(100).unwrap();
    let requests = api.collection_requests();
    assert_eq!(requests.len(), count);
    assert_eq!(result_set.collections().len(), count);
    let mut deduplicated = requests.clone();
    deduplicated.sort();
    deduplicated.dedup();
    assert_eq!(deduplicated.len(), requests.len());
}

#[test]
fn top_level_collections_are_not_fetched() {
    struct TopLevel(RefCell<Vec<String>>);
    impl Executor for TopLevel {
        fn post(&self, _: &Url, _: &Value) -> Result<Value> {
            Ok(json!({
                "meta": {"found": 1},
                "features": [{"id": "a", "collection": "landsat-8-l1", "properties": {}}]
            }))
        }
        fn get(&self, url: &Url) -> Result<Value> {
            self.0.borrow_mut().push(url.path().to_string());
            Ok(json!({"id": "landsat-8-l1"}))
        }
    }
    let executor = TopLevel(RefCell::new(Vec::new()));
    let session = Session::new(Search::new(), url_builder(), &executor);
    let result_set = session.items(10).unwrap();
    assert_eq!(result_set.len(), 1);
    assert!(result_set.collections().is_empty());
    assert!(executor.0.borrow().is_empty());
}

#[test]
fn items_reference_their_collections() {
    let mut api = MockApi::new(10);
    api.collections = vec![Some("landsat-8-l1"), Some("sentinel-2-l1c")];
    let result_set = session(Parameters::new().property("eo:cloud_cover<10"), &api)
        .items(10)
        .unwrap();
    for item in &result_set {
        assert!(result_set.collection(item.collection().unwrap()).is_some());
    }
    let landsat = result_set.collection("landsat-8-l1").unwrap();
    assert_eq!(landsat.get("title").unwrap(), "Landsat 8 L1");
    assert_eq!(
        result_set.search().unwrap().query.value("eo:cloud_cover", "lt").unwrap(),
        "10"
    );
}

#[test]
fn failed_page_fails_everything() {
    let mut api = MockApi::new(120);
    api.fail_on_page = Some(2);
    let error = session(Parameters::new().limit(20), &api)
        .items(100)
        .unwrap_err();
    assert_eq!(error.to_string(), r#"{"message": "internal server error"}"#);
    assert!(api.collection_requests().is_empty());
}

#[test]
fn failed_collection_fails_everything() {
    let mut api = MockApi::new(10);
    api.collections = vec![Some("missing")];
    let error = session(Search::new(), &api).items(10).unwrap_err();
    assert!(matches!(error, Error::Api(ref message) if message == "Collection not found"));
}

#[test]
fn ids_require_a_collection() {
    let api = MockApi::new(0);
    let error = session(Parameters::new().ids(vec!["a".into()]), &api)
        .items(10)
        .unwrap_err();
    assert!(matches!(error, Error::CollectionRequired));
    assert_eq!(error.to_string(), "Collection required when searching by id");
    assert!(api.gets.borrow().is_empty());
}

#[test]
fn ids_require_a_string_collection() {
    let api = MockApi::new(0);
    let search: Search = serde_json::from_value(json!({
        "ids": ["a"],
        "query": {"collection": {"gt": "landsat-8-l1"}}
    }))
    .unwrap();
    let error = session(search, &api).items(10).unwrap_err();
    assert!(matches!(error, Error::CollectionRequired));
}

#[test]
fn items_by_ids() {
    let api = MockApi::new(0);
    let parameters = Parameters::new()
        .collection("landsat-8-l1")
        .ids(vec!["LC80370332018039LGN00".into(), "another-id".into()]);
    let result_set = session(parameters, &api).items(1).unwrap();
    assert_eq!(
        *api.gets.borrow(),
        vec![
            "/collections/landsat-8-l1",
            "/collections/landsat-8-l1/items/LC80370332018039LGN00",
            "/collections/landsat-8-l1/items/another-id",
        ]
    );
    assert!(api.posts.borrow().is_empty());
    assert_eq!(result_set.len(), 2);
    assert_eq!(result_set.items()[0].id(), "LC80370332018039LGN00");
    assert_eq!(
        *result_set.items()[0].property("eo:cloud_cover").unwrap(),
        0
    );
    assert_eq!(result_set.collections().len(), 1);
    assert_eq!(result_set.collections()[0].id(), "landsat-8-l1");
    assert!(result_set.search().unwrap().ids.is_some());
}

#[test]
fn items_by_id_without_a_search() {
    let api = MockApi::new(0);
    let result_set = session(Search::new(), &api)
        .items_by_id(&["an-id".to_string()], "sentinel-2-l1c")
        .unwrap();
    assert_eq!(result_set.len(), 1);
    assert_eq!(result_set.collections()[0].id(), "sentinel-2-l1c");
    assert!(result_set.search().is_none());
}

#[test]
fn collection() {
    let api = MockApi::new(0);
    let collection = session(Search::new(), &api)
        .collection("landsat-8-l1")
        .unwrap();
    assert_eq!(collection.id(), "landsat-8-l1");
    assert_eq!(*api.gets.borrow(), vec!["/collections/landsat-8-l1"]);
}
