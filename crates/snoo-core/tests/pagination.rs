//! Pagination tests for snoo-core.
//!
//! These tests drive the client over a scripted in-memory transport that
//! replays canned responses and records every request it was given.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::{Value, json};
use snoo_core::{
    Content, DecodeError, Error, Interruption, Kind, ListingEndpoint, ListingOptions, Listings,
    Request, Result, Sort, StatusError, SubredditName, TimeWindow, Transport, TransportError,
    WalkLimits, WalkStatus,
};
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
    requests: Mutex<Vec<Request>>,
    /// Cancel this token when serving the response at this index.
    cancel_at: Option<(usize, CancellationToken)>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::default()
    }

    fn page(self, value: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(serde_json::to_vec(&value).unwrap()));
        self
    }

    fn raw(self, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(body.as_bytes().to_vec()));
        self
    }

    fn fail(self, err: Error) -> Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    fn cancel_when_serving(mut self, index: usize, token: CancellationToken) -> Self {
        self.cancel_at = Some((index, token));
        self
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(&self, request: &Request) -> Result<Vec<u8>> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        if let Some((at, ref token)) = self.cancel_at
            && at == index
        {
            token.cancel();
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport called more often than scripted")
    }
}

fn post(id: &str) -> Value {
    json!({"kind": "t3", "data": {"id": id, "name": format!("t3_{}", id), "title": format!("post {}", id)}})
}

fn listing(children: Vec<Value>, after: Value) -> Value {
    json!({
        "kind": "Listing",
        "data": {"before": null, "after": after, "dist": children.len(), "children": children}
    })
}

fn rust_new() -> ListingEndpoint {
    ListingEndpoint::subreddit(SubredditName::new("rust").unwrap(), Sort::New)
}

fn server_error() -> Error {
    TransportError::Status(StatusError::new(500, None, Some("internal".into()))).into()
}

fn ids(items: impl IntoIterator<Item = Content>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.id().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Single page
// ============================================================================

#[tokio::test]
async fn test_fetch_page_decodes_post() {
    let transport = ScriptedTransport::new().page(listing(vec![post("abc")], json!(null)));
    let listings = Listings::new(transport);

    let page = listings
        .fetch_page(&rust_new(), &ListingOptions::default())
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    let item = &page.items()[0];
    assert_eq!(item.kind(), Kind::Post);
    assert_eq!(item.fullname().unwrap().to_string(), "t3_abc");
    assert!(page.after().is_none());

    let requests = listings.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/r/rust/new.json");
    assert_eq!(requests[0].query.get("after"), Some(""));
    assert_eq!(requests[0].query.get("limit"), Some("25"));
}

#[tokio::test]
async fn test_fetch_page_sends_overlay() {
    let transport = ScriptedTransport::new().page(listing(vec![], json!(null)));
    let listings = Listings::new(transport);
    let endpoint = ListingEndpoint::subreddit(SubredditName::new("rust").unwrap(), Sort::Top);

    listings
        .fetch_page(&endpoint, &ListingOptions::default().time_window(TimeWindow::Year))
        .await
        .unwrap();

    let request = &listings.transport().requests()[0];
    assert_eq!(request.path, "/r/rust/top.json");
    assert_eq!(request.query.get("t"), Some("year"));
    assert!(!request.query.contains("g"));
}

#[tokio::test]
async fn test_fetch_page_unknown_kind_fails() {
    let transport = ScriptedTransport::new().page(listing(
        vec![post("a"), json!({"kind": "unknown_x", "data": {}})],
        json!("t3_a"),
    ));
    let listings = Listings::new(transport);

    let err = listings
        .fetch_page(&rust_new(), &ListingOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Decode(DecodeError::UnsupportedContentKind { ref kind, position: 1 }) if kind == "unknown_x"
    ));
}

#[tokio::test]
async fn test_fetch_page_invalid_json() {
    let transport = ScriptedTransport::new().raw("<html>too many requests</html>");
    let listings = Listings::new(transport);

    let err = listings
        .fetch_page(&rust_new(), &ListingOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
}

// ============================================================================
// Walks
// ============================================================================

#[tokio::test]
async fn test_walk_follows_cursors_to_the_end() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!("A2")))
        .page(listing(vec![post("a3")], json!(null)));
    let listings = Listings::new(transport);

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::Completed);
    assert_eq!(walk.requests, 3);
    assert_eq!(ids(walk.clone().into_items()), vec!["a1", "a2", "a3"]);

    let afters: Vec<String> = listings
        .transport()
        .requests()
        .iter()
        .map(|r| r.query.get("after").unwrap_or_default().to_string())
        .collect();
    assert_eq!(afters, vec!["", "A1", "A2"]);
}

#[tokio::test]
async fn test_empty_cursor_ends_walk() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!("")));
    let listings = Listings::new(transport);

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::Completed);
    assert_eq!(walk.requests, 2);
}

#[tokio::test]
async fn test_empty_first_page_is_complete() {
    let transport = ScriptedTransport::new().page(listing(vec![], json!(null)));
    let listings = Listings::new(transport);

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::Completed);
    assert_eq!(walk.pages.len(), 1);
    assert_eq!(walk.item_count(), 0);
}

#[tokio::test]
async fn test_walk_advances_count() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1"), post("b1")], json!("B1")))
        .page(listing(vec![post("a2")], json!(null)));
    let listings = Listings::new(transport);

    listings
        .fetch_all(
            &rust_new(),
            ListingOptions::default().count(0).before("X"),
            WalkLimits::default(),
        )
        .await
        .unwrap();

    let requests = listings.transport().requests();
    assert_eq!(requests[0].query.get("count"), Some("0"));
    assert_eq!(requests[0].query.get("before"), Some("X"));
    assert_eq!(requests[1].query.get("count"), Some("2"));
    assert_eq!(requests[1].query.get("before"), Some(""));
}

#[tokio::test]
async fn test_failure_after_first_page_keeps_partial() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1"), post("b1")], json!("B1")))
        .fail(server_error());
    let listings = Listings::new(transport);

    let err = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap_err();

    let Error::WalkInterrupted(interrupted) = err else {
        panic!("expected an interrupted walk");
    };
    assert_eq!(interrupted.page_index, 1);
    assert_eq!(interrupted.partial.status, WalkStatus::Interrupted);
    assert_eq!(interrupted.partial.requests, 2);
    assert_eq!(ids(interrupted.partial.items().cloned()), vec!["a1", "b1"]);

    let Interruption::Failed(cause) = &interrupted.cause else {
        panic!("expected a failure cause");
    };
    assert!(matches!(**cause, Error::Transport(TransportError::Status(ref s)) if s.status == 500));
}

#[tokio::test]
async fn test_failure_on_first_page_is_unwrapped() {
    let transport = ScriptedTransport::new().fail(server_error());
    let listings = Listings::new(transport);

    let err = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Status(_))));
    assert_eq!(err.transport().map(|t| t.is_rate_limited()), Some(false));
}

#[tokio::test]
async fn test_decode_failure_mid_walk_is_interrupted() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![json!({"kind": "t4", "data": {}})], json!(null)));
    let listings = Listings::new(transport);

    let err = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap_err();

    let Error::WalkInterrupted(interrupted) = err else {
        panic!("expected an interrupted walk");
    };
    assert_eq!(interrupted.partial.item_count(), 1);
    assert!(matches!(
        interrupted.cause,
        Interruption::Failed(ref e) if matches!(**e, Error::Decode(DecodeError::UnsupportedContentKind { .. }))
    ));
}

#[tokio::test]
async fn test_repeated_cursor_is_rejected() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!("A1")));
    let listings = Listings::new(transport);

    let err = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default())
        .await
        .unwrap_err();

    let Error::WalkInterrupted(interrupted) = err else {
        panic!("expected an interrupted walk");
    };
    assert!(matches!(
        interrupted.cause,
        Interruption::Failed(ref e) if matches!(**e, Error::Decode(DecodeError::RepeatedCursor { .. }))
    ));
}

// ============================================================================
// Limits and cancellation
// ============================================================================

#[tokio::test]
async fn test_max_pages() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!("A2")));
    let listings = Listings::new(transport);

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default().max_pages(2))
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::PageLimit);
    assert_eq!(walk.requests, 2);
    assert_eq!(walk.next_cursor(), Some("A2"));
}

#[tokio::test]
async fn test_max_items_checked_between_pages() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1"), post("b1")], json!("B1")))
        .page(listing(vec![post("a2"), post("b2")], json!("B2")));
    let listings = Listings::new(transport);

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default().max_items(3))
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::ItemLimit);
    // The page that crossed the cap is not truncated
    assert_eq!(walk.item_count(), 4);
    assert_eq!(walk.pages[1].len(), 2);
    assert_eq!(walk.requests, 2);
}

#[tokio::test]
async fn test_zero_page_limit_fetches_nothing() {
    let listings = Listings::new(ScriptedTransport::new());

    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), WalkLimits::default().max_pages(0))
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::PageLimit);
    assert_eq!(walk.requests, 0);
    assert!(listings.transport().requests().is_empty());
}

#[tokio::test]
async fn test_stop_when_predicate() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("stop")], json!("A2")));
    let listings = Listings::new(transport);

    let limits = WalkLimits::default().stop_when(|page| {
        page.items()
            .iter()
            .any(|item| item.as_post().is_some_and(|p| p.id == "stop"))
    });
    let walk = listings
        .fetch_all(&rust_new(), ListingOptions::default(), limits)
        .await
        .unwrap();

    assert_eq!(walk.status, WalkStatus::Stopped);
    assert_eq!(walk.requests, 2);
}

#[tokio::test]
async fn test_cancel_before_first_page() {
    let token = CancellationToken::new();
    token.cancel();
    let listings = Listings::new(ScriptedTransport::new());

    let err = listings
        .fetch_all(
            &rust_new(),
            ListingOptions::default(),
            WalkLimits::default().cancel_on(token),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(listings.transport().requests().is_empty());
}

#[tokio::test]
async fn test_cancel_mid_walk_keeps_in_flight_page() {
    let token = CancellationToken::new();
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!("A2")))
        .page(listing(vec![post("a3")], json!(null)))
        .cancel_when_serving(1, token.clone());
    let listings = Listings::new(transport);

    let err = listings
        .fetch_all(
            &rust_new(),
            ListingOptions::default(),
            WalkLimits::default().cancel_on(token),
        )
        .await
        .unwrap_err();

    let Error::WalkInterrupted(interrupted) = err else {
        panic!("expected an interrupted walk");
    };
    assert!(matches!(interrupted.cause, Interruption::Cancelled));
    assert_eq!(interrupted.page_index, 2);
    assert_eq!(ids(interrupted.partial.into_items()), vec!["a1", "a2"]);
    assert_eq!(listings.transport().requests().len(), 2);
}

// ============================================================================
// Walker and stream
// ============================================================================

#[tokio::test]
async fn test_walker_steps_pages() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .page(listing(vec![post("a2")], json!(null)));
    let listings = Listings::new(transport);
    let mut walker = listings.walker(&rust_new(), ListingOptions::default(), WalkLimits::default());

    assert_eq!(walker.state(), snoo_core::walk::WalkState::Idle);
    let first = walker.next_page().await.unwrap().unwrap();
    assert_eq!(first.after(), Some("A1"));
    assert_eq!(walker.state(), snoo_core::walk::WalkState::HavePage);
    assert_eq!(walker.options().after.as_deref(), Some("A1"));

    let second = walker.next_page().await.unwrap().unwrap();
    assert!(second.is_last());
    assert_eq!(
        walker.state(),
        snoo_core::walk::WalkState::Done(WalkStatus::Completed)
    );
    assert!(walker.next_page().await.unwrap().is_none());
    assert_eq!(walker.requests(), 2);
}

#[tokio::test]
async fn test_stream_yields_pages_then_error() {
    let transport = ScriptedTransport::new()
        .page(listing(vec![post("a1")], json!("A1")))
        .fail(server_error());
    let listings = Listings::new(transport);

    let stream = listings.stream(rust_new(), ListingOptions::default(), WalkLimits::default());
    futures_util::pin_mut!(stream);

    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first.len(), 1);
    assert!(stream.next().await.unwrap().is_err());
    assert!(stream.next().await.is_none());
}

// ============================================================================
// Threads
// ============================================================================

#[tokio::test]
async fn test_thread() {
    let transport = ScriptedTransport::new().page(json!([
        listing(vec![post("abc")], json!(null)),
        listing(
            vec![
                json!({"kind": "t1", "data": {"id": "c1", "name": "t1_c1", "parent_id": "t3_abc", "replies": ""}}),
                json!({"kind": "more", "data": {"id": "c2", "name": "t1_c2", "count": 12, "children": ["c2", "c3"]}}),
            ],
            json!(null)
        ),
    ]));
    let listings = Listings::new(transport);

    let thread = listings
        .thread(
            &SubredditName::new("rust").unwrap(),
            "t3_abc",
            &ListingOptions::default().limit(50),
        )
        .await
        .unwrap();

    assert_eq!(thread.post.id, "abc");
    assert_eq!(thread.comments.len(), 2);
    assert!(thread.comments.items()[1].as_more().is_some());

    let request = &listings.transport().requests()[0];
    assert_eq!(request.path, "/r/rust/comments/abc.json");
    assert_eq!(request.query.get("limit"), Some("50"));
}

#[tokio::test]
async fn test_thread_rejects_bad_article() {
    let listings = Listings::new(ScriptedTransport::new());

    let err = listings
        .thread(
            &SubredditName::new("rust").unwrap(),
            "../etc",
            &ListingOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(listings.transport().requests().is_empty());
}

#[tokio::test]
async fn test_shared_transport_concurrent_walks() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .page(listing(vec![post("x")], json!(null)))
            .page(listing(vec![post("y")], json!(null))),
    );
    let first = Listings::new(Arc::clone(&transport));
    let second = Listings::new(Arc::clone(&transport));

    let endpoint = rust_new();
    let (a, b) = tokio::join!(
        first.fetch_all(&endpoint, ListingOptions::default(), WalkLimits::default()),
        second.fetch_all(&endpoint, ListingOptions::default(), WalkLimits::default()),
    );

    assert_eq!(a.unwrap().item_count() + b.unwrap().item_count(), 2);
    assert_eq!(transport.requests().len(), 2);
}
