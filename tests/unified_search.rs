//! End-to-end tests for the unified search flow.
//!
//! Exercise the axum router with canned source adapters and a throwaway
//! SQLite database, so no network or browser is involved.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use smartbazaar::models::ScrapedProduct;
use smartbazaar::repository::{
    AsyncSqlitePool, DieselProductRepository, ProductRecord, StoreRecord,
};
use smartbazaar::scrapers::{ScrapeAggregator, SourceAdapter, SourceOutcome};
use smartbazaar::server::{create_router, AppState};

/// Adapter returning a fixed item list after an optional delay, counting
/// how often it gets invoked.
struct CannedSource {
    name: &'static str,
    items: Vec<ScrapedProduct>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl CannedSource {
    fn new(name: &'static str, item_names: &[&str], delay_ms: u64) -> Self {
        let items = item_names
            .iter()
            .map(|n| ScrapedProduct {
                name: n.to_string(),
                price: "Rs 100".to_string(),
                link: format!("https://example.com/{}", n),
                image: String::new(),
                source: name.to_string(),
            })
            .collect();
        Self {
            name,
            items,
            delay: Duration::from_millis(delay_ms),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SourceAdapter for CannedSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn search(&self, _keyword: &str) -> SourceOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        SourceOutcome::from_items(self.items.clone())
    }
}

async fn setup_repo() -> (DieselProductRepository, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test.db");
    let repo = DieselProductRepository::new(AsyncSqlitePool::new(&db_path.display().to_string()));
    repo.init_schema().await.unwrap();
    (repo, dir)
}

fn make_app(adapters: Vec<Arc<dyn SourceAdapter>>, repo: DieselProductRepository) -> axum::Router {
    let state = AppState {
        aggregator: Arc::new(ScrapeAggregator::new(adapters)),
        product_repo: Arc::new(repo),
    };
    create_router(state)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn milk_end_to_end_merges_and_orders_both_branches() {
    let (repo, _dir) = setup_repo().await;

    repo.save_store(&StoreRecord::new(1, "Corner Mart", "12 Canal Rd", "0300-1234567"))
        .await
        .unwrap();
    repo.save_product(
        &ProductRecord::new(1, 1, "Fresh Milk 1L", 240.0).with_category("dairy"),
    )
    .await
    .unwrap();

    // The HTTP-strategy stand-in is the slow one; its two items must still
    // lead the scraped list because it registered first.
    let app = make_app(
        vec![
            Arc::new(CannedSource::new("Naheed", &["n1", "n2"], 200)),
            Arc::new(CannedSource::new("Daraz", &["d1", "d2", "d3"], 0)),
        ],
        repo,
    );

    let (status, body) = get_json(&app, "/api/search?q=milk").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["query"], "milk");
    assert_eq!(body["scraped"].as_array().unwrap().len(), 5);
    assert_eq!(body["database"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalResults"], 6);

    let sources: Vec<&str> = body["scraped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["source"].as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["Naheed", "Naheed", "Daraz", "Daraz", "Daraz"]);

    assert_eq!(body["database"][0]["name"], "Fresh Milk 1L");
    assert_eq!(body["database"][0]["source"], "database");
    assert_eq!(body["database"][0]["store"], "Corner Mart");
}

#[tokio::test]
async fn empty_query_is_rejected_before_any_work() {
    let (repo, _dir) = setup_repo().await;

    let naheed = CannedSource::new("Naheed", &["n1"], 0);
    let daraz = CannedSource::new("Daraz", &["d1"], 0);
    let naheed_calls = naheed.call_counter();
    let daraz_calls = daraz.call_counter();

    let app = make_app(vec![Arc::new(naheed), Arc::new(daraz)], repo);

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20%20"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    // Fail-fast means the adapters were never invoked.
    assert_eq!(naheed_calls.load(Ordering::SeqCst), 0);
    assert_eq!(daraz_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn repeated_searches_are_idempotent() {
    let (repo, _dir) = setup_repo().await;

    repo.save_store(&StoreRecord::new(1, "Corner Mart", "12 Canal Rd", "0300-1234567"))
        .await
        .unwrap();
    repo.save_product(&ProductRecord::new(1, 1, "Milk Rusk", 150.0))
        .await
        .unwrap();

    let app = make_app(
        vec![
            Arc::new(CannedSource::new("Naheed", &["n1"], 40)),
            Arc::new(CannedSource::new("Daraz", &["d1", "d2"], 0)),
        ],
        repo,
    );

    let (status_a, first) = get_json(&app, "/api/search?q=milk").await;
    let (status_b, second) = get_json(&app, "/api/search?q=milk").await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn zero_results_is_a_success_envelope() {
    let (repo, _dir) = setup_repo().await;

    let app = make_app(vec![Arc::new(CannedSource::new("Naheed", &[], 0))], repo);

    let (status, body) = get_json(&app, "/api/search?q=nothing-matches-this").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scraped"].as_array().unwrap().len(), 0);
    assert_eq!(body["database"].as_array().unwrap().len(), 0);
    assert_eq!(body["totalResults"], 0);
}

#[tokio::test]
async fn database_failure_is_a_server_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory path is not a valid SQLite database.
    let repo =
        DieselProductRepository::new(AsyncSqlitePool::new(&dir.path().display().to_string()));

    let app = make_app(vec![Arc::new(CannedSource::new("Naheed", &["n1"], 0))], repo);

    let (status, body) = get_json(&app, "/api/search?q=milk").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn scrape_only_endpoint_skips_the_database() {
    let (repo, _dir) = setup_repo().await;

    repo.save_store(&StoreRecord::new(1, "Corner Mart", "12 Canal Rd", "0300-1234567"))
        .await
        .unwrap();
    repo.save_product(&ProductRecord::new(1, 1, "Fresh Milk 1L", 240.0))
        .await
        .unwrap();

    let app = make_app(
        vec![Arc::new(CannedSource::new("Naheed", &["n1", "n2"], 0))],
        repo,
    );

    let (status, body) = get_json(&app, "/api/scraper/search?q=milk").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["source"] == "Naheed"));
}

#[tokio::test]
async fn sources_endpoint_lists_registration_order() {
    let (repo, _dir) = setup_repo().await;

    let app = make_app(
        vec![
            Arc::new(CannedSource::new("Naheed", &[], 0)),
            Arc::new(CannedSource::new("Daraz", &[], 0)),
        ],
        repo,
    );

    let (status, body) = get_json(&app, "/api/scraper/sources").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], serde_json::json!(["Naheed", "Daraz"]));
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (repo, _dir) = setup_repo().await;
    let app = make_app(vec![], repo);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
