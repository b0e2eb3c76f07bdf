//! In-process stand-in for the Kroger token and product endpoints.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};

use grocer::config::ApiConfig;

pub const CLIENT_ID: &str = "test-id";
pub const CLIENT_SECRET: &str = "test-secret";
/// base64("test-id:test-secret")
pub const EXPECTED_BASIC: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub params: HashMap<String, String>,
}

pub struct FakeKroger {
    pub token_status: StatusCode,
    pub token_body: String,
    /// Per search term: status and JSON body. Unknown terms get `{"data": []}`.
    pub products: HashMap<String, (StatusCode, Value)>,
    pub token_requests: Mutex<Vec<RecordedRequest>>,
    pub search_requests: Mutex<Vec<RecordedRequest>>,
    search_calls: AtomicUsize,
}

impl FakeKroger {
    pub fn new() -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: json!({"access_token": " fake-token \n", "token_type": "bearer", "expires_in": 1800}).to_string(),
            products: HashMap::new(),
            token_requests: Mutex::new(Vec::new()),
            search_requests: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting_token(status: StatusCode, body: &str) -> Self {
        Self {
            token_status: status,
            token_body: body.to_string(),
            ..Self::new()
        }
    }

    pub fn with_products(mut self, term: &str, data: Value) -> Self {
        self.products.insert(term.to_string(), (StatusCode::OK, json!({ "data": data })));
        self
    }

    pub fn with_search_status(mut self, term: &str, status: StatusCode) -> Self {
        self.products.insert(term.to_string(), (status, json!({"errors": {"reason": "boom"}})));
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn token_handler(
    State(fake): State<Arc<FakeKroger>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    fake.token_requests.lock().unwrap().push(RecordedRequest {
        authorization: authorization(&headers),
        params: form,
    });
    (fake.token_status, [(header::CONTENT_TYPE, "application/json")], fake.token_body.clone())
}

async fn products_handler(
    State(fake): State<Arc<FakeKroger>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    fake.search_calls.fetch_add(1, Ordering::SeqCst);
    let term = params.get("filter.term").cloned().unwrap_or_default();
    fake.search_requests.lock().unwrap().push(RecordedRequest {
        authorization: authorization(&headers),
        params,
    });
    let (status, body) = fake
        .products
        .get(&term)
        .cloned()
        .unwrap_or((StatusCode::OK, json!({"data": []})));
    (status, Json(body))
}

/// Serve `fake` on an ephemeral port and return the API base URL.
pub async fn spawn(fake: Arc<FakeKroger>) -> String {
    let app = Router::new()
        .route("/v1/connect/oauth2/token", post(token_handler))
        .route("/v1/products", get(products_handler))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

pub fn test_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        token_scope: Some("product.compact".to_string()),
        location_id: "09700491".to_string(),
        search_limit: 20,
        fulfillment: Some("csp".to_string()),
        chain: Some("HART".to_string()),
        preferred_brand: "harris teeter".to_string(),
        timeout: Duration::from_secs(5),
    }
}

pub fn milk_products() -> Value {
    json!([
        {
            "productId": "kroger-2",
            "description": "2% milk store brand",
            "brand": "Kroger",
            "items": [{"price": {"regular": 2.99, "promo": 0}}]
        },
        {
            "productId": "ov-2",
            "description": "Organic Valley 2% milk",
            "brand": "Organic Valley",
            "items": [{"price": {"regular": 4.49, "promo": 0}}]
        }
    ])
}

pub fn bread_products() -> Value {
    json!([
        {
            "productId": "ht-bread",
            "description": "Harris Teeter Whole Grain Bread",
            "brand": "Harris Teeter",
            "items": [{"price": {"regular": 3.29}}]
        },
        {
            "productId": "wonder",
            "description": "Wonder Classic White Bread",
            "brand": "Wonder",
            "items": [{"price": {"regular": 2.79}}]
        }
    ])
}
