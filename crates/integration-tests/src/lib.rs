//! End-to-end test harness for smartcart.
//!
//! Provides an in-process mock of the two backend endpoints
//! (`/predict_price` and `/complete_purchase`) with scriptable behavior and
//! request recording, plus helpers for building a client configuration
//! pointed at it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use smartcart_client::config::ClientConfig;

/// Scripted behavior of the prediction endpoint.
#[derive(Debug, Clone)]
pub enum PredictBehavior {
    /// 200 with a well-formed prediction body.
    Success {
        optimized_price: f64,
        conversion_probability: f64,
        customer_segment: String,
    },
    /// 200 whose body carries an explicit error field.
    EmbeddedError(String),
    /// Non-success status with a JSON error body.
    HttpError { status: u16, error: String },
    /// Non-success status with an unparsable body.
    HttpErrorMalformedBody { status: u16 },
}

/// Scripted behavior of the purchase endpoint.
#[derive(Debug, Clone)]
pub enum PurchaseBehavior {
    /// 200 with a recorded-purchase receipt.
    Success,
    /// Non-success status with a JSON error body.
    Failure { status: u16, error: String },
}

/// Shared state of the mock backend: scripts plus recorded traffic.
pub struct BackendState {
    predict: Mutex<PredictBehavior>,
    purchase: Mutex<PurchaseBehavior>,
    predict_hits: AtomicUsize,
    purchase_hits: AtomicUsize,
    predict_bodies: Mutex<Vec<Value>>,
    purchase_bodies: Mutex<Vec<Value>>,
}

impl BackendState {
    fn new() -> Self {
        Self {
            predict: Mutex::new(PredictBehavior::Success {
                optimized_price: 1349.1,
                conversion_probability: 0.8234,
                customer_segment: "High-Value Shopper".to_string(),
            }),
            purchase: Mutex::new(PurchaseBehavior::Success),
            predict_hits: AtomicUsize::new(0),
            purchase_hits: AtomicUsize::new(0),
            predict_bodies: Mutex::new(Vec::new()),
            purchase_bodies: Mutex::new(Vec::new()),
        }
    }
}

/// Handle to a running mock backend.
pub struct MockBackend {
    /// Base URL the client configuration should point at.
    pub base_url: String,
    state: Arc<BackendState>,
}

impl MockBackend {
    /// Bind an ephemeral port and serve the two endpoints.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound; tests have no recovery path.
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState::new());
        let app = Router::new()
            .route("/predict_price", post(predict_price))
            .route("/complete_purchase", post(complete_purchase))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Script the prediction endpoint's next responses.
    pub fn script_predict(&self, behavior: PredictBehavior) {
        *lock(&self.state.predict) = behavior;
    }

    /// Script the purchase endpoint's next responses.
    pub fn script_purchase(&self, behavior: PurchaseBehavior) {
        *lock(&self.state.purchase) = behavior;
    }

    /// How many prediction requests arrived.
    #[must_use]
    pub fn predict_hits(&self) -> usize {
        self.state.predict_hits.load(Ordering::SeqCst)
    }

    /// How many purchase requests arrived.
    #[must_use]
    pub fn purchase_hits(&self) -> usize {
        self.state.purchase_hits.load(Ordering::SeqCst)
    }

    /// Recorded prediction request bodies, in order.
    #[must_use]
    pub fn predict_bodies(&self) -> Vec<Value> {
        lock(&self.state.predict_bodies).clone()
    }

    /// Recorded purchase request bodies, in order.
    #[must_use]
    pub fn purchase_bodies(&self) -> Vec<Value> {
        lock(&self.state.purchase_bodies).clone()
    }
}

/// Build a client configuration pointed at the mock backend.
#[must_use]
pub fn client_config(backend: &MockBackend, authenticated: bool, storage_path: PathBuf) -> ClientConfig {
    let api_base_url =
        url::Url::parse(&backend.base_url).expect("mock backend base URL is valid");
    ClientConfig {
        predict_api_url: format!("{}/predict_price", backend.base_url),
        api_base_url,
        cart_url: "/cart".to_string(),
        login_url: "/login".to_string(),
        home_url: Some("/home".to_string()),
        authenticated,
        storage_path,
    }
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn predict_price(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Response {
    state.predict_hits.fetch_add(1, Ordering::SeqCst);
    lock(&state.predict_bodies).push(body);

    let behavior = lock(&state.predict).clone();
    match behavior {
        PredictBehavior::Success {
            optimized_price,
            conversion_probability,
            customer_segment,
        } => Json(json!({
            "optimized_price": optimized_price,
            "predicted_conversion_probability": conversion_probability,
            "customer_segment": customer_segment,
            "notes": "Price is dynamically adjusted based on predicted conversion and customer segment and rules.",
        }))
        .into_response(),
        PredictBehavior::EmbeddedError(error) => {
            Json(json!({ "error": error })).into_response()
        }
        PredictBehavior::HttpError { status, error } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "error": error })),
        )
            .into_response(),
        PredictBehavior::HttpErrorMalformedBody { status } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            "not json",
        )
            .into_response(),
    }
}

async fn complete_purchase(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Value>,
) -> Response {
    state.purchase_hits.fetch_add(1, Ordering::SeqCst);
    let item_count = body
        .get("cart_items")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    lock(&state.purchase_bodies).push(body);

    let behavior = lock(&state.purchase).clone();
    match behavior {
        PurchaseBehavior::Success => Json(json!({
            "message": "Purchase recorded successfully!",
            "total_items_purchased": item_count,
        }))
        .into_response(),
        PurchaseBehavior::Failure { status, error } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "error": error })),
        )
            .into_response(),
    }
}
