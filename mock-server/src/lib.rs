use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    #[serde(flatten)]
    pub fields: AddressFields,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub object: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddressFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressList {
    pub data: Vec<Address>,
    pub object: String,
    pub next_url: Option<String>,
    pub previous_url: Option<String>,
    pub count: usize,
    pub total_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
    pub deleted: bool,
}

#[derive(Deserialize)]
pub struct Paging {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    10
}

/// Addresses keyed by id; ordered so list pages are stable.
pub type Db = Arc<RwLock<BTreeMap<String, Address>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    let api = Router::new()
        .route("/addresses", get(list_addresses).post(create_address))
        .route("/addresses/", get(list_addresses))
        .route("/addresses/{id}", get(get_address).delete(delete_address))
        .layer(middleware::from_fn(require_api_key))
        .with_state(db);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Lob's error envelope.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "error": { "message": message, "status_code": status.as_u16() }
    });
    (status, Json(body)).into_response()
}

/// Accept any `Basic` credential with a non-empty username.
async fn require_api_key(request: Request, next: Next) -> Response {
    let username = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .and_then(|credential| credential.split(':').next().map(str::to_string))
        .filter(|user| !user.is_empty());

    if username.is_none() {
        tracing::debug!(uri = %request.uri(), "rejecting unauthenticated request");
        return api_error(StatusCode::UNAUTHORIZED, "Missing authentication");
    }
    next.run(request).await
}

async fn list_addresses(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<AddressList> {
    let addresses = db.read().await;
    let total = addresses.len();
    let data: Vec<Address> = addresses
        .values()
        .skip(paging.offset)
        .take(paging.limit)
        .cloned()
        .collect();

    let next_offset = paging.offset + data.len();
    let next_url = (next_offset < total).then(|| {
        format!("/v1/addresses?limit={}&offset={next_offset}", paging.limit)
    });
    let previous_url = (paging.offset > 0).then(|| {
        let previous = paging.offset.saturating_sub(paging.limit);
        format!("/v1/addresses?limit={}&offset={previous}", paging.limit)
    });

    Json(AddressList {
        count: data.len(),
        data,
        object: "list".to_string(),
        next_url,
        previous_url,
        total_count: total,
    })
}

async fn create_address(State(db): State<Db>, Json(fields): Json<AddressFields>) -> Response {
    if fields.address_line1.as_deref().unwrap_or("").is_empty() {
        return api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "address_line1 is required",
        );
    }

    let now = Utc::now();
    let address = Address {
        id: new_address_id(),
        fields,
        date_created: now,
        date_modified: now,
        object: "address".to_string(),
    };
    db.write().await.insert(address.id.clone(), address.clone());
    tracing::debug!(id = %address.id, "created address");
    Json(address).into_response()
}

async fn get_address(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let addresses = db.read().await;
    match addresses.get(&id) {
        Some(address) => Json(address.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "address not found"),
    }
}

async fn delete_address(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut addresses = db.write().await;
    match addresses.remove(&id) {
        Some(_) => Json(Deleted { id, deleted: true }).into_response(),
        None => api_error(StatusCode::NOT_FOUND, "address not found"),
    }
}

fn new_address_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("adr_{}", &hex[..16])
}
