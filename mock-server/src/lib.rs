//! In-memory implementation of the cats HTTP contract.
//!
//! Used by the client's integration tests and runnable standalone. Cats are
//! kept in insertion order so list responses are stable. Failures carry a
//! `{"message": ..}` body.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Deserialize)]
pub struct NewCat {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

/// Full replacement payload. A body `id` is ignored in favour of the path.
#[derive(Deserialize)]
pub struct UpdateCat {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    pub group: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

pub type Db = Arc<RwLock<Vec<Cat>>>;

type ApiError = (StatusCode, Json<ErrorBody>);

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not found".to_string(),
        }),
    )
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose store starts out holding `cats`.
pub fn app_with(cats: Vec<Cat>) -> Router {
    let db: Db = Arc::new(RwLock::new(cats));
    Router::new()
        .route("/cats", get(list_cats).post(create_cat))
        .route("/cats/{id}", get(get_cat).put(update_cat).delete(delete_cat))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Without query parameters this lists every cat; `name`/`group` narrow it.
async fn list_cats(State(db): State<Db>, Query(params): Query<SearchParams>) -> Json<Vec<Cat>> {
    let cats = db.read().await;
    Json(cats.iter().filter(|c| params.matches(c)).cloned().collect())
}

async fn create_cat(State(db): State<Db>, Json(input): Json<NewCat>) -> (StatusCode, Json<Cat>) {
    let cat = Cat {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        group: input.group,
    };
    tracing::debug!(id = %cat.id, "created cat");
    db.write().await.push(cat.clone());
    (StatusCode::CREATED, Json(cat))
}

async fn get_cat(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Cat>, ApiError> {
    let cats = db.read().await;
    cats.iter().find(|c| c.id == id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_cat(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateCat>,
) -> Result<Json<Cat>, ApiError> {
    let mut cats = db.write().await;
    let cat = cats.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;
    cat.name = input.name;
    cat.description = input.description;
    cat.group = input.group;
    Ok(Json(cat.clone()))
}

async fn delete_cat(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let mut cats = db.write().await;
    let index = cats.iter().position(|c| c.id == id).ok_or_else(not_found)?;
    cats.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

impl SearchParams {
    /// Every non-empty filter must match the whole field, ignoring case.
    pub fn matches(&self, cat: &Cat) -> bool {
        filter_matches(self.name.as_deref(), Some(&cat.name))
            && filter_matches(self.group.as_deref(), cat.group.as_ref())
    }
}

fn filter_matches(filter: Option<&str>, value: Option<&String>) -> bool {
    match filter.filter(|f| !f.is_empty()) {
        None => true,
        Some(filter) => value.is_some_and(|v| v.eq_ignore_ascii_case(filter)),
    }
}
