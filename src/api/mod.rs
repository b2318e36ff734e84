//! HTTP surface: a JSON API mirroring the app's pages, one handler
//! module per resource.

mod care;
mod groups;
mod history;
mod plants;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;

pub fn create_router(db: Database) -> Router {
    Router::new()
        .route("/api/overview", get(care::overview))
        .route("/api/warnings", get(care::list_warnings))
        .route("/api/plants", get(plants::list).post(plants::create))
        .route(
            "/api/plants/{id}",
            get(plants::detail).put(plants::update).delete(plants::remove),
        )
        .route("/api/plants/{id}/death", post(plants::mark_dead))
        .route("/api/groups", get(groups::list).post(groups::create))
        .route(
            "/api/groups/{id}",
            get(groups::detail).put(groups::update).delete(groups::remove),
        )
        .route("/api/groups/{id}/plants", get(groups::plants))
        .route("/api/graveyard", get(plants::graveyard))
        .route("/api/history", get(history::list))
        .route(
            "/api/history/{id}",
            put(history::update).delete(history::remove),
        )
        .route("/api/tasks/perform", post(history::perform_tasks))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            Self::Invalid(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Self::Internal(err) => {
                tracing::error!("request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageSortQuery {
    pub sort: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SortQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryQuery {
    pub filter: Option<String>,
    pub time: Option<String>,
    pub page: Option<u32>,
}
