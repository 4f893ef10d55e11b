use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{Movie, MovieForm, WriteMode},
};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Backend is working!" }))
}

pub async fn test_db(State(state): State<Arc<AppState>>) -> Response {
    match state.catalog.ping().await {
        Ok(rows) => Json(json!({ "success": true, "rows": rows })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "database check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Database connection failed" })),
            )
                .into_response()
        },
    }
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.catalog.list().await.map_err(AppError::internal("Failed to fetch movies"))?;
    Ok(Json(movies.into_iter().map(Movie::from).collect()))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = create(&state, MovieForm::from_multipart(multipart).await?).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Ids are taken as raw path text; one that is not a valid `i32` names no row.
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

/// Answers `null` when the id does not exist.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Option<Movie>>> {
    let form = MovieForm::from_multipart(multipart).await?;
    let Some(id) = parse_id(&raw_id) else {
        form.validate(WriteMode::Update)?;
        return Ok(Json(None));
    };
    Ok(Json(update(&state, id, form).await?))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Value>> {
    if let Some(id) = parse_id(&raw_id) {
        delete(&state, id).await?;
    }
    Ok(Json(json!({ "message": "Movie deleted successfully" })))
}

// The operations below are shared by the JSON API and the HTML forms.

pub(crate) async fn create(state: &AppState, form: MovieForm) -> AppResult<Movie> {
    const FAILED: &str = "Failed to add movie";

    let draft = form.validate(WriteMode::Create)?;
    let fields = draft.into_fields(&state.uploads).await.map_err(AppError::internal(FAILED))?;
    let created = state.catalog.insert(fields).await.map_err(AppError::internal(FAILED))?;

    tracing::info!(id = created.id, name = %created.name, "movie created");
    Ok(created.into())
}

pub(crate) async fn update(state: &AppState, id: i32, form: MovieForm) -> AppResult<Option<Movie>> {
    const FAILED: &str = "Failed to update movie";

    let draft = form.validate(WriteMode::Update)?;
    let fields = draft.into_fields(&state.uploads).await.map_err(AppError::internal(FAILED))?;
    let updated = state.catalog.update(id, fields).await.map_err(AppError::internal(FAILED))?;

    tracing::info!(id, found = updated.is_some(), "movie updated");
    Ok(updated.map(Movie::from))
}

pub(crate) async fn delete(state: &AppState, id: i32) -> AppResult<()> {
    let removed =
        state.catalog.delete(id).await.map_err(AppError::internal("Failed to delete movie"))?;
    tracing::info!(id, removed, "movie deleted");
    Ok(())
}
