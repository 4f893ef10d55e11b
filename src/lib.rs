pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod templates;
pub mod ui;
pub mod uploads;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config, uploads::UploadStore};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub uploads: UploadStore,
}

pub fn router(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());
    let body_limit = match state.config.max_upload_bytes {
        Some(bytes) => DefaultBodyLimit::max(bytes),
        None => DefaultBodyLimit::disable(),
    };

    let api = Router::new()
        .route("/health", get(routes::health))
        .route("/test-db", get(routes::test_db))
        .route("/movies", get(routes::list_movies).post(routes::create_movie))
        .route("/movies/{id}", put(routes::update_movie).delete(routes::delete_movie));

    Router::new()
        .route("/", get(ui::index))
        .route("/add", get(ui::add_form).post(ui::add))
        .route("/edit/{id}", get(ui::edit_form).post(ui::edit))
        .route("/delete/{id}", post(ui::delete))
        .nest("/api", api)
        .nest_service(uploads::UPLOADS_PREFIX, uploads)
        .with_state(state)
        .layer(body_limit)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
