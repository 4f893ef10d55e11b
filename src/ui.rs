use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::AppError,
    models::{Movie, MovieForm},
    routes, templates,
};

/// The one screen shown at a time.
#[derive(Debug)]
pub enum View {
    Listing { movies: Vec<Movie>, alert: Option<String> },
    Adding { form: FormValues, alert: Option<String> },
    Editing { movie: Movie, form: FormValues, alert: Option<String> },
}

/// Text inputs of the add/edit form, echoed back when a submission fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub kind: String,
    pub rating: String,
    pub image_url_link: String,
}

impl From<&Movie> for FormValues {
    fn from(movie: &Movie) -> Self {
        Self {
            name: movie.name.clone(),
            kind: movie.kind.clone().unwrap_or_default(),
            rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
            image_url_link: movie.image_url.clone().unwrap_or_default(),
        }
    }
}

impl From<&MovieForm> for FormValues {
    fn from(form: &MovieForm) -> Self {
        Self {
            name: form.name.clone().unwrap_or_default(),
            kind: form.kind.clone().unwrap_or_default(),
            rating: form.rating.clone().unwrap_or_default(),
            image_url_link: form.image_url_link.clone().unwrap_or_default(),
        }
    }
}

fn show(state: &AppState, status: StatusCode, view: View) -> Response {
    (status, Html(templates::render(&view, &state.config.public_base_url))).into_response()
}

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match state.catalog.list().await {
        Ok(movies) => {
            let movies = movies.into_iter().map(Movie::from).collect();
            show(&state, StatusCode::OK, View::Listing { movies, alert: None })
        },
        Err(err) => {
            let err = AppError::internal("Failed to fetch movies")(err);
            err.report();
            (err.status(), Html(templates::error_page(&err.to_string()))).into_response()
        },
    }
}

pub async fn add_form(State(state): State<Arc<AppState>>) -> Response {
    show(&state, StatusCode::OK, View::Adding { form: FormValues::default(), alert: None })
}

pub async fn add(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let form = match MovieForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => {
            let view = View::Adding { form: FormValues::default(), alert: Some(err.to_string()) };
            return show(&state, err.status(), view);
        },
    };
    let values = FormValues::from(&form);

    match routes::create(&state, form).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            err.report();
            show(&state, err.status(), View::Adding { form: values, alert: Some(err.to_string()) })
        },
    }
}

pub async fn edit_form(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match state.catalog.find(id).await {
        Ok(Some(movie)) => {
            let movie = Movie::from(movie);
            let form = FormValues::from(&movie);
            show(&state, StatusCode::OK, View::Editing { movie, form, alert: None })
        },
        Ok(None) => Redirect::to("/").into_response(),
        Err(err) => {
            let err = AppError::internal("Failed to fetch movie")(err);
            err.report();
            (err.status(), Html(templates::error_page(&err.to_string()))).into_response()
        },
    }
}

pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Response {
    let form = match MovieForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(err) => {
            return (err.status(), Html(templates::error_page(&err.to_string()))).into_response();
        },
    };
    let values = FormValues::from(&form);
    // Enough of the row to re-render the form if the write fails.
    let movie = Movie {
        id,
        name: values.name.clone(),
        kind: form.kind.clone().filter(|k| !k.is_empty()),
        rating: values.rating.trim().parse().ok(),
        image_url: form.current_image_url.clone().filter(|u| !u.is_empty()),
    };

    match routes::update(&state, id, form).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            err.report();
            show(&state, err.status(), View::Editing { movie, form: values, alert: Some(err.to_string()) })
        },
    }
}

pub async fn delete(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> Response {
    match routes::delete(&state, id).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => {
            err.report();
            match state.catalog.list().await {
                Ok(movies) => {
                    let movies = movies.into_iter().map(Movie::from).collect();
                    show(&state, err.status(), View::Listing { movies, alert: Some(err.to_string()) })
                },
                Err(list_err) => {
                    AppError::internal("Failed to fetch movies")(list_err).report();
                    (err.status(), Html(templates::error_page(&err.to_string()))).into_response()
                },
            }
        },
    }
}
