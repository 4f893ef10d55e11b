//! Typed access to the JSON API, plus a small list cache that re-fetches
//! after every write.

use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{models::Movie, uploads::UploadedImage};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Values typed into the add/edit form.
#[derive(Clone, Debug, Default)]
pub struct MovieInput {
    pub name: String,
    pub kind: String,
    pub rating: String,
    pub image_url_link: String,
    pub image: Option<UploadedImage>,
}

impl MovieInput {
    fn into_form(self) -> Form {
        let form = Form::new()
            .text("name", self.name)
            .text("type", self.kind)
            .text("rating", self.rating)
            .text("imageUrlLink", self.image_url_link);
        match self.image {
            Some(image) => form.part("image", Part::bytes(image.bytes).file_name(image.file_name)),
            None => form,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MovieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MovieClient {
    /// `base_url` is the server origin, e.g. `http://localhost:5000`.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    pub async fn health(&self) -> ClientResult<Value> {
        read(self.http.get(self.url("/health")).send().await?).await
    }

    pub async fn list(&self) -> ClientResult<Vec<Movie>> {
        read(self.http.get(self.url("/movies")).send().await?).await
    }

    pub async fn create(&self, input: MovieInput) -> ClientResult<Movie> {
        let resp = self.http.post(self.url("/movies")).multipart(input.into_form()).send().await?;
        read(resp).await
    }

    /// Sends `prior.image_url` along so the server keeps it when no new image is given.
    pub async fn update(&self, prior: &Movie, input: MovieInput) -> ClientResult<Option<Movie>> {
        let form = input
            .into_form()
            .text("currentImageUrl", prior.image_url.clone().unwrap_or_default());
        let resp =
            self.http.put(self.url(&format!("/movies/{}", prior.id))).multipart(form).send().await?;
        read(resp).await
    }

    pub async fn delete(&self, id: i32) -> ClientResult<String> {
        let body: Value =
            read(self.http.delete(self.url(&format!("/movies/{id}"))).send().await?).await?;
        Ok(body["message"].as_str().unwrap_or_default().to_string())
    }
}

async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let message = resp
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body["error"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    tracing::warn!(%status, %message, "api request failed");
    Err(ClientError::Api { status, message })
}

/// Local copy of the catalog. Every write is followed by a full re-fetch.
#[derive(Debug)]
pub struct Shelf {
    client: MovieClient,
    movies: Vec<Movie>,
}

impl Shelf {
    pub fn new(client: MovieClient) -> Self {
        Self { client, movies: Vec::new() }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.movies = self.client.list().await?;
        Ok(())
    }

    pub async fn add(&mut self, input: MovieInput) -> ClientResult<()> {
        self.client.create(input).await?;
        self.refresh().await
    }

    pub async fn edit(&mut self, prior: &Movie, input: MovieInput) -> ClientResult<()> {
        self.client.update(prior, input).await?;
        self.refresh().await
    }

    /// Nothing is sent unless `confirm` approves the deletion.
    pub async fn remove(&mut self, id: i32, confirm: impl FnOnce() -> bool) -> ClientResult<bool> {
        if !confirm() {
            return Ok(false);
        }
        self.client.delete(id).await?;
        self.refresh().await?;
        Ok(true)
    }
}
