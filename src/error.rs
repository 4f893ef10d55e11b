use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures a request can end in. Validation problems are reported back verbatim;
/// infrastructure failures are logged and answered with a fixed message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    /// The multipart body itself could not be read (malformed, too large, ...).
    #[error("{}", .0.body_text())]
    Multipart(#[from] MultipartError),
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a mapper for `map_err` that tags any error with the public `message`.
    pub fn internal<E>(message: &'static str) -> impl FnOnce(E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        move |err| Self::Internal { message, source: err.into() }
    }

    /// Logs infrastructure failures with their cause. Validation errors are not logged.
    pub fn report(&self) {
        if let AppError::Internal { message, source } = self {
            tracing::error!(error = ?source, "{message}");
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(err) => err.status(),
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report();
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_hides_source_message() {
        let err = AppError::internal("Failed to fetch movies")(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "Failed to fetch movies");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::validation("Movie name is required");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Movie name is required");
    }
}
