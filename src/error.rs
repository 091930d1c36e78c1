use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    ClusterUnavailable(String),
    #[error("template error: {0}")]
    Render(#[from] askama::Error),
    #[error("config error: {0}")]
    Config(String),
}

impl From<kube::Error> for AppError {
    fn from(err: kube::Error) -> Self {
        AppError::ClusterUnavailable(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = match self {
            AppError::ClusterUnavailable(_) => "Cluster Unavailable",
            AppError::Render(_) | AppError::Config(_) => "Internal Server Error",
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
