use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repo::RepoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Repo(err) => match err {
                RepoError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                RepoError::NotFound(_) => StatusCode::NOT_FOUND,
                RepoError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                RepoError::Unauthorized
                | RepoError::Upstream(_)
                | RepoError::Transport(_)
                | RepoError::Malformed(_) => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "analysis failed");
        } else {
            tracing::warn!(error = %self, "analysis rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
