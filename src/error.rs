use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeviewError {
    /// Error text returned by the Kubernetes API, kept verbatim
    #[error("{0}")]
    KubernetesError(String),

    #[error("Failed to create Kubernetes client: {0}")]
    ClientInitFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<kube::Error> for KubeviewError {
    fn from(e: kube::Error) -> Self {
        match e {
            // Only the API's own message; the status object is noise for clients
            kube::Error::Api(response) => KubeviewError::KubernetesError(response.message),
            other => KubeviewError::KubernetesError(other.to_string()),
        }
    }
}

impl IntoResponse for KubeviewError {
    fn into_response(self) -> Response {
        let status = match &self {
            KubeviewError::KubernetesError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, KubeviewError>;
