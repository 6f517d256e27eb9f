use crate::models::DeviceId;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    DeviceNotFound(DeviceId),
    Internal(anyhow::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::DeviceNotFound(id) => write!(f, "Device not found with ID: {id}"),
            ApiError::Internal(_) => {
                write!(f, "An internal error occurred. Please try again later.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = match &self {
            ApiError::DeviceNotFound(_) => {
                tracing::debug!("{}", message);
                StatusCode::NOT_FOUND
            }
            ApiError::Internal(err) => {
                tracing::error!("{:?}", err);
                err.chain()
                    .skip(1)
                    .for_each(|cause| tracing::error!("Because: {}", cause));
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, message).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        Self::Internal(value.into())
    }
}
