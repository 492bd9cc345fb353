use actix_web::{
    HttpResponse, ResponseError, error::UrlGenerationError, http::StatusCode,
    http::header::ContentType,
};
use derive_more::Display;
use serde_json::json;
use tracing::error;

#[derive(Debug, Display)]
pub enum ApiError {
    /// No employee stored under this id.
    #[display(fmt = "Could not find employee {}", _0)]
    NotFound(i64),

    #[display(fmt = "Database error: {}", _0)]
    Database(sqlx::Error),

    #[display(fmt = "Link generation failed: {}", _0)]
    Links(UrlGenerationError),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl From<UrlGenerationError> for ApiError {
    fn from(e: UrlGenerationError) -> Self {
        ApiError::Links(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Links(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Plain message body, no JSON envelope.
            ApiError::NotFound(_) => HttpResponse::NotFound()
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            ApiError::Database(e) => {
                error!(error = %e, "Employee store failure");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Something went wrong, Contact with system admin"
                }))
            }
            ApiError::Links(e) => {
                error!(error = %e, "Failed to build employee links");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Something went wrong, Contact with system admin"
                }))
            }
        }
    }
}
