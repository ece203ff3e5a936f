use actix_web::http::StatusCode;
use actix_web::{error::ResponseError, HttpResponse};
use derive_more::Display;
use log::error;
use serde::Serialize;

#[derive(Debug, Display)]
pub enum UploadError {
    #[display("Validation error: {_0}")]
    ValidationError(String),
    #[display("File processing error: {_0}")]
    FileProcessingError(String),
    #[display("Payload too large: {_0}")]
    PayloadTooLarge(String),
    #[display("Submission failed: {_0}")]
    SubmissionFailed(String),
    #[display("Configuration error: {_0}")]
    ConfigError(String),
    #[display("Internal error: {_0}")]
    InternalError(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl std::error::Error for UploadError {}

impl UploadError {
    fn code(&self) -> &'static str {
        match self {
            UploadError::ValidationError(_) => "VALIDATION_ERROR",
            UploadError::FileProcessingError(_) => "FILE_PROCESSING_ERROR",
            UploadError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            UploadError::SubmissionFailed(_) => "SUBMISSION_FAILED",
            UploadError::ConfigError(_) => "CONFIG_ERROR",
            UploadError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    fn message(&self) -> &str {
        match self {
            UploadError::ValidationError(msg)
            | UploadError::FileProcessingError(msg)
            | UploadError::PayloadTooLarge(msg)
            | UploadError::SubmissionFailed(msg)
            | UploadError::ConfigError(msg)
            | UploadError::InternalError(msg) => msg,
        }
    }
}

impl ResponseError for UploadError {
    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!("{}", self);
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.message().to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::ValidationError(_) => StatusCode::BAD_REQUEST,
            UploadError::FileProcessingError(_) => StatusCode::BAD_REQUEST,
            UploadError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            UploadError::SubmissionFailed(_) => StatusCode::BAD_GATEWAY,
            UploadError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UploadError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<askama::Error> for UploadError {
    fn from(err: askama::Error) -> Self {
        UploadError::InternalError(format!("Template error: {}", err))
    }
}
