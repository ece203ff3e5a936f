use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use log::{debug, info};

use crate::config::AppConfig;
use crate::errors::UploadError;
use crate::models::response::UploadResult;
use crate::models::submission::Submission;
use crate::utils::read_upload_fields;

/// Acknowledges a submission. Nothing is validated or stored; the submission
/// is logged and dropped.
pub fn acknowledge(submission: Submission) -> UploadResult {
    info!(
        "Received submission {} at {} from {:?}: {} char description, {} image(s), {} bytes",
        submission.id,
        submission.formatted_received_at(),
        submission.email,
        submission.description.chars().count(),
        submission.images.len(),
        submission.total_bytes()
    );
    for (i, image) in submission.images.iter().enumerate() {
        debug!(
            "  image {}: {} ({}, {} bytes)",
            i + 1,
            image.display_name(),
            image.content_type.as_deref().unwrap_or("unknown type"),
            image.size()
        );
    }
    UploadResult::accepted()
}

#[post("/api/upload")]
pub async fn upload_handler(
    payload: Multipart,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, UploadError> {
    let fields = read_upload_fields(payload, config.max_payload_bytes).await?;

    let submission = Submission::new(
        fields.email.unwrap_or_default(),
        fields.description.unwrap_or_default(),
        fields.images,
    );

    Ok(HttpResponse::Ok().json(acknowledge(submission)))
}
