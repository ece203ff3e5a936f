use actix_web::web::Bytes;

use crate::errors::UploadError;
use crate::form::SubmitTransport;
use crate::models::response::UploadResult;
use crate::models::submission::{ImageFile, Submission};

pub const BOUNDARY: &str = "----ghibli-test-boundary";

pub fn image(name: &str, bytes: &[u8]) -> ImageFile {
    ImageFile::new(
        Some(name.to_string()),
        Some("image/png".to_string()),
        Bytes::copy_from_slice(bytes),
    )
}

/// A transport whose network is always down.
pub struct FailingTransport;

impl SubmitTransport for FailingTransport {
    async fn send(&self, _submission: Submission) -> Result<UploadResult, UploadError> {
        Err(UploadError::SubmissionFailed("connection refused".to_string()))
    }
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Builds a `multipart/form-data` body and the matching content type.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: image/png\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (
        format!("multipart/form-data; boundary={}", BOUNDARY),
        body,
    )
}
