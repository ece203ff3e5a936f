use actix_multipart::{Field, Multipart};
use actix_web::web::{Bytes, BytesMut};
use futures::{StreamExt, TryStreamExt};
use log::debug;

use crate::errors::UploadError;
use crate::models::submission::ImageFile;

/// The raw fields of an upload form, before anything decides what they mean.
#[derive(Debug, Default)]
pub struct UploadFields {
    pub email: Option<String>,
    pub description: Option<String>,
    pub images: Vec<ImageFile>,
}

/// Counts every byte read out of a multipart body against a single limit.
struct ByteBudget {
    limit: usize,
    used: usize,
}

impl ByteBudget {
    fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    fn charge(&mut self, len: usize) -> Result<(), UploadError> {
        self.used += len;
        if self.used > self.limit {
            return Err(UploadError::PayloadTooLarge(format!(
                "Upload exceeds the {} byte limit",
                self.limit
            )));
        }
        Ok(())
    }
}

// Helper to read text fields from multipart
async fn read_field(field: &mut Field, budget: &mut ByteBudget) -> Result<String, UploadError> {
    let bytes = read_bytes(field, budget).await?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| UploadError::FileProcessingError(format!("Invalid UTF-8: {}", e)))
}

async fn read_bytes(field: &mut Field, budget: &mut ByteBudget) -> Result<Bytes, UploadError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.next().await {
        let data =
            chunk.map_err(|e| UploadError::FileProcessingError(format!("Chunk error: {}", e)))?;
        budget.charge(data.len())?;
        buf.extend_from_slice(&data);
    }
    Ok(buf.freeze())
}

// Helper to buffer an uploaded image in memory
async fn read_image_field(
    field: &mut Field,
    budget: &mut ByteBudget,
) -> Result<ImageFile, UploadError> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string);
    let content_type = field.content_type().map(|mime| mime.to_string());
    let bytes = read_bytes(field, budget).await?;

    Ok(ImageFile::new(file_name, content_type, bytes))
}

/// Drains a multipart body into [`UploadFields`].
///
/// Unknown fields are read and discarded. Empty file parts are skipped, so an
/// untouched file input does not count as an image.
pub async fn read_upload_fields(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<UploadFields, UploadError> {
    let mut fields = UploadFields::default();
    let mut budget = ByteBudget::new(max_bytes);

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadError::FileProcessingError(format!("Malformed multipart body: {}", e)))?
    {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(str::to_string)
            .ok_or_else(|| UploadError::ValidationError("Field name not found".to_string()))?;

        match name.as_str() {
            "email" => fields.email = Some(read_field(&mut field, &mut budget).await?),
            "description" => fields.description = Some(read_field(&mut field, &mut budget).await?),
            "images" => {
                let image = read_image_field(&mut field, &mut budget).await?;
                if image.is_placeholder() {
                    debug!("Skipping empty images part");
                } else {
                    fields.images.push(image);
                }
            }
            other => {
                debug!("Ignoring unknown multipart field {:?}", other);
                read_bytes(&mut field, &mut budget).await?;
            }
        }
    }

    Ok(fields)
}
