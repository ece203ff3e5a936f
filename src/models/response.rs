use serde::{Deserialize, Serialize};

/// Acknowledgement returned by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub success: bool,
}

impl UploadResult {
    pub fn accepted() -> Self {
        Self { success: true }
    }
}
