use actix_web::web::Bytes;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// One uploaded file, kept in memory only for the lifetime of a request.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Browsers send a nameless, empty part for a file input nobody touched.
    pub fn is_placeholder(&self) -> bool {
        self.file_name.as_deref().map_or(true, str::is_empty) && self.bytes.is_empty()
    }

    pub fn display_name(&self) -> &str {
        self.file_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("unnamed")
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub email: String,
    pub description: String,
    pub images: Vec<ImageFile>,
    pub received_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(email: String, description: String, images: Vec<ImageFile>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            description,
            images,
            received_at: Utc::now(),
        }
    }

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email.trim())
    }

    pub fn total_bytes(&self) -> usize {
        self.images.iter().map(ImageFile::size).sum()
    }

    pub fn formatted_received_at(&self) -> String {
        self.received_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(Submission::is_valid_email("user@example.com"));
        assert!(Submission::is_valid_email("first.last+ghibli@mail.example.co"));
        assert!(Submission::is_valid_email("  padded@example.org "));
    }

    #[test]
    fn rejects_things_that_are_not_addresses() {
        assert!(!Submission::is_valid_email(""));
        assert!(!Submission::is_valid_email("user"));
        assert!(!Submission::is_valid_email("user@localhost"));
        assert!(!Submission::is_valid_email("@example.com"));
    }

    #[test]
    fn total_bytes_sums_every_image() {
        let images = vec![
            ImageFile::new(Some("a.png".into()), None, Bytes::from_static(b"1234")),
            ImageFile::new(Some("b.png".into()), None, Bytes::from_static(b"56")),
        ];
        let submission = Submission::new("user@example.com".into(), String::new(), images);
        assert_eq!(submission.total_bytes(), 6);
    }

    #[test]
    fn placeholder_parts_are_detected() {
        assert!(ImageFile::new(Some(String::new()), None, Bytes::new()).is_placeholder());
        assert!(ImageFile::new(None, None, Bytes::new()).is_placeholder());
        assert!(!ImageFile::new(Some("cat.jpg".into()), None, Bytes::new()).is_placeholder());
        assert!(!ImageFile::new(None, None, Bytes::from_static(b"x")).is_placeholder());
    }
}
