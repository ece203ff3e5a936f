//! Client-side state of the upload form.
//!
//! The form owns what the user has typed and picked, plus an explicit
//! [`RequestState`] that drives the submit control. A submission is split in
//! two steps, [`UploadForm::begin_submit`] and [`UploadForm::finish_submit`],
//! so callers can render the in-flight state between them;
//! [`UploadForm::submit`] runs both around a [`SubmitTransport`].

use derive_more::Display;
use log::{info, warn};

use crate::errors::UploadError;
use crate::models::response::UploadResult;
use crate::models::submission::{ImageFile, Submission};

pub mod transport;

pub use transport::{LocalEndpoint, SimulatedTransport, SubmitTransport};

const SUBMIT_LABEL: &str = "立即支付";
const PENDING_LABEL: &str = "处理中...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn submitted() -> Self {
        Self {
            title: "提交成功",
            description: "我们将尽快处理您的请求",
            variant: NotificationVariant::Default,
        }
    }

    pub fn failed() -> Self {
        Self {
            title: "提交失败",
            description: "请稍后重试",
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum FormError {
    #[display("Please enter a valid email address")]
    InvalidEmail,
    #[display("A submission is already in flight")]
    SubmissionInFlight,
    #[display("No submission is in flight")]
    NotInFlight,
}

impl std::error::Error for FormError {}

/// What the page shows for one selected image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub index: usize,
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub email: String,
    pub description: String,
    images: Vec<ImageFile>,
    state: RequestState,
    max_images: usize,
}

impl UploadForm {
    pub fn new(max_images: usize) -> Self {
        Self {
            max_images,
            ..Self::default()
        }
    }

    /// Appends `files` to the current selection. Nothing is deduplicated and
    /// the advertised limit is not enforced.
    pub fn select_images<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = ImageFile>,
    {
        self.images.extend(files);
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn previews(&self) -> Vec<ImagePreview> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, image)| ImagePreview {
                index: i + 1,
                name: image.display_name().to_string(),
                size: image.size(),
            })
            .collect()
    }

    pub fn max_images(&self) -> usize {
        self.max_images
    }

    pub fn exceeds_advertised_limit(&self) -> bool {
        self.images.len() > self.max_images
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.state == RequestState::Pending
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            PENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Checks the email, moves to [`RequestState::Pending`] and snapshots the
    /// form into a [`Submission`].
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.state == RequestState::Pending {
            return Err(FormError::SubmissionInFlight);
        }
        if !Submission::is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }

        self.state = RequestState::Pending;
        Ok(Submission::new(
            self.email.trim().to_string(),
            self.description.clone(),
            self.images.clone(),
        ))
    }

    /// Settles the in-flight submission and picks the notification to show.
    /// Any error, or an acknowledgement without `success`, is a failure.
    pub fn finish_submit(
        &mut self,
        outcome: Result<UploadResult, UploadError>,
    ) -> Result<Notification, FormError> {
        if self.state != RequestState::Pending {
            return Err(FormError::NotInFlight);
        }

        match outcome {
            Ok(UploadResult { success: true }) => {
                self.state = RequestState::Succeeded;
                Ok(Notification::submitted())
            }
            Ok(UploadResult { success: false }) => {
                warn!("Upload endpoint did not acknowledge the submission");
                self.state = RequestState::Failed;
                Ok(Notification::failed())
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.state = RequestState::Failed;
                Ok(Notification::failed())
            }
        }
    }

    pub async fn submit<T>(&mut self, transport: &T) -> Result<Notification, FormError>
    where
        T: SubmitTransport,
    {
        let submission = self.begin_submit()?;
        info!(
            "Sending submission {} with {} image(s)",
            submission.id,
            submission.images.len()
        );
        let outcome = transport.send(submission).await;
        self.finish_submit(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{image, FailingTransport};
    use std::time::Duration;

    fn filled_form() -> UploadForm {
        let mut form = UploadForm::new(3);
        form.email = "user@example.com".to_string();
        form
    }

    #[test]
    fn selecting_appends_to_the_existing_list() {
        let mut form = UploadForm::new(3);
        form.select_images(vec![image("a.png", b"aa")]);
        form.select_images(vec![image("b.png", b"bbb"), image("a.png", b"aa")]);

        let names: Vec<_> = form.previews().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["a.png", "b.png", "a.png"]);
    }

    #[test]
    fn advertised_limit_is_only_a_hint() {
        let mut form = UploadForm::new(3);
        form.select_images((0..5).map(|i| image(&format!("{}.jpg", i), b"x")));
        assert_eq!(form.images().len(), 5);
        assert!(form.exceeds_advertised_limit());
    }

    #[test]
    fn previews_are_numbered_from_one() {
        let mut form = UploadForm::new(3);
        form.select_images(vec![image("cat.jpg", b"meow")]);
        assert_eq!(
            form.previews(),
            vec![ImagePreview {
                index: 1,
                name: "cat.jpg".to_string(),
                size: 4
            }]
        );
    }

    #[test]
    fn control_is_disabled_while_pending() {
        let mut form = filled_form();
        assert!(!form.is_submit_disabled());
        assert_eq!(form.submit_label(), "立即支付");

        form.begin_submit().unwrap();
        assert_eq!(form.state(), RequestState::Pending);
        assert!(form.is_submit_disabled());
        assert_eq!(form.submit_label(), "处理中...");

        form.finish_submit(Ok(UploadResult::accepted())).unwrap();
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn second_begin_while_pending_is_rejected() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::SubmissionInFlight);
    }

    #[test]
    fn control_is_re_enabled_exactly_once() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        form.finish_submit(Ok(UploadResult::accepted())).unwrap();
        assert_eq!(
            form.finish_submit(Ok(UploadResult::accepted())).unwrap_err(),
            FormError::NotInFlight
        );
        assert_eq!(form.state(), RequestState::Succeeded);
    }

    #[test]
    fn invalid_email_leaves_the_form_idle() {
        let mut form = UploadForm::new(3);
        form.email = "not-an-email".to_string();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::InvalidEmail);
        assert_eq!(form.state(), RequestState::Idle);
    }

    #[test]
    fn unacknowledged_result_counts_as_failure() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        let note = form
            .finish_submit(Ok(UploadResult { success: false }))
            .unwrap();
        assert!(note.is_destructive());
        assert_eq!(form.state(), RequestState::Failed);
    }

    #[actix_web::test]
    async fn valid_submissions_with_up_to_three_images_succeed() {
        let transport = SimulatedTransport::new(Duration::from_millis(5));
        for count in 0..=3 {
            let mut form = filled_form();
            form.select_images((0..count).map(|i| image(&format!("{}.png", i), b"px")));

            let note = form.submit(&transport).await.unwrap();
            assert_eq!(note, Notification::submitted());
            assert_eq!(form.state(), RequestState::Succeeded);
            assert!(!form.is_submit_disabled());
        }
    }

    #[actix_web::test]
    async fn transport_failure_shows_failure_and_re_enables() {
        let mut form = filled_form();
        let note = form.submit(&FailingTransport).await.unwrap();

        assert_eq!(note, Notification::failed());
        assert!(note.is_destructive());
        assert_eq!(form.state(), RequestState::Failed);
        assert!(!form.is_submit_disabled());
    }

    #[actix_web::test]
    async fn form_can_be_submitted_again_after_failure() {
        let mut form = filled_form();
        form.submit(&FailingTransport).await.unwrap();
        let note = form.submit(&SimulatedTransport::new(Duration::ZERO)).await.unwrap();
        assert_eq!(note, Notification::submitted());
    }

    #[actix_web::test]
    async fn empty_description_and_no_images_reach_the_endpoint() {
        let mut form = filled_form();
        form.description = String::new();

        let note = form.submit(&LocalEndpoint::new(Duration::ZERO)).await.unwrap();
        assert_eq!(note, Notification::submitted());
    }
}
