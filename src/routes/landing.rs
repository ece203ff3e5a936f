use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse};
use askama::Template;
use log::{info, warn};

use crate::config::{AppConfig, SubmitMode};
use crate::errors::UploadError;
use crate::form::{
    FormError, ImagePreview, LocalEndpoint, Notification, SimulatedTransport, UploadForm,
};
use crate::utils::read_upload_fields;

pub struct Feature {
    pub title: &'static str,
    pub text: &'static str,
}

pub struct Showcase {
    pub image: &'static str,
    pub alt: &'static str,
    pub caption: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        title: "Instant Transformation",
        text: "Transform your photos into Ghibli-style artwork in seconds.",
    },
    Feature {
        title: "High-Quality Results",
        text: "Get stunning, high-resolution Ghibli-style artwork.",
    },
    Feature {
        title: "No Signup Required",
        text: "Start creating instantly without creating an account.",
    },
    Feature {
        title: "Multiple Styles",
        text: "Choose from various Ghibli-inspired styles for your photos.",
    },
];

const SHOWCASE: &[Showcase] = &[
    Showcase {
        image: "/static/images/before-after-1.jpg",
        alt: "Portrait transformation example",
        caption: "Portrait",
    },
    Showcase {
        image: "/static/images/before-after-2.jpg",
        alt: "Outdoor transformation example",
        caption: "Outdoor",
    },
    Showcase {
        image: "/static/images/before-after-3.jpg",
        alt: "Group photo transformation example",
        caption: "Group Photo",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    email: &'a str,
    description: &'a str,
    previews: Vec<ImagePreview>,
    max_images: usize,
    over_limit: bool,
    submit_label: &'static str,
    submit_disabled: bool,
    notification: Option<Notification>,
    email_error: Option<String>,
    /// Posted files are not carried back into the file input.
    reselect_images: bool,
    features: &'static [Feature],
    showcase: &'static [Showcase],
}

impl<'a> IndexTemplate<'a> {
    fn new(form: &'a UploadForm) -> Self {
        Self {
            email: &form.email,
            description: &form.description,
            previews: form.previews(),
            max_images: form.max_images(),
            over_limit: form.exceeds_advertised_limit(),
            submit_label: form.submit_label(),
            submit_disabled: form.is_submit_disabled(),
            notification: None,
            email_error: None,
            reselect_images: false,
            features: FEATURES,
            showcase: SHOWCASE,
        }
    }
}

fn render_page(
    template: IndexTemplate<'_>,
    status: StatusCode,
) -> Result<HttpResponse, UploadError> {
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(template.render()?))
}

#[get("/")]
pub async fn landing_handler(config: web::Data<AppConfig>) -> Result<HttpResponse, UploadError> {
    let form = UploadForm::new(config.max_images);
    render_page(IndexTemplate::new(&form), StatusCode::OK)
}

/// Target of the page's HTML form: rebuilds the form from the posted fields,
/// submits it and renders the page again with the outcome.
#[post("/submit")]
pub async fn submit_form_handler(
    payload: Multipart,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, UploadError> {
    let fields = read_upload_fields(payload, config.max_payload_bytes).await?;

    let mut form = UploadForm::new(config.max_images);
    form.email = fields.email.unwrap_or_default();
    form.description = fields.description.unwrap_or_default();
    form.select_images(fields.images);

    info!(
        "Form posted with {} image(s), mode {:?}",
        form.images().len(),
        config.submit_mode
    );
    let outcome = match config.submit_mode {
        SubmitMode::Endpoint => form.submit(&LocalEndpoint::new(config.submit_delay)).await,
        SubmitMode::Simulated => form.submit(&SimulatedTransport::new(config.submit_delay)).await,
    };

    match outcome {
        Ok(notification) => {
            info!(
                "Form submission finished in state {:?}: {}",
                form.state(),
                notification.title
            );
            let mut page = IndexTemplate::new(&form);
            page.notification = Some(notification);
            render_page(page, StatusCode::OK)
        }
        Err(FormError::InvalidEmail) => {
            warn!("Rejected form submission with invalid email {:?}", form.email);
            let mut page = IndexTemplate::new(&form);
            page.email_error = Some(FormError::InvalidEmail.to_string());
            page.reselect_images = !form.images().is_empty();
            render_page(page, StatusCode::BAD_REQUEST)
        }
        Err(e) => Err(UploadError::InternalError(e.to_string())),
    }
}
