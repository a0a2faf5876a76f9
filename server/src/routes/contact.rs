//! Contact route: relays the site's contact form by email.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::error_response;
use crate::services::contact::{self, ContactError, ContactForm};
use crate::state::AppState;

/// `POST /api/contact`
///
/// A body that is not a JSON object of strings is answered like a form with
/// missing fields.
pub async fn submit(State(state): State<AppState>, body: Result<Json<ContactForm>, JsonRejection>) -> Response {
    let form = match body {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::info!(error = %rejection, "unreadable contact body");
            return error_response(StatusCode::BAD_REQUEST, contact_error_message(&ContactError::MissingFields));
        }
    };
    match contact::submit(&form, state.mailer.as_deref(), state.captcha_gate()).await {
        Ok(()) => Json(serde_json::json!({ "message": "Email sent successfully" })).into_response(),
        Err(e) => {
            let status = contact_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "contact submission failed");
            }
            error_response(status, contact_error_message(&e))
        }
    }
}

pub(crate) fn contact_error_to_status(err: &ContactError) -> StatusCode {
    match err {
        ContactError::MissingFields | ContactError::InvalidEmail | ContactError::CaptchaFailed => {
            StatusCode::BAD_REQUEST
        }
        ContactError::NotConfigured | ContactError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn contact_error_message(err: &ContactError) -> &'static str {
    match err {
        ContactError::MissingFields => "Missing required fields",
        ContactError::InvalidEmail => "Invalid email",
        ContactError::CaptchaFailed => "Captcha verification failed",
        ContactError::NotConfigured => "Contact form is not configured",
        ContactError::Delivery(_) => "Error sending email",
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
