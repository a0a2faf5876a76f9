//! Contact form relay.
//!
//! DESIGN
//! ======
//! A submission is validated, optionally CAPTCHA-checked, rendered to HTML
//! and plain text, then handed to a `Mailer`. All user-supplied fields are
//! HTML-escaped before they reach the template. The visitor's address goes
//! in `Reply-To`; the sender is always the configured `CONTACT_FROM`.

use async_trait::async_trait;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use serde::Deserialize;

use super::captcha::{self, CaptchaVerifier};

const CONTACT_TEMPLATE: &str = include_str!("../../templates/contact_email.html");

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("missing required fields")]
    MissingFields,
    #[error("invalid email")]
    InvalidEmail,
    #[error("captcha verification failed")]
    CaptchaFailed,
    #[error("contact mail is not configured")]
    NotConfigured,
    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Raw JSON body. Every field is optional at the wire level so absent and
/// `null` fields both surface as [`ContactError::MissingFields`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub captcha: Option<String>,
}

/// A validated submission with trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), ContactError>;
}

// =============================================================================
// VALIDATION + RENDERING
// =============================================================================

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') || normalized.contains(char::is_whitespace) {
        return None;
    }
    Some(normalized.to_owned())
}

/// Check required fields and email shape.
///
/// # Errors
///
/// `MissingFields` if any field is blank, `InvalidEmail` if the address is
/// not `local@domain`.
pub fn validate(form: &ContactForm) -> Result<ContactMessage, ContactError> {
    fn field(v: &Option<String>) -> &str {
        v.as_deref().map_or("", str::trim)
    }
    let name = field(&form.name);
    let email = field(&form.email);
    let subject = field(&form.subject);
    let message = field(&form.message);
    if name.is_empty() || email.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    let email = normalize_email(email).ok_or(ContactError::InvalidEmail)?;
    Ok(ContactMessage { name: name.to_owned(), email, subject: subject.to_owned(), message: message.to_owned() })
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Fill `{{KEY}}` slots in one pass over `template`. Substituted values are
/// never rescanned; unknown slots are left as written.
#[must_use]
pub fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let slot = after
            .find("}}")
            .and_then(|end| slots.iter().find(|(key, _)| *key == &after[..end]).map(|(_, value)| (end, *value)));
        match slot {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[must_use]
pub fn render_html(msg: &ContactMessage) -> String {
    let name = escape_html(&msg.name);
    let email = escape_html(&msg.email);
    let subject = escape_html(&msg.subject);
    let message = escape_html(&msg.message).replace('\n', "<br>\n");
    fill_template(
        CONTACT_TEMPLATE,
        &[("NAME", name.as_str()), ("EMAIL", email.as_str()), ("SUBJECT", subject.as_str()), ("MESSAGE", message.as_str())],
    )
}

#[must_use]
pub fn render_text(msg: &ContactMessage) -> String {
    format!(
        "New submission from the contact form\n\nName: {}\nEmail: {}\nSubject: {}\n\n{}\n",
        msg.name, msg.email, msg.subject, msg.message
    )
}

#[must_use]
pub fn compose(msg: &ContactMessage) -> OutgoingMail {
    OutgoingMail {
        subject: format!("New Contact Form Submission from {}", msg.name),
        html: render_html(msg),
        text: render_text(msg),
        reply_to: msg.email.clone(),
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Optional CAPTCHA gate: verifier plus minimum score.
pub struct CaptchaGate<'a> {
    pub verifier: &'a dyn CaptchaVerifier,
    pub min_score: f64,
}

/// Validate, verify and deliver one submission.
///
/// # Errors
///
/// See [`ContactError`]; validation runs before any network call.
pub async fn submit(
    form: &ContactForm,
    mailer: Option<&dyn Mailer>,
    gate: Option<CaptchaGate<'_>>,
) -> Result<(), ContactError> {
    let msg = validate(form)?;

    if let Some(gate) = gate {
        let token = form.captcha.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let Some(token) = token else {
            return Err(ContactError::CaptchaFailed);
        };
        match gate.verifier.verify(token).await {
            Ok(outcome) if captcha::accepts(&outcome, gate.min_score) => {}
            Ok(outcome) => {
                tracing::info!(score = ?outcome.score, errors = ?outcome.error_codes, "captcha rejected");
                return Err(ContactError::CaptchaFailed);
            }
            Err(e) => {
                tracing::warn!(error = %e, "captcha verification error");
                return Err(ContactError::CaptchaFailed);
            }
        }
    }

    let mailer = mailer.ok_or(ContactError::NotConfigured)?;
    mailer.send(&compose(&msg)).await?;
    tracing::info!(subject = %msg.subject, "contact email sent");
    Ok(())
}

// =============================================================================
// RESEND
// =============================================================================

pub struct ResendMailer {
    client: Resend,
    from: String,
    to: String,
}

impl ResendMailer {
    #[must_use]
    pub fn new(api_key: &str, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { client: Resend::new(api_key), from: from.into(), to: to.into() }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), ContactError> {
        let to = [self.to.as_str()];
        let email = CreateEmailBaseOptions::new(&self.from, to, &mail.subject)
            .with_html(&mail.html)
            .with_text(&mail.text)
            .with_reply(&mail.reply_to);
        self.client
            .emails
            .send(email)
            .await
            .map_err(|e| ContactError::Delivery(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
