//! CAPTCHA verification for the contact form.
//!
//! `CaptchaVerifier` is the seam; `RecaptchaVerifier` calls Google's
//! `siteverify` endpoint. Score thresholds are applied by [`accepts`] so
//! verifiers only report what the provider said.

use async_trait::async_trait;
use serde::Deserialize;

pub const RECAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("captcha http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("captcha provider returned status {0}")]
    Status(u16),
}

/// Provider verdict for one token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CaptchaOutcome {
    pub success: bool,
    /// v3 risk score in `0.0..=1.0`; absent for v2 checkbox tokens.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<CaptchaOutcome, CaptchaError>;
}

/// Whether `outcome` passes. A missing score counts as passing when the
/// provider reported success.
#[must_use]
pub fn accepts(outcome: &CaptchaOutcome, min_score: f64) -> bool {
    outcome.success && outcome.score.map_or(true, |s| s >= min_score)
}

pub struct RecaptchaVerifier {
    http: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaVerifier {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_url(secret, RECAPTCHA_VERIFY_URL)
    }

    #[must_use]
    pub fn with_url(secret: impl Into<String>, verify_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), secret: secret.into(), verify_url: verify_url.into() }
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<CaptchaOutcome, CaptchaError> {
        let response = self
            .http
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptchaError::Status(status.as_u16()));
        }

        let outcome: CaptchaOutcome = response.json().await?;
        tracing::debug!(
            success = outcome.success,
            score = ?outcome.score,
            action = ?outcome.action,
            "captcha verified"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "captcha_test.rs"]
mod tests;
