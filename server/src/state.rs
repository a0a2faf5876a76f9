//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the blog store and the optional contact integrations. A missing
//! mailer or verifier means the integration is disabled, not an error.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::services::blog::BlogStore;
use crate::services::captcha::{CaptchaVerifier, RecaptchaVerifier};
use crate::services::contact::{CaptchaGate, Mailer, ResendMailer};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogStore>,
    /// `None` when `RESEND_API_KEY` is unset.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// `None` when `RECAPTCHA_SECRET` is unset.
    pub captcha: Option<Arc<dyn CaptchaVerifier>>,
    pub captcha_min_score: f64,
}

impl AppState {
    #[must_use]
    pub fn new(blog: BlogStore, mailer: Option<Arc<dyn Mailer>>, captcha: Option<Arc<dyn CaptchaVerifier>>) -> Self {
        Self {
            blog: Arc::new(blog),
            mailer,
            captcha,
            captcha_min_score: crate::config::DEFAULT_RECAPTCHA_MIN_SCORE,
        }
    }

    /// Wire provider implementations from config.
    #[must_use]
    pub fn from_config(config: &SiteConfig) -> Self {
        let blog = BlogStore::new(&config.posts_dir, config.blog_cache);
        let mailer = config
            .mail
            .as_ref()
            .map(|m| Arc::new(ResendMailer::new(&m.api_key, &m.from, &m.to)) as Arc<dyn Mailer>);
        let captcha = config
            .captcha
            .as_ref()
            .map(|c| Arc::new(RecaptchaVerifier::new(&c.secret)) as Arc<dyn CaptchaVerifier>);

        let mut state = Self::new(blog, mailer, captcha);
        if let Some(c) = &config.captcha {
            state.captcha_min_score = c.min_score;
        }
        state
    }

    #[must_use]
    pub fn captcha_gate(&self) -> Option<CaptchaGate<'_>> {
        self.captcha
            .as_deref()
            .map(|verifier| CaptchaGate { verifier, min_score: self.captcha_min_score })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
