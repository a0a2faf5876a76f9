//! Site configuration parsed from environment variables.
//!
//! Optional integrations (mail relay, CAPTCHA) are enabled by the presence
//! of their credentials; a partially configured integration is an error so a
//! typo does not silently disable the contact form.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_POSTS_DIR: &str = "content/blog";
pub const DEFAULT_WEBSITE_DIR: &str = "website";
pub const DEFAULT_RECAPTCHA_MIN_SCORE: f64 = 0.5;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error("{var} is required when RESEND_API_KEY is set")]
    IncompleteMail { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub api_key: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptchaConfig {
    pub secret: String,
    pub min_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub port: u16,
    pub posts_dir: PathBuf,
    pub website_dir: PathBuf,
    /// Memoize parsed blog posts for the process lifetime.
    pub blog_cache: bool,
    pub mail: Option<MailConfig>,
    pub captcha: Option<CaptchaConfig>,
}

impl SiteConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `POSTS_DIR`: default `content/blog`
    /// - `WEBSITE_DIR`: default `website`
    /// - `BLOG_CACHE`: `on` (default) / `off`
    /// - `RESEND_API_KEY` + `CONTACT_FROM` + `CONTACT_TO`: enable contact mail
    /// - `RECAPTCHA_SECRET`, `RECAPTCHA_MIN_SCORE` (default 0.5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let posts_dir = get("POSTS_DIR").map_or_else(|| PathBuf::from(DEFAULT_POSTS_DIR), PathBuf::from);
        let website_dir = get("WEBSITE_DIR").map_or_else(|| PathBuf::from(DEFAULT_WEBSITE_DIR), PathBuf::from);

        let blog_cache = match get("BLOG_CACHE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue { var: "BLOG_CACHE", value: raw })?,
            None => true,
        };

        let mail = match get("RESEND_API_KEY") {
            Some(api_key) => {
                let from = get("CONTACT_FROM").ok_or(ConfigError::IncompleteMail { var: "CONTACT_FROM" })?;
                let to = get("CONTACT_TO").ok_or(ConfigError::IncompleteMail { var: "CONTACT_TO" })?;
                Some(MailConfig { api_key, from, to })
            }
            None => None,
        };

        let captcha = match get("RECAPTCHA_SECRET") {
            Some(secret) => {
                let min_score = match get("RECAPTCHA_MIN_SCORE") {
                    Some(raw) => raw
                        .parse::<f64>()
                        .ok()
                        .filter(|s| (0.0..=1.0).contains(s))
                        .ok_or(ConfigError::InvalidValue { var: "RECAPTCHA_MIN_SCORE", value: raw })?,
                    None => DEFAULT_RECAPTCHA_MIN_SCORE,
                };
                Some(CaptchaConfig { secret, min_score })
            }
            None => None,
        };

        Ok(Self { port, posts_dir, website_dir, blog_cache, mail, captcha })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
