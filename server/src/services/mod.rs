//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own file loading and third-party calls so route handlers
//! stay focused on status codes and JSON shapes.

pub mod blog;
pub mod captcha;
pub mod contact;
