//! Subject resolution seam.
//!
//! Expanding placeholders in the configured subject template is the host's
//! job. The bridge asks a `SubjectResolver` for the concrete subject and
//! treats the answer as an opaque string.

use axum::http::request::Parts;

/// Turns the configured subject template into a concrete subject.
pub trait SubjectResolver: Send + Sync {
    fn resolve(&self, template: &str, parts: &Parts) -> String;
}

/// Uses the template as the subject, unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Verbatim;

impl SubjectResolver for Verbatim {
    fn resolve(&self, template: &str, _parts: &Parts) -> String {
        template.to_string()
    }
}

impl<F> SubjectResolver for F
where
    F: Fn(&str, &Parts) -> String + Send + Sync,
{
    fn resolve(&self, template: &str, parts: &Parts) -> String {
        self(template, parts)
    }
}
