//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ApiCatalogue;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn ApiCatalogue>,
}

impl HttpState {
    /// Construct state from the catalogue port implementation.
    pub fn new(catalogue: Arc<dyn ApiCatalogue>) -> Self {
        Self { catalogue }
    }
}
