//! HTTP inbound adapter exposing the REST endpoints, the server-rendered
//! catalogue pages and health probes.

pub mod apis;
pub mod error;
pub mod health;
mod multipart;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub(crate) mod validation;
pub mod views;

pub use error::ApiResult;
