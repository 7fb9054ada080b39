//! Request middleware.
//!
//! Purpose: attach a per-request trace identifier so logs, error payloads and
//! response headers can be correlated.

pub mod trace;

pub use trace::Trace;
