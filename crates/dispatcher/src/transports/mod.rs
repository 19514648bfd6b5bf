//! Transport implementations
//!
//! One module per transport scheme: HTTP delivery and log emission.

pub(crate) mod http;
pub(crate) mod log;
