//! HTTP middleware: sessions, request ids, auth extractors.

pub mod auth;
pub mod request_id;
pub mod session;
