//! HTTP access to the missing-persons case API.

pub mod http;

pub use http::{ClientError, DEFAULT_BASE_URL, PortalClient};
