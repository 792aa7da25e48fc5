//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently the
//! request-id scope used for log correlation and envelope `responseId`s.

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestTracking};
