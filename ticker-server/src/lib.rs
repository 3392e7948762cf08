//! HTTP surface of the ticker consensus service.
//!
//! - `GET /` runs the whole job and answers with the ticker collection.
//! - `GET /catalog/fetch` walks the instrument catalog.
//!
//! Every answer is wrapped in an [`envelope::HttpResponse`].

#![warn(missing_docs)]

/// JSON response envelope and error codes.
pub mod envelope;
/// Router and request handlers.
pub mod routes;
pub mod settings;

pub use routes::{AppState, app, parse_flag};
