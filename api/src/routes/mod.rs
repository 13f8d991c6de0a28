//! API route definitions.
//!
//! This module organizes all HTTP routes for the fixture server.

mod files;
mod health;
mod query;
mod search;
mod stream;
mod witsml;

pub use files::files_routes;
pub use health::health_routes;
pub use query::query_routes;
pub use search::search_routes;
pub use stream::stream_routes;
pub use witsml::witsml_routes;
