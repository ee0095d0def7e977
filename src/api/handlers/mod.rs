//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod kv;
pub mod tracking;

pub use health::{health_handler, root_handler};
pub use kv::{delete_kv_handler, get_kv_handler, put_kv_handler};
pub use tracking::{query_handler, tracking_handler};
