//! Utility functions shared by the HTTP layer, services and the admin CLI.
//!
//! - [`validation`] - Tracking number and key-value key validation

pub mod validation;
