//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod auth;
pub mod public;
pub mod sites;
pub mod uploads;
pub mod works;
