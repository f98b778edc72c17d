//! Request middleware: authentication extraction and admin page guards.

pub mod auth;
pub mod guard;
