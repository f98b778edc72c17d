//! Authentication: JWT access tokens, password hashing, and session
//! change notifications.

pub mod jwt;
pub mod password;
pub mod session;
