//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod site_repo;
pub mod user_repo;
pub mod work_repo;

pub use site_repo::SiteRepo;
pub use user_repo::UserRepo;
pub use work_repo::WorkRepo;
