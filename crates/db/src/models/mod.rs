//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the API exposes the entity, a `Serialize` response struct

pub mod site;
pub mod user;
pub mod work;
