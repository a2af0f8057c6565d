pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;

pub use entity_ids::*;
pub use error::DomainError;
pub use id::Id;
pub use pagination::{Page, PageParams};
