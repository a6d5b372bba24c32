//! Axum extractors for the lookup API.

mod caller;
mod entity;
mod list_params;

pub use caller::{CallerExtractor, X_ROLES};
pub use entity::EntityPath;
pub use list_params::{parse_soft_deleted_flag, ListParams};
