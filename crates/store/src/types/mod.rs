//! Core types for lookup records, entity kinds, and pagination.

mod entity;
mod page;
mod record;

pub use entity::{EntityKind, UnknownEntityKind};
pub use page::{DEFAULT_PER_PAGE, PageRequest, PagedRecords};
pub use record::{DELETED_FLAG, ID_FIELD, LookupRecord};
