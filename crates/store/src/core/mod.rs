//! Core abstractions: the primary store, the search index, and the event bus.

pub mod events;
pub mod index;
pub mod store;

pub use events::{EventPublisher, LookupEvent, TracingPublisher, topics};
pub use index::{IndexNamespace, ListFilter, SearchIndex};
pub use store::RecordStore;
