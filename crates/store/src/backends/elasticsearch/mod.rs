//! Elasticsearch secondary-index backend.

mod backend;
mod index;

pub use backend::{ElasticsearchAuth, ElasticsearchConfig, ElasticsearchIndex};
