//! HTTP request handlers.

pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod read;
pub mod update;
