//! Typed client bindings for Dinkur desktop time-tracking entries.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod listing;
pub mod logging;
pub mod models;
pub mod rehydrate;
pub mod render;
pub mod timestamp;

pub use error::BindingError;
pub use models::{Entry, SearchEntry};
pub use rehydrate::{Mode, Model, Payload, Rehydrated, rehydrate, rehydrate_primitive};
pub use timestamp::Timestamp;
