//! Display formatting for domain models and collections.
//!
//! All formatters produce markdown so the CLI can render rich output
//! through its terminal renderer. Display implementations live here,
//! separated from the model definitions, so presentation changes never
//! touch business logic.
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for domain models
//! - [`collections`]: Collection wrapper types (Sessions, QueueEntries)
//! - [`datetime`]: Date/time formatting utilities

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::{QueueEntries, Sessions};
pub use datetime::LocalDateTime;
