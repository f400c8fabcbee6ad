//! Core data structures.

mod record;

pub use record::{Record, RecordBuilder};
