//! Repository implementations module.
//!
//! This module contains implementations of the `ItemRepository` trait:
//! - `local`: In-memory implementation used by the server and by tests
pub mod local;

pub use local::LocalRepository;
