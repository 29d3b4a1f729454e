//! Domain model for the items service.
//!
//! - [`item`]: the stored [`Item`], the client-supplied [`ItemPayload`] and the
//!   [`Message`] envelope
//! - [`validation`]: the explicit validation step that turns raw JSON into typed payloads

pub mod macros;
pub mod item;
pub mod validation;

pub use item::*;
pub use validation::{FieldError, Validate, ValidationErrors};
