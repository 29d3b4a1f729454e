//! # Items API
//!
//! A small HTTP service exposing CRUD operations over an in-memory collection of
//! items, plus service information, a liveness check, a static landing page and
//! generated interactive API documentation.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`config`]: Service metadata, CORS policy and bind address settings
//! - [`models`]: The item resource, its payload and explicit request validation
//! - [`db`]: Repository trait, in-memory repository and service functions
//! - [`http`]: Axum-based HTTP server, handlers and API documentation
//!
//! ## Store semantics
//!
//! - Identities start at 1 and grow by one per created item; they are never reused
//! - Listing returns items in creation order
//! - Updates replace every client field but keep the identity and creation time

pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
