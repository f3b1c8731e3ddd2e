//! Git Mirrors REST API contract types and validation
//!
//! This crate defines the schema types for the dashboard backend API.
//! These types are shared between the REST client, the mock client, and
//! the state containers, so every consumer agrees on the wire format.

pub mod error;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
pub use validation::*;
