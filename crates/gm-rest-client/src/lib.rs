//! REST API client for the Git Mirrors dashboard backend
//!
//! This crate provides the HTTP client for the dashboard backend: one
//! scoped endpoint wrapper per resource group (`/auth`, `/user`,
//! `/repository`, `/aggregate`), the [`ApiClient`] factory that composes
//! them, and the execution-context aware [`ApiConfig`] accessor that picks
//! the right base URL for server-side rendering versus the browser.

pub mod client;
pub mod config;
pub mod error;

mod scope;

pub use client::*;
pub use config::*;
pub use error::*;
