//! Per-request state containers for the dashboard front-end
//!
//! Each container owns one slice of client-visible state and mutates it
//! only through named actions. Actions that call the network always leave
//! state in a terminal shape: populated from a successful response, or
//! cleared/untouched on failure — never partially updated. Containers are
//! plain owned values constructed per request; nothing is shared between
//! concurrent renders.

pub mod repository;
pub mod ui;
pub mod user;

pub use repository::*;
pub use ui::*;
pub use user::*;
