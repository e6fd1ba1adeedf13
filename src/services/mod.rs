//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `cart` and `agents` are self-contained state machines. `session` binds
//! them to a mounted page so route handlers stay focused on protocol
//! translation.

pub mod agents;
pub mod cart;
pub mod session;
