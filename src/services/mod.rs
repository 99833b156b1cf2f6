//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own session, guard, and backend-read logic so route
//! handlers stay focused on HTTP translation.

pub mod auth;
pub mod fetch;
pub mod guard;
pub mod session;
