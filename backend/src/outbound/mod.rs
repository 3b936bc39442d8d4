//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **portal**: reqwest-backed login and per-category data fetches
//!
//! Adapters are thin translators that convert between domain types and
//! transport representations. They contain no business logic.

pub mod portal;
