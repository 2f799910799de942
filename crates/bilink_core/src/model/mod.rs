//! Entity identity and storage.
//!
//! # Responsibility
//! - Give every entity a stable, copyable `Handle`.
//! - Store entities of one type in a `Registry` that callers compose into
//!   their own world value.
//!
//! # Invariants
//! - Relationship fields hold handles, never owned entities.

pub mod handle;
pub mod registry;
