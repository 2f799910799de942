//! Bidirectional association endpoints for in-memory object graphs.
//! Both ends of a relationship stay consistent through one endpoint call.

pub mod association;
pub mod logging;
pub mod model;

pub use association::check::{verify_registry, verify_symmetry, SymmetryError};
pub use association::to_many::ToMany;
pub use association::to_one::ToOne;
pub use association::{AssociationEndpoint, Field, Member, OtherSide};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::handle::{Handle, HandleError};
pub use model::registry::{Registry, RegistryError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
