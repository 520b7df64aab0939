//! Runtime orchestration for combat matches.
//!
//! This crate wires together oracle access, repositories and per-match worker
//! tasks into a cohesive runtime API. Consumers embed [`Runtime`] and talk to
//! matches through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`workers`] keeps the per-match actors internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{MatchEvent, Result, RuntimeError, RuntimeHandle};
pub use oracle::OracleManager;
pub use repository::{FileMatchRepository, InMemoryMatchRepository, MatchRepository, RepositoryError};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
