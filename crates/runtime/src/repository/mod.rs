//! Repository layer for match persistence.
//!
//! Repositories handle data that CHANGES during play: the match aggregate.
//! Static combat content (spells, effects, roster) is handled by oracles.

mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FileMatchRepository;
pub use memory::InMemoryMatchRepository;
pub use traits::MatchRepository;
