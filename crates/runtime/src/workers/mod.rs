//! Background workers that own match state.
//!
//! Each match gets exactly one [`MatchWorker`]; requests for the same match
//! serialize through its command channel.

mod match_worker;

pub use match_worker::{Command, MatchWorker};
