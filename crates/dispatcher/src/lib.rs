//! Priority-aware ticket dispatch.
//!
//! A [`Dispatcher`] owns three containers: a bounded VIP ring, an unbounded
//! standard FIFO queue and a stack of resolved tickets. VIP tickets are always
//! served first; priority only matters when a lane is explicitly sorted.

use std::fmt;

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod ids;
pub mod queue;
pub mod registry;
pub mod ring;
pub mod shared;
pub mod sorter;
pub mod stack;

pub use config::{DispatcherConfig, UndoOverflow, DEFAULT_VIP_CAPACITY};
pub use dispatcher::{Dispatcher, Restored, UndoOutcome};
pub use errors::DispatchError;
pub use ids::IdPolicy;
pub use registry::BranchRegistry;
pub use shared::SharedDispatcher;
pub use sorter::{SortAlgorithm, SortCriteria};

/// Containers that can be sorted on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Standard,
    Resolved,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Standard => f.write_str("standard queue"),
            Lane::Resolved => f.write_str("resolved history"),
        }
    }
}
