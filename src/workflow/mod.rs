// file: src/workflow/mod.rs
// description: operator workflows run against a live backend
// reference: internal module structure

pub mod actions;
pub mod gate;
pub mod indexer;
pub mod inspector;

pub use actions::{Action, run_action};
pub use gate::require_backend;
pub use indexer::run_indexing;
pub use inspector::{InspectOptions, run_inspection};
