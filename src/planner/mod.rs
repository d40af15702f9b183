//! Planning agents: test generation and selection.

pub mod generator;
pub mod ranker;

pub use generator::Planner;
pub use ranker::Ranker;
