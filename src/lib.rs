pub mod driver;
pub mod parser;
pub mod planner;
pub mod report;
pub mod runner;
pub mod server;
pub mod utils;

// Re-export common items
pub use parser::{TestCase, TestStep};
pub use planner::{Planner, Ranker};
pub use report::TestReport;
pub use runner::Orchestrator;
pub use server::AppContext;
