pub mod types;
pub mod yaml;

pub use types::{StepAction, TestCase, TestStep};
pub use yaml::TestPlan;
