//! HTTP API
//!
//! Endpoints:
//! - `POST /generate_plan` - full planner output
//! - `POST /execute_tests?top_n=N` - plan, rank and execute end-to-end
//! - `GET /report/:test_name` - a stored report
//! - `GET /reports`, `GET /reports/junit` - stored report listing and export
//! - `GET /artifacts/*` - screenshots and raw report files

pub mod api;
pub mod context;
pub mod server;

pub use context::AppContext;
pub use server::{ApiServer, ServerConfig};
