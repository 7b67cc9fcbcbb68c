//! monstack checker library entry.
//!
//! Parses the monitoring stack artifacts into typed models (`schema`), scores
//! them (`checks`), renders the result (`report`) and drives the compose
//! tool (`stack`). Consumed by the `monstack-check` binary and by
//! integration tests.

pub mod checks;
pub mod report;
pub mod schema;
pub mod stack;

pub use checks::{run_all, CheckItem, ConfigCheck, SectionReport};
pub use report::Report;
pub use stack::StackRunner;
