pub mod metrics;
pub mod service;

pub use service::{CycleOutcome, RepoOrigin, Showcase};
