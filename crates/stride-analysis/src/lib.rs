//! Multi-provider AI analysis orchestration for Stride
//!
//! Dispatches a single analysis request to one or more independent
//! inference backends concurrently, races each call against a per-call
//! deadline, and persists every outcome independently. A slow or failing
//! backend never blocks ingestion of the others' results, and the caller
//! that triggered the round never waits for any of it.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod orchestrator;
pub mod pricing;
pub mod prompt;
mod protocol;
pub mod provider;
pub mod registry;
pub mod runner;
pub mod strategy;

pub use error::AnalysisError;
pub use orchestrator::{Orchestrator, RoundSummary};
pub use provider::{AnalysisOutput, Completion, Provider};
pub use registry::ProviderRegistry;
pub use runner::PromptTestRunner;
pub use strategy::Selector;
