//! Shared domain vocabulary for the Stride AI analysis subsystem
//!
//! These types cross crate boundaries: the config layer names strategies,
//! the store layer persists results and usage, and the analysis layer
//! produces both. Nothing here performs I/O.

#![allow(clippy::must_use_candidate)]

mod insight;
mod request;
mod strategy;
mod usage;

pub use insight::{AnalysisResult, Sentiment};
pub use request::{AnalysisRequest, GoalContext, MAX_RECENT_NOTES};
pub use strategy::Strategy;
pub use usage::{ProviderIdentity, UsageMetrics};
