//! Result store boundary for the analysis subsystem
//!
//! The orchestrator appends insight and usage records here as provider
//! calls settle; each write targets a distinct new record, so concurrent
//! in-flight tasks never contend on a shared row. The surrounding web app
//! reads records back by originating entity to surface insights as they
//! arrive.

#![allow(clippy::must_use_candidate)]

mod error;
mod memory;
mod records;

use async_trait::async_trait;
use uuid::Uuid;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use records::{CallStatus, InsightRecord, PromptRunRecord, UsageRecord};

/// Append-only store for analysis outcomes
///
/// Implementations must support concurrent independent writes from
/// multiple in-flight provider tasks without a shared lock.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist an insight produced by a successful provider call
    async fn append_insight(&self, record: InsightRecord) -> Result<(), StoreError>;

    /// Persist usage accounting for a settled provider call
    async fn append_usage(&self, record: UsageRecord) -> Result<(), StoreError>;

    /// Persist the outcome of one prompt-test call
    async fn append_prompt_run(&self, record: PromptRunRecord) -> Result<(), StoreError>;

    /// Insights recorded for an entity, in insertion order
    async fn insights_for(&self, entity_id: Uuid) -> Result<Vec<InsightRecord>, StoreError>;

    /// Usage records for an entity, in insertion order
    async fn usage_for(&self, entity_id: Uuid) -> Result<Vec<UsageRecord>, StoreError>;

    /// Prompt-test outcomes for a run, in insertion order
    async fn prompt_runs_for(&self, run_id: Uuid) -> Result<Vec<PromptRunRecord>, StoreError>;
}
