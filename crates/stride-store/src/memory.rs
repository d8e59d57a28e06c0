use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{InsightRecord, PromptRunRecord, ResultStore, StoreError, UsageRecord};

/// Concurrent in-memory result store
///
/// Backs tests and the CLI; the web app substitutes its relational
/// implementation behind the same trait. Writers append to per-key vectors
/// guarded by dashmap shards, so independent provider tasks never block
/// each other on a global lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    insights: DashMap<Uuid, Vec<InsightRecord>>,
    usage: DashMap<Uuid, Vec<UsageRecord>>,
    prompt_runs: DashMap<Uuid, Vec<PromptRunRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn append_insight(&self, record: InsightRecord) -> Result<(), StoreError> {
        self.insights.entry(record.entity_id).or_default().push(record);
        Ok(())
    }

    async fn append_usage(&self, record: UsageRecord) -> Result<(), StoreError> {
        self.usage.entry(record.entity_id).or_default().push(record);
        Ok(())
    }

    async fn append_prompt_run(&self, record: PromptRunRecord) -> Result<(), StoreError> {
        self.prompt_runs.entry(record.run_id).or_default().push(record);
        Ok(())
    }

    async fn insights_for(&self, entity_id: Uuid) -> Result<Vec<InsightRecord>, StoreError> {
        Ok(self.insights.get(&entity_id).map(|r| r.clone()).unwrap_or_default())
    }

    async fn usage_for(&self, entity_id: Uuid) -> Result<Vec<UsageRecord>, StoreError> {
        Ok(self.usage.get(&entity_id).map(|r| r.clone()).unwrap_or_default())
    }

    async fn prompt_runs_for(&self, run_id: Uuid) -> Result<Vec<PromptRunRecord>, StoreError> {
        Ok(self.prompt_runs.get(&run_id).map(|r| r.clone()).unwrap_or_default())
    }
}
