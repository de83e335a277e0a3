//! Employment id allocator
//!
//! Human-facing employee identifiers are monotonic integers starting at
//! 1000. The store has no auto-increment primitive, so a dedicated
//! counter record is bumped with a single `UPSERT`, which SurrealDB runs
//! in its own serializable transaction - two concurrent allocations can
//! never observe the same value. The counter is seeded from the highest
//! existing `employment_id` at bootstrap (see `db::schema`).

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::error::{DomainError, DomainResult};

/// First employment id handed out on an empty store.
pub const EMPLOYMENT_ID_START: i64 = 1000;

pub const SEQUENCE_TABLE: &str = "sequence";
pub const EMPLOYMENT_ID_KEY: &str = "employment_id";

#[derive(Debug, Deserialize)]
pub(crate) struct Counter {
    pub value: i64,
}

/// Allocate the next employment id. Called exactly once per employee
/// creation.
pub async fn allocate_employment_id(db: &Surreal<Db>) -> DomainResult<i64> {
    let mut result = db
        .query("UPSERT sequence:employment_id SET value = (value ?? $seed) + 1 RETURN AFTER")
        .bind(("seed", EMPLOYMENT_ID_START - 1))
        .await?;
    let allocated: Vec<Counter> = result.take(0)?;
    allocated
        .into_iter()
        .next()
        .map(|counter| counter.value)
        .ok_or_else(|| DomainError::Database("employment id allocation returned nothing".into()))
}

/// Seed the counter from the highest existing employment id when the
/// counter record does not exist yet (stores created before the counter
/// was introduced).
pub async fn seed_employment_ids(db: &Surreal<Db>) -> DomainResult<()> {
    let counter: Option<Counter> = db.select((SEQUENCE_TABLE, EMPLOYMENT_ID_KEY)).await?;
    if counter.is_some() {
        return Ok(());
    }

    let mut result = db
        .query("SELECT VALUE math::max(employment_id) FROM employee GROUP ALL")
        .await?;
    let max: Vec<Option<i64>> = result.take(0)?;
    if let Some(max) = max.into_iter().flatten().next() {
        db.query("UPSERT sequence:employment_id SET value = $value")
            .bind(("value", max))
            .await?
            .check()?;
        tracing::info!(max, "seeded employment id counter from existing employees");
    }
    Ok(())
}
