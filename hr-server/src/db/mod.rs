//! Database Module
//!
//! Embedded SurrealDB connection and schema bootstrap.

pub mod models;
pub mod repository;
pub mod schema;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::domain::error::DomainResult;

/// Open the embedded store under the work directory, select the
/// namespace and declare the schema (tables, unique indexes, sequence
/// seed). The returned handle is cloned into every repository and
/// service; its lifecycle is owned by the process entry point.
pub async fn connect(work_dir: &str) -> DomainResult<Surreal<Db>> {
    let path = Path::new(work_dir).join("data");
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path).await?;
    db.use_ns("hr").use_db("hr").await?;

    schema::define(&db).await?;

    tracing::info!(work_dir, "database ready (embedded SurrealDB)");
    Ok(db)
}
