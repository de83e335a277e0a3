//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Repositories set
//! the `created_at`/`updated_at` timestamps and implement the delete
//! rules (department cascades to its positions; positions and users are
//! protected while referenced by an employee). Errors carry the domain
//! taxonomy from [`crate::domain::error`].

pub mod department;
pub mod employee;
pub mod payroll;
pub mod position;
pub mod user;

// Re-exports
pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use payroll::PayrollRepository;
pub use position::PositionRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub use crate::domain::error::{DomainError, DomainResult};

// =============================================================================
// ID Convention: "table:id" strings everywhere outside the store
// =============================================================================
//
// surrealdb::RecordId handles all ids:
//   - parse: let id: RecordId = "position:abc".parse()?;
//   - table name: id.table()
//   - CRUD: db.select(id) / db.delete(id) take RecordId directly
//
// References are always bound as RecordId values so the store keeps real
// record links (FETCH and link comparisons depend on it).

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
