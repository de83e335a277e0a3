//! HR Server - organizational records over an embedded document store
//!
//! # Architecture overview
//!
//! The store is schemaless; everything it does not enforce natively
//! lives in the [`domain`] core: declared field constraints, uniqueness
//! and immutability checks, the monotonic employment id allocator, the
//! department headcount aggregate and the schema-driven wire mapper.
//!
//! # Module structure
//!
//! ```text
//! hr-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── api/           # HTTP routes and thin handlers
//! ├── domain/        # validation engine, wire mapper, allocator, headcount
//! ├── services/      # creation services (the only writers)
//! ├── db/            # embedded SurrealDB: models, repositories, schema
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod domain;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::domain::{DomainError, DomainResult};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
