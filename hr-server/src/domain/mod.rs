//! Domain core: entity schemas, validation, wire mapping and the
//! consistency helpers the document store does not provide natively.
//!
//! # Structure
//!
//! - [`fields`] - static field metadata attached to each entity
//! - [`wire`] - schema-driven wire mapper (`to_wire` / `from_wire`)
//! - [`validate`] - validation engine run before every persist
//! - [`sequence`] - atomic employment id allocator
//! - [`headcount`] - department headcount aggregate maintainer
//! - [`error`] - typed domain error taxonomy

pub mod error;
pub mod fields;
pub mod headcount;
pub mod sequence;
pub mod validate;
pub mod wire;

pub use error::{DomainError, DomainResult};
pub use fields::{EntitySchema, FieldDef, FieldKind};
pub use validate::{ValidationReport, Violation};
