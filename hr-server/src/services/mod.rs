//! Creation Services
//!
//! One operation per entity, orchestrating natural-key resolution, the
//! sequence allocator, the validation engine, the store write and the
//! headcount maintainer. These are the only callers of those pieces; the
//! store handle is passed explicitly everywhere.

pub mod department;
pub mod employee;
pub mod notify;
pub mod payroll;
pub mod position;
pub mod user;

pub use notify::{CredentialNotifier, Credentials, LogNotifier};
