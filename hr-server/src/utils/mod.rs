//! Utility module - shared helpers and types
//!
//! - [`AppError`] - application error type and HTTP mapping
//! - [`AppResponse`] - unified API response structure
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{ok, ok_with_message};
pub use error::{AppError, AppResponse, AppResult};
