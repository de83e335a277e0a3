//! Database Models

// Serde helpers
pub mod serde_helpers;

// Organization
pub mod department;
pub mod position;

// People
pub mod employee;
pub mod user;

// Compensation
pub mod payroll;

// Re-exports
pub use department::{Department, DepartmentCreate, DepartmentId};
pub use employee::{
    Assignment, Employee, EmployeeId, EmploymentStatus, EMPLOYMENT_STATUS_VALUES,
};
pub use payroll::{Payroll, PayrollCreate};
pub use position::{Position, PositionCreate, PositionId, PositionUpdate};
pub use user::{User, UserId};
