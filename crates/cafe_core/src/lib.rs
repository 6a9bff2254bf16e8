//! Core consistency logic for cafés and their employees.
//! This crate is the single source of truth for the cross-collection
//! invariants; routing and presentation layers call into it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{bootstrap, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::cafe::{Cafe, CafeDraft, CafeId, CafeKey, CafeSummary, DeletedCafe};
pub use model::employee::{
    DeletedEmployee, Employee, EmployeeDraft, EmployeeFields, EmployeeId, EmployeeSummary, Gender,
};
pub use repo::cafe_repo::{CafeRepository, SqliteCafeRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::ids::{external_to_internal, internal_to_external, internal_to_name};
pub use repo::unit::{AtomicUnit, UnitStage};
pub use repo::{Entity, RepoError, RepoResult};
pub use service::cafe_service::CafeService;
pub use service::employee_service::EmployeeService;
pub use service::error::{ServiceError, ServiceResult};
pub use validation::{
    validate_cafe_id_format, validate_date, validate_email, validate_employee_fields,
    validate_employee_id_format, validate_gender, validate_phone_number, ValidationError, Verdict,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
