//! Employee use-case service.
//!
//! # Responsibility
//! - Run the employee validation gate before any unit is opened.
//! - Expose list/create/update/delete with the shared error taxonomy.
//!
//! # Invariants
//! - Employee ids are format-checked before lookup.
//! - An unknown café filter lists nothing; an unknown café assignment is
//!   `NotFound`.

use crate::model::employee::{DeletedEmployee, Employee, EmployeeDraft, EmployeeSummary};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::Entity;
use crate::service::error::{ServiceError, ServiceResult};
use crate::validation::{parse_cafe_id, parse_employee_id, validate_employee_draft, ValidationError};
use chrono::{Local, NaiveDate};
use log::debug;

/// Employee service facade over repository implementations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists employees with days worked counted up to the local date.
    pub fn list_employees(&self, cafe: Option<&str>) -> ServiceResult<Vec<EmployeeSummary>> {
        self.list_employees_on(cafe, Local::now().date_naive())
    }

    /// Lists employees with days worked counted up to `today`.
    pub fn list_employees_on(
        &self,
        cafe: Option<&str>,
        today: NaiveDate,
    ) -> ServiceResult<Vec<EmployeeSummary>> {
        let cafe = match cafe.filter(|value| !value.is_empty()) {
            Some(value) => Some(parse_cafe_id(value)?),
            None => None,
        };
        self.repo.list_employees(cafe, today).map_err(Into::into)
    }

    pub fn get_employee(&self, employee_id: &str) -> ServiceResult<Employee> {
        let employee_id = parse_employee_id(employee_id)?;
        self.repo
            .get_employee(&employee_id)?
            .ok_or_else(|| ServiceError::NotFound {
                entity: Entity::Employee,
                id: employee_id.to_string(),
            })
    }

    pub fn create_employee(&self, draft: &EmployeeDraft) -> ServiceResult<Employee> {
        let fields = validate_employee_draft(draft).map_err(rejected)?;
        self.repo.create_employee(&fields).map_err(Into::into)
    }

    /// Replaces an employee; a draft without café clears the assignment.
    pub fn update_employee(
        &self,
        employee_id: &str,
        draft: &EmployeeDraft,
    ) -> ServiceResult<Employee> {
        let employee_id = parse_employee_id(employee_id)?;
        let fields = validate_employee_draft(draft).map_err(rejected)?;
        self.repo
            .update_employee(&employee_id, &fields)
            .map_err(Into::into)
    }

    pub fn delete_employee(&self, employee_id: &str) -> ServiceResult<DeletedEmployee> {
        let employee_id = parse_employee_id(employee_id)?;
        self.repo.delete_employee(&employee_id).map_err(Into::into)
    }
}

fn rejected(err: ValidationError) -> ServiceError {
    debug!(
        "event=employee_validate module=service status=rejected failures={}",
        err.messages.len()
    );
    err.into()
}
