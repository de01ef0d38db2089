use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::role::{EmploymentType, Role};
use super::task::Task;

/// An employee record with its onboarding checklist.
///
/// The checklist is generated once, when the employee is added, from the
/// employment type and role. Its membership never changes afterwards; only
/// the status of individual tasks does.
///
/// The display label of the role is derived on read (see [`Employee::display_role`])
/// rather than stored, so it can never drift from `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub employment_type: EmploymentType,
    pub role: Role,
    pub status: EmployeeStatus,
    pub tasks: Vec<Task>,
}

impl Employee {
    pub fn display_role(&self) -> String {
        self.role.display_label()
    }

    pub fn is_part_time(&self) -> bool {
        self.employment_type == EmploymentType::PartTime
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    /// Critical tasks still pending, in checklist order.
    pub fn pending_critical(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.is_at_risk())
    }

    pub fn pending_critical_count(&self) -> usize {
        self.pending_critical().count()
    }

    pub fn is_at_risk(&self) -> bool {
        self.tasks.iter().any(Task::is_at_risk)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_pending()).count()
    }
}

/// Employment status of an employee.
///
/// - `Active`: currently employed
/// - `Resigned`: left the clinic; the record and checklist are kept
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Resigned,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resigned => "resigned",
        }
    }
}

/// Input for adding a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    pub start_date: NaiveDate,
    /// Defaults to full-time if not specified.
    #[serde(default)]
    pub employment_type: EmploymentType,
    pub role: Role,
}

impl CreateEmployeeInput {
    /// Required-field checks performed by callers before the input reaches the store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if let Role::Other(note) = &self.role {
            if note.trim().is_empty() {
                return Err(ValidationError::MissingRoleNote);
            }
        }
        Ok(())
    }
}

/// Rejected employee input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("a job title note is required when role is 'other'")]
    MissingRoleNote,
}

/// Input for changing an employee's employment status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusInput {
    pub status: EmployeeStatus,
}

/// An employee as presented to the UI, with its derived fields.
///
/// The `employee` fields are flattened into the JSON response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    pub display_role: String,
    pub pending_critical_count: usize,
}

impl From<Employee> for EmployeeView {
    fn from(employee: Employee) -> Self {
        Self {
            display_role: employee.display_role(),
            pending_critical_count: employee.pending_critical_count(),
            employee,
        }
    }
}

/// Ordered set of employees, in insertion order.
///
/// Serialized as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeCollection {
    employees: Vec<Employee>,
}

impl EmployeeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.employees
    }
}

impl From<Vec<Employee>> for EmployeeCollection {
    fn from(employees: Vec<Employee>) -> Self {
        Self { employees }
    }
}

impl FromIterator<Employee> for EmployeeCollection {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self {
            employees: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EmployeeCollection {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}

impl IntoIterator for EmployeeCollection {
    type Item = Employee;
    type IntoIter = std::vec::IntoIter<Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.into_iter()
    }
}
