//! Employee roster transforms and the store that owns the roster.
//!
//! The free functions are pure: they borrow a collection and return a new one,
//! leaving the input untouched. Unknown ids are no-ops, never errors.
//!
//! [`EmployeeStore`] owns the current collection and is the single place state
//! changes. Every [`Action`] goes through [`EmployeeStore::dispatch`], which
//! applies the transform and then writes the new roster to storage.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::checklist;
use crate::clock::Clock;
use crate::db::Persistence;
use crate::models::*;

/// Appends a new employee with a freshly generated checklist.
pub fn add(collection: &EmployeeCollection, input: CreateEmployeeInput, id: Uuid) -> EmployeeCollection {
    let tasks = checklist::generate(input.employment_type, &input.role);
    let employee = Employee {
        id,
        name: input.name,
        start_date: input.start_date,
        employment_type: input.employment_type,
        role: input.role,
        status: EmployeeStatus::Active,
        tasks,
    };

    collection
        .iter()
        .cloned()
        .chain(std::iter::once(employee))
        .collect()
}

pub fn remove(collection: &EmployeeCollection, id: Uuid) -> EmployeeCollection {
    collection.iter().filter(|e| e.id != id).cloned().collect()
}

/// Flips one task between pending and completed.
///
/// Completing stamps `completed_date` with `today`; reopening clears it.
pub fn toggle_task(
    collection: &EmployeeCollection,
    employee_id: Uuid,
    task_id: &str,
    today: NaiveDate,
) -> EmployeeCollection {
    map_employee(collection, employee_id, |employee| {
        for task in employee.tasks.iter_mut().filter(|t| t.id == task_id) {
            task.status = task.status.toggled();
            task.completed_date = match task.status {
                TaskStatus::Completed => Some(today),
                TaskStatus::Pending => None,
            };
        }
    })
}

pub fn set_status(
    collection: &EmployeeCollection,
    employee_id: Uuid,
    status: EmployeeStatus,
) -> EmployeeCollection {
    map_employee(collection, employee_id, |employee| employee.status = status)
}

fn map_employee(
    collection: &EmployeeCollection,
    employee_id: Uuid,
    f: impl Fn(&mut Employee),
) -> EmployeeCollection {
    collection
        .iter()
        .map(|employee| {
            let mut employee = employee.clone();
            if employee.id == employee_id {
                f(&mut employee);
            }
            employee
        })
        .collect()
}

/// A state change requested by the UI.
#[derive(Debug, Clone)]
pub enum Action {
    Add(CreateEmployeeInput),
    Remove(Uuid),
    ToggleTask { employee_id: Uuid, task_id: String },
    SetStatus { employee_id: Uuid, status: EmployeeStatus },
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// Id assigned to the employee created by [`Action::Add`].
    pub created: Option<Uuid>,
    /// Whether the new roster reached storage. When `false` the in-memory
    /// roster is still current for the rest of the session.
    pub persisted: bool,
}

/// Owns the roster and persists it after every change.
pub struct EmployeeStore {
    collection: EmployeeCollection,
    persistence: Persistence,
    clock: Box<dyn Clock>,
}

impl EmployeeStore {
    /// Opens the store with whatever roster storage holds (empty if none).
    pub fn open(persistence: Persistence, clock: impl Clock + 'static) -> Self {
        let collection = persistence.load();
        Self {
            collection,
            persistence,
            clock: Box::new(clock),
        }
    }

    pub fn snapshot(&self) -> &EmployeeCollection {
        &self.collection
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let mut created = None;

        let next = match action {
            Action::Add(input) => {
                let id = Uuid::new_v4();
                created = Some(id);
                tracing::info!("Adding employee {} ({})", input.name, id);
                add(&self.collection, input, id)
            }
            Action::Remove(id) => {
                tracing::info!("Removing employee {}", id);
                remove(&self.collection, id)
            }
            Action::ToggleTask {
                employee_id,
                task_id,
            } => {
                tracing::debug!("Toggling task {} for employee {}", task_id, employee_id);
                toggle_task(&self.collection, employee_id, &task_id, self.clock.today())
            }
            Action::SetStatus {
                employee_id,
                status,
            } => {
                tracing::info!("Setting employee {} to {}", employee_id, status.as_str());
                set_status(&self.collection, employee_id, status)
            }
        };

        self.collection = next;

        let persisted = match self.persistence.save(&self.collection) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist employees, keeping in-memory state: {}", e);
                false
            }
        };

        Dispatch { created, persisted }
    }
}
