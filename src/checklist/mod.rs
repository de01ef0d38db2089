//! Checklist generation.
//!
//! A new hire's checklist is a pure function of their employment type and
//! role. See [`rules`] for the table itself.

pub mod rules;

pub use rules::{rules_for, TaskTemplate};

use crate::models::{EmploymentType, Role, Task, TaskStatus};

impl From<&TaskTemplate> for Task {
    fn from(template: &TaskTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            title: template.title.to_string(),
            description: template.description.to_string(),
            critical: template.critical,
            risk_note: template.risk_note.to_string(),
            status: TaskStatus::Pending,
            completed_date: None,
        }
    }
}

/// Builds the onboarding checklist for a new employee. Every task starts pending.
pub fn generate(employment_type: EmploymentType, role: &Role) -> Vec<Task> {
    rules_for(employment_type, role)
        .into_iter()
        .map(Task::from)
        .collect()
}
