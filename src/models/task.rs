use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single compliance item on an employee's onboarding checklist.
///
/// Tasks are created in bulk when the employee is added and are never added
/// or removed afterwards. Only `status` and `completed_date` change, and only
/// through a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Template id (e.g. `ob-1`), unique within one employee's checklist.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Whether skipping this item carries a statutory penalty.
    pub critical: bool,
    /// The penalty or dispute the clinic is exposed to while pending.
    pub risk_note: String,
    pub status: TaskStatus,
    pub completed_date: Option<NaiveDate>,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Critical and still pending.
    pub fn is_at_risk(&self) -> bool {
        self.critical && self.is_pending()
    }
}

/// The completion status of a checklist task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}
