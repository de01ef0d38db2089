//! Dashboard statistics and filtered views derived from the roster.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::*;

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_active: usize,
    /// Critical tasks still pending, across every employee.
    pub pending_critical_count: usize,
    pub part_time_count: usize,
}

/// Which employees a list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    /// Employees with at least one pending critical task.
    AtRisk,
    PartTime,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::AtRisk => "at_risk",
            Self::PartTime => "part_time",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "at_risk" => Some(Self::AtRisk),
            "part_time" => Some(Self::PartTime),
            _ => None,
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Self::All => true,
            Self::AtRisk => employee.is_at_risk(),
            Self::PartTime => employee.is_part_time(),
        }
    }
}

pub fn stats(collection: &EmployeeCollection) -> Stats {
    collection.iter().fold(Stats::default(), |mut acc, employee| {
        if employee.status == EmployeeStatus::Active {
            acc.total_active += 1;
        }
        if employee.is_part_time() {
            acc.part_time_count += 1;
        }
        acc.pending_critical_count += employee.pending_critical_count();
        acc
    })
}

pub fn filter(collection: &EmployeeCollection, mode: FilterMode) -> Vec<&Employee> {
    collection.iter().filter(|e| mode.matches(e)).collect()
}

/// Every pending critical task, paired with its employee, in roster order.
pub fn pending_critical_feed(collection: &EmployeeCollection) -> Vec<(&Employee, &Task)> {
    collection
        .iter()
        .flat_map(|employee| employee.pending_critical().map(move |task| (employee, task)))
        .collect()
}

pub fn find(collection: &EmployeeCollection, id: Uuid) -> Option<&Employee> {
    collection.get(id)
}

/// One row of the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: Uuid,
    pub name: String,
    pub employment_type: EmploymentType,
    pub display_role: String,
    pub start_date: NaiveDate,
    pub status: EmployeeStatus,
    pub pending_critical_count: usize,
    pub completed_count: usize,
    pub task_count: usize,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            employment_type: employee.employment_type,
            display_role: employee.display_role(),
            start_date: employee.start_date,
            status: employee.status,
            pending_critical_count: employee.pending_critical_count(),
            completed_count: employee.completed_count(),
            task_count: employee.tasks.len(),
        }
    }
}

pub fn summaries(collection: &EmployeeCollection, mode: FilterMode) -> Vec<EmployeeSummary> {
    filter(collection, mode)
        .into_iter()
        .map(EmployeeSummary::from)
        .collect()
}

/// A feed entry flattened for the action list on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub employee_id: Uuid,
    pub employee_name: String,
    pub employment_type: EmploymentType,
    pub task: Task,
}

pub fn feed_entries(collection: &EmployeeCollection) -> Vec<FeedEntry> {
    pending_critical_feed(collection)
        .into_iter()
        .map(|(employee, task)| FeedEntry {
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            employment_type: employee.employment_type,
            task: task.clone(),
        })
        .collect()
}
