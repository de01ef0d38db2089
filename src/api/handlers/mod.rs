use std::sync::MutexGuard;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::SharedStore;
use crate::aggregate::{self, EmployeeSummary, FeedEntry, FilterMode, Stats};
use crate::checklist;
use crate::models::*;
use crate::store::{Action, EmployeeStore};

type ApiError = (StatusCode, String);

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    let msg = e.to_string();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

fn lock(store: &SharedStore) -> Result<MutexGuard<'_, EmployeeStore>, ApiError> {
    store.lock().map_err(|_| internal_error("store lock poisoned"))
}

fn employee_view(store: &EmployeeStore, id: Uuid) -> Result<EmployeeView, ApiError> {
    aggregate::find(store.snapshot(), id)
        .cloned()
        .map(EmployeeView::from)
        .ok_or_else(|| not_found("Employee"))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Form data
// ============================================================

pub async fn get_options() -> Json<FormOptions> {
    Json(FormOptions::get())
}

#[derive(Debug, Deserialize)]
pub struct ChecklistQuery {
    #[serde(default)]
    pub employment_type: EmploymentType,
    pub role: String,
    pub note: Option<String>,
}

/// Preview the checklist a new hire would get, without creating anyone.
pub async fn preview_checklist(
    Query(query): Query<ChecklistQuery>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let role = Role::from_parts(&query.role, query.note.as_deref())
        .ok_or_else(|| bad_request(format!("Unknown role: {}", query.role)))?;
    Ok(Json(checklist::generate(query.employment_type, &role)))
}

// ============================================================
// Employees
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ListEmployeesQuery {
    /// Defaults to `all`.
    #[serde(default)]
    pub filter: FilterMode,
}

pub async fn list_employees(
    State(store): State<SharedStore>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, ApiError> {
    tracing::debug!("Listing employees with filter {}", query.filter.as_str());
    let store = lock(&store)?;
    Ok(Json(aggregate::summaries(store.snapshot(), query.filter)))
}

pub async fn create_employee(
    State(store): State<SharedStore>,
    Json(input): Json<CreateEmployeeInput>,
) -> Result<(StatusCode, Json<EmployeeView>), ApiError> {
    input.validate().map_err(bad_request)?;

    let mut store = lock(&store)?;
    let dispatch = store.dispatch(Action::Add(input));
    let id = dispatch
        .created
        .ok_or_else(|| internal_error("add did not report a new id"))?;

    employee_view(&store, id).map(|view| (StatusCode::CREATED, Json(view)))
}

pub async fn get_employee(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeView>, ApiError> {
    let store = lock(&store)?;
    employee_view(&store, id).map(Json)
}

/// Removing an unknown employee is not an error.
pub async fn delete_employee(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut store = lock(&store)?;
    store.dispatch(Action::Remove(id));
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    State(store): State<SharedStore>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<EmployeeView>, ApiError> {
    let mut store = lock(&store)?;
    if !store.snapshot().contains(id) {
        return Err(not_found("Employee"));
    }

    store.dispatch(Action::SetStatus {
        employee_id: id,
        status: input.status,
    });
    employee_view(&store, id).map(Json)
}

pub async fn toggle_task(
    State(store): State<SharedStore>,
    Path((id, task_id)): Path<(Uuid, String)>,
) -> Result<Json<EmployeeView>, ApiError> {
    let mut store = lock(&store)?;
    let employee = aggregate::find(store.snapshot(), id).ok_or_else(|| not_found("Employee"))?;
    if employee.task(&task_id).is_none() {
        return Err(not_found("Task"));
    }

    store.dispatch(Action::ToggleTask {
        employee_id: id,
        task_id,
    });
    employee_view(&store, id).map(Json)
}

// ============================================================
// Dashboard
// ============================================================

pub async fn get_stats(State(store): State<SharedStore>) -> Result<Json<Stats>, ApiError> {
    let store = lock(&store)?;
    Ok(Json(aggregate::stats(store.snapshot())))
}

pub async fn get_feed(State(store): State<SharedStore>) -> Result<Json<Vec<FeedEntry>>, ApiError> {
    let store = lock(&store)?;
    Ok(Json(aggregate::feed_entries(store.snapshot())))
}
