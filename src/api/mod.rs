mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::store::EmployeeStore;

/// The store shared between request handlers.
pub type SharedStore = Arc<Mutex<EmployeeStore>>;

pub fn create_router(store: EmployeeStore) -> Router {
    create_router_with_config(store, &AppConfig::default())
}

pub fn create_router_with_config(store: EmployeeStore, config: &AppConfig) -> Router {
    let state: SharedStore = Arc::new(Mutex::new(store));

    let api = Router::new()
        // Form data
        .route("/options", get(handlers::get_options))
        .route("/checklist", get(handlers::preview_checklist))
        // Employees
        .route("/employees", get(handlers::list_employees))
        .route("/employees", post(handlers::create_employee))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}", delete(handlers::delete_employee))
        .route("/employees/{id}/status", put(handlers::update_status))
        .route(
            "/employees/{id}/tasks/{task_id}/toggle",
            post(handlers::toggle_task),
        )
        // Dashboard
        .route("/stats", get(handlers::get_stats))
        .route("/feed", get(handlers::get_feed))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    match &config.cors_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
        None => CorsLayer::permissive(),
    }
}
