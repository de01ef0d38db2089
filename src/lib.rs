//! Onboarding compliance tracking for small clinics.
//!
//! Each new hire gets a checklist of statutory onboarding items derived from
//! their employment type and role. The dashboard reports how many critical
//! items are still open and who is exposed.
//!
//! - [`checklist`]: rule table and checklist generation
//! - [`store`]: roster transforms and the store that owns the roster
//! - [`aggregate`]: dashboard statistics and filtered views
//! - [`db`]: key-value persistence of the roster
//! - [`api`]: local JSON API for the browser front end

pub mod aggregate;
pub mod api;
pub mod checklist;
pub mod clock;
pub mod config;
pub mod db;
pub mod models;
pub mod store;
