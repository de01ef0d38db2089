//! Domain models for the clinic onboarding tracker.
//!
//! # Core Concepts
//!
//! - [`Employee`]: A staff member with an onboarding checklist generated at hire time.
//! - [`Task`]: One compliance item on that checklist. Critical tasks carry a statutory penalty.
//! - [`EmployeeCollection`]: The ordered roster, owned by the store.
//! - [`Role`] and [`EmploymentType`]: The two inputs that decide which tasks apply.

mod employee;
mod role;
mod task;

pub use employee::*;
pub use role::*;
pub use task::*;
