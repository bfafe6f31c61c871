pub mod dashboard;
pub mod models;
pub mod services;
pub mod views;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;

pub use dashboard::{DirectoryContent, DoctorDirectory};
pub use views::card::{CardAction, CardOutcome, DoctorCard};
