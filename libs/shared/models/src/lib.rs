pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod error;
pub mod patient;
