pub mod booking;
pub mod dashboard;
pub mod models;
pub mod patient_page;
pub mod services;
pub mod views;

pub use models::*;
pub use services::*;

pub use booking::BookingOverlay;
pub use dashboard::{DoctorDashboard, TableBody};
pub use patient_page::{AppointmentTable, PatientAppointmentsPage};
