use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDoctor {
    pub id: i64,
    pub name: String,
    #[serde(default, alias = "specialization")]
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPatient {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
}

impl AppointmentStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(AppointmentStatus::Scheduled),
            1 => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub doctor: AppointmentDoctor,
    pub patient: AppointmentPatient,
    pub appointment_time: NaiveDateTime,
    #[serde(default)]
    pub status: i32,
}

impl Appointment {
    pub fn date(&self) -> NaiveDate {
        self.appointment_time.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.appointment_time.time()
    }

    /// Appointments are booked in one-hour slots.
    pub fn end_time(&self) -> NaiveDateTime {
        self.appointment_time + Duration::hours(1)
    }

    pub fn status(&self) -> Option<AppointmentStatus> {
        AppointmentStatus::from_code(self.status)
    }
}
