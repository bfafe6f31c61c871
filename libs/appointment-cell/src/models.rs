use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Body of `POST {APPOINTMENT_API}/{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub doctor: EntityRef,
    pub patient: EntityRef,
    pub appointment_time: NaiveDateTime,
    /// 0 = scheduled.
    pub status: i32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Please select a date and an available time.")]
    Incomplete,

    #[error("The doctor is not available at {0}")]
    SlotNotOffered(String),

    #[error("Invalid time slot: {0}")]
    InvalidSlot(String),

    #[error("Patient details are missing. Please log in again.")]
    MissingPatientId,
}

/// Start of a slot label: `"09:00-10:00"` starts at 09:00.
pub fn slot_start(slot: &str) -> Result<NaiveTime, BookingError> {
    let start = slot.split('-').next().unwrap_or_default().trim();
    NaiveTime::parse_from_str(start, "%H:%M")
        .map_err(|_| BookingError::InvalidSlot(slot.to_string()))
}

pub fn appointment_time(date: NaiveDate, slot: &str) -> Result<NaiveDateTime, BookingError> {
    Ok(date.and_time(slot_start(slot)?))
}
