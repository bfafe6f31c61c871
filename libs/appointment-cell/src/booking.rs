use chrono::NaiveDate;
use tracing::info;

use shared_models::auth::Session;
use shared_models::doctor::Doctor;
use shared_models::error::{ActionResult, FailureReason};
use shared_models::patient::Patient;
use shared_utils::interaction::{Interaction, Notice};
use shared_utils::markup::Element;

use crate::models::{appointment_time, BookingError, EntityRef, NewAppointment};
use crate::services::AppointmentService;

pub const BOOKING_SESSION_REQUIRED: &str = "You need to log in to book an appointment.";

/// Booking dialog opened from a doctor card for a logged-in patient.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOverlay {
    doctor: Doctor,
    patient: Patient,
}

impl BookingOverlay {
    pub fn new(doctor: Doctor, patient: Patient) -> Self {
        Self { doctor, patient }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn element(&self) -> Element {
        let slots = self.doctor.available_times
            .iter()
            .map(|slot| Element::new("option").attr("value", slot.as_str()).text(slot));

        Element::new("div")
            .class("modalApp")
            .child(Element::new("h2").text("Book an Appointment"))
            .child(Element::new("p").text(format!("Patient: {}", self.patient.name)))
            .child(Element::new("p").text(format!("Doctor: {}", self.doctor.name)))
            .child(Element::new("p").text(format!("Specialization: {}", self.doctor.specialty)))
            .child(Element::new("p").text(format!("Email: {}", self.doctor.email)))
            .child(Element::new("input").attr("type", "date").attr("id", "appointment-date"))
            .child(Element::new("select").attr("id", "appointment-time").children(slots))
            .child(Element::new("button").class("confirm-booking").text("Confirm Booking"))
    }

    /// Build the appointment for `date` at the start of `slot`.
    pub fn appointment(&self, date: Option<NaiveDate>, slot: &str) -> Result<NewAppointment, BookingError> {
        let slot = slot.trim();
        let date = date.ok_or(BookingError::Incomplete)?;
        if slot.is_empty() {
            return Err(BookingError::Incomplete);
        }
        if !self.doctor.offers_slot(slot) {
            return Err(BookingError::SlotNotOffered(slot.to_string()));
        }
        let patient_id = self.patient.id.ok_or(BookingError::MissingPatientId)?;

        Ok(NewAppointment {
            doctor: EntityRef { id: self.doctor.id },
            patient: EntityRef { id: patient_id },
            appointment_time: appointment_time(date, slot)?,
            status: 0,
        })
    }

    pub async fn submit(
        &self,
        date: Option<NaiveDate>,
        slot: &str,
        session: &Session,
        service: &AppointmentService,
        ui: &dyn Interaction,
    ) -> ActionResult {
        let appointment = match self.appointment(date, slot) {
            Ok(appointment) => appointment,
            Err(e) => {
                let message = e.to_string();
                ui.notify(Notice::error(message.clone()));
                return ActionResult::failed(FailureReason::Validation, message);
            }
        };

        let Some(token) = session.token() else {
            ui.notify(Notice::error(BOOKING_SESSION_REQUIRED));
            return ActionResult::failed(FailureReason::MissingSession, BOOKING_SESSION_REQUIRED);
        };

        let result = service.book_appointment(&appointment, token).await;
        if result.success {
            info!("Appointment booked with doctor {}", self.doctor.id);
            ui.notify(Notice::info(result.message.clone()));
        } else {
            ui.notify(Notice::error(result.message.clone()));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn overlay(patient_id: Option<i64>) -> BookingOverlay {
        BookingOverlay::new(
            Doctor {
                id: 3,
                name: "Dr. Amy Cho".into(),
                email: "amy@clinic.test".into(),
                phone: None,
                specialty: "Pediatrics".into(),
                available_times: vec!["09:00-10:00".into(), "10:00-11:00".into()],
            },
            Patient {
                id: patient_id,
                name: "Sam Roe".into(),
                email: "sam@patients.test".into(),
                phone: None,
                address: None,
            },
        )
    }

    #[test]
    fn appointment_requires_a_doctor_slot() {
        let date = NaiveDate::from_ymd_opt(2031, 5, 2);
        let overlay = overlay(Some(9));

        assert_matches!(overlay.appointment(None, "09:00-10:00"), Err(BookingError::Incomplete));
        assert_matches!(overlay.appointment(date, ""), Err(BookingError::Incomplete));
        assert_matches!(
            overlay.appointment(date, "15:00-16:00"),
            Err(BookingError::SlotNotOffered(_))
        );

        let appointment = overlay.appointment(date, "10:00-11:00").unwrap();
        assert_eq!(appointment.patient.id, 9);
        assert_eq!(appointment.appointment_time.to_string(), "2031-05-02 10:00:00");
    }

    #[test]
    fn appointment_needs_patient_id() {
        let date = NaiveDate::from_ymd_opt(2031, 5, 2);
        assert_matches!(
            overlay(None).appointment(date, "09:00-10:00"),
            Err(BookingError::MissingPatientId)
        );
    }

    #[test]
    fn overlay_lists_the_doctor_slots() {
        let element = overlay(Some(9)).element();
        let select = element.find("select").unwrap();
        assert_eq!(select.child_elements().count(), 2);
        assert!(element.text_content().contains("Patient: Sam Roe"));
    }
}
