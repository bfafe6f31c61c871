use shared_models::appointment::{Appointment, AppointmentPatient};
use shared_utils::markup::Element;

/// One line of the doctor's appointment table.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRow {
    patient: AppointmentPatient,
    appointment_id: i64,
}

impl PatientRow {
    pub fn new(appointment: &Appointment) -> Self {
        Self {
            patient: appointment.patient.clone(),
            appointment_id: appointment.id,
        }
    }

    pub fn patient(&self) -> &AppointmentPatient {
        &self.patient
    }

    pub fn element(&self) -> Element {
        Element::new("tr")
            .attr("data-appointment-id", self.appointment_id.to_string())
            .child(Element::new("td").class("patient-id").text(self.patient.id.to_string()))
            .child(Element::new("td").text(&self.patient.name))
            .child(Element::new("td").text(self.patient.phone.clone().unwrap_or_default()))
            .child(Element::new("td").text(self.patient.email.clone().unwrap_or_default()))
    }
}

/// One line of a patient's own appointment list.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRow {
    appointment: Appointment,
}

impl AppointmentRow {
    pub fn new(appointment: Appointment) -> Self {
        Self { appointment }
    }

    pub fn appointment(&self) -> &Appointment {
        &self.appointment
    }

    pub fn element(&self) -> Element {
        let status = self.appointment
            .status()
            .map_or("Unknown", |status| status.label());

        Element::new("tr")
            .attr("data-appointment-id", self.appointment.id.to_string())
            .child(Element::new("td").text(&self.appointment.doctor.name))
            .child(Element::new("td").text(self.appointment.date().format("%Y-%m-%d").to_string()))
            .child(Element::new("td").text(self.appointment.time().format("%H:%M").to_string()))
            .child(Element::new("td").text(status))
    }
}

/// Full-width message row used for empty and failed tables.
pub fn message_row(text: &str, columns: usize) -> Element {
    Element::new("tr").child(
        Element::new("td")
            .class("text-center")
            .attr("colspan", columns.to_string())
            .text(text),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_models::appointment::AppointmentDoctor;

    fn appointment() -> Appointment {
        Appointment {
            id: 11,
            doctor: AppointmentDoctor { id: 3, name: "Dr. Amy Cho".into(), specialty: None },
            patient: AppointmentPatient {
                id: 9,
                name: "Sam Roe".into(),
                phone: Some("5559876543".into()),
                email: None,
            },
            appointment_time: NaiveDate::from_ymd_opt(2031, 5, 2)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            status: 0,
        }
    }

    #[test]
    fn patient_row_has_four_cells() {
        let row = PatientRow::new(&appointment()).element();
        assert_eq!(row.child_elements().count(), 4);
        assert_eq!(row.to_text(), "9\tSam Roe\t5559876543\t");
    }

    #[test]
    fn appointment_row_shows_doctor_date_time_status() {
        let row = AppointmentRow::new(appointment()).element();
        assert_eq!(row.to_text(), "Dr. Amy Cho\t2031-05-02\t10:00\tScheduled");
    }

    #[test]
    fn message_row_spans_the_table() {
        let row = message_row("No Appointments found for today.", 4);
        let cell = row.find("td").unwrap();
        assert_eq!(cell.attr_value("colspan"), Some("4"));
        assert!(cell.has_class("text-center"));
    }
}
