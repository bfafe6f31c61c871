use tracing::{error, warn};

use patient_cell::models::AppointmentFilter;
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_models::appointment::Appointment;
use shared_models::auth::Session;
use shared_models::patient::Patient;
use shared_utils::markup::Element;

use crate::views::rows::{message_row, AppointmentRow};

pub const NO_PATIENT_APPOINTMENTS: &str = "No appointments found.";
pub const PATIENT_APPOINTMENTS_UNAVAILABLE: &str = "Unable to load your appointments. Please log in again.";

const COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentTable {
    Rows(Vec<AppointmentRow>),
    Message(String),
}

/// A logged-in patient's own appointments, with condition and doctor-name
/// filters.
pub struct PatientAppointmentsPage {
    patients: PatientService,
    session: Session,
    patient: Option<Patient>,
    table: AppointmentTable,
}

impl PatientAppointmentsPage {
    pub fn new(config: &AppConfig, session: Session) -> Self {
        Self {
            patients: PatientService::new(config),
            session,
            patient: None,
            table: AppointmentTable::Rows(Vec::new()),
        }
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn table(&self) -> &AppointmentTable {
        &self.table
    }

    /// Resolve the patient behind the session token, then list their
    /// appointments.
    pub async fn load(&mut self) {
        let Some(token) = self.session.token() else {
            warn!("Patient appointments requested without a session token");
            self.table = unavailable();
            return;
        };

        self.patient = self.patients.get_patient_data(token).await;
        let Some(id) = self.patient.as_ref().and_then(|p| p.id) else {
            self.table = unavailable();
            return;
        };

        self.table = match self.patients.get_patient_appointments(id, "patient", token).await {
            Some(appointments) => rows_or_placeholder(appointments),
            None => {
                error!("Appointments for patient {} could not be loaded", id);
                unavailable()
            }
        };
    }

    pub async fn filter(&mut self, condition: &str, name: &str) {
        let Some(token) = self.session.token() else {
            self.table = unavailable();
            return;
        };

        let filter = AppointmentFilter::from_inputs(condition, name);
        let appointments = self.patients.filter_appointments(&filter, token).await;
        self.table = rows_or_placeholder(appointments);
    }

    pub fn render(&self) -> Element {
        let tbody = Element::new("tbody").attr("id", "patientTableBody");
        match &self.table {
            AppointmentTable::Rows(rows) => tbody.children(rows.iter().map(AppointmentRow::element)),
            AppointmentTable::Message(text) => tbody.child(message_row(text, COLUMNS)),
        }
    }
}

fn rows_or_placeholder(appointments: Vec<Appointment>) -> AppointmentTable {
    if appointments.is_empty() {
        AppointmentTable::Message(NO_PATIENT_APPOINTMENTS.to_string())
    } else {
        AppointmentTable::Rows(appointments.into_iter().map(AppointmentRow::new).collect())
    }
}

fn unavailable() -> AppointmentTable {
    AppointmentTable::Message(PATIENT_APPOINTMENTS_UNAVAILABLE.to_string())
}
