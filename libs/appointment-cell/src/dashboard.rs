use chrono::{NaiveDate, Utc};
use tracing::error;

use shared_config::AppConfig;
use shared_utils::markup::Element;

use crate::services::AppointmentService;
use crate::views::rows::{message_row, PatientRow};

pub const NO_APPOINTMENTS_TODAY: &str = "No Appointments found for today.";
pub const APPOINTMENTS_UNAVAILABLE: &str = "Error loading appointments. Try again later.";

const COLUMNS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<PatientRow>),
    Message(String),
}

/// The doctor's appointment table: one selected date, an optional patient
/// name filter, reloaded on every change.
pub struct DoctorDashboard {
    service: AppointmentService,
    token: String,
    selected_date: NaiveDate,
    patient_name: Option<String>,
    body: TableBody,
}

impl DoctorDashboard {
    pub fn new(config: &AppConfig, token: impl Into<String>) -> Self {
        Self {
            service: AppointmentService::new(config),
            token: token.into(),
            selected_date: today(),
            patient_name: None,
            body: TableBody::Rows(Vec::new()),
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.patient_name.as_deref()
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    /// Search box input; blank clears the name filter.
    pub async fn on_search_input(&mut self, value: &str) {
        let value = value.trim();
        self.patient_name = (!value.is_empty()).then(|| value.to_string());
        self.load_appointments().await;
    }

    pub async fn on_today(&mut self) {
        self.selected_date = today();
        self.load_appointments().await;
    }

    pub async fn on_date_change(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.load_appointments().await;
    }

    pub async fn load_appointments(&mut self) {
        let result = self.service
            .get_all_appointments(self.selected_date, self.patient_name.as_deref(), &self.token)
            .await;

        self.body = match result {
            Ok(appointments) if appointments.is_empty() => {
                TableBody::Message(NO_APPOINTMENTS_TODAY.to_string())
            }
            Ok(appointments) => TableBody::Rows(appointments.iter().map(PatientRow::new).collect()),
            Err(e) => {
                error!("Error loading appointments: {}", e);
                TableBody::Message(APPOINTMENTS_UNAVAILABLE.to_string())
            }
        };
    }

    pub fn render(&self) -> Element {
        let tbody = Element::new("tbody").attr("id", "patientTableBody");
        match &self.body {
            TableBody::Rows(rows) => tbody.children(rows.iter().map(PatientRow::element)),
            TableBody::Message(text) => tbody.child(message_row(text, COLUMNS)),
        }
    }
}

/// Dates are picked in UTC.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
