use chrono::NaiveDate;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use shared_client::ApiClient;
use shared_config::AppConfig;
use shared_models::appointment::Appointment;
use shared_models::error::{ActionResult, ServiceError};

use crate::models::NewAppointment;

#[derive(Debug, Deserialize)]
struct AppointmentsEnvelope {
    #[serde(default)]
    appointments: Option<Vec<Appointment>>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<String>,
}

pub struct AppointmentService {
    client: ApiClient,
    appointment_api: String,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::new(),
            appointment_api: config.appointment_api.clone(),
        }
    }

    /// A doctor's appointments on `date`, optionally narrowed to patients
    /// whose name matches. The doctor is identified by `token`.
    pub async fn get_all_appointments(
        &self,
        date: NaiveDate,
        patient_name: Option<&str>,
        token: &str,
    ) -> Result<Vec<Appointment>, ServiceError> {
        let url = format!(
            "{}/{}/{}/{}",
            self.appointment_api,
            date.format("%Y-%m-%d"),
            patient_name.unwrap_or("null"),
            token
        );
        debug!("Fetching appointments for {}", date);

        let envelope: AppointmentsEnvelope = self.client
            .request(Method::GET, &url, None)
            .await
            .inspect_err(|e| error!("Failed to fetch appointments: {}", e))?;

        Ok(envelope.appointments.unwrap_or_default())
    }

    pub async fn book_appointment(&self, appointment: &NewAppointment, token: &str) -> ActionResult {
        debug!(
            "Booking doctor {} for patient {} at {}",
            appointment.doctor.id, appointment.patient.id, appointment.appointment_time
        );

        let url = format!("{}/{}", self.appointment_api, token);
        match self.client.request::<MessageEnvelope>(Method::POST, &url, Some(json!(appointment))).await {
            Ok(result) => ActionResult::ok(
                result.message.unwrap_or_else(|| "Appointment booked successfully".to_string()),
            ),
            Err(e) => {
                error!("Failed to book appointment: {}", e);
                let fallback = ActionResult::from_error(
                    &e,
                    "Failed to book appointment",
                    "An error occurred while booking the appointment",
                );
                match e.server_message() {
                    Some(message) => ActionResult { message: message.to_string(), ..fallback },
                    None => fallback,
                }
            }
        }
    }
}
