use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use shared_client::ApiClient;
use shared_config::AppConfig;
use shared_models::appointment::Appointment;
use shared_models::auth::{EmailCredentials, LoginResponse};
use shared_models::error::ServiceError;
use shared_models::patient::Patient;

use crate::models::{AppointmentFilter, PatientSignup};

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatientEnvelope {
    #[serde(default)]
    patient: Option<Patient>,
}

#[derive(Debug, Deserialize)]
struct AppointmentsEnvelope {
    #[serde(default)]
    appointments: Option<Vec<Appointment>>,
}

pub struct PatientService {
    client: ApiClient,
    patient_api: String,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::new(),
            patient_api: config.patient_api.clone(),
        }
    }

    /// Register a patient. Failures are returned to the caller, carrying the
    /// server's message when it sent one.
    pub async fn patient_signup(&self, data: &PatientSignup) -> Result<String, ServiceError> {
        debug!("Signing up patient: {}", data.email);

        let url = format!("{}/signup", self.patient_api);
        let result: MessageEnvelope = self.client
            .request(Method::POST, &url, Some(json!(data)))
            .await
            .inspect_err(|e| error!("Error during patient signup: {}", e))?;

        Ok(result.message.unwrap_or_else(|| "Patient signed up successfully".to_string()))
    }

    pub async fn patient_login(&self, credentials: &EmailCredentials) -> Result<LoginResponse, ServiceError> {
        debug!("Logging in patient: {}", credentials.email);

        let url = format!("{}/login", self.patient_api);
        self.client
            .request(Method::POST, &url, Some(json!(credentials)))
            .await
            .inspect_err(|e| error!("Error during patient login: {}", e))
    }

    /// Patient owning `token`, or `None` when the request fails or the body
    /// has no `patient`.
    pub async fn get_patient_data(&self, token: &str) -> Option<Patient> {
        let url = format!("{}/{}", self.patient_api, token);

        match self.client.request::<PatientEnvelope>(Method::GET, &url, None).await {
            Ok(envelope) => envelope.patient,
            Err(e) => {
                error!("Failed to fetch patient data: {}", e);
                None
            }
        }
    }

    /// `None` signals a failed request; a body without `appointments` is an
    /// empty list.
    pub async fn get_patient_appointments(
        &self,
        id: i64,
        user: &str,
        token: &str,
    ) -> Option<Vec<Appointment>> {
        let url = format!("{}/{}/{}/{}", self.patient_api, id, user, token);

        match self.client.request::<AppointmentsEnvelope>(Method::GET, &url, None).await {
            Ok(envelope) => Some(envelope.appointments.unwrap_or_default()),
            Err(e) => {
                error!("Failed to fetch appointments: {}", e);
                None
            }
        }
    }

    pub async fn filter_appointments(&self, filter: &AppointmentFilter, token: &str) -> Vec<Appointment> {
        let url = format!(
            "{}/filter/{}/{}/{}",
            self.patient_api,
            filter.condition_segment(),
            filter.name_segment(),
            token
        );

        match self.client.request::<AppointmentsEnvelope>(Method::GET, &url, None).await {
            Ok(envelope) => envelope.appointments.unwrap_or_default(),
            Err(e) => {
                error!("Failed to fetch filtered appointments: {}", e);
                Vec::new()
            }
        }
    }
}
