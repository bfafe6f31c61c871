use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use shared_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::{EmailCredentials, LoginResponse};
use shared_models::doctor::Doctor;
use shared_models::error::{ActionResult, ServiceError};

use crate::models::{DoctorFilter, DoctorList, NewDoctor};

#[derive(Debug, Deserialize)]
struct DoctorsEnvelope {
    #[serde(default)]
    doctors: Option<Vec<Doctor>>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<String>,
}

pub struct DoctorService {
    client: ApiClient,
    doctor_api: String,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::new(),
            doctor_api: config.doctor_api.clone(),
        }
    }

    /// Every doctor, keeping the failure visible to controllers that
    /// render it differently from an empty directory.
    pub async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ServiceError> {
        debug!("Fetching doctor directory");

        let envelope: DoctorsEnvelope = self.client
            .request(Method::GET, &self.doctor_api, None)
            .await?;

        Ok(envelope.doctors.unwrap_or_default())
    }

    /// Every doctor; an empty list on any failure. For callers with no use
    /// for the failure itself; [`DoctorDirectory`](crate::DoctorDirectory)
    /// uses [`fetch_doctors`](Self::fetch_doctors).
    pub async fn get_doctors(&self) -> DoctorList {
        match self.fetch_doctors().await {
            Ok(doctors) => DoctorList { doctors },
            Err(e) => {
                error!("Failed to fetch doctors: {}", e);
                DoctorList::default()
            }
        }
    }

    pub async fn fetch_filtered(&self, filter: &DoctorFilter) -> Result<Vec<Doctor>, ServiceError> {
        debug!("Filtering doctors with: {:?}", filter);

        let url = format!("{}/filter/{}", self.doctor_api, filter.path());
        let envelope: DoctorsEnvelope = self.client
            .request(Method::GET, &url, None)
            .await?;

        Ok(envelope.doctors.unwrap_or_default())
    }

    /// Doctors matching `filter`; an empty list on any failure. The
    /// directory uses [`fetch_filtered`](Self::fetch_filtered).
    pub async fn filter_doctors(&self, filter: &DoctorFilter) -> DoctorList {
        match self.fetch_filtered(filter).await {
            Ok(doctors) => DoctorList { doctors },
            Err(e) => {
                error!("Failed to filter doctors: {}", e);
                DoctorList::default()
            }
        }
    }

    pub async fn delete_doctor(&self, id: i64, token: &str) -> ActionResult {
        debug!("Deleting doctor: {}", id);

        let url = format!("{}/{}/{}", self.doctor_api, id, token);
        match self.client.request::<MessageEnvelope>(Method::DELETE, &url, None).await {
            Ok(result) => ActionResult::ok(
                result.message.unwrap_or_else(|| "Doctor deleted successfully".to_string()),
            ),
            Err(e) => {
                error!("Failed to delete doctor: {}", e);
                ActionResult::from_error(
                    &e,
                    "Failed to delete doctor",
                    "An error occurred while deleting the doctor",
                )
            }
        }
    }

    pub async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> ActionResult {
        debug!("Saving doctor: {}", doctor.email);

        let url = format!("{}/{}", self.doctor_api, token);
        match self.client.request::<MessageEnvelope>(Method::POST, &url, Some(json!(doctor))).await {
            Ok(result) => ActionResult::ok(
                result.message.unwrap_or_else(|| "Doctor saved successfully".to_string()),
            ),
            Err(e) => {
                error!("Failed to save doctor: {}", e);
                ActionResult::from_error(
                    &e,
                    "Failed to save doctor",
                    "An error occurred while saving the doctor",
                )
            }
        }
    }

    pub async fn doctor_login(&self, credentials: &EmailCredentials) -> Result<LoginResponse, ServiceError> {
        debug!("Logging in doctor: {}", credentials.email);

        let url = format!("{}/doctor/login", self.doctor_api);
        self.client
            .request(Method::POST, &url, Some(json!(credentials)))
            .await
            .inspect_err(|e| error!("Error during doctor login: {}", e))
    }
}
