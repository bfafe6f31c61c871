use reqwest::Method;
use serde_json::json;
use tracing::{debug, error};

use shared_client::ApiClient;
use shared_config::AppConfig;
use shared_models::auth::{AdminCredentials, LoginResponse};
use shared_models::error::ServiceError;

pub struct AdminService {
    client: ApiClient,
    admin_api: String,
}

impl AdminService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: ApiClient::new(),
            admin_api: config.admin_api.clone(),
        }
    }

    pub async fn admin_login(&self, credentials: &AdminCredentials) -> Result<LoginResponse, ServiceError> {
        debug!("Logging in admin: {}", credentials.username);

        let url = format!("{}/login", self.admin_api);
        self.client
            .request(Method::POST, &url, Some(json!(credentials)))
            .await
            .inspect_err(|e| error!("Error during admin login: {}", e))
    }
}
