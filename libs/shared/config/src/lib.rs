use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_SESSION_FILE: &str = ".hospital-portal/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub admin_api: String,
    pub doctor_api: String,
    pub patient_api: String,
    pub appointment_api: String,
    pub session_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| {
                warn!("API_BASE_URL not set, using default");
                DEFAULT_API_BASE_URL.to_string()
            });
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        let config = Self {
            admin_api: endpoint_from_env("ADMIN_API", &api_base_url, "admin"),
            doctor_api: endpoint_from_env("DOCTOR_API", &api_base_url, "doctor"),
            patient_api: endpoint_from_env("PATIENT_API", &api_base_url, "patient"),
            appointment_api: endpoint_from_env("APPOINTMENT_API", &api_base_url, "appointments"),
            session_file: session_file_or_default(env::var("PORTAL_SESSION_FILE").ok()),
            api_base_url,
        };

        if !config.is_configured() {
            warn!("Portal not fully configured - endpoint URLs are empty");
        }

        config
    }

    /// All endpoints rooted at `base_url` with the default path layout.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_base_url: base.to_string(),
            admin_api: format!("{}/admin", base),
            doctor_api: format!("{}/doctor", base),
            patient_api: format!("{}/patient", base),
            appointment_api: format!("{}/appointments", base),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.admin_api.is_empty()
            && !self.doctor_api.is_empty()
            && !self.patient_api.is_empty()
            && !self.appointment_api.is_empty()
    }
}

fn endpoint_from_env(key: &str, base: &str, segment: &str) -> String {
    endpoint_or_default(key, env::var(key).ok(), base, segment)
}

fn endpoint_or_default(key: &str, value: Option<String>, base: &str, segment: &str) -> String {
    match value {
        Some(value) => value.trim_end_matches('/').to_string(),
        None => {
            let fallback = format!("{}/{}", base, segment);
            warn!("{} not set, using {}", key, fallback);
            fallback
        }
    }
}

fn session_file_or_default(value: Option<String>) -> PathBuf {
    value.map(PathBuf::from).unwrap_or_else(|| {
        warn!("PORTAL_SESSION_FILE not set, using {}", DEFAULT_SESSION_FILE);
        PathBuf::from(DEFAULT_SESSION_FILE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_lays_out_default_endpoints() {
        let config = AppConfig::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.admin_api, "http://127.0.0.1:9000/admin");
        assert_eq!(config.doctor_api, "http://127.0.0.1:9000/doctor");
        assert_eq!(config.patient_api, "http://127.0.0.1:9000/patient");
        assert_eq!(config.appointment_api, "http://127.0.0.1:9000/appointments");
        assert!(config.is_configured());
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        assert_eq!(
            endpoint_or_default("DOCTOR_API", None, "http://api.test", "doctor"),
            "http://api.test/doctor"
        );
        assert_eq!(
            endpoint_or_default("DOCTOR_API", Some("http://docs.test/".into()), "http://api.test", "doctor"),
            "http://docs.test"
        );
        assert_eq!(session_file_or_default(None), PathBuf::from(DEFAULT_SESSION_FILE));
        assert_eq!(
            session_file_or_default(Some("/tmp/s.json".into())),
            PathBuf::from("/tmp/s.json")
        );
    }
}
