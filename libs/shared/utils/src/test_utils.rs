use std::sync::Mutex;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use base64::{Engine as _, engine::general_purpose};
use serde_json::json;

use shared_config::AppConfig;

use crate::interaction::{Interaction, Notice};

pub struct TestConfig {
    pub base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl TestConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::with_base_url(&self.base_url)
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    const SECRET: &'static str = "test-secret-key-for-jwt-signing";

    pub fn create_test_token(sub: &str, role: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": sub,
            "role": role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(Self::SECRET.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(sub: &str, role: &str) -> String {
        Self::create_test_token(sub, role, Some(-1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockPortalResponses;

impl MockPortalResponses {
    pub fn doctor(id: i64, name: &str, specialty: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "email": format!("doctor{}@clinic.test", id),
            "phone": "5551234567",
            "specialty": specialty,
            "availableTimes": ["09:00-10:00", "10:00-11:00"]
        })
    }

    pub fn patient(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Sam Roe",
            "email": "sam@patients.test",
            "phone": "5559876543",
            "address": "12 Elm Street"
        })
    }

    pub fn appointment(id: i64, doctor_id: i64, patient_id: i64, time: &str) -> serde_json::Value {
        json!({
            "id": id,
            "doctor": { "id": doctor_id, "name": "Dr. Jane Hart", "specialty": "Cardiology" },
            "patient": {
                "id": patient_id,
                "name": "Sam Roe",
                "phone": "5559876543",
                "email": "sam@patients.test"
            },
            "appointmentTime": time,
            "status": 0
        })
    }
}

/// Interaction double: answers every confirmation with `answer` and keeps
/// every prompt and notice for later assertions.
pub struct RecordingInteraction {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<Notice>>,
}

impl RecordingInteraction {
    pub fn confirming() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notice log poisoned").clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.notices().last().map(|n| n.message().to_string())
    }
}

impl Interaction for RecordingInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().expect("prompt log poisoned").push(prompt.to_string());
        self.answer
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notice log poisoned").push(notice);
    }
}
