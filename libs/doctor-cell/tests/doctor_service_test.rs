use assert_matches::assert_matches;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, method, path};

use doctor_cell::models::{DoctorFilter, DoctorForm};
use doctor_cell::services::DoctorService;
use shared_models::auth::EmailCredentials;
use shared_models::error::{FailureReason, ServiceError};
use shared_utils::test_utils::{MockPortalResponses, TestConfig};

fn service_for(mock_server: &MockServer) -> DoctorService {
    DoctorService::new(&TestConfig::new(&mock_server.uri()).to_app_config())
}

#[tokio::test]
async fn test_get_doctors_returns_directory() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctors": [
                MockPortalResponses::doctor(1, "Dr. Jane Hart", "Cardiology"),
                MockPortalResponses::doctor(2, "Dr. Omar Reyes", "Dermatology")
            ]
        })))
        .mount(&mock_server)
        .await;

    let list = service_for(&mock_server).get_doctors().await;

    assert_eq!(list.doctors.len(), 2);
    assert_eq!(list.doctors[1].specialty, "Dermatology");
    assert_eq!(list.doctors[0].available_times, vec!["09:00-10:00", "10:00-11:00"]);
}

#[tokio::test]
async fn test_get_doctors_missing_collection_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "doctors": null })))
        .mount(&mock_server)
        .await;

    let list = service_for(&mock_server).get_doctors().await;
    assert!(list.doctors.is_empty());
}

#[tokio::test]
async fn test_get_doctors_server_error_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    assert!(service.get_doctors().await.doctors.is_empty());
    assert_matches!(
        service.fetch_doctors().await,
        Err(ServiceError::Status { status: 500, .. })
    );
}

#[tokio::test]
async fn test_get_doctors_malformed_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    assert!(service_for(&mock_server).get_doctors().await.doctors.is_empty());
}

#[tokio::test]
async fn test_filter_doctors_sends_null_for_blank_criteria() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctor/filter/Jane/null/Cardiology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctors": [MockPortalResponses::doctor(1, "Dr. Jane Hart", "Cardiology")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = DoctorFilter::from_inputs("Jane", "", "Cardiology");
    let list = service_for(&mock_server).filter_doctors(&filter).await;

    assert_eq!(list.doctors.len(), 1);
    assert_eq!(list.doctors[0].name, "Dr. Jane Hart");
}

#[tokio::test]
async fn test_delete_doctor_uses_id_and_token_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/doctor/4/admintoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Doctor removed" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).delete_doctor(4, "admintoken").await;

    assert!(result.success);
    assert_eq!(result.message, "Doctor removed");
}

#[tokio::test]
async fn test_delete_doctor_rejection_reports_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/doctor/4/admintoken"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = service_for(&mock_server).delete_doctor(4, "admintoken").await;

    assert!(!result.success);
    assert_eq!(result.message, "Failed to delete doctor");
    assert_eq!(result.reason, Some(FailureReason::Unauthorized));
}

#[tokio::test]
async fn test_save_doctor_posts_payload_with_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/doctor/admintoken"))
        .and(body_json(json!({
            "name": "Dr. Jane Hart",
            "email": "jane@clinic.test",
            "phone": "5551234567",
            "password": "changeme",
            "specialty": "Cardiology",
            "availableTimes": ["09:00-10:00"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let doctor = DoctorForm {
        name: "Dr. Jane Hart".into(),
        email: "jane@clinic.test".into(),
        phone: "5551234567".into(),
        password: "changeme".into(),
        specialty: "Cardiology".into(),
        available_times: vec!["09:00-10:00".into()],
    }
    .validate()
    .unwrap();

    let result = service_for(&mock_server).save_doctor(&doctor, "admintoken").await;

    assert!(result.success);
    assert_eq!(result.message, "Doctor saved successfully");
}

#[tokio::test]
async fn test_save_doctor_unreachable_backend() {
    let config = TestConfig::new("http://127.0.0.1:1").to_app_config();
    let doctor = DoctorForm {
        name: "Dr. Jane Hart".into(),
        email: "jane@clinic.test".into(),
        phone: "5551234567".into(),
        password: "changeme".into(),
        specialty: "Cardiology".into(),
        available_times: vec!["09:00-10:00".into()],
    }
    .validate()
    .unwrap();

    let result = DoctorService::new(&config).save_doctor(&doctor, "admintoken").await;

    assert!(!result.success);
    assert_eq!(result.message, "An error occurred while saving the doctor");
    assert_eq!(result.reason, Some(FailureReason::Transport));
}

#[tokio::test]
async fn test_doctor_login_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/doctor/doctor/login"))
        .and(body_json(json!({ "email": "jane@clinic.test", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "doctortoken" })))
        .mount(&mock_server)
        .await;

    let credentials = EmailCredentials {
        email: "jane@clinic.test".into(),
        password: "pw".into(),
    };
    let response = service_for(&mock_server).doctor_login(&credentials).await.unwrap();

    assert_eq!(response.token, "doctortoken");
}
