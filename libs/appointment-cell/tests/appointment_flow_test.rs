use chrono::NaiveDate;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, method, path};

use appointment_cell::booking::BookingOverlay;
use appointment_cell::dashboard::{
    DoctorDashboard, TableBody, APPOINTMENTS_UNAVAILABLE, NO_APPOINTMENTS_TODAY,
};
use appointment_cell::patient_page::{
    AppointmentTable, PatientAppointmentsPage, NO_PATIENT_APPOINTMENTS,
    PATIENT_APPOINTMENTS_UNAVAILABLE,
};
use appointment_cell::services::AppointmentService;
use shared_models::auth::{Role, Session};
use shared_models::doctor::Doctor;
use shared_models::error::FailureReason;
use shared_models::patient::Patient;
use shared_utils::interaction::Notice;
use shared_utils::test_utils::{MockPortalResponses, RecordingInteraction, TestConfig};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2031, 5, 2).unwrap()
}

fn logged_patient(token: &str) -> Session {
    Session::new(Some(Role::LoggedPatient), Some(token.to_string()))
}

#[tokio::test]
async fn test_dashboard_lists_patients_for_selected_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments/2031-05-02/null/doctortoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointments": [
                MockPortalResponses::appointment(1, 3, 9, "2031-05-02T09:00:00"),
                MockPortalResponses::appointment(2, 3, 10, "2031-05-02T10:00:00")
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut dashboard = DoctorDashboard::new(&config, "doctortoken");
    dashboard.on_date_change(date()).await;

    let TableBody::Rows(rows) = dashboard.body() else {
        panic!("expected rows, got {:?}", dashboard.body());
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].patient().id, 10);
    assert_eq!(dashboard.render().child_elements().count(), 2);
}

#[tokio::test]
async fn test_dashboard_search_narrows_by_patient_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments/2031-05-02/null/doctortoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "appointments": [] })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/appointments/2031-05-02/Sam/doctortoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointments": [MockPortalResponses::appointment(1, 3, 9, "2031-05-02T09:00:00")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut dashboard = DoctorDashboard::new(&config, "doctortoken");
    dashboard.on_date_change(date()).await;
    assert_eq!(dashboard.body(), &TableBody::Message(NO_APPOINTMENTS_TODAY.to_string()));

    dashboard.on_search_input("  Sam ").await;
    assert_eq!(dashboard.patient_name(), Some("Sam"));
    assert!(matches!(dashboard.body(), TableBody::Rows(rows) if rows.len() == 1));

    dashboard.on_search_input("").await;
    assert_eq!(dashboard.patient_name(), None);
}

#[tokio::test]
async fn test_dashboard_failure_shows_error_row() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/appointments/2031-05-02/null/doctortoken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut dashboard = DoctorDashboard::new(&config, "doctortoken");
    dashboard.on_date_change(date()).await;

    assert_eq!(dashboard.body(), &TableBody::Message(APPOINTMENTS_UNAVAILABLE.to_string()));
    assert_eq!(dashboard.render().to_text(), APPOINTMENTS_UNAVAILABLE);
}

#[tokio::test]
async fn test_patient_page_loads_own_appointments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patient/pt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": MockPortalResponses::patient(9)
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/patient/9/patient/pt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "appointments": [MockPortalResponses::appointment(5, 3, 9, "2031-05-02T09:00:00")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut page = PatientAppointmentsPage::new(&config, logged_patient("pt-token"));
    page.load().await;

    assert_eq!(page.patient().and_then(|p| p.id), Some(9));
    assert!(matches!(page.table(), AppointmentTable::Rows(rows) if rows.len() == 1));
    assert_eq!(page.render().to_text(), "Dr. Jane Hart\t2031-05-02\t09:00\tScheduled");
}

#[tokio::test]
async fn test_patient_page_without_patient_shows_relogin_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patient/pt-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut page = PatientAppointmentsPage::new(&config, logged_patient("pt-token"));
    page.load().await;

    assert_eq!(
        page.table(),
        &AppointmentTable::Message(PATIENT_APPOINTMENTS_UNAVAILABLE.to_string())
    );
}

#[tokio::test]
async fn test_patient_page_filter_with_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patient/filter/past/Hart/pt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "appointments": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let mut page = PatientAppointmentsPage::new(&config, logged_patient("pt-token"));
    page.filter("past", "Hart").await;

    assert_eq!(page.table(), &AppointmentTable::Message(NO_PATIENT_APPOINTMENTS.to_string()));
}

fn overlay() -> BookingOverlay {
    BookingOverlay::new(
        Doctor {
            id: 3,
            name: "Dr. Amy Cho".into(),
            email: "amy@clinic.test".into(),
            phone: None,
            specialty: "Pediatrics".into(),
            available_times: vec!["09:00-10:00".into()],
        },
        Patient {
            id: Some(9),
            name: "Sam Roe".into(),
            email: "sam@patients.test".into(),
            phone: None,
            address: None,
        },
    )
}

#[tokio::test]
async fn test_booking_submission_posts_appointment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments/pt-token"))
        .and(body_json(json!({
            "doctor": { "id": 3 },
            "patient": { "id": 9 },
            "appointmentTime": "2031-05-02T09:00:00",
            "status": 0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Appointment booked" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let service = AppointmentService::new(&config);
    let ui = RecordingInteraction::confirming();

    let result = overlay()
        .submit(Some(date()), "09:00-10:00", &logged_patient("pt-token"), &service, &ui)
        .await;

    assert!(result.success);
    assert_eq!(ui.notices(), vec![Notice::info("Appointment booked")]);
}

#[tokio::test]
async fn test_booking_conflict_surfaces_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appointments/pt-token"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Slot already taken" })))
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let service = AppointmentService::new(&config);
    let ui = RecordingInteraction::confirming();

    let result = overlay()
        .submit(Some(date()), "09:00-10:00", &logged_patient("pt-token"), &service, &ui)
        .await;

    assert!(!result.success);
    assert_eq!(result.reason, Some(FailureReason::HttpStatus(409)));
    assert_eq!(ui.last_message(), Some("Slot already taken".to_string()));
}

#[tokio::test]
async fn test_booking_rejects_unknown_slot_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::new(&mock_server.uri()).to_app_config();
    let service = AppointmentService::new(&config);
    let ui = RecordingInteraction::confirming();

    let result = overlay()
        .submit(Some(date()), "17:00-18:00", &logged_patient("pt-token"), &service, &ui)
        .await;

    assert_eq!(result.reason, Some(FailureReason::Validation));
    assert!(ui.notices()[0].is_error());
}
