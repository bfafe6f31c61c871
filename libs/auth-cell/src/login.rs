use tracing::{error, info, warn};

use doctor_cell::services::DoctorService;
use patient_cell::models::SignupForm;
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_models::auth::{AdminCredentials, EmailCredentials, LoginResponse, Role};
use shared_models::error::{ActionResult, FailureReason, ServiceError};
use shared_utils::interaction::{Interaction, Notice};

use crate::header::Route;
use crate::services::AdminService;
use crate::session::SessionManager;
use crate::store::SessionStore;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const LOGIN_FAILED: &str = "An error occurred while logging in. Please try again later.";
pub const SIGNUP_REJECTED: &str = "Failed to sign up patient";
pub const SIGNUP_FAILED: &str = "An error occurred during signup";

/// Login and signup modals. A successful login stores the token, selects
/// the role and returns the dashboard to open.
pub struct LoginController<'a, S: SessionStore> {
    admins: AdminService,
    doctors: DoctorService,
    patients: PatientService,
    sessions: &'a SessionManager<S>,
}

impl<'a, S: SessionStore> LoginController<'a, S> {
    pub fn new(config: &AppConfig, sessions: &'a SessionManager<S>) -> Self {
        Self {
            admins: AdminService::new(config),
            doctors: DoctorService::new(config),
            patients: PatientService::new(config),
            sessions,
        }
    }

    pub async fn admin_login(&self, credentials: &AdminCredentials, ui: &dyn Interaction) -> Option<Route> {
        let result = self.admins.admin_login(credentials).await;
        self.complete(Role::Admin, result, false, ui)
    }

    pub async fn doctor_login(&self, credentials: &EmailCredentials, ui: &dyn Interaction) -> Option<Route> {
        let result = self.doctors.doctor_login(credentials).await;
        self.complete(Role::Doctor, result, false, ui)
    }

    /// Patient login shows the server's reason for a rejection when it
    /// sends one.
    pub async fn patient_login(&self, credentials: &EmailCredentials, ui: &dyn Interaction) -> Option<Route> {
        let result = self.patients.patient_login(credentials).await;
        self.complete(Role::LoggedPatient, result, true, ui)
    }

    fn complete(
        &self,
        role: Role,
        result: Result<LoginResponse, ServiceError>,
        server_message: bool,
        ui: &dyn Interaction,
    ) -> Option<Route> {
        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_rejection() => {
                warn!("{} login rejected: {}", role, e);
                let message = e
                    .server_message()
                    .filter(|_| server_message)
                    .unwrap_or(INVALID_CREDENTIALS);
                ui.notify(Notice::error(message));
                return None;
            }
            Err(e) => {
                error!("Error during {} login: {}", role, e);
                ui.notify(Notice::error(LOGIN_FAILED));
                return None;
            }
        };

        if response.token.trim().is_empty() {
            warn!("{} login returned no token", role);
            ui.notify(Notice::error(INVALID_CREDENTIALS));
            return None;
        }

        match self.sessions.login(role, &response.token) {
            Ok(route) => {
                info!("Logged in as {}", role);
                Some(route)
            }
            Err(e) => {
                error!("Could not persist {} session: {}", role, e);
                ui.notify(Notice::error(LOGIN_FAILED));
                None
            }
        }
    }

    pub async fn patient_signup(&self, form: &SignupForm, ui: &dyn Interaction) -> ActionResult {
        let signup = match form.validate() {
            Ok(signup) => signup,
            Err(message) => {
                ui.notify(Notice::error(message));
                return ActionResult::failed(FailureReason::Validation, message);
            }
        };

        match self.patients.patient_signup(&signup).await {
            Ok(message) => {
                info!("Patient {} signed up", signup.email);
                ui.notify(Notice::info(message.clone()));
                ActionResult::ok(message)
            }
            Err(e) => {
                let fallback = if e.is_rejection() { SIGNUP_REJECTED } else { SIGNUP_FAILED };
                let message = e.server_message().unwrap_or(fallback).to_string();
                ui.notify(Notice::error(message.clone()));
                ActionResult::failed(e.reason(), message)
            }
        }
    }
}
