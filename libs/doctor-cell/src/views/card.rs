use tracing::{debug, warn};

use patient_cell::services::PatientService;
use shared_models::auth::{Role, Session};
use shared_models::doctor::Doctor;
use shared_models::patient::Patient;
use shared_utils::interaction::{Interaction, Notice};
use shared_utils::markup::Element;
use shared_utils::token::inspect_token;

use crate::services::DoctorService;

pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this doctor?";
pub const ADMIN_LOGIN_REQUIRED: &str = "You need to be logged in as an admin to delete a doctor.";
pub const PATIENT_LOGIN_FIRST: &str = "Patient needs to login first.";
pub const BOOKING_LOGIN_REQUIRED: &str = "You need to log in to book an appointment.";
pub const PATIENT_DETAILS_FAILED: &str = "Failed to fetch patient details. Please log in again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Delete,
    PromptLogin,
    Book,
}

impl CardAction {
    pub fn for_role(role: Option<Role>) -> Option<Self> {
        match role? {
            Role::Admin => Some(CardAction::Delete),
            Role::Patient => Some(CardAction::PromptLogin),
            Role::LoggedPatient => Some(CardAction::Book),
            Role::Doctor => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Delete => "Delete",
            CardAction::PromptLogin | CardAction::Book => "Book Now",
        }
    }
}

/// What activating a card's action led to.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    /// The card has no action for the current role.
    NoAction,
    Cancelled,
    /// Deleted on the server; the card must go.
    Removed,
    /// The action failed; the card stays.
    Kept,
    LoginRequired,
    OpenBooking { doctor: Doctor, patient: Patient },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoctorCard {
    doctor: Doctor,
    action: Option<CardAction>,
}

impl DoctorCard {
    pub fn new(doctor: Doctor, session: &Session) -> Self {
        Self {
            action: CardAction::for_role(session.role),
            doctor,
        }
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn action(&self) -> Option<CardAction> {
        self.action
    }

    pub fn element(&self) -> Element {
        let info = Element::new("div")
            .class("doctor-info")
            .child(Element::new("h3").text(&self.doctor.name))
            .child(Element::new("p").text(format!("Specialization: {}", self.doctor.specialty)))
            .child(Element::new("p").text(format!("Email: {}", self.doctor.email)))
            .child(
                Element::new("ul").children(
                    self.doctor.available_times
                        .iter()
                        .map(|time| Element::new("li").text(time)),
                ),
            );

        let mut actions = Element::new("div").class("card-actions");
        if let Some(action) = self.action {
            actions = actions.child(Element::new("button").text(action.label()));
        }

        Element::new("div")
            .class("doctor-card")
            .attr("data-doctor-id", self.doctor.id.to_string())
            .child(info)
            .child(actions)
    }

    /// Run the card's action. Service calls happen here; the caller only
    /// applies the outcome to its list.
    pub async fn activate(
        &self,
        session: &Session,
        doctors: &DoctorService,
        patients: &PatientService,
        ui: &dyn Interaction,
    ) -> CardOutcome {
        let Some(action) = self.action else {
            return CardOutcome::NoAction;
        };

        match action {
            CardAction::Delete => self.delete(session, doctors, ui).await,
            CardAction::PromptLogin => {
                ui.notify(Notice::info(PATIENT_LOGIN_FIRST));
                CardOutcome::LoginRequired
            }
            CardAction::Book => self.book(session, patients, ui).await,
        }
    }

    async fn delete(&self, session: &Session, doctors: &DoctorService, ui: &dyn Interaction) -> CardOutcome {
        if !ui.confirm(CONFIRM_DELETE) {
            return CardOutcome::Cancelled;
        }

        let Some(token) = session.token() else {
            ui.notify(Notice::error(ADMIN_LOGIN_REQUIRED));
            return CardOutcome::Kept;
        };

        let result = doctors.delete_doctor(self.doctor.id, token).await;
        if result.success {
            ui.notify(Notice::info(result.message));
            CardOutcome::Removed
        } else {
            ui.notify(Notice::error(result.message));
            CardOutcome::Kept
        }
    }

    async fn book(&self, session: &Session, patients: &PatientService, ui: &dyn Interaction) -> CardOutcome {
        let token = match inspect_token(session.token()) {
            Ok(info) => info.raw,
            Err(e) => {
                debug!("Booking blocked, unusable token: {:?}", e);
                ui.notify(Notice::error(BOOKING_LOGIN_REQUIRED));
                return CardOutcome::LoginRequired;
            }
        };

        match patients.get_patient_data(token).await {
            Some(patient) if patient.id.is_some() => CardOutcome::OpenBooking {
                doctor: self.doctor.clone(),
                patient,
            },
            other => {
                warn!("Patient data is missing or invalid: {:?}", other);
                ui.notify(Notice::error(PATIENT_DETAILS_FAILED));
                CardOutcome::LoginRequired
            }
        }
    }
}
