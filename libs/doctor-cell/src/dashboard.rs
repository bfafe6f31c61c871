use tracing::{error, info};

use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_models::doctor::Doctor;
use shared_models::error::{ActionResult, FailureReason};
use shared_utils::interaction::{Interaction, Notice};
use shared_utils::markup::Element;

use crate::models::{DoctorFilter, DoctorForm};
use crate::services::DoctorService;
use crate::views::card::{CardOutcome, DoctorCard};

pub const NO_DOCTORS: &str = "No doctors found.";
pub const NO_MATCHING_DOCTORS: &str = "No doctors found with the given filters.";
pub const DOCTORS_UNAVAILABLE: &str = "Unable to load doctors. Please try again later.";
pub const ADD_DOCTOR_LOGIN_REQUIRED: &str = "You must be logged in to add a doctor.";

#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryContent {
    Cards(Vec<DoctorCard>),
    Placeholder(String),
}

/// Controller behind the admin and patient dashboards: the doctor list,
/// its filters and the card actions.
pub struct DoctorDirectory {
    doctors: DoctorService,
    patients: PatientService,
    session: Session,
    content: DirectoryContent,
}

impl DoctorDirectory {
    pub fn new(config: &AppConfig, session: Session) -> Self {
        Self {
            doctors: DoctorService::new(config),
            patients: PatientService::new(config),
            session,
            content: DirectoryContent::Cards(Vec::new()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn content(&self) -> &DirectoryContent {
        &self.content
    }

    pub fn cards(&self) -> &[DoctorCard] {
        match &self.content {
            DirectoryContent::Cards(cards) => cards,
            DirectoryContent::Placeholder(_) => &[],
        }
    }

    /// Controllers go through the `fetch_*` service calls so a failed
    /// request renders differently from an empty directory.
    pub async fn load_doctor_cards(&mut self) {
        let result = self.doctors.fetch_doctors().await;
        self.show(result, NO_DOCTORS);
    }

    /// Re-query with the current search box and filter values.
    pub async fn filter_doctors_on_change(&mut self, name: &str, time: &str, specialty: &str) {
        let filter = DoctorFilter::from_inputs(name, time, specialty);
        let result = self.doctors.fetch_filtered(&filter).await;
        self.show(result, NO_MATCHING_DOCTORS);
    }

    /// Entry point for a dashboard opened with search values already set.
    /// With every value blank this is the plain directory load; otherwise
    /// only the filter query runs.
    pub async fn search(&mut self, name: &str, time: &str, specialty: &str) {
        if DoctorFilter::from_inputs(name, time, specialty).is_unconstrained() {
            self.load_doctor_cards().await;
        } else {
            self.filter_doctors_on_change(name, time, specialty).await;
        }
    }

    fn show<E: std::fmt::Display>(&mut self, result: Result<Vec<Doctor>, E>, empty: &str) {
        self.content = match result {
            Ok(doctors) if doctors.is_empty() => DirectoryContent::Placeholder(empty.to_string()),
            Ok(doctors) => DirectoryContent::Cards(
                doctors
                    .into_iter()
                    .map(|doctor| DoctorCard::new(doctor, &self.session))
                    .collect(),
            ),
            Err(e) => {
                error!("Error loading doctor cards: {}", e);
                DirectoryContent::Placeholder(DOCTORS_UNAVAILABLE.to_string())
            }
        };
    }

    /// Trigger the action on the card for `doctor_id`. A successful delete
    /// removes that card and nothing else.
    pub async fn activate_card(&mut self, doctor_id: i64, ui: &dyn Interaction) -> CardOutcome {
        let Some(card) = self.cards().iter().find(|c| c.doctor().id == doctor_id).cloned() else {
            return CardOutcome::NoAction;
        };

        let outcome = card.activate(&self.session, &self.doctors, &self.patients, ui).await;

        if outcome == CardOutcome::Removed {
            if let DirectoryContent::Cards(cards) = &mut self.content {
                cards.retain(|c| c.doctor().id != doctor_id);
            }
        }

        outcome
    }

    /// Submit the admin "Add Doctor" form and reload the list on success.
    pub async fn add_doctor(&mut self, form: &DoctorForm, ui: &dyn Interaction) -> ActionResult {
        let doctor = match form.validate() {
            Ok(doctor) => doctor,
            Err(message) => {
                ui.notify(Notice::error(message));
                return ActionResult::failed(FailureReason::Validation, message);
            }
        };

        let Some(token) = self.session.token() else {
            ui.notify(Notice::error(ADD_DOCTOR_LOGIN_REQUIRED));
            return ActionResult::failed(FailureReason::MissingSession, ADD_DOCTOR_LOGIN_REQUIRED);
        };

        let result = self.doctors.save_doctor(&doctor, token).await;
        if result.success {
            info!("Doctor {} added", doctor.email);
            ui.notify(Notice::info(result.message.clone()));
            self.load_doctor_cards().await;
        } else {
            ui.notify(Notice::error(result.message.clone()));
        }

        result
    }

    pub fn render(&self) -> Element {
        let content = Element::new("div").attr("id", "content");
        match &self.content {
            DirectoryContent::Cards(cards) => content.children(cards.iter().map(DoctorCard::element)),
            DirectoryContent::Placeholder(text) => content.child(Element::new("p").text(text)),
        }
    }
}
