use serde::{Deserialize, Serialize};

/// Body of `POST {PATIENT_API}/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

/// Raw signup form values as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
}

pub const SIGNUP_INCOMPLETE: &str = "Please fill in all fields.";

impl SignupForm {
    pub fn validate(&self) -> Result<PatientSignup, &'static str> {
        let signup = PatientSignup {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        };

        let complete = [&signup.name, &signup.email, &signup.password, &signup.phone, &signup.address]
            .iter()
            .all(|field| !field.is_empty());

        if complete {
            Ok(signup)
        } else {
            Err(SIGNUP_INCOMPLETE)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentCondition {
    Future,
    Past,
}

impl AppointmentCondition {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "future" => Some(AppointmentCondition::Future),
            "past" => Some(AppointmentCondition::Past),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentCondition::Future => "future",
            AppointmentCondition::Past => "past",
        }
    }
}

/// Criteria for `filter_appointments`. A `None` axis is sent as the literal
/// `null` segment, meaning "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub condition: Option<AppointmentCondition>,
    pub name: Option<String>,
}

impl AppointmentFilter {
    pub fn from_inputs(condition: &str, name: &str) -> Self {
        let name = name.trim();
        Self {
            condition: AppointmentCondition::parse(condition),
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }

    pub fn condition_segment(&self) -> &str {
        self.condition.as_ref().map_or("null", AppointmentCondition::as_str)
    }

    pub fn name_segment(&self) -> &str {
        self.name.as_deref().unwrap_or("null")
    }
}
