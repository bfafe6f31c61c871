use serde::{Deserialize, Serialize};

use shared_models::doctor::Doctor;

/// Normalized result of the list/filter endpoints. Always a list, never
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorList {
    pub doctors: Vec<Doctor>,
}

/// Directory filter. `None` on an axis means "no constraint" and is sent
/// as the literal `null` path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub time: Option<String>,
    pub specialty: Option<String>,
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl DoctorFilter {
    /// Build a filter from the raw search box and select values.
    pub fn from_inputs(name: &str, time: &str, specialty: &str) -> Self {
        Self {
            name: non_blank(name),
            time: non_blank(time),
            specialty: non_blank(specialty),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.time.is_none() && self.specialty.is_none()
    }

    /// `{name}/{time}/{specialty}` with `null` for every open axis.
    pub fn path(&self) -> String {
        let segment = |value: &Option<String>| value.clone().unwrap_or_else(|| "null".to_string());
        format!("{}/{}/{}", segment(&self.name), segment(&self.time), segment(&self.specialty))
    }
}

/// Body of `POST {DOCTOR_API}/{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub specialty: String,
    pub available_times: Vec<String>,
}

/// Raw values of the admin "Add Doctor" form.
#[derive(Debug, Clone, Default)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub specialty: String,
    pub available_times: Vec<String>,
}

pub const DOCTOR_FORM_INCOMPLETE: &str =
    "Please fill in all fields and select at least one available time.";

impl DoctorForm {
    pub fn validate(&self) -> Result<NewDoctor, &'static str> {
        let doctor = NewDoctor {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.trim().to_string(),
            specialty: self.specialty.trim().to_string(),
            available_times: self.available_times
                .iter()
                .filter_map(|slot| non_blank(slot))
                .collect(),
        };

        let missing_field = [&doctor.name, &doctor.email, &doctor.phone, &doctor.password, &doctor.specialty]
            .iter()
            .any(|field| field.is_empty());

        if missing_field || doctor.available_times.is_empty() {
            return Err(DOCTOR_FORM_INCOMPLETE);
        }

        Ok(doctor)
    }
}
