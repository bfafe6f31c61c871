use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(alias = "specialization")]
    pub specialty: String,
    /// Slot labels such as `09:00-10:00`, in the order the backend sent them.
    #[serde(default)]
    pub available_times: Vec<String>,
}

impl Doctor {
    pub fn offers_slot(&self, slot: &str) -> bool {
        self.available_times.iter().any(|time| time == slot)
    }
}
