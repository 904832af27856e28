use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    /// `DD/MM/YYYY`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_directives: Option<String>,
}
