use std::path::Path;

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::settings::{EngineSettings, HolidayEntry};
use crate::services::calendar_service::{CalendarService, HolidaySet};
use crate::utils::date::parse_sheet_date;

const BUNDLED_SETTINGS: &str = include_str!("../../config/holidays.yaml");

/// Loads engine configuration (holiday calendar, log directives) from YAML.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: EngineSettings,
    holidays: HolidaySet,
}

impl SettingsService {
    pub fn from_settings(settings: EngineSettings) -> AppResult<Self> {
        let holidays = build_holiday_set(&settings.holidays)?;
        debug!(target: "app::settings", holidays = holidays.len(), "settings loaded");
        Ok(Self { settings, holidays })
    }

    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let settings: EngineSettings = serde_yaml::from_str(yaml)?;
        Self::from_settings(settings)
    }

    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let service = Self::from_yaml_str(&content)?;
        info!(target: "app::settings", path = %path.display(), "loaded settings file");
        Ok(service)
    }

    /// The holiday table shipped with the crate.
    pub fn bundled() -> AppResult<Self> {
        Self::from_yaml_str(BUNDLED_SETTINGS)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn holiday_set(&self) -> HolidaySet {
        self.holidays.clone()
    }

    pub fn calendar(&self) -> CalendarService {
        CalendarService::with_holidays(self.holiday_set())
    }

    pub fn log_directives(&self) -> Option<&str> {
        self.settings.log_directives.as_deref()
    }
}

fn build_holiday_set(entries: &[HolidayEntry]) -> AppResult<HolidaySet> {
    let dates = entries
        .iter()
        .map(|entry| {
            parse_sheet_date(&entry.date).ok_or_else(|| {
                AppError::validation(format!(
                    "holiday {:?} is not a DD/MM/YYYY date",
                    entry.name.as_deref().unwrap_or(&entry.date)
                ))
            })
        })
        .collect::<AppResult<Vec<_>>>()?;
    Ok(HolidaySet::new(dates))
}
