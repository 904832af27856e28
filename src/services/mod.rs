pub mod analytics_service;
pub mod attendance_service;
pub mod calendar_service;
pub mod directory_service;
pub mod feed_parser;
pub mod history_service;
pub mod kpi_service;
pub mod name_reconciler;
pub mod settings_service;
pub mod team_summary_service;
