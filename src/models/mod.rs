pub mod analytics;
pub mod attendance;
pub mod settings;
pub mod task;
