pub mod date;
pub mod logger;
pub mod rounding;
