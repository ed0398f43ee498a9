pub mod auth;
pub mod hazard_reports;
pub mod users;
