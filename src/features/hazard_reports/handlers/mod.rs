mod hazard_report_handler;

pub use hazard_report_handler::*;
