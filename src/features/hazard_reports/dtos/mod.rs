mod hazard_report_dto;

pub use hazard_report_dto::*;
