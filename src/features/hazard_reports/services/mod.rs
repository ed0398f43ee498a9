mod hazard_report_service;

pub use hazard_report_service::HazardReportService;
