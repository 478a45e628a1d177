pub mod attendance_service;
pub mod export_service;
pub mod report_service;
pub mod user_service;
