pub mod calendar;
pub mod card_service;
pub mod chart_service;
pub mod dca_service;
pub mod report_service;
