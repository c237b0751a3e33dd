pub mod advisory_service;
pub mod calendar_service;
pub mod chart_service;
pub mod inventory_service;
pub mod ledger_service;
pub mod navigation_service;
