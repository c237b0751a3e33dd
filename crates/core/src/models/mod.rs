pub mod advisory;
pub mod calendar;
pub mod chart;
pub mod inventory;
pub mod navigation;
pub mod settings;
pub mod summary;
pub mod transaction;
