pub mod catalog;
pub mod dashboards;
pub mod groups;
pub mod meetings;
pub mod reports;
