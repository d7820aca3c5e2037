//! Screens composed from UI components

mod constants;
pub mod dashboard;

pub use dashboard::DashboardPage;
