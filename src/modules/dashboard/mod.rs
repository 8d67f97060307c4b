// Dashboard statistics of the acting owner.

pub mod controllers;
pub mod models;
pub mod services;

pub use services::DashboardService;
