// Business profile of the acting owner.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use repositories::{BusinessProfileRepository, MySqlBusinessProfileRepository};
pub use services::BusinessService;
