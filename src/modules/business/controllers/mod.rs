pub mod business_controller;

pub use business_controller::configure;
