pub mod error;
pub mod money;
pub mod owner;
pub mod timezone;
pub mod validation;

pub use error::{AppError, Result};
pub use owner::{AccessPolicy, Identity, Owner};
pub use timezone::BusinessCalendar;
