pub mod business;
pub mod customers;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod invoices;
pub mod numbering;
pub mod quotations;
pub mod taxes;
