pub mod database;

pub use database::{BootstrapReport, TicketDb};
