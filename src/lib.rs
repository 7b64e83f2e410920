// Driver Registry - Core Library
// Registration, regulated updates and demerit-point suspension for one driver record

pub mod calendar;
pub mod rejection;
pub mod validators;
pub mod record;
pub mod ledger;
pub mod details;
pub mod config;

// Re-export commonly used types
pub use rejection::Rejection;
pub use validators::{
    check_address, check_date, check_identifier,
    validate_address, validate_date, validate_identifier,
};
pub use record::{BirthDate, DriverDetails, DriverRecord};
pub use ledger::{AccrualOutcome, InfractionEntry, InfractionLedger, SuspensionPolicy};
pub use details::{render_details, DetailsFile, DetailsSink, MemorySink};
pub use config::RegistryConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
