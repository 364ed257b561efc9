pub mod defaulting;
pub mod ordering;
pub mod ports;
pub mod setup;
pub mod validation;

pub use defaulting::import_defaults;
pub use ordering::sort_services;
pub use ports::backfill_ports;
pub use setup::ConfigSetup;
pub use validation::{ValidationError, validate};
