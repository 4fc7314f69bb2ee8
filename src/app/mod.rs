pub mod load_use_case;
pub mod ports;

pub use load_use_case::{load_dataset, LoadOrigin, LoadOutcome, LoadStatus};
pub use ports::BenefitsSource;
