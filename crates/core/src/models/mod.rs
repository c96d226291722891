pub mod harvest;
pub mod holding;
pub mod pattern;
pub mod period;
pub mod runway;
pub mod settings;
pub mod simulation;
pub mod trade;
pub mod transaction;
pub mod trend;
