pub mod anomaly_service;
pub mod pattern_service;
pub mod projection_service;
pub mod random;
pub mod runway_service;
pub mod streak_service;
pub mod tax_service;
pub mod trend_service;
