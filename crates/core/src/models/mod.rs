pub mod analytics;
pub mod settings;
pub mod transaction;
