pub mod clock;
pub mod fixed;
pub mod registry;
pub mod traits;
