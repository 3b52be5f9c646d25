pub mod error;
pub mod loader;
pub mod models;
pub mod validation;

pub use error::ConfigError;
pub use loader::*;
pub use models::*;
pub use validation::*;
