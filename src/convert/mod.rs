// Unit selection, rounding and sentence formatting.
// Pure functions only: nothing here logs or touches I/O.

pub mod converter;
pub mod error;
pub mod input;
pub mod number;


pub use converter::*;
pub use error::ConvertError;
pub use input::InputValue;
