pub mod convert;
pub mod scale;
pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use convert::{convert, convert_json, try_convert, Conversion, ConvertError, InputValue};
pub use scale::{Scale, ScaleConfig, Unit};
pub use session::{ConversionSession, SessionError};
