//! Signed session tokens.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::{INVALID_TOKEN, JwtDecoder};
pub use encoder::{IssuedToken, JwtEncoder};
