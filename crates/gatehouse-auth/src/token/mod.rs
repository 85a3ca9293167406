//! Signed token issuance and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;

pub use claims::{AccessClaims, RefreshClaims};
pub use decoder::{TokenDecoder, TokenError};
pub use encoder::{TokenEncoder, TokenPair};
pub use service::TokenService;
