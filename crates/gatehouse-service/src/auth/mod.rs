//! Auth orchestration use cases.

pub mod service;

pub use service::{AuthService, LoginOutcome, PreferencesUpdate, RegisterInput, UpdateProfileInput};
