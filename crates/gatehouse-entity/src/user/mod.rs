//! User domain: entity model, role/permission vocabularies, store trait.

pub mod model;
pub mod permission;
pub mod role;
pub mod store;

pub use model::{
    NotificationSettings, PrivacySettings, Theme, User, UserPreferences, UserProfile, Visibility,
};
pub use permission::Permission;
pub use role::Role;
pub use store::UserStore;
