//! Token service — the single entry point for issuing and verifying tokens.

use std::sync::Arc;

use gatehouse_core::config::auth::AuthConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::traits::clock::Clock;
use gatehouse_entity::user::User;

use super::claims::{AccessClaims, RefreshClaims};
use super::decoder::{TokenDecoder, TokenError};
use super::encoder::{TokenEncoder, TokenPair};

/// Issues and verifies access/refresh token pairs.
///
/// Verification is pure and stateless; nothing is stored server-side.
/// All expiry arithmetic goes through the injected [`Clock`].
#[derive(Clone)]
pub struct TokenService {
    /// Token encoder.
    encoder: TokenEncoder,
    /// Token decoder.
    decoder: TokenDecoder,
    /// Time source for issuance and expiry checks.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: TokenEncoder::new(config),
            decoder: TokenDecoder::new(config),
            clock,
        }
    }

    /// Issues a fresh access/refresh pair for the given user.
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        self.encoder.issue_pair(user, self.clock.now())
    }

    /// Verifies an access token and returns its claims.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decoder.decode_access(token, self.clock.now())
    }

    /// Verifies a refresh token and returns its claims.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decoder.decode_refresh(token, self.clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Duration, Utc};
    use std::sync::Mutex;

    use gatehouse_entity::user::{Permission, Role};

    /// Test clock that only moves when told to.
    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Utc::now()),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    fn test_user() -> User {
        User::new(
            "a@x.com",
            "alice",
            "$argon2id$fake",
            Role::Moderator,
            Utc::now(),
        )
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = TokenService::new(&test_config(), ManualClock::new());
        let user = test_user();

        let pair = service.issue_pair(&user).unwrap();
        assert_eq!(pair.expires_in, 900);

        let claims = service.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.id, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Moderator);
        assert!(claims.permissions.contains(&Permission::ReadUsers));
    }

    #[test]
    fn test_access_token_expires_after_ttl() {
        let clock = ManualClock::new();
        let service = TokenService::new(&test_config(), Arc::clone(&clock) as Arc<dyn Clock>);

        let pair = service.issue_pair(&test_user()).unwrap();
        assert!(service.verify_access(&pair.access_token).is_ok());

        clock.advance(Duration::minutes(16));
        assert!(matches!(
            service.verify_access(&pair.access_token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let clock = ManualClock::new();
        let service = TokenService::new(&test_config(), Arc::clone(&clock) as Arc<dyn Clock>);

        let pair = service.issue_pair(&test_user()).unwrap();
        clock.advance(Duration::days(6));
        assert!(service.verify_refresh(&pair.refresh_token).is_ok());

        clock.advance(Duration::days(2));
        assert!(matches!(
            service.verify_refresh(&pair.refresh_token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_token_type_confusion_is_rejected() {
        let service = TokenService::new(&test_config(), ManualClock::new());
        let pair = service.issue_pair(&test_user()).unwrap();

        assert!(matches!(
            service.verify_refresh(&pair.access_token),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(
            service.verify_access(&pair.refresh_token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let service = TokenService::new(&test_config(), ManualClock::new());
        let pair = service.issue_pair(&test_user()).unwrap();

        let other_config = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        let other = TokenService::new(&other_config, ManualClock::new());

        assert!(matches!(
            other.verify_access(&pair.access_token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let service = TokenService::new(&test_config(), ManualClock::new());
        assert!(matches!(
            service.verify_access("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
    }
}
