//! Session lifecycle manager: login and token resolution.
//!
//! Sessions are stateless. A session is a signed token; logout is the
//! carrier discarding it, so there is nothing to tear down here.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use hostel_core::error::AppError;
use hostel_database::AccountStore;
use hostel_entity::account::Account;

use crate::credential::CredentialVerifier;
use crate::jwt::{Claims, INVALID_TOKEN, IssuedToken, JwtDecoder, JwtEncoder};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated account.
    pub account: Account,
    /// The issued token.
    pub token: IssuedToken,
}

/// Orchestrates credential checks and token issuance.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Account store, for login bookkeeping.
    store: Arc<dyn AccountStore>,
    /// Credential verifier.
    verifier: CredentialVerifier,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Token verifier.
    decoder: Arc<JwtDecoder>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        store: Arc<dyn AccountStore>,
        verifier: CredentialVerifier,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            store,
            verifier,
            encoder,
            decoder,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Verify credentials (timing-equalized for unknown emails)
    /// 2. Issue a token, 24h or "remember me" lifetime
    /// 3. Record the login time, ignoring failures
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<LoginOutcome, AppError> {
        let mut account = self.verifier.verify(email, password).await?;

        let token = self
            .encoder
            .issue(account.id, account.role(), &account.email, remember_me)?;

        match self.store.record_login(account.id).await {
            Ok(()) => account.last_login_at = Some(Utc::now()),
            Err(e) => warn!(account_id = %account.id, error = %e, "Failed to record login time"),
        }

        info!(
            account_id = %account.id,
            role = %account.role(),
            remember_me,
            expires_at = %token.expires_at,
            "Login successful"
        );

        Ok(LoginOutcome { account, token })
    }

    /// Verifies a carried token.
    pub fn resolve(&self, token: &str) -> Result<Claims, AppError> {
        self.decoder.decode(token)
    }

    /// Loads the live account behind verified claims.
    ///
    /// A token outlives admin actions on its account, so callers that act
    /// on the account re-check it here: deleted accounts fail
    /// authentication, deactivated ones fail authorization.
    pub async fn current_account(&self, claims: &Claims) -> Result<Account, AppError> {
        let account = self
            .store
            .find_by_id(claims.sub)
            .await?
            .filter(|a| !a.is_deleted())
            .ok_or_else(|| AppError::authentication(INVALID_TOKEN))?;

        if !account.can_login() {
            return Err(AppError::authorization("Account is deactivated"));
        }
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use hostel_core::config::{AuthConfig, SessionConfig};
    use hostel_core::error::ErrorKind;
    use hostel_database::MemoryAccountStore;
    use hostel_entity::account::{AccountProfile, AccountStatus, NewAccount, OwnerProfile};

    use super::*;
    use crate::password::PasswordHasher;

    async fn setup() -> (Arc<MemoryAccountStore>, SessionManager, Account) {
        let auth = AuthConfig {
            jwt_secret: "session-test-secret-0123456789abcdef".to_string(),
            ..Default::default()
        };
        let store = Arc::new(MemoryAccountStore::new());
        let account = store
            .create(NewAccount {
                email: "owner@example.com".to_string(),
                password_hash: PasswordHasher::new().hash_password("Lodge-keeper-77").unwrap(),
                profile: AccountProfile::HostelOwner(OwnerProfile {
                    full_name: "Bola Ade".to_string(),
                    phone: None,
                    business_name: None,
                }),
            })
            .await
            .unwrap();
        let manager = SessionManager::new(
            store.clone(),
            CredentialVerifier::new(store.clone()).unwrap(),
            Arc::new(JwtEncoder::new(&auth, &SessionConfig::default()).unwrap()),
            Arc::new(JwtDecoder::new(&auth).unwrap()),
        );
        (store, manager, account)
    }

    #[tokio::test]
    async fn test_login_token_subject_is_account_id() {
        let (store, manager, account) = setup().await;
        let outcome = manager
            .login("owner@example.com", "Lodge-keeper-77", false)
            .await
            .unwrap();
        let claims = manager.resolve(&outcome.token.token).unwrap();
        assert_eq!(claims.sub, account.id);
        assert!(outcome.account.last_login_at.is_some());

        let stored = store.find_by_id(account.id).await.unwrap().unwrap();
        assert!(stored.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_remember_me_extends_lifetime() {
        let (_, manager, _) = setup().await;
        let short = manager
            .login("owner@example.com", "Lodge-keeper-77", false)
            .await
            .unwrap();
        let long = manager
            .login("owner@example.com", "Lodge-keeper-77", true)
            .await
            .unwrap();
        assert_eq!(short.token.claims.exp - short.token.claims.iat, 86_400);
        assert_eq!(long.token.claims.exp - long.token.claims.iat, 7 * 86_400);
    }

    #[tokio::test]
    async fn test_current_account_rechecks_status() {
        let (store, manager, account) = setup().await;
        let outcome = manager
            .login("owner@example.com", "Lodge-keeper-77", false)
            .await
            .unwrap();
        let claims = outcome.token.claims;

        store
            .update_status(account.id, AccountStatus::Inactive)
            .await
            .unwrap();
        let err = manager.current_account(&claims).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        store.delete(account.id).await.unwrap();
        let err = manager.current_account(&claims).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
