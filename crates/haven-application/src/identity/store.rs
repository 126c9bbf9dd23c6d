use super::alias::generate_alias;
use crate::seed::demo_accounts;
use haven_core::user::{Account, RegistrationDetails, Role, SessionUser};
use haven_core::{HavenError, Result, new_id};
use std::time::Duration;
use tokio::sync::RwLock;

struct IdentityState {
    accounts: Vec<Account>,
    session: Option<SessionUser>,
}

impl IdentityState {
    fn seeded() -> Self {
        Self {
            accounts: demo_accounts(),
            session: None,
        }
    }
}

/// Registered accounts plus the single session slot.
///
/// Emails are unique and compared case-insensitively for both registration
/// and login. Credentials are compared in plaintext.
pub struct IdentityStore {
    state: RwLock<IdentityState>,
    latency: Duration,
}

impl IdentityStore {
    /// Creates a store seeded with the demo accounts.
    ///
    /// `latency` is awaited before `login` and `register` resolve.
    pub fn new(latency: Duration) -> Self {
        Self {
            state: RwLock::new(IdentityState::seeded()),
            latency,
        }
    }

    async fn simulate_round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Creates an account and signs it in.
    ///
    /// Survivors registering without an alias get a generated one.
    ///
    /// # Errors
    ///
    /// `EmailTaken` if any account already uses `email` (ignoring case).
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        secret: &str,
        role: Role,
        details: RegistrationDetails,
    ) -> Result<SessionUser> {
        self.simulate_round_trip().await;

        let mut state = self.state.write().await;
        if state.accounts.iter().any(|account| account.email_matches(email)) {
            tracing::info!("[Identity] Registration rejected: email already in use");
            return Err(HavenError::EmailTaken(email.to_string()));
        }

        let alias = match (role, details.alias) {
            (_, Some(alias)) if !alias.trim().is_empty() => Some(alias),
            (Role::Survivor, _) => Some(generate_alias()),
            _ => None,
        };

        let account = Account {
            id: new_id("u"),
            name: name.to_string(),
            email: email.trim().to_string(),
            secret: secret.to_string(),
            role,
            alias,
            profession: details.profession,
        };
        let user = account.to_session_user();
        state.accounts.push(account);
        state.session = Some(user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "[Identity] Registered and signed in");
        Ok(user)
    }

    /// Signs in with email (any case) and exact secret.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when nothing matches; the session is unchanged.
    pub async fn login(&self, email: &str, secret: &str) -> Result<SessionUser> {
        self.simulate_round_trip().await;

        let mut state = self.state.write().await;
        let user = state
            .accounts
            .iter()
            .find(|account| account.email_matches(email) && account.secret == secret)
            .map(Account::to_session_user)
            .ok_or(HavenError::InvalidCredentials)?;

        state.session = Some(user.clone());
        tracing::info!(user_id = %user.id, "[Identity] Signed in");
        Ok(user)
    }

    /// Clears the session. Safe to call when nobody is signed in.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if let Some(user) = state.session.take() {
            tracing::info!(user_id = %user.id, "[Identity] Signed out");
        }
    }

    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.session.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    /// The signed-in user, or `NoActiveSession`.
    pub async fn require_user(&self) -> Result<SessionUser> {
        self.current_user().await.ok_or(HavenError::NoActiveSession)
    }

    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Restores the demo accounts and clears the session.
    pub async fn reset(&self) {
        *self.state.write().await = IdentityState::seeded();
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::supporter::Profession;

    #[tokio::test]
    async fn test_demo_login() {
        let store = IdentityStore::default();
        let user = store.login("survivor@demo.com", "password").await.unwrap();
        assert_eq!(user.role, Role::Survivor);
        assert_eq!(user.alias.as_deref(), Some("User_7392"));
        assert_eq!(store.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn test_login_ignores_email_case() {
        let store = IdentityStore::default();
        let user = store.login("Sarah@Clinic.COM", "password").await.unwrap();
        assert_eq!(user.role, Role::Supporter);
    }

    #[tokio::test]
    async fn test_wrong_secret_leaves_session_unset() {
        let store = IdentityStore::default();
        let err = store.login("survivor@demo.com", "wrong").await.unwrap_err();
        assert_eq!(err, HavenError::InvalidCredentials);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let store = IdentityStore::default();
        store.login("sarah@clinic.com", "password").await.unwrap();
        assert!(store.login("survivor@demo.com", "nope").await.is_err());
        assert_eq!(store.current_user().await.unwrap().email, "sarah@clinic.com");
    }

    #[tokio::test]
    async fn test_register_signs_in_new_account() {
        let store = IdentityStore::default();
        let user = store
            .register(
                "Jamie",
                "jamie@example.com",
                "s3cret",
                Role::Survivor,
                RegistrationDetails {
                    alias: Some("NorthHope_1234".into()),
                    profession: None,
                },
            )
            .await
            .unwrap();

        assert!(user.id.starts_with("u_"));
        assert_eq!(store.current_user().await.unwrap().id, user.id);
        assert_eq!(user.display_name(), "NorthHope_1234");
        assert_eq!(store.account_count().await, 3);

        store.logout().await;
        let again = store.login("JAMIE@example.com", "s3cret").await.unwrap();
        assert_eq!(again.id, user.id);
    }

    #[tokio::test]
    async fn test_register_generates_survivor_alias() {
        let store = IdentityStore::default();
        let user = store
            .register("Kim", "kim@example.com", "pw", Role::Survivor, RegistrationDetails::default())
            .await
            .unwrap();
        assert!(user.alias.is_some_and(|alias| alias.contains('_')));
    }

    #[tokio::test]
    async fn test_register_supporter_keeps_profession() {
        let store = IdentityStore::default();
        let user = store
            .register(
                "Dana Law",
                "dana@firm.com",
                "pw",
                Role::Supporter,
                RegistrationDetails {
                    alias: None,
                    profession: Some(Profession::Lawyer),
                },
            )
            .await
            .unwrap();
        assert_eq!(user.alias, None);
        assert_eq!(user.profession, Some(Profession::Lawyer));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_any_case() {
        let store = IdentityStore::default();
        let err = store
            .register(
                "Copycat",
                "SURVIVOR@demo.com",
                "pw",
                Role::Survivor,
                RegistrationDetails::default(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, HavenError::EmailTaken(_)));
        assert_eq!(store.account_count().await, 2);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = IdentityStore::default();
        store.logout().await;
        store.login("survivor@demo.com", "password").await.unwrap();
        store.logout().await;
        store.logout().await;
        assert_eq!(store.current_user().await, None);
        assert_eq!(store.require_user().await.unwrap_err(), HavenError::NoActiveSession);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_simulated_latency() {
        let store = IdentityStore::new(Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        store.login("survivor@demo.com", "password").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let store = IdentityStore::default();
        store
            .register("X", "x@example.com", "pw", Role::Admin, RegistrationDetails::default())
            .await
            .unwrap();
        store.reset().await;
        assert_eq!(store.account_count().await, 2);
        assert!(!store.is_authenticated().await);
    }
}
