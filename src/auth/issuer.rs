use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::identity::Identity;
use super::password::{hash_password, verify_password, HASH_COST};
use super::role::Role;

/// Opaque bearer credential, bound 1:1 to an identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token(String);

impl Token {
    fn mint() -> Self {
        let mut bytes = [0u8; 20];
        rand::thread_rng().fill(&mut bytes);
        Token(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug)]
struct Account {
    user_id: u64,
    username: String,
    password_hash: String,
    roles: Vec<Role>,
    superuser: bool,
    token: Option<Token>,
}

impl Account {
    fn identity(&self) -> Identity {
        Identity::new(
            self.user_id,
            self.username.clone(),
            self.roles.clone(),
            self.superuser,
        )
    }
}

/// Exchanges credentials for opaque bearer tokens and resolves presented
/// tokens back to identities.
///
/// Issuing twice for the same identity returns the existing token; only
/// [`revoke`](Self::revoke) retires one. Credential failures collapse into a
/// single [`AuthError::InvalidCredentials`] so callers cannot probe which of
/// username and password was wrong.
pub struct TokenIssuer {
    accounts: RwLock<HashMap<String, Account>>,
    tokens: RwLock<HashMap<String, String>>,
    next_user_id: AtomicU64,
    cost: u32,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::with_cost(HASH_COST)
    }

    /// Issuer with a custom bcrypt cost. Tests use [`bcrypt::MIN_COST`].
    pub fn with_cost(cost: u32) -> Self {
        TokenIssuer {
            accounts: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            next_user_id: AtomicU64::new(1),
            cost,
        }
    }

    /// Administrative: store an account with the given roles.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<Identity, AuthError> {
        self.create_account(username, password, roles, false)
    }

    /// Administrative: store an account that bypasses all permission checks.
    pub fn register_superuser(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        self.create_account(username, password, Vec::new(), true)
    }

    fn create_account(
        &self,
        username: &str,
        password: &str,
        roles: Vec<Role>,
        superuser: bool,
    ) -> Result<Identity, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::InvalidUsername(username.to_string()));
        }

        let password_hash = hash_password(password, self.cost)?;
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;
        if accounts.contains_key(username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let account = Account {
            user_id: self.next_user_id.fetch_add(1, Ordering::Relaxed),
            username: username.to_string(),
            password_hash,
            roles,
            superuser,
            token: None,
        };
        let identity = account.identity();
        accounts.insert(username.to_string(), account);
        Ok(identity)
    }

    /// Exchanges credentials for a token. Reuses the live token if the
    /// identity already holds one.
    pub fn issue(&self, username: &str, password: &str) -> Result<Token, AuthError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;

        let account = match accounts.get_mut(username) {
            Some(account) => account,
            None => {
                log::warn!("credential exchange failed for {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !verify_password(password, &account.password_hash)? {
            log::warn!("credential exchange failed for {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(token) = &account.token {
            return Ok(token.clone());
        }

        let token = Token::mint();
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;
        tokens.insert(token.as_str().to_string(), account.username.clone());
        account.token = Some(token.clone());
        Ok(token)
    }

    /// Looks up the identity bound to a presented token.
    pub fn resolve(&self, token: &Token) -> Result<Identity, AuthError> {
        let username = {
            let tokens = self
                .tokens
                .read()
                .map_err(|_| AuthError::LockPoisoned("read"))?;
            tokens.get(token.as_str()).cloned()
        }
        .ok_or(AuthError::UnknownToken)?;

        let accounts = self
            .accounts
            .read()
            .map_err(|_| AuthError::LockPoisoned("read"))?;
        let account = accounts.get(&username).ok_or(AuthError::UnknownToken)?;
        Ok(account.identity())
    }

    /// Invalidates a token. A later issue for the identity mints a fresh one.
    pub fn revoke(&self, token: &Token) -> Result<(), AuthError> {
        // Lock order matches issue: accounts before tokens.
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AuthError::LockPoisoned("write"))?;

        let username = tokens
            .remove(token.as_str())
            .ok_or(AuthError::UnknownToken)?;
        if let Some(account) = accounts.get_mut(&username) {
            account.token = None;
        }
        Ok(())
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const MIN_COST: u32 = 4;

    fn issuer() -> TokenIssuer {
        TokenIssuer::with_cost(MIN_COST)
    }

    #[test]
    fn register_assigns_increasing_user_ids() {
        let issuer = issuer();
        let alice = issuer.register("alice", "wonderland", vec![Role::Editor]).unwrap();
        let bob = issuer.register("bob", "builder", vec![Role::Viewer]).unwrap();
        assert_eq!(alice.user_id(), 1);
        assert_eq!(bob.user_id(), 2);
        assert_eq!(alice.roles(), &[Role::Editor]);
    }

    #[test]
    fn register_rejects_duplicates_and_blank_names() {
        let issuer = issuer();
        issuer.register("alice", "wonderland", Vec::new()).unwrap();
        assert_eq!(
            issuer.register("alice", "other", Vec::new()),
            Err(AuthError::UsernameTaken("alice".to_string()))
        );
        assert!(matches!(
            issuer.register("   ", "whatever", Vec::new()),
            Err(AuthError::InvalidUsername(_))
        ));
    }

    #[test]
    fn issue_and_resolve() {
        let issuer = issuer();
        issuer
            .register("alice", "wonderland", vec![Role::Editor])
            .unwrap();

        let token = issuer.issue("alice", "wonderland").unwrap();
        let identity = issuer.resolve(&token).unwrap();
        assert_eq!(identity.username(), "alice");
        assert_eq!(identity.roles(), &[Role::Editor]);
        assert!(!identity.is_superuser());
    }

    #[test]
    fn issue_reuses_live_token() {
        let issuer = issuer();
        issuer.register("alice", "wonderland", Vec::new()).unwrap();

        let first = issuer.issue("alice", "wonderland").unwrap();
        let second = issuer.issue("alice", "wonderland").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_credentials_are_indistinguishable() {
        let issuer = issuer();
        issuer.register("alice", "wonderland", Vec::new()).unwrap();

        let wrong_password = issuer.issue("alice", "not-it").unwrap_err();
        let unknown_user = issuer.issue("mallory", "wonderland").unwrap_err();
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_user, AuthError::InvalidCredentials);
    }

    #[test]
    fn revoke_invalidates_resolution() {
        let issuer = issuer();
        issuer.register("alice", "wonderland", Vec::new()).unwrap();

        let token = issuer.issue("alice", "wonderland").unwrap();
        issuer.revoke(&token).unwrap();
        assert_eq!(issuer.resolve(&token), Err(AuthError::UnknownToken));

        // Re-issuing after revocation mints a fresh token
        let fresh = issuer.issue("alice", "wonderland").unwrap();
        assert_ne!(fresh, token);
        assert!(issuer.resolve(&fresh).is_ok());
    }

    #[test]
    fn revoke_unknown_token_errors() {
        let issuer = issuer();
        let stray = Token("not-a-real-token".to_string());
        assert_eq!(issuer.revoke(&stray), Err(AuthError::UnknownToken));
    }

    #[test]
    fn superuser_flag_survives_resolution() {
        let issuer = issuer();
        issuer.register_superuser("root", "toor").unwrap();
        let token = issuer.issue("root", "toor").unwrap();
        assert!(issuer.resolve(&token).unwrap().is_superuser());
    }

    #[test]
    fn tokens_are_unique_per_identity() {
        let issuer = issuer();
        issuer.register("alice", "wonderland", Vec::new()).unwrap();
        issuer.register("bob", "builder", Vec::new()).unwrap();

        let alice_token = issuer.issue("alice", "wonderland").unwrap();
        let bob_token = issuer.issue("bob", "builder").unwrap();
        assert_ne!(alice_token, bob_token);
    }
}
