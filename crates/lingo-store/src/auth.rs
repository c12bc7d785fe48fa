use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;
use lingo_config::firebase::FirebaseConfig;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    /// Bearer token for the document store
    pub id_token: String,
}

pub type AuthCallback = Box<dyn Fn(Option<&AuthUser>) + Send + Sync>;

type Listeners = Mutex<Vec<(u64, Arc<AuthCallback>)>>;

/// Current sign-in state plus the callbacks watching it
#[derive(Default)]
pub struct AuthSession {
    current: Mutex<Option<AuthUser>>,
    listeners: Arc<Listeners>,
    next_id: AtomicU64,
}

/// Keeps an auth-state callback registered; dropping it unsubscribes
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };
        if let Ok(mut listeners) = listeners.lock() {
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

impl AuthSession {
    pub fn current(&self) -> Option<AuthUser> {
        self.current.lock().ok().and_then(|user| user.clone())
    }

    /// Register `callback`; it runs right away with the current state
    pub fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let callback = Arc::new(callback);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, callback.clone()));
        }
        callback(self.current().as_ref());

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Replace the state and notify every listener
    pub fn transition(&self, user: Option<AuthUser>) {
        if let Ok(mut current) = self.current.lock() {
            current.clone_from(&user);
        }
        // Callbacks run without the lock held so they may subscribe or unsubscribe
        let callbacks: Vec<_> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, cb)| cb.clone()).collect(),
            Err(_) => Vec::new(),
        };
        for callback in callbacks {
            callback(user.as_ref());
        }
    }
}

/// Identity provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an account; the new account is signed in
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;

    fn session(&self) -> &AuthSession;

    fn current_user(&self) -> Option<AuthUser> {
        self.session().current()
    }

    /// Callback fires immediately and on every sign-in state change
    fn on_auth_state_changed(&self, callback: AuthCallback) -> Subscription {
        self.session().subscribe(callback)
    }
}

fn validate(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput(
            "email and password are required".to_string(),
        ));
    }
    Ok(())
}

struct Account {
    uid: String,
    password: String,
}

/// In-process accounts, for local use and tests
#[derive(Default)]
pub struct MemoryAuthProvider {
    accounts: Mutex<HashMap<String, Account>>,
    session: AuthSession,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn signed_in(&self, uid: &str, email: &str) -> AuthUser {
        let user = AuthUser {
            uid: uid.to_string(),
            email: email.to_string(),
            id_token: format!("local-{}", Uuid::new_v4().simple()),
        };
        self.session.transition(Some(user.clone()));
        user
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        validate(email, password)?;
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let uid = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|_| AuthError::InvalidInput("account table unavailable".to_string()))?;
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailExists);
            }
            let uid = Uuid::new_v4().simple().to_string();
            accounts.insert(
                email.clone(),
                Account {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            uid
        };

        Ok(self.signed_in(&uid, &email))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        validate(email, password)?;
        let email = email.trim().to_lowercase();
        let uid = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|_| AuthError::InvalidInput("account table unavailable".to_string()))?;
            match accounts.get(&email) {
                Some(account) if account.password == password => account.uid.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };

        Ok(self.signed_in(&uid, &email))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.session.transition(None);
        Ok(())
    }

    fn session(&self) -> &AuthSession {
        &self.session
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
}

/// Firebase Authentication (Identity Toolkit) email/password REST client
pub struct FirebaseAuth {
    client: reqwest::Client,
    api_key: String,
    auth_url: String,
    session: AuthSession,
}

impl FirebaseAuth {
    pub fn new(config: &FirebaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            auth_url: config.auth_url.trim_end_matches('/').to_string(),
            session: AuthSession::default(),
        }
    }

    fn map_error(status: u16, message: &str) -> AuthError {
        // Messages look like "WEAK_PASSWORD : Password should be at least 6 characters"
        let (code, detail) = match message.split_once(':') {
            Some((code, detail)) => (code.trim(), detail.trim()),
            None => (message.trim(), ""),
        };
        match code {
            "EMAIL_EXISTS" => AuthError::EmailExists,
            "EMAIL_NOT_FOUND"
            | "INVALID_PASSWORD"
            | "INVALID_LOGIN_CREDENTIALS"
            | "USER_DISABLED" => AuthError::InvalidCredentials,
            "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
            "CONFIGURATION_NOT_FOUND" | "OPERATION_NOT_ALLOWED" => AuthError::ProviderDisabled,
            _ => AuthError::Rejected {
                status,
                message: message.to_string(),
            },
        }
    }

    async fn request(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        validate(email, password)?;

        let response = self
            .client
            .post(format!("{}/accounts:{action}", self.auth_url))
            .query(&[("key", &self.api_key)])
            .json(&json!({
                "email": email.trim(),
                "password": password,
                "returnSecureToken": true
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let json: serde_json::Value = response.json().await.unwrap_or_default();
            let message = json["error"]["message"].as_str().unwrap_or("request failed");
            let error = Self::map_error(status.as_u16(), message);
            if matches!(error, AuthError::ProviderDisabled) {
                tracing::error!(
                    "Enable the Email/Password sign-in provider in the Firebase console"
                );
            }
            return Err(error);
        }

        let token: TokenResponse = response.json().await?;
        let user = AuthUser {
            uid: token.local_id,
            email: if token.email.is_empty() {
                email.trim().to_string()
            } else {
                token.email
            },
            id_token: token.id_token,
        };

        tracing::info!("Signed in as {}", user.email);
        self.session.transition(Some(user.clone()));
        Ok(user)
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.request("signUp", email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.request("signInWithPassword", email, password).await
    }

    /// Tokens are bearer-only, signing out just forgets them
    async fn logout(&self) -> Result<(), AuthError> {
        self.session.transition(None);
        Ok(())
    }

    fn session(&self) -> &AuthSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<Option<String>>>>, AuthCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: AuthCallback = Box::new(move |user: Option<&AuthUser>| {
            sink.lock().unwrap().push(user.map(|u| u.email.clone()));
        });
        (seen, callback)
    }

    #[tokio::test]
    async fn callback_fires_immediately_and_on_transitions() {
        let auth = MemoryAuthProvider::new();
        let (seen, callback) = recorder();

        let subscription = auth.on_auth_state_changed(callback);
        auth.sign_up("ana@example.com", "secret1").await.unwrap();
        auth.logout().await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("ana@example.com".to_string()), None]
        );

        subscription.unsubscribe();
        auth.login("ana@example.com", "secret1").await.unwrap();
        assert_eq!(seen.lock().unwrap().len(), 3);
        assert_eq!(auth.current_user().unwrap().email, "ana@example.com");
    }

    #[tokio::test]
    async fn memory_provider_validates_accounts() {
        let auth = MemoryAuthProvider::new();

        assert!(matches!(
            auth.sign_up("ana@example.com", "123").await,
            Err(AuthError::WeakPassword(_))
        ));
        assert!(matches!(
            auth.sign_up("not-an-email", "secret1").await,
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(auth.login("", "").await, Err(AuthError::InvalidInput(_))));

        let user = auth.sign_up("Ana@Example.com", "secret1").await.unwrap();
        assert!(matches!(
            auth.sign_up("ana@example.com", "secret2").await,
            Err(AuthError::EmailExists)
        ));
        assert!(matches!(
            auth.login("ana@example.com", "wrong-1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(auth.login("ana@example.com", "secret1").await.unwrap().uid, user.uid);
    }

    fn firebase(server: &MockServer) -> FirebaseAuth {
        FirebaseAuth::new(&FirebaseConfig {
            api_key: "web-key".into(),
            project_id: "demo".into(),
            auth_url: server.uri(),
            ..FirebaseConfig::default()
        })
    }

    #[tokio::test]
    async fn firebase_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts:signInWithPassword"))
            .and(query_param("key", "web-key"))
            .and(body_partial_json(json!({
                "email": "ana@example.com",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-1",
                "email": "ana@example.com",
                "idToken": "jwt-token",
                "refreshToken": "r",
                "expiresIn": "3600"
            })))
            .mount(&server)
            .await;

        let auth = firebase(&server);
        let user = auth.login("ana@example.com", "secret1").await.unwrap();

        assert_eq!(user.uid, "uid-1");
        assert_eq!(user.id_token, "jwt-token");
        assert_eq!(auth.current_user(), Some(user));
    }

    #[tokio::test]
    async fn firebase_error_codes_are_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "WEAK_PASSWORD : Password should be at least 6 characters"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "INVALID_LOGIN_CREDENTIALS"}
            })))
            .mount(&server)
            .await;

        let auth = firebase(&server);
        match auth.sign_up("ana@example.com", "123").await {
            Err(AuthError::WeakPassword(detail)) => {
                assert_eq!(detail, "Password should be at least 6 characters")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            auth.login("ana@example.com", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(auth.current_user(), None);
    }

    #[test]
    fn unknown_codes_keep_message() {
        match FirebaseAuth::map_error(400, "SOMETHING_NEW") {
            AuthError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "SOMETHING_NEW");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
