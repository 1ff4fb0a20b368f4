//! Session store: authentication state and its persistence.
//!
//! The store is an explicitly owned state object - construct one, pass it
//! around, drop it - not an ambient global. There are exactly two states:
//! anonymous and authenticated. A failed login or register leaves the
//! store anonymous with its previous state untouched.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use market_core::{Email, Role};

use crate::api::MarketApi;
use crate::error::{ApiError, Result, ValidationError};
use crate::models::{Identity, RegisterProfile};
use crate::storage::{StorageAdapter, keys};

/// Minimum password length for registration.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Holds the authenticated identity and keeps the persisted copy in sync.
pub struct SessionStore<A: MarketApi> {
    api: A,
    storage: Arc<dyn StorageAdapter>,
    identity: Option<Identity>,
    last_error: Option<String>,
}

impl<A: MarketApi> SessionStore<A> {
    /// Create a session store, restoring a persisted identity when both
    /// the token and the serialized identity are present.
    #[must_use]
    pub fn new(api: A, storage: Arc<dyn StorageAdapter>) -> Self {
        let identity = restore(storage.as_ref());
        Self {
            api,
            storage,
            identity,
            last_error: None,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Authenticate with email and password.
    ///
    /// On success the identity and token are replaced in memory and in
    /// storage. On failure nothing changes and the error is propagated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a structurally invalid email
    /// (no network call is made), [`ApiError::Auth`] for rejected
    /// credentials, or [`ApiError::Network`] when no response arrived.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Identity> {
        Email::parse(email)
            .map_err(ValidationError::from)
            .map_err(|e| self.record(e.into()))?;

        let response = self.api.login(email, password).await;
        match response {
            Ok(auth) => Ok(self.establish(auth.token, auth.user)),
            Err(error) => Err(self.record(error)),
        }
    }

    /// Register a new account.
    ///
    /// Preconditions are checked locally first; the backend is only
    /// contacted when they pass. On success this behaves like a login.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the profile fails local
    /// validation, otherwise the same errors as [`Self::login`].
    #[instrument(skip(self, profile), fields(email = %profile.email, role = ?profile.role))]
    pub async fn register(&mut self, profile: RegisterProfile) -> Result<Identity> {
        validate_profile(&profile).map_err(|e| self.record(e.into()))?;

        let response = self.api.register(&profile).await;
        match response {
            Ok(auth) => Ok(self.establish(auth.token, auth.user)),
            Err(error) => Err(self.record(error)),
        }
    }

    /// Confirm the session against the backend.
    ///
    /// A restored token may have expired while the process was down. On
    /// success the identity is refreshed with the server's copy; when
    /// the backend no longer accepts the token the session is cleared,
    /// so the next start is anonymous rather than half-authenticated.
    /// Other failures leave the session as it was.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when no token is held or the backend
    /// rejects it, or propagates network/server errors.
    #[instrument(skip(self))]
    pub async fn verify(&mut self) -> Result<Identity> {
        match self.api.current_user().await {
            Ok(identity) => {
                match serde_json::to_string(&identity) {
                    Ok(json) => self.storage.set(keys::IDENTITY, &json),
                    Err(error) => warn!(%error, "failed to persist identity"),
                }
                self.identity = Some(identity.clone());
                self.last_error = None;
                Ok(identity)
            }
            Err(error @ ApiError::Auth(_)) => {
                warn!("persisted session no longer accepted, clearing");
                self.logout();
                Err(self.record(error))
            }
            Err(error) => Err(self.record(error)),
        }
    }

    /// Drop the identity and its persisted copy. Calling this while
    /// already anonymous is a no-op.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        if self.identity.take().is_some() {
            debug!("session ended");
        }
        self.storage.remove(keys::TOKEN);
        self.storage.remove(keys::IDENTITY);
        self.last_error = None;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The current identity, if authenticated.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether the current identity has the seller role.
    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|identity| identity.role == Role::Seller)
    }

    /// Message of the most recent failure, for display. Cleared by the
    /// next successful operation and by logout.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Install a fresh identity and persist it alongside the token.
    fn establish(&mut self, token: String, identity: Identity) -> Identity {
        self.storage.set(keys::TOKEN, &token);
        match serde_json::to_string(&identity) {
            Ok(json) => self.storage.set(keys::IDENTITY, &json),
            Err(error) => warn!(%error, "failed to persist identity"),
        }
        debug!(user_id = %identity.id, role = ?identity.role, "session established");
        self.last_error = None;
        self.identity = Some(identity.clone());
        identity
    }

    fn record(&mut self, error: ApiError) -> ApiError {
        self.last_error = Some(error.to_string());
        error
    }
}

/// Restore a persisted identity. Requires both keys; anything corrupted
/// or half-present is cleared so the next start is clean.
fn restore(storage: &dyn StorageAdapter) -> Option<Identity> {
    let token = storage.get(keys::TOKEN);
    let raw_identity = storage.get(keys::IDENTITY);

    match (token, raw_identity) {
        (Some(_), Some(raw)) => match serde_json::from_str(&raw) {
            Ok(identity) => {
                debug!("restored persisted session");
                Some(identity)
            }
            Err(error) => {
                warn!(%error, "clearing corrupted persisted session");
                storage.remove(keys::TOKEN);
                storage.remove(keys::IDENTITY);
                None
            }
        },
        (None, None) => None,
        // Half a session is no session
        _ => {
            storage.remove(keys::TOKEN);
            storage.remove(keys::IDENTITY);
            None
        }
    }
}

/// Local registration preconditions. No network call is issued when any
/// of these fail.
fn validate_profile(profile: &RegisterProfile) -> std::result::Result<(), ValidationError> {
    if profile.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    Email::parse(&profile.email)?;
    if profile.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if profile.password != profile.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }

    if profile.role == Role::Seller {
        let store_info = profile
            .store_info
            .as_ref()
            .ok_or(ValidationError::MissingSellerField("information"))?;
        if store_info.name.trim().is_empty() {
            return Err(ValidationError::MissingSellerField("name"));
        }
        if store_info.phone.trim().is_empty() {
            return Err(ValidationError::MissingSellerField("phone"));
        }
        if store_info.address.trim().is_empty() {
            return Err(ValidationError::MissingSellerField("address"));
        }
    }

    Ok(())
}
