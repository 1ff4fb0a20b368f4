//! Identity and registration types.

use serde::{Deserialize, Serialize};

use market_core::{Email, Role, UserId};

/// Store details attached to seller accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreInfo {
    /// Store display name.
    pub name: String,
    /// Optional store description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contact phone number.
    pub phone: String,
    /// Store address.
    pub address: String,
}

/// The authenticated account, as returned by the backend.
///
/// Created from a login/register response and destroyed on logout.
/// The role never changes for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Account ID.
    #[serde(alias = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address. Values from the backend are assumed valid.
    pub email: Email,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Store details, present for sellers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_info: Option<StoreInfo>,
}

impl Identity {
    /// Whether this account has seller capabilities.
    #[must_use]
    pub const fn is_seller(&self) -> bool {
        self.role.is_seller()
    }
}

/// Input for account registration.
///
/// The confirmation password never goes over the wire; it only exists
/// for the local precondition check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password (minimum 6 characters).
    pub password: String,
    /// Password confirmation, checked locally.
    #[serde(skip)]
    pub confirm_password: String,
    /// Requested role.
    pub role: Role,
    /// Store details, required when registering as a seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_info: Option<StoreInfo>,
}
