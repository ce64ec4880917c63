use mongodb::bson::{oid::ObjectId, Bson};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "user" => Some(Role::User),
            "seller" => Some(Role::Seller),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account document (collection `users`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absent, non-string or unrecognised roles decode as `None`.
    #[serde(default, deserialize_with = "lenient_role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Listing ids (hex), kept with set semantics
    #[serde(default)]
    pub wishlist: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
}

fn lenient_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    let raw = Option::<Bson>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Bson::String(value)) => {
            let role = Role::parse(&value);
            if role.is_none() {
                log::warn!("⚠️  Ignoring unknown account role {:?}", value);
            }
            role
        }
        _ => None,
    })
}

/// Registration body for `POST /api/users`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub name: Option<String>,
    /// Plaintext, stored only as a bcrypt hash
    pub password: Option<String>,
    pub role: Option<Role>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RoleChangeRequest {
    pub role: Role,
}

/// Account as returned by the API (no password hash)
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub verified: bool,
    pub image_url: Option<String>,
    pub wishlist: Vec<String>,
    pub created_at: i64,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        AccountResponse {
            id: account.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: account.email,
            name: account.name,
            role: account.role,
            verified: account.verified,
            image_url: account.image_url,
            wishlist: account.wishlist,
            created_at: account.created_at,
        }
    }
}
