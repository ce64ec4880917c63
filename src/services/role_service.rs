use mongodb::bson::doc;

use crate::database::{Collection, DocumentStore};
use crate::models::{Account, Role};
use crate::services::documents::{find_all, find_first};
use crate::utils::error::AppResult;

pub async fn find_account(store: &dyn DocumentStore, email: &str) -> AppResult<Option<Account>> {
    find_first(store, Collection::Users, doc! { "email": email }).await
}

/// `None` when no account has this email or the account carries no
/// recognised role (rendered as `false` by the API).
pub async fn get_role(store: &dyn DocumentStore, email: &str) -> AppResult<Option<Role>> {
    Ok(find_account(store, email).await?.and_then(|account| account.role))
}

/// False for unknown accounts and accounts without the flag.
pub async fn is_verified(store: &dyn DocumentStore, email: &str) -> AppResult<bool> {
    Ok(find_account(store, email).await?.is_some_and(|account| account.verified))
}

pub async fn is_admin(store: &dyn DocumentStore, email: &str) -> AppResult<bool> {
    Ok(get_role(store, email).await? == Some(Role::Admin))
}

pub async fn list_by_role(store: &dyn DocumentStore, role: Role) -> AppResult<Vec<Account>> {
    find_all(store, Collection::Users, doc! { "role": role.as_str() }).await
}
