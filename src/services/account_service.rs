use bcrypt::{hash, DEFAULT_COST};
use mongodb::bson::{doc, oid::ObjectId, Bson};

use crate::database::{Collection, DocumentStore, UpdateCount};
use crate::models::{Account, Listing, NewAccount, Role};
use crate::services::documents::{find_all, insert, parse_object_id};
use crate::services::role_service;
use crate::utils::error::{AppError, AppResult};

/// Creates an account. Only `user` and `seller` can be self-assigned.
pub async fn register(store: &dyn DocumentStore, request: NewAccount) -> AppResult<ObjectId> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::InvalidRequest("A valid email is required".to_string()));
    }

    let role = request.role.unwrap_or_default();
    if role == Role::Admin {
        return Err(AppError::InvalidRequest("Admin accounts cannot be self-registered".to_string()));
    }

    if role_service::find_account(store, email).await?.is_some() {
        return Err(AppError::Conflict(format!("An account for {} already exists", email)));
    }

    let password_hash = match request.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash(password, DEFAULT_COST)?),
        _ => None,
    };

    let account = Account {
        id: None,
        email: email.to_string(),
        name: request.name,
        role: Some(role),
        verified: false,
        password_hash,
        image_url: request.image_url,
        wishlist: Vec::new(),
        created_at: chrono::Utc::now().timestamp(),
    };

    let id = insert(store, Collection::Users, &account).await?;
    log::info!("✅ Account created: {} ({})", email, role);
    Ok(id)
}

pub async fn list_all(store: &dyn DocumentStore) -> AppResult<Vec<Account>> {
    find_all(store, Collection::Users, doc! {}).await
}

pub async fn change_role(store: &dyn DocumentStore, email: &str, role: Role) -> AppResult<UpdateCount> {
    let count = store
        .update_one(Collection::Users, doc! { "email": email }, doc! { "$set": { "role": role.as_str() } })
        .await?;

    if count.matched == 0 {
        return Err(AppError::NotFound(format!("Account {} not found", email)));
    }
    Ok(count)
}

/// Removes a buyer account. Sellers and admins are not matched; sellers go
/// through `consistency::delete_seller_account` so their listings go too.
pub async fn delete_buyer(store: &dyn DocumentStore, email: &str) -> AppResult<u64> {
    let deleted = store
        .delete_one(Collection::Users, doc! { "email": email, "role": Role::User.as_str() })
        .await?;

    if deleted == 0 {
        return Err(AppError::NotFound(format!("Buyer {} not found", email)));
    }
    log::info!("🗑️  Buyer account {} deleted", email);
    Ok(deleted)
}

/// Adds a listing to the caller's wishlist. Adding twice is a no-op
/// (`modified == 0`).
pub async fn add_to_wishlist(store: &dyn DocumentStore, email: &str, product_id: &str) -> AppResult<UpdateCount> {
    let listing_id = parse_object_id(product_id, "product")?;
    if store.find_one(Collection::Products, doc! { "_id": listing_id }).await?.is_none() {
        return Err(AppError::NotFound(format!("Product {} not found", product_id)));
    }

    let count = store
        .update_one(
            Collection::Users,
            doc! { "email": email },
            doc! { "$addToSet": { "wishlist": listing_id.to_hex() } },
        )
        .await?;

    if count.matched == 0 {
        return Err(AppError::NotFound(format!("Account {} not found", email)));
    }
    Ok(count)
}

/// Listings on the caller's wishlist that still exist.
pub async fn wishlist(store: &dyn DocumentStore, email: &str) -> AppResult<Vec<Listing>> {
    let account = role_service::find_account(store, email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", email)))?;

    let ids: Vec<Bson> = account
        .wishlist
        .iter()
        .filter_map(|raw| ObjectId::parse_str(raw).ok())
        .map(Bson::ObjectId)
        .collect();

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    find_all(store, Collection::Products, doc! { "_id": { "$in": ids } }).await
}
