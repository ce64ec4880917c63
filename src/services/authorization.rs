use crate::database::DocumentStore;
use crate::services::role_service;
use crate::services::token_service::Claims;
use crate::utils::error::{AppError, AppResult};

/// Subject-scoped access: the token's email must be exactly the email named
/// by the request. No case folding.
pub fn authorize(claims: &Claims, requested_email: &str) -> AppResult<()> {
    if claims.email == requested_email {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Token for {} cannot access data of {}",
            claims.email, requested_email
        )))
    }
}

/// Admin-only operations: the token's account must currently hold the
/// admin role. Checked against the store, not the token, so a demoted admin
/// loses access immediately.
pub async fn require_admin(store: &dyn DocumentStore, claims: &Claims) -> AppResult<()> {
    if role_service::is_admin(store, &claims.email).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!("{} is not an admin", claims.email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Collection, MemoryStore};
    use mongodb::bson::doc;

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            iat: 0,
            exp: usize::MAX,
            jti: "test".to_string(),
        }
    }

    #[test]
    fn test_authorize_accepts_exact_match() {
        assert!(authorize(&claims("a@x.com"), "a@x.com").is_ok());
    }

    #[test]
    fn test_authorize_rejects_every_mismatch() {
        let emails = ["a@x.com", "A@x.com", "a@X.com", "b@x.com", ""];
        for claim_email in emails {
            for requested in emails {
                let result = authorize(&claims(claim_email), requested);
                if claim_email == requested {
                    assert!(result.is_ok());
                } else {
                    assert!(matches!(result, Err(AppError::Forbidden(_))), "{} vs {}", claim_email, requested);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_require_admin() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Users, doc! { "email": "admin@x.com", "role": "admin" }).await.unwrap();
        store.insert_one(Collection::Users, doc! { "email": "seller@x.com", "role": "seller" }).await.unwrap();

        assert!(require_admin(&store, &claims("admin@x.com")).await.is_ok());
        assert!(matches!(require_admin(&store, &claims("seller@x.com")).await, Err(AppError::Forbidden(_))));
        assert!(matches!(require_admin(&store, &claims("ghost@x.com")).await, Err(AppError::Forbidden(_))));
    }
}
