use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::services::token_service::bearer_token;
use crate::state::AppState;
use crate::utils::error::AppError;

pub use crate::services::token_service::Claims;

/// Verifies the bearer token and stores its `Claims` in the request
/// extensions (read by handlers through `web::ReqData<Claims>`).
///
/// In required mode a missing header is rejected with 401. In optional mode
/// the request passes through without claims, but a header that *is* sent
/// must still verify.
#[derive(Clone, Copy)]
pub struct AuthMiddleware {
    required: bool,
}

impl AuthMiddleware {
    pub fn required() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            required: self.required,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    required: bool,
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<Option<Claims>, AppError> {
        let header = req.headers().get(AUTHORIZATION);
        if header.is_none() && !self.required {
            return Ok(None);
        }

        let header = match header {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::Unauthenticated("Invalid token format".to_string()))?,
            ),
            None => None,
        };
        let token = bearer_token(header)?;

        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::Internal("AppState not registered".to_string()))?;

        state.tokens.verify(token).map(Some)
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticate(&req) {
            Ok(claims) => {
                if let Some(claims) = claims {
                    log::debug!("🔐 Authenticated {} {} as {}", req.method(), req.path(), claims.email);
                    req.extensions_mut().insert(claims);
                }

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("❌ Rejected {} {}: {}", req.method(), req.path(), e);
                let res = req.error_response(e).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
