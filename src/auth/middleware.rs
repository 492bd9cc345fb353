use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::{debug, warn};

use crate::auth::security::WebSecurity;

/// Basic-auth filter: authenticates any Basic credentials present, then checks
/// the route table before the request reaches a handler.
pub async fn basic_auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let security = req
        .app_data::<Data<WebSecurity>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Security configuration missing"))?;

    let user = match security.authenticate(req.headers()) {
        Ok(user) => user,
        Err(failure) => {
            warn!(path = %req.path(), %failure, "Authentication failed");
            let resp = security.challenge(failure);
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    };

    // Rules apply to the decoded path the router matched, not the raw URI.
    let path = req.match_info().as_str().to_owned();
    let access = security.access_for(req.method(), &path);
    if let Err(failure) = security.authorize(access, user.as_ref()) {
        warn!(method = %req.method(), path = %path, %failure, "Access rejected");
        let resp = security.challenge(failure);
        return Ok(req.into_response(resp.map_into_boxed_body()));
    }

    if let Some(user) = user {
        debug!(username = %user.username, "Authenticated request");
        req.extensions_mut().insert(user);
    }

    next.call(req).await
}
