use actix_web::{
    HttpResponse,
    http::{
        Method,
        header::{self, ContentType, HeaderMap},
    },
};

use crate::auth::auth::{Authority, AuthUser, InMemoryUserStore, UserDefinition};
use crate::auth::basic::{AuthFailure, Credentials};
use crate::config::Config;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Access {
    PermitAll,
    HasAuthority(Authority),
}

/// One row of the route table. `*` in the pattern matches exactly one path segment.
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub method: Method,
    pub pattern: String,
    pub access: Access,
}

impl RouteRule {
    pub fn new(method: Method, pattern: &str, access: Access) -> Self {
        Self {
            method,
            pattern: pattern.to_string(),
            access,
        }
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        if self.method != *method {
            return false;
        }

        let mut expected = self.pattern.split('/');
        let mut actual = path.split('/');
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return true,
                (Some("*"), Some(segment)) if !segment.is_empty() => continue,
                (Some(e), Some(a)) if e == a => continue,
                _ => return false,
            }
        }
    }
}

/// Declarative security setup, built once from [`Config`].
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub realm: String,
    pub users: Vec<UserDefinition>,
    pub rules: Vec<RouteRule>,
}

impl SecurityConfig {
    pub fn new(realm: &str, admin_username: &str, admin_password: &str) -> Self {
        Self {
            realm: realm.to_string(),
            users: vec![UserDefinition {
                username: admin_username.to_string(),
                password: admin_password.to_string(),
                authorities: vec![Authority::Admin],
            }],
            rules: vec![
                RouteRule::new(Method::POST, "/employees", Access::PermitAll),
                RouteRule::new(Method::GET, "/employees", Access::PermitAll),
                RouteRule::new(Method::GET, "/employees/*", Access::PermitAll),
                RouteRule::new(Method::PUT, "/employees/*", Access::PermitAll),
                RouteRule::new(Method::DELETE, "/employees/*", Access::HasAuthority(Authority::Admin)),
            ],
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.auth_realm, &config.admin_username, &config.admin_password)
    }
}

/// Runtime side of [`SecurityConfig`]: hashed credentials plus the route table.
pub struct WebSecurity {
    realm: String,
    rules: Vec<RouteRule>,
    users: InMemoryUserStore,
}

impl WebSecurity {
    pub fn build(config: SecurityConfig) -> Result<Self, argon2::password_hash::Error> {
        Ok(Self {
            users: InMemoryUserStore::from_definitions(&config.users)?,
            realm: config.realm,
            rules: config.rules,
        })
    }

    /// First matching rule wins; routes not in the table are public.
    pub fn access_for(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::PermitAll)
    }

    /// `Ok(None)` when no Basic credentials were sent. Credentials that were
    /// sent and do not check out fail the request whatever the route.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Option<AuthUser>, AuthFailure> {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Ok(None);
        };
        let value = value.to_str().map_err(|_| AuthFailure::InvalidToken)?;

        match Credentials::from_header(value)? {
            None => Ok(None),
            Some(credentials) => self
                .users
                .authenticate(&credentials)
                .map(Some)
                .ok_or(AuthFailure::BadCredentials),
        }
    }

    pub fn authorize(&self, access: Access, user: Option<&AuthUser>) -> Result<(), AuthFailure> {
        match (access, user) {
            (Access::PermitAll, _) => Ok(()),
            (Access::HasAuthority(_), None) => Err(AuthFailure::FullAuthenticationRequired),
            (Access::HasAuthority(authority), Some(user)) if user.has_authority(authority) => Ok(()),
            (Access::HasAuthority(_), Some(_)) => Err(AuthFailure::AccessDenied),
        }
    }

    /// 401 with a Basic challenge for this realm.
    pub fn challenge(&self, failure: AuthFailure) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", self.realm)))
            .content_type(ContentType::plaintext())
            .body(format!("HTTP Status 401 - {}\n", failure))
    }
}
