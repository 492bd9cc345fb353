use std::collections::HashMap;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};
use strum_macros::Display;

use crate::auth::basic::{AuthFailure, Credentials};
use crate::auth::password::{hash_password, verify_password};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Authority {
    Admin,
}

/// The authenticated principal, placed in request extensions by the security filter.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub authorities: Vec<Authority>,
}

impl AuthUser {
    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authorities.contains(&authority)
    }
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthUser>().cloned();
        ready(user.ok_or_else(|| ErrorUnauthorized(AuthFailure::FullAuthenticationRequired.to_string())))
    }
}

/// A user declared in configuration, password still in clear text.
#[derive(Debug, Clone)]
pub struct UserDefinition {
    pub username: String,
    pub password: String,
    pub authorities: Vec<Authority>,
}

struct StoredUser {
    password_hash: String,
    authorities: Vec<Authority>,
}

/// Fixed set of users, hashed once at startup.
pub struct InMemoryUserStore {
    users: HashMap<String, StoredUser>,
}

impl InMemoryUserStore {
    pub fn from_definitions(definitions: &[UserDefinition]) -> Result<Self, argon2::password_hash::Error> {
        let mut users = HashMap::with_capacity(definitions.len());
        for def in definitions {
            users.insert(
                def.username.clone(),
                StoredUser {
                    password_hash: hash_password(&def.password)?,
                    authorities: def.authorities.clone(),
                },
            );
        }
        Ok(Self { users })
    }

    pub fn authenticate(&self, credentials: &Credentials) -> Option<AuthUser> {
        let user = self.users.get(&credentials.username)?;
        verify_password(&credentials.password, &user.password_hash).ok()?;

        Some(AuthUser {
            username: credentials.username.clone(),
            authorities: user.authorities.clone(),
        })
    }
}
