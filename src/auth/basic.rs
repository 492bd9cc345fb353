use base64::{Engine as _, engine::general_purpose::STANDARD};
use derive_more::Display;

/// Reasons a request is turned away with a 401 challenge.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
pub enum AuthFailure {
    #[display(fmt = "Full authentication is required to access this resource")]
    FullAuthenticationRequired,
    #[display(fmt = "Bad credentials")]
    BadCredentials,
    #[display(fmt = "Invalid basic authentication token")]
    InvalidToken,
    #[display(fmt = "Access is denied")]
    AccessDenied,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parses an `Authorization` header value.
    ///
    /// Returns `Ok(None)` for schemes other than Basic, which are left alone.
    pub fn from_header(value: &str) -> Result<Option<Self>, AuthFailure> {
        let value = value.trim();
        let Some((scheme, token)) = value.split_once(' ') else {
            return Ok(None);
        };
        if !scheme.eq_ignore_ascii_case("basic") {
            return Ok(None);
        }

        let decoded = STANDARD
            .decode(token.trim())
            .map_err(|_| AuthFailure::InvalidToken)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthFailure::InvalidToken)?;

        // Passwords may contain ':'; usernames may not.
        let (username, password) = decoded.split_once(':').ok_or(AuthFailure::InvalidToken)?;

        Ok(Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn parses_basic_credentials() {
        let creds = Credentials::from_header(&basic("admin:s3:cret")).unwrap().unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "s3:cret");

        let lower = format!("basic {}", STANDARD.encode("a:b"));
        assert!(Credentials::from_header(&lower).unwrap().is_some());
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(Credentials::from_header("Bearer abc.def"), Ok(None));
        assert_eq!(Credentials::from_header("Basic"), Ok(None));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(Credentials::from_header("Basic !!!"), Err(AuthFailure::InvalidToken));
        assert_eq!(Credentials::from_header(&basic("no-colon")), Err(AuthFailure::InvalidToken));
    }

    #[test]
    fn failure_messages() {
        assert_eq!(AuthFailure::BadCredentials.to_string(), "Bad credentials");
        assert_eq!(
            AuthFailure::FullAuthenticationRequired.to_string(),
            "Full authentication is required to access this resource"
        );
    }
}
