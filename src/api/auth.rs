//! Login and registration endpoints

use super::{decode, ApiClient, ApiError, Auth};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login` and `POST /api/auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token
    pub fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let body = self.json_request("POST", "/api/auth/login", credentials, Auth::Anonymous)?;
        let response: LoginResponse = decode(&body)?;
        Ok(response.token)
    }

    /// Create an account. The body of a 200 response is ignored.
    pub fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.json_request("POST", "/api/auth/register", credentials, Auth::Anonymous)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;

    #[test]
    fn test_credentials_wire_names() {
        let json = serde_json::to_value(Credentials::new("alice", "pw")).unwrap();
        assert_eq!(json, serde_json::json!({ "Username": "alice", "Password": "pw" }));
    }

    #[test]
    fn test_register_then_login() {
        let backend = LocalBackend::start().unwrap();
        let client = ApiClient::new(backend.base_url());
        let creds = Credentials::new("alice", "Abcdefg1!2");

        client.register(&creds).unwrap();
        let token = client.login(&creds).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_login_failure_surfaces_body() {
        let backend = LocalBackend::start().unwrap();
        let client = ApiClient::new(backend.base_url());

        let err = client.login(&Credentials::new("ghost", "Abcdefg1!2")).unwrap_err();
        assert!(matches!(err, ApiError::Status { code: 401, .. }));
        assert_eq!(err.display_body(), "Invalid username or password.");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let backend = LocalBackend::start().unwrap();
        let client = ApiClient::new(backend.base_url());
        let creds = Credentials::new("bob", "Abcdefg1!2");

        client.register(&creds).unwrap();
        let err = client.register(&creds).unwrap_err();
        assert_eq!(err.display_body(), "Username already exists.");
    }
}
