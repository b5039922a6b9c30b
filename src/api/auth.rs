//! Auth service client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{http_client, AuthAction, AuthApi, AuthRequest, AuthResponse};
use crate::errors::{ClientError, Result};
use crate::models::AuthOutcome;

pub struct AuthClient {
    client: Client,
    url: String,
}

impl AuthClient {
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: http_client(user_agent)?,
            url: url.into(),
        })
    }

    async fn submit(&self, action: AuthAction, username: &str, password: &str) -> Result<AuthOutcome> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Please fill in all fields".to_string()));
        }

        debug!("Sending {} request for user {}", action.as_str(), username);

        let response = self
            .client
            .post(&self.url)
            .json(&AuthRequest { action, username, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: AuthResponse = serde_json::from_str(&body)?;

        match parsed {
            AuthResponse {
                success: true,
                session_token: Some(token),
                user: Some(user),
                ..
            } => {
                info!("{} succeeded for user {}", action.as_str(), user.username);
                Ok(AuthOutcome::Success { user, token })
            }
            AuthResponse { error, .. } => {
                let reason = error.unwrap_or_else(|| action.default_failure().to_string());
                debug!("{} rejected (status {}): {}", action.as_str(), status, reason);
                Ok(AuthOutcome::Failure(reason))
            }
        }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        self.submit(AuthAction::Login, username, password).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        self.submit(AuthAction::Register, username, password).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_login_success_returns_user_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(serde_json::json!({
                "action": "login",
                "username": "alice",
                "password": "secret"
            })))
            .with_status(200)
            .with_body(
                r#"{"success": true, "session_token": "tok-1",
                    "user": {"id": 7, "username": "alice", "is_admin": false}}"#,
            )
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "test").unwrap();
        let outcome = client.login("alice", "secret").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            AuthOutcome::Success {
                user: User { id: 7, username: "alice".to_string(), is_admin: false },
                token: "tok-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_bad_credentials_are_a_failure_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(401)
            .with_body(r#"{"error": "Invalid credentials"}"#)
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "test").unwrap();
        let outcome = client.login("alice", "wrong").await.unwrap();
        assert_eq!(outcome, AuthOutcome::Failure("Invalid credentials".to_string()));
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({"action": "register"})))
            .with_status(409)
            .with_body(r#"{"error": "Username already exists"}"#)
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "test").unwrap();
        let outcome = client.register("alice", "secret").await.unwrap();
        assert_eq!(outcome, AuthOutcome::Failure("Username already exists".to_string()));
    }

    #[tokio::test]
    async fn test_blank_credentials_send_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let client = AuthClient::new(server.url(), "test").unwrap();
        let err = client.login("alice", "").await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_credentials_are_sent_as_typed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Json(serde_json::json!({
                "action": "login",
                "username": "a",
                "password": " pass word "
            })))
            .with_status(200)
            .with_body(
                r#"{"success": true, "session_token": "tok-2",
                    "user": {"id": 3, "username": "a", "is_admin": false}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = AuthClient::new(server.url(), "test").unwrap();
        let outcome = client.login("a", " pass word ").await.unwrap();

        mock.assert_async().await;
        assert!(matches!(outcome, AuthOutcome::Success { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        let client = AuthClient::new("http://127.0.0.1:1", "test").unwrap();
        let err = client.login("alice", "secret").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.notice(), "Network error");
    }
}
