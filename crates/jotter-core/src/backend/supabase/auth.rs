//! GoTrue (`/auth/v1`) half of the Supabase client.

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;

use super::{Endpoints, SupabaseClient};
use crate::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use crate::backend::AuthBackend;
use crate::models::{Session, UserId};
use crate::util::{is_http_url, unix_timestamp_now};

impl<S: SessionPersistence> AuthBackend for SupabaseClient<S> {
    async fn current_user(&self) -> AuthResult<Option<Session>> {
        let endpoints = self.endpoints()?;
        let Some(session) = self.restore_session().await? else {
            return Ok(None);
        };

        let request = self.user_request(
            endpoints,
            &session,
            self.client.get(format!("{}/user", endpoints.auth_url)),
        );
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Stored session was rejected ({}); clearing it", status);
            self.store.clear_session()?;
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_api_error(status, &body));
        }

        let user = response.json::<SupabaseUser>().await?;
        Ok(Some(user.into()))
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Option<Session>> {
        let endpoints = self.endpoints()?;
        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            endpoints,
            self.client
                .post(format!("{}/signup", endpoints.auth_url))
                .json(&payload),
        );
        let response = send_auth_request(request).await?;
        match response.into_session()? {
            Some(session) => {
                self.store.save_session(&session)?;
                Ok(Some(session.user))
            }
            None => Ok(None),
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let endpoints = self.endpoints()?;
        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            endpoints,
            self.client
                .post(format!("{}/token", endpoints.auth_url))
                .query(&[("grant_type", "password")])
                .json(&payload),
        );

        let response = send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session.user)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let endpoints = self.endpoints()?;
        let Some(session) = self.store.load_session()? else {
            return Ok(());
        };

        let request = self.user_request(
            endpoints,
            &session,
            self.client.post(format!("{}/logout", endpoints.auth_url)),
        );
        let response = request.send().await?;
        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(parse_api_error(status, &body));
        }

        self.store.clear_session()?;
        Ok(())
    }
}

impl<S: SessionPersistence> SupabaseClient<S> {
    pub(super) async fn refresh_session(
        &self,
        endpoints: &Endpoints,
        refresh_token: &str,
    ) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }

        let payload = serde_json::json!({
            "refresh_token": refresh_token,
        });
        let request = self.public_request(
            endpoints,
            self.client
                .post(format!("{}/token", endpoints.auth_url))
                .query(&[("grant_type", "refresh_token")])
                .json(&payload),
        );
        let response = send_auth_request(request).await?;
        response.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })
    }
}

async fn send_auth_request(request: RequestBuilder) -> AuthResult<SupabaseAuthResponse> {
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(parse_api_error(status, &body));
    }
    Ok(response.json::<SupabaseAuthResponse>().await?)
}

pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/auth/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/auth/v1"))
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseAuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<SupabaseUser>,
    session: Option<SupabaseAuthResponseSession>,
}

impl SupabaseAuthResponse {
    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let nested_session = self.session;
        let access_token = self.access_token.or_else(|| {
            nested_session
                .as_ref()
                .and_then(|session| session.access_token.clone())
        });
        let refresh_token = self.refresh_token.or_else(|| {
            nested_session
                .as_ref()
                .and_then(|session| session.refresh_token.clone())
        });
        let expires_at = self
            .expires_at
            .or_else(|| {
                nested_session
                    .as_ref()
                    .and_then(|session| session.expires_at)
            })
            .or_else(|| {
                self.expires_in
                    .or_else(|| {
                        nested_session
                            .as_ref()
                            .and_then(|session| session.expires_in)
                    })
                    .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
            });
        let user = self
            .user
            .or_else(|| nested_session.and_then(|session| session.user))
            .map(Into::into);

        match (access_token, refresh_token, expires_at, user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseAuthResponseSession {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<SupabaseUser>,
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: UserId,
    email: Option<String>,
}

impl From<SupabaseUser> for Session {
    fn from(value: SupabaseUser) -> Self {
        Self {
            user_id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseErrorResponse {
    error: Option<String>,
    error_code: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> AuthError {
    if let Ok(payload) = serde_json::from_str::<SupabaseErrorResponse>(body) {
        match payload.error_code.as_deref().or(payload.error.as_deref()) {
            Some("email_not_confirmed") => return AuthError::EmailNotConfirmed,
            Some("invalid_credentials" | "invalid_grant") => {
                return AuthError::InvalidCredentials;
            }
            _ => {}
        }

        if let Some(message) = payload
            .message
            .or(payload.msg)
            .or(payload.error_description)
            .or(payload.error)
        {
            let message = message.trim();
            if message.eq_ignore_ascii_case("Email not confirmed") {
                return AuthError::EmailNotConfirmed;
            }
            if message.eq_ignore_ascii_case("Invalid login credentials") {
                return AuthError::InvalidCredentials;
            }
            return AuthError::Api(format!("{} ({})", message, status.as_u16()));
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        AuthError::Api(format!("HTTP {}", status.as_u16()))
    } else {
        AuthError::Api(format!("{} ({})", trimmed, status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_ID: &str = "6f1c1d3e-2b4a-4c5d-8e9f-0a1b2c3d4e5f";

    fn user() -> SupabaseUser {
        SupabaseUser {
            id: USER_ID.parse().unwrap(),
            email: Some("user@example.com".to_string()),
        }
    }

    #[test]
    fn normalize_auth_url_appends_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn normalize_auth_url_keeps_existing_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co/auth/v1/").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn response_without_session_fields_means_confirmation_required() {
        let response = SupabaseAuthResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(user()),
            session: None,
        };
        assert!(response.into_session().unwrap().is_none());
    }

    #[test]
    fn token_response_becomes_session() {
        let body = format!(
            r#"{{
                "access_token": "at",
                "refresh_token": "rt",
                "expires_in": 3600,
                "token_type": "bearer",
                "user": {{ "id": "{USER_ID}", "email": "user@example.com" }}
            }}"#
        );
        let response: SupabaseAuthResponse = serde_json::from_str(&body).unwrap();
        let session = response.into_session().unwrap().unwrap();
        assert_eq!(session.user.user_id.to_string(), USER_ID);
        assert!(!session.is_expired());
    }

    #[test]
    fn nested_session_response_becomes_session() {
        let body = format!(
            r#"{{
                "user": {{ "id": "{USER_ID}", "email": "user@example.com" }},
                "session": {{
                    "access_token": "at",
                    "refresh_token": "rt",
                    "expires_at": 4102444800,
                    "user": {{ "id": "{USER_ID}", "email": "user@example.com" }}
                }}
            }}"#
        );
        let response: SupabaseAuthResponse = serde_json::from_str(&body).unwrap();
        let session = response.into_session().unwrap().unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token, "rt");
        assert_eq!(session.expires_at, 4_102_444_800);
        assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn partial_session_fields_are_an_error() {
        let response = SupabaseAuthResponse {
            access_token: Some("at".to_string()),
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(user()),
            session: None,
        };
        assert!(matches!(response.into_session(), Err(AuthError::Api(_))));
    }

    #[test]
    fn email_not_confirmed_is_recognized() {
        let by_code = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"code":400,"error_code":"email_not_confirmed","msg":"Email not confirmed"}"#,
        );
        assert!(matches!(by_code, AuthError::EmailNotConfirmed));

        let by_message = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_request","error_description":"Email not confirmed"}"#,
        );
        assert!(matches!(by_message, AuthError::EmailNotConfirmed));
    }

    #[test]
    fn invalid_credentials_are_recognized() {
        let error = parse_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert!(matches!(error, AuthError::InvalidCredentials));
    }

    #[test]
    fn other_errors_keep_message_and_status() {
        let error = parse_api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#,
        );
        assert!(
            matches!(error, AuthError::Api(message) if message == "Password should be at least 6 characters. (422)")
        );
        assert!(matches!(
            parse_api_error(StatusCode::BAD_GATEWAY, "  "),
            AuthError::Api(message) if message == "HTTP 502"
        ));
    }
}
