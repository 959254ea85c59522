//! PostgREST (`/rest/v1`) half of the Supabase client.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::SupabaseClient;
use crate::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use crate::backend::{NewNoteRow, NoteChanges, NotesBackend};
use crate::error::{Error, Result, ValidationError};
use crate::models::{Note, NoteId, UserId};
use crate::util::{compact_text, is_http_url};

const NOTES_TABLE: &str = "notes";
const RLS_VIOLATION: &str = "42501";

impl<S: SessionPersistence> NotesBackend for SupabaseClient<S> {
    async fn select_notes(&self, owner: &UserId) -> Result<Vec<Note>> {
        let request = self
            .table_request(|client, url| client.get(url))
            .await?
            .query(&list_query(owner));
        let response = send_rest_request(request).await?;
        Ok(response.json::<Vec<Note>>().await?)
    }

    async fn select_note(&self, id: &NoteId, owner: &UserId) -> Result<Option<Note>> {
        let mut query = vec![("select", "*".to_string())];
        query.extend(row_filter(id, owner));
        let request = self
            .table_request(|client, url| client.get(url))
            .await?
            .query(&query);
        let response = send_rest_request(request).await?;
        Ok(response.json::<Vec<Note>>().await?.into_iter().next())
    }

    async fn insert_note(&self, row: &NewNoteRow) -> Result<Note> {
        let request = self
            .table_request(|client, url| client.post(url))
            .await?
            .header("Prefer", "return=representation")
            .json(&[row]);
        let response = send_rest_request(request).await?;
        response
            .json::<Vec<Note>>()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Backend("Insert did not return the new row".to_string()))
    }

    async fn update_note(
        &self,
        id: &NoteId,
        owner: &UserId,
        changes: &NoteChanges,
    ) -> Result<Option<Note>> {
        let request = self
            .table_request(|client, url| client.patch(url))
            .await?
            .query(&row_filter(id, owner))
            .header("Prefer", "return=representation")
            .json(changes);
        let response = send_rest_request(request).await?;
        Ok(response.json::<Vec<Note>>().await?.into_iter().next())
    }

    async fn delete_note(&self, id: &NoteId, owner: &UserId) -> Result<()> {
        let request = self
            .table_request(|client, url| client.delete(url))
            .await?
            .query(&row_filter(id, owner))
            .header("Prefer", "return=minimal");
        send_rest_request(request).await?;
        Ok(())
    }
}

impl<S: SessionPersistence> SupabaseClient<S> {
    /// Request against the notes table, authorized as the stored session.
    async fn table_request(
        &self,
        method: impl FnOnce(&reqwest::Client, String) -> RequestBuilder,
    ) -> Result<RequestBuilder> {
        let endpoints = self.endpoints()?;
        let session = self.active_session().await?;
        let url = format!("{}/{NOTES_TABLE}", endpoints.rest_url);
        Ok(self
            .user_request(endpoints, &session, method(&self.client, url))
            .header("Accept", "application/json"))
    }

    async fn active_session(&self) -> Result<AuthSession> {
        self.restore_session()
            .await?
            .ok_or(Error::NotAuthenticated)
    }
}

pub fn normalize_rest_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let base = trimmed.strip_suffix("/auth/v1").unwrap_or(trimmed);
    if base.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(base) {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if base.ends_with("/rest/v1") {
        Ok(base.to_string())
    } else {
        Ok(format!("{base}/rest/v1"))
    }
}

fn owner_filter(owner: &UserId) -> (&'static str, String) {
    ("user_id", format!("eq.{owner}"))
}

fn list_query(owner: &UserId) -> Vec<(&'static str, String)> {
    vec![
        ("select", "*".to_string()),
        owner_filter(owner),
        ("order", "updated_at.desc".to_string()),
    ]
}

fn row_filter(id: &NoteId, owner: &UserId) -> Vec<(&'static str, String)> {
    vec![("id", format!("eq.{id}")), owner_filter(owner)]
}

async fn send_rest_request(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(parse_rest_error(status, &body));
    }
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

fn parse_rest_error(status: StatusCode, body: &str) -> Error {
    let payload = serde_json::from_str::<PostgrestErrorResponse>(body).ok();
    let code = payload
        .as_ref()
        .and_then(|payload| payload.code.clone())
        .unwrap_or_default();
    let message = payload
        .and_then(|payload| {
            payload.message.map(|message| match payload.details {
                Some(details) if !details.trim().is_empty() => {
                    format!("{}: {}", message.trim(), details.trim())
                }
                _ => message.trim().to_string(),
            })
        })
        .or_else(|| Some(compact_text(body)).filter(|text| !text.is_empty()));
    let with_status = |message: Option<String>| match message {
        Some(message) => format!("{} ({})", message, status.as_u16()),
        None => format!("HTTP {}", status.as_u16()),
    };

    if code == RLS_VIOLATION {
        return Error::Backend(with_status(message));
    }
    if status == StatusCode::UNAUTHORIZED {
        return Error::NotAuthenticated;
    }
    if code.starts_with("22")
        || code.starts_with("23")
        || status == StatusCode::BAD_REQUEST
        || status == StatusCode::CONFLICT
        || status == StatusCode::UNPROCESSABLE_ENTITY
    {
        let message = message.unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        return ValidationError::Rejected(message).into();
    }
    Error::Backend(with_status(message))
}
