// src/infrastructure/http.rs
use crate::application::NoteApi;
use crate::constants::NOTES_PATH;
use crate::domain::{DomainError, Note, NotePayload};
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// `NoteApi` over the JSON notes endpoints of a remote server.
///
/// The client is built without a timeout: a hung request stays pending.
#[derive(Debug, Clone)]
pub struct HttpNoteApi {
    client: Client,
    notes_url: Url,
}

impl HttpNoteApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid server URL: {}", base_url))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("Server URL must use http or https: {}", base_url);
        }
        if base.query().is_some() || base.fragment().is_some() {
            anyhow::bail!("Server URL must not have a query or fragment: {}", base_url);
        }

        let notes_url = Url::parse(&format!(
            "{}{}",
            base.as_str().trim_end_matches('/'),
            NOTES_PATH
        ))
        .with_context(|| format!("Invalid server URL: {}", base_url))?;

        debug!(%notes_url, "Created HttpNoteApi");
        Ok(Self { client, notes_url })
    }

    pub fn notes_url(&self) -> &Url {
        &self.notes_url
    }

    pub fn note_url(&self, id: i64) -> Url {
        let mut url = self.notes_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

fn map_error(e: reqwest::Error) -> DomainError {
    if e.is_decode() {
        DomainError::DecodeFailed(e.to_string())
    } else if let Some(status) = e.status() {
        DomainError::Status {
            status: status.as_u16(),
            url: e.url().map(|u| u.to_string()).unwrap_or_default(),
        }
    } else {
        DomainError::RequestFailed(e.to_string())
    }
}

impl NoteApi for HttpNoteApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.client
            .get(self.notes_url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_error)?
            .json::<Vec<Note>>()
            .await
            .map_err(map_error)
    }

    #[instrument(level = "debug", skip(self))]
    async fn create_note(&self, payload: &NotePayload) -> Result<Note, DomainError> {
        self.client
            .post(self.notes_url.clone())
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_error)?
            .json::<Note>()
            .await
            .map_err(map_error)
    }

    #[instrument(level = "debug", skip(self))]
    async fn update_note(&self, id: i64, payload: &NotePayload) -> Result<Note, DomainError> {
        self.client
            .put(self.note_url(id))
            .json(payload)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_error)?
            .json::<Note>()
            .await
            .map_err(map_error)
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        self.client
            .delete(self.note_url(id))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(map_error)?;
        Ok(())
    }
}
