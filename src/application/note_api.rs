// src/application/note_api.rs
use crate::domain::{DomainError, Note, NotePayload};

/// Remote note collection, one method per CRUD endpoint.
///
/// Implementations perform exactly one round-trip per call: no caching,
/// retries or timeouts.
#[allow(async_fn_in_trait)]
pub trait NoteApi {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError>;

    /// Create a note; the returned note carries the server-assigned id
    async fn create_note(&self, payload: &NotePayload) -> Result<Note, DomainError>;

    async fn update_note(&self, id: i64, payload: &NotePayload) -> Result<Note, DomainError>;

    /// Delete a note. Any response body is ignored.
    async fn delete_note(&self, id: i64) -> Result<(), DomainError>;
}
