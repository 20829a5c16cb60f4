// src/util/testing.rs

use anyhow::Result;
use std::collections::HashMap;
use std::env;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteApi;
use crate::domain::{DomainError, Note, NotePayload};

/// Shorthand for building a note in tests
pub fn note(id: i64, title: &str, content: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
    }
}

/// A request received by [`MockNoteApi`], in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(NotePayload),
    Update(i64, NotePayload),
    Delete(i64),
}

/// Shared fake of the remote notes API
///
/// By default every call succeeds: create assigns ids from a counter, update
/// echoes the payload under the requested id, delete returns nothing.
/// Failures and server-side rewrites are configured per id.
///
/// # Examples
///
/// ```
/// use noteview::util::testing::{note, MockNoteApi};
/// use noteview::domain::DomainError;
///
/// let mock = MockNoteApi::builder()
///     .with_notes(vec![note(1, "Groceries", "milk")])
///     .with_delete_failure(1, DomainError::RequestFailed("offline".to_string()))
///     .build();
/// ```
pub struct MockNoteApi {
    notes: Vec<Note>,
    list_failure: Option<DomainError>,
    create_failure: Option<DomainError>,
    create_response: Option<Note>,
    next_id: AtomicI64,
    update_failures: HashMap<i64, DomainError>,
    update_responses: HashMap<i64, Note>,
    delete_failures: HashMap<i64, DomainError>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockNoteApi {
    pub fn builder() -> MockNoteApiBuilder {
        MockNoteApiBuilder::new()
    }

    /// All calls received so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: ApiCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl NoteApi for MockNoteApi {
    async fn list_notes(&self) -> Result<Vec<Note>, DomainError> {
        self.record(ApiCall::List);
        match &self.list_failure {
            Some(e) => Err(e.clone()),
            None => Ok(self.notes.clone()),
        }
    }

    async fn create_note(&self, payload: &NotePayload) -> Result<Note, DomainError> {
        self.record(ApiCall::Create(payload.clone()));
        if let Some(e) = &self.create_failure {
            return Err(e.clone());
        }
        if let Some(note) = &self.create_response {
            return Ok(note.clone());
        }
        Ok(Note {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: payload.title.clone(),
            content: payload.content.clone(),
        })
    }

    async fn update_note(&self, id: i64, payload: &NotePayload) -> Result<Note, DomainError> {
        self.record(ApiCall::Update(id, payload.clone()));
        if let Some(e) = self.update_failures.get(&id) {
            return Err(e.clone());
        }
        Ok(self.update_responses.get(&id).cloned().unwrap_or_else(|| Note {
            id,
            title: payload.title.clone(),
            content: payload.content.clone(),
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        self.record(ApiCall::Delete(id));
        match self.delete_failures.get(&id) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Builder for MockNoteApi
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteApiBuilder {
    notes: Vec<Note>,
    list_failure: Option<DomainError>,
    create_failure: Option<DomainError>,
    create_response: Option<Note>,
    next_id: i64,
    update_failures: HashMap<i64, DomainError>,
    update_responses: HashMap<i64, Note>,
    delete_failures: HashMap<i64, DomainError>,
}

impl MockNoteApiBuilder {
    pub fn new() -> Self {
        Self {
            notes: vec![],
            list_failure: None,
            create_failure: None,
            create_response: None,
            next_id: 1,
            update_failures: HashMap::new(),
            update_responses: HashMap::new(),
            delete_failures: HashMap::new(),
        }
    }

    /// Notes returned by list_notes, in this order
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    pub fn with_list_failure(mut self, error: DomainError) -> Self {
        self.list_failure = Some(error);
        self
    }

    /// Fixed note returned by every successful create
    pub fn with_create_response(mut self, note: Note) -> Self {
        self.create_response = Some(note);
        self
    }

    pub fn with_create_failure(mut self, error: DomainError) -> Self {
        self.create_failure = Some(error);
        self
    }

    /// First id handed out by create when no fixed response is configured
    pub fn with_next_id(mut self, id: i64) -> Self {
        self.next_id = id;
        self
    }

    /// Note returned by update_note for `id` instead of echoing the payload
    pub fn with_update_response(mut self, id: i64, note: Note) -> Self {
        self.update_responses.insert(id, note);
        self
    }

    pub fn with_update_failure(mut self, id: i64, error: DomainError) -> Self {
        self.update_failures.insert(id, error);
        self
    }

    pub fn with_delete_failure(mut self, id: i64, error: DomainError) -> Self {
        self.delete_failures.insert(id, error);
        self
    }

    pub fn build(self) -> MockNoteApi {
        MockNoteApi {
            notes: self.notes,
            list_failure: self.list_failure,
            create_failure: self.create_failure,
            create_response: self.create_response,
            next_id: AtomicI64::new(self.next_id),
            update_failures: self.update_failures,
            update_responses: self.update_responses,
            delete_failures: self.delete_failures,
            calls: Mutex::new(vec![]),
        }
    }
}

impl Default for MockNoteApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "want"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[ctor::ctor]
    fn init() {
        init_test_setup().expect("Failed to initialize test setup");
    }

    #[tokio::test]
    async fn given_notes_configured_when_listing_then_returns_them_in_order() {
        let mock = MockNoteApi::builder()
            .with_notes(vec![note(2, "B", "b"), note(1, "A", "a")])
            .build();

        let result = mock.list_notes().await.expect("List should succeed");

        assert_eq!(result, vec![note(2, "B", "b"), note(1, "A", "a")]);
        assert_eq!(mock.calls(), vec![ApiCall::List]);
    }

    #[tokio::test]
    async fn given_no_create_response_when_creating_then_assigns_sequential_ids() {
        let mock = MockNoteApi::builder().with_next_id(7).build();

        let first = mock
            .create_note(&NotePayload::new("T", "C"))
            .await
            .expect("Create should succeed");
        let second = mock
            .create_note(&NotePayload::new("U", "D"))
            .await
            .expect("Create should succeed");

        assert_eq!(first, note(7, "T", "C"));
        assert_eq!(second.id, 8);
    }

    #[tokio::test]
    async fn given_update_failure_configured_when_updating_then_only_that_id_fails() {
        let mock = MockNoteApi::builder()
            .with_update_failure(3, DomainError::RequestFailed("offline".to_string()))
            .build();
        let payload = NotePayload::new("T", "C");

        assert!(mock.update_note(3, &payload).await.is_err());
        assert_eq!(
            mock.update_note(4, &payload).await.expect("Update should succeed"),
            note(4, "T", "C")
        );
    }

    #[tokio::test]
    async fn given_delete_failure_configured_when_deleting_then_returns_error() {
        let mock = MockNoteApi::builder()
            .with_delete_failure(5, DomainError::NoteNotFound(5))
            .build();

        let result = mock.delete_note(5).await;

        assert!(matches!(result, Err(DomainError::NoteNotFound(5))));
        assert_eq!(mock.calls(), vec![ApiCall::Delete(5)]);
    }
}
