// src/application/editor.rs
use crate::application::NoteApi;
use crate::domain::{DomainError, Note, NotePayload};
use tracing::{debug, error, info, instrument};

/// Title and content held by the edit form, not yet persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// First required field that is still empty, if any.
    ///
    /// Mirrors a `required` form control: whitespace counts as a value.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.is_empty() {
            Some("title")
        } else if self.content.is_empty() {
            Some("content")
        } else {
            None
        }
    }

    pub fn to_payload(&self) -> NotePayload {
        NotePayload::new(self.title.clone(), self.content.clone())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No selection: submit creates a new note
    Composing,
    /// A note is selected: submit updates it, cancel returns to composing
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Note),
    Updated(Note),
}

/// State of the note editor view: the note collection, the draft and the
/// current selection.
///
/// Local state only changes after the server confirmed a mutation. Every
/// error path leaves collection, draft and selection exactly as they were.
pub struct NoteEditor<A: NoteApi> {
    api: A,
    notes: Vec<Note>,
    draft: Draft,
    selection: Option<Note>,
}

impl<A: NoteApi> NoteEditor<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notes: Vec::new(),
            draft: Draft::default(),
            selection: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn selection(&self) -> Option<&Note> {
        self.selection.as_ref()
    }

    pub fn mode(&self) -> Mode {
        match self.selection {
            Some(_) => Mode::Editing,
            None => Mode::Composing,
        }
    }

    /// Replace the collection with the server's notes, in server order.
    ///
    /// Returns the number of notes loaded. On failure the collection is left
    /// untouched, which at start-up means empty.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&mut self) -> Result<usize, DomainError> {
        match self.api.list_notes().await {
            Ok(notes) => {
                info!(count = notes.len(), "Loaded notes");
                self.notes = notes;
                Ok(self.notes.len())
            }
            Err(e) => {
                error!(error = %e, "Failed to load notes");
                Err(e)
            }
        }
    }

    /// Enter editing mode for the note with `id`, overwriting the draft.
    pub fn select(&mut self, id: i64) -> Result<&Note, DomainError> {
        let note = self
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(DomainError::NoteNotFound(id))?;

        debug!(note_id = id, "Selected note");
        self.draft = Draft::from_note(&note);
        Ok(&*self.selection.insert(note))
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    /// Drop the draft and selection. No request is made.
    pub fn cancel(&mut self) {
        debug!("Cancelled edit");
        self.reset_form();
    }

    /// Create or update depending on the current mode.
    #[instrument(level = "debug", skip(self))]
    pub async fn submit(&mut self) -> Result<SubmitOutcome, DomainError> {
        if let Some(field) = self.draft.missing_field() {
            debug!(field, "Submit blocked by empty required field");
            return Err(DomainError::EmptyField(field));
        }

        let payload = self.draft.to_payload();
        match self.selection.as_ref().map(|n| n.id) {
            None => self.create(payload).await,
            Some(id) => self.update(id, payload).await,
        }
    }

    async fn create(&mut self, payload: NotePayload) -> Result<SubmitOutcome, DomainError> {
        let created = self.api.create_note(&payload).await.map_err(|e| {
            error!(error = %e, "Failed to create note");
            e
        })?;

        info!(note_id = created.id, "Created note");
        self.notes.push(created.clone());
        self.draft.clear();
        Ok(SubmitOutcome::Created(created))
    }

    async fn update(&mut self, id: i64, payload: NotePayload) -> Result<SubmitOutcome, DomainError> {
        let updated = self.api.update_note(id, &payload).await.map_err(|e| {
            error!(note_id = id, error = %e, "Failed to update note");
            e
        })?;

        info!(note_id = id, "Updated note");
        for note in self.notes.iter_mut().filter(|n| n.id == id) {
            *note = updated.clone();
        }
        self.reset_form();
        Ok(SubmitOutcome::Updated(updated))
    }

    /// Delete the note with `id` and drop it from the collection.
    ///
    /// Draft and selection are never touched, even when the deleted note is
    /// the one being edited.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        self.api.delete_note(id).await.map_err(|e| {
            error!(note_id = id, error = %e, "Failed to delete note");
            e
        })?;

        info!(note_id = id, "Deleted note");
        self.notes.retain(|n| n.id != id);
        Ok(())
    }

    fn reset_form(&mut self) {
        self.draft.clear();
        self.selection = None;
    }
}
