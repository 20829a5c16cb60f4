// src/application/mod.rs
pub mod editor;
pub mod note_api;

pub use editor::{Draft, Mode, NoteEditor, SubmitOutcome};
pub use note_api::NoteApi;
