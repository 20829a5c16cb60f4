// src/ports/terminal.rs
use crate::application::Draft;
use crate::domain::Note;

/// Plain-text rendering of the form and the note list for the shell.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, notes: &[Note], draft: &Draft, selection: Option<&Note>) -> String {
        let mut out = self.render_form(draft, selection);
        out.push('\n');
        out.push_str(&self.render_list(notes, selection));
        out
    }

    pub fn render_form(&self, draft: &Draft, selection: Option<&Note>) -> String {
        let (header, actions) = match selection {
            Some(note) => (format!("Editing note {}", note.id), "[Save] [Cancel]"),
            None => ("New note".to_string(), "[Add Note]"),
        };

        format!(
            "{}\n  Title:   {}\n  Content: {}\n  {}\n",
            header,
            field_or_placeholder(&draft.title, "Title..."),
            indent_continuation(&field_or_placeholder(&draft.content, "Content..."), 11),
            actions
        )
    }

    /// One entry per note, keyed by its id
    pub fn render_list(&self, notes: &[Note], selection: Option<&Note>) -> String {
        if notes.is_empty() {
            return "No notes\n".to_string();
        }

        let selected_id = selection.map(|n| n.id);
        let mut out = format!("Notes ({})\n", notes.len());
        for note in notes {
            let marker = if Some(note.id) == selected_id { '*' } else { ' ' };
            out.push_str(&format!("{} [{}] {}\n", marker, note.id, note.title));
            for line in note.content.lines() {
                out.push_str(&format!("      {}\n", line));
            }
        }
        out
    }
}

fn field_or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        format!("({})", placeholder)
    } else {
        value.to_string()
    }
}

fn indent_continuation(text: &str, width: usize) -> String {
    let pad = format!("\n{}", " ".repeat(width));
    text.lines().collect::<Vec<_>>().join(&pad)
}
