// src/ports/html.rs
use crate::application::Draft;
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

/// Static HTML snapshot of the editor view.
///
/// List entries are keyed by note id (`data-key`), so two renders of the same
/// collection produce identical markup.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_form(&self, draft: &Draft, selection: Option<&Note>) -> String {
        let buttons = match selection {
            Some(_) => {
                r#"<div class="app__edit-buttons">
        <button type="submit">Save</button>
        <button type="button">Cancel</button>
      </div>"#
            }
            None => r#"<button type="submit">Add Note</button>"#,
        };

        format!(
            r#"<form class="app__note-form">
      <input name="title" value="{}" placeholder="Title..." required>
      <textarea name="content" placeholder="Content..." rows="10" required>{}</textarea>
      {}
    </form>"#,
            encode_double_quoted_attribute(&draft.title),
            encode_text(&draft.content),
            buttons
        )
    }

    fn render_note(&self, note: &Note, selected: bool) -> String {
        let class = if selected {
            "app__note-item app__note-item--selected"
        } else {
            "app__note-item"
        };
        format!(
            r#"<div class="{}" data-key="{}">
        <div class="app__note-header"><button type="button">x</button></div>
        <h2>{}</h2>
        <p>{}</p>
      </div>"#,
            class,
            note.id,
            encode_text(&note.title),
            encode_text(&note.content)
        )
    }

    #[instrument(level = "debug", skip_all, fields(notes = notes.len()))]
    pub fn render(&self, notes: &[Note], draft: &Draft, selection: Option<&Note>) -> String {
        let selected_id = selection.map(|n| n.id);
        let items: Vec<String> = notes
            .iter()
            .map(|n| self.render_note(n, Some(n.id) == selected_id))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Notes</title>
  <style>
    body {{
      font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
      background-color: #f5f5f5;
      margin: 2rem;
    }}
    .app {{
      display: grid;
      grid-template-columns: 250px 1fr;
      gap: 20px;
    }}
    .app__note-form {{
      display: flex;
      flex-direction: column;
      gap: 20px;
    }}
    .app__note-form input, .app__note-form textarea {{
      padding: 10px;
      font-size: 16px;
    }}
    .app__notes-box {{
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
      grid-auto-rows: minmax(250px, auto);
      gap: 20px;
    }}
    .app__note-item {{
      display: flex;
      flex-direction: column;
      border: 1px solid #ccc;
      background: white;
      padding: 10px;
      border-radius: 5px;
      white-space: pre-wrap;
    }}
    .app__note-item--selected {{
      border-color: #333;
    }}
    .app__note-header {{
      display: flex;
      justify-content: flex-end;
    }}
  </style>
</head>
<body>
  <div class="app">
    {}
    <div class="app__notes-box">
      {}
    </div>
  </div>
</body>
</html>"#,
            self.render_form(draft, selection),
            items.join("\n      ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::note;

    #[test]
    fn given_notes_when_rendering_then_keys_entries_by_id() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note(4, "Four", "4"), note(9, "Nine", "9")];

        let html = presenter.render(&notes, &Draft::default(), None);

        assert!(html.contains(r#"data-key="4""#));
        assert!(html.contains(r#"data-key="9""#));
        assert!(html.find("Four").unwrap() < html.find("Nine").unwrap());
    }

    #[test]
    fn given_same_state_when_rendering_twice_then_output_identical() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note(1, "A", "a"), note(2, "B", "b")];

        let first = presenter.render(&notes, &Draft::default(), None);
        let second = presenter.render(&notes, &Draft::default(), None);

        assert_eq!(first, second);
    }

    #[test]
    fn given_markup_in_user_text_when_rendering_then_escapes_it() {
        let presenter = HtmlPresenter::new();
        let notes = vec![note(1, "<script>alert(1)</script>", "a & b")];
        let draft = Draft {
            title: r#"say "hi""#.to_string(),
            content: "</textarea>".to_string(),
        };

        let html = presenter.render(&notes, &draft, None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains(r#"value="say &quot;hi&quot;""#));
        assert!(html.contains("&lt;/textarea&gt;"));
    }

    #[test]
    fn given_no_selection_when_rendering_then_shows_add_button() {
        let html = HtmlPresenter::new().render(&[], &Draft::default(), None);

        assert!(html.contains("Add Note"));
        assert!(!html.contains("Cancel"));
    }

    #[test]
    fn given_selection_when_rendering_then_shows_save_and_cancel() {
        let selected = note(2, "B", "b");
        let notes = vec![note(1, "A", "a"), selected.clone()];

        let html = HtmlPresenter::new().render(&notes, &Draft::from_note(&selected), Some(&selected));

        assert!(html.contains("Save"));
        assert!(html.contains("Cancel"));
        assert!(!html.contains("Add Note"));
        assert!(html.contains(r#"class="app__note-item app__note-item--selected" data-key="2""#));
    }
}
