// src/ports/shell.rs
use crate::application::{NoteApi, NoteEditor};
use crate::domain::DomainError;
use crate::infrastructure::ContentRenderer;
use crate::ports::{HtmlPresenter, TerminalPresenter};
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, instrument};

const HELP: &str = "\
Commands:
  list | ls            show the form and all notes
  select <id>          edit a note
  title <text>         set the draft title
  content <text>       set the draft content (\\n starts a new line)
  submit | save | add  create the note, or save the selected one
  cancel               stop editing and clear the form
  delete <id> | rm <id>
  open                 show the view in the browser
  help
  quit | exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Select(i64),
    Title(String),
    Content(String),
    Submit,
    Cancel,
    Delete(i64),
    Open,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim_start()))
            .unwrap_or((line, ""));

        let command = match word {
            "list" | "ls" => Self::List,
            "select" => Self::Select(parse_id(rest)?),
            "title" => Self::Title(rest.to_string()),
            "content" => Self::Content(rest.replace("\\n", "\n")),
            "submit" | "save" | "add" => Self::Submit,
            "cancel" => Self::Cancel,
            "delete" | "rm" => Self::Delete(parse_id(rest)?),
            "open" => Self::Open,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{}', try 'help'", other)),
        };
        Ok(Some(command))
    }
}

fn parse_id(arg: &str) -> Result<i64, String> {
    arg.parse()
        .map_err(|_| format!("Expected a note id, got '{}'", arg))
}

/// Interactive note editor view.
///
/// Failed requests are logged by the editor and otherwise ignored here: the
/// view simply keeps showing its previous state.
pub struct Shell<A: NoteApi> {
    editor: NoteEditor<A>,
    presenter: TerminalPresenter,
    html: HtmlPresenter,
    renderer: ContentRenderer,
}

impl<A: NoteApi> Shell<A> {
    pub fn new(editor: NoteEditor<A>) -> Self {
        Self {
            editor,
            presenter: TerminalPresenter::new(),
            html: HtmlPresenter::new(),
            renderer: ContentRenderer::new(),
        }
    }

    pub fn editor(&self) -> &NoteEditor<A> {
        &self.editor
    }

    /// Load the collection once, then process commands until quit or EOF.
    ///
    /// Input bytes that are not valid UTF-8 are decoded lossily; only EOF
    /// ends the session.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if self.editor.load().await.is_err() {
            debug!("Starting with an empty collection");
        }
        self.render(out)?;

        let mut buf = Vec::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .await
                .context("Failed to read input")?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);

            match ShellCommand::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if !self.execute(command, out).await? {
                        break;
                    }
                }
                Err(message) => writeln!(out, "{}", message)?,
            }
        }
        Ok(())
    }

    /// Apply one command. Returns `false` when the shell should stop.
    #[instrument(level = "debug", skip(self, out))]
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> Result<bool> {
        match command {
            ShellCommand::List => {}
            ShellCommand::Select(id) => {
                if let Err(e) = self.editor.select(id) {
                    writeln!(out, "{}", e)?;
                    return Ok(true);
                }
            }
            ShellCommand::Title(title) => self.editor.set_title(title),
            ShellCommand::Content(content) => self.editor.set_content(content),
            ShellCommand::Submit => match self.editor.submit().await {
                Ok(_) => {}
                Err(DomainError::EmptyField(field)) => {
                    writeln!(out, "Please fill out the {} field", field)?;
                    return Ok(true);
                }
                Err(_) => {}
            },
            ShellCommand::Cancel => self.editor.cancel(),
            ShellCommand::Delete(id) => {
                // Selection and draft stay as they are whatever the outcome
                let _ = self.editor.delete(id).await;
            }
            ShellCommand::Open => {
                if let Err(e) = self.open_snapshot().await {
                    error!(error = ?e, "Failed to open snapshot");
                    writeln!(out, "Could not open browser: {:#}", e)?;
                }
                return Ok(true);
            }
            ShellCommand::Help => {
                write!(out, "{}", HELP)?;
                return Ok(true);
            }
            ShellCommand::Quit => return Ok(false),
        }

        self.render(out)?;
        Ok(true)
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = self.presenter.render(
            self.editor.notes(),
            self.editor.draft(),
            self.editor.selection(),
        );
        write!(out, "{}", view)?;
        Ok(())
    }

    async fn open_snapshot(&mut self) -> Result<()> {
        let html = self.html.render(
            self.editor.notes(),
            self.editor.draft(),
            self.editor.selection(),
        );
        let path = self.renderer.create_temp_file(&html)?;
        self.renderer.open_in_browser(&path).await
    }
}
