// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::{NoteApi, NoteEditor, SubmitOutcome};
use infrastructure::config::default_config_path;
use infrastructure::{Config, ContentRenderer, HttpNoteApi};
use ports::{HtmlPresenter, Shell, TerminalPresenter};
use std::io::Write;
use std::path::Path;
use tokio::io::BufReader;
use tracing::{debug, info};

use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting noteview with arguments");

    let config_path = match &args.config {
        Some(path) => {
            debug!(?path, "Using provided config path");
            path.clone()
        }
        None => default_config_path()?,
    };

    let mut stdout = std::io::stdout();

    if let Command::Config { init } = args.command {
        return show_config(&config_path, init, args.url.as_deref(), &mut stdout);
    }

    let config = Config::load_or_default(&config_path)?.with_base_url_override(args.url.as_deref());
    info!(base_url = %config.server.base_url, "Using notes server");

    let api = HttpNoteApi::new(&config.server.base_url)?;
    let mut editor = NoteEditor::new(api);

    if let Command::Shell = args.command {
        let mut shell = Shell::new(editor);
        return shell.run(BufReader::new(tokio::io::stdin()), &mut stdout).await;
    }
    execute(args.command, &mut editor, &mut stdout).await
}

/// Run a one-shot command against the notes server.
///
/// Unlike the interactive shell, one-shot commands report failures through
/// their return value.
pub async fn execute<A: NoteApi, W: Write>(
    command: Command,
    editor: &mut NoteEditor<A>,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::List { json } => {
            editor.load().await?;
            if json {
                let json = serde_json::to_string_pretty(editor.notes())
                    .context("Failed to serialize notes to JSON")?;
                writeln!(out, "{}", json)?;
            } else {
                write!(out, "{}", TerminalPresenter::new().render_list(editor.notes(), None))?;
            }
        }
        Command::Add { title, content } => {
            editor.set_title(title);
            editor.set_content(content);
            report(editor.submit().await?, out)?;
        }
        Command::Edit {
            note_id,
            title,
            content,
        } => {
            editor.load().await?;
            editor.select(note_id)?;
            if let Some(title) = title {
                editor.set_title(title);
            }
            if let Some(content) = content {
                editor.set_content(content);
            }
            report(editor.submit().await?, out)?;
        }
        Command::Delete { note_id } => {
            editor.delete(note_id).await?;
            writeln!(out, "Deleted note {}", note_id)?;
        }
        Command::Open => {
            editor.load().await?;
            let html = HtmlPresenter::new().render(editor.notes(), editor.draft(), None);
            let mut renderer = ContentRenderer::new();
            let path = renderer.create_temp_file(&html)?;
            renderer.open_in_browser(&path).await?;
        }
        Command::Shell | Command::Config { .. } => {
            anyhow::bail!("shell and config are not one-shot commands")
        }
    }
    Ok(())
}

fn report<W: Write>(outcome: SubmitOutcome, out: &mut W) -> Result<()> {
    match outcome {
        SubmitOutcome::Created(note) => writeln!(out, "Created note {}", note.id)?,
        SubmitOutcome::Updated(note) => writeln!(out, "Updated note {}", note.id)?,
    }
    Ok(())
}

pub fn show_config<W: Write>(
    path: &Path,
    init: bool,
    url_override: Option<&str>,
    out: &mut W,
) -> Result<()> {
    if init && !path.exists() {
        Config::create_default(path)?;
        info!(?path, "Created default config");
    }

    let config = Config::load_or_default(path)?.with_base_url_override(url_override);
    let toml = toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    writeln!(out, "# {}", path.display())?;
    write!(out, "{}", toml)?;
    Ok(())
}
