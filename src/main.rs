//! Command-line front end for notecase.
//!
//! Each invocation opens the stored session, applies one command and exits. The
//! navigation cursor, open note and layout flags are part of the stored state,
//! so `cd work` followed by `ls` behaves like a shell.
//!
//! Names given on the command line are resolved among the children of the
//! current folder (folders first, then notes, first match wins). An entity id
//! is accepted as well.
//!
//! Configuration via environment:
//! - `NOTECASE_DATA_DIR`: directory holding the snapshot and the log file
//! - `RUST_LOG`: tracing filter for the log file

use clap::{Parser, Subcommand};
use notecase::app::{AppState, Dispatch, Event, Session, TreeLine};
use notecase::domain::{EditorMode, EntityId, EntityKind, NotecaseError, Result};
use notecase::storage::FileStore;
use notecase::Config;
use std::path::PathBuf;

/// Personal note organizer
///
/// Keep notes in nested folders and preview them as HTML.
#[derive(Parser)]
#[command(name = "notecase")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the notes snapshot
    #[arg(long, env = "NOTECASE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the current folder
    Ls,

    /// Change folder: a child folder name, `..` or `/`
    Cd { target: String },

    /// Create a folder in the current folder
    Mkdir { name: String },

    /// Create a note in the current folder and open it
    New { name: String },

    /// Open a note in the current folder
    Open { name: String },

    /// Print the open note (or the named one) according to the editor mode
    Show { name: Option<String> },

    /// Replace the open note's content
    Write { text: String },

    /// Rename a folder or note in the current folder
    Rename { name: String, new_name: String },

    /// Delete a folder (with everything below it) or a note
    Rm { name: String },

    /// Move a folder or note into a child folder, `..` or `/`
    Mv { name: String, target: String },

    /// Switch between edit, preview and split layouts
    Mode { mode: EditorMode },

    /// Show or hide the sidebar
    Sidebar,

    /// Fuzzy search folder and note names
    Find { query: Vec<String> },

    /// Print the whole tree
    Tree,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref().map(Config::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir;
    }

    let result =
        notecase::initialize(&config).and_then(|mut session| run(&mut session, cli.command));

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(session: &mut Session<FileStore>, command: Commands) -> Result<()> {
    match command {
        Commands::Ls => {
            print_listing(session);
            Ok(())
        }
        Commands::Cd { target } => {
            let event = match target.as_str() {
                "/" => Event::GoToRoot,
                ".." => Event::GoToParent,
                name => Event::OpenFolder(resolve(session, name, Some(EntityKind::Folder))?),
            };
            session.dispatch(&event)?;
            print_listing(session);
            Ok(())
        }
        Commands::Mkdir { name } => {
            session.dispatch(&Event::CreateFolder { name })?;
            print_listing(session);
            Ok(())
        }
        Commands::New { name } => {
            let outcome = session.dispatch(&Event::CreateNote { name })?;
            show_opened(session, &outcome);
            Ok(())
        }
        Commands::Open { name } => {
            let id = resolve(session, &name, Some(EntityKind::Note))?;
            let outcome = session.dispatch(&Event::OpenNote(id))?;
            show_opened(session, &outcome);
            Ok(())
        }
        Commands::Show { name } => {
            if let Some(name) = name {
                let id = resolve(session, &name, Some(EntityKind::Note))?;
                session.dispatch(&Event::OpenNote(id))?;
            }
            print_note(session);
            Ok(())
        }
        Commands::Write { text } => {
            if session.state().selected().is_none() {
                println!("No note is open.");
                return Ok(());
            }
            session.dispatch(&Event::EditNote { content: text })?;
            print_note(session);
            Ok(())
        }
        Commands::Rename { name, new_name } => {
            let id = resolve(session, &name, None)?;
            session.dispatch(&Event::RenameEntity { id, name: new_name })?;
            print_listing(session);
            Ok(())
        }
        Commands::Rm { name } => {
            let id = resolve(session, &name, None)?;
            let outcome = session.dispatch(&Event::DeleteEntity(id))?;
            if outcome.closed_editor() {
                println!("Closed the open note.");
            }
            print_listing(session);
            Ok(())
        }
        Commands::Mv { name, target } => {
            let id = resolve(session, &name, None)?;
            let parent = resolve_folder_target(session, &target)?;
            session.dispatch(&Event::MoveEntity { id, parent })?;
            print_listing(session);
            Ok(())
        }
        Commands::Mode { mode } => {
            session.dispatch(&Event::SetEditorMode(mode))?;
            println!("Editor mode: {mode}");
            Ok(())
        }
        Commands::Sidebar => {
            session.dispatch(&Event::ToggleSidebar)?;
            let visible = session.state().sidebar_visible;
            println!("Sidebar {}", if visible { "shown" } else { "hidden" });
            Ok(())
        }
        Commands::Find { query } => {
            let hits = session.state().store.search(&query.join(" "));
            if hits.is_empty() {
                println!("No matches.");
            }
            for hit in hits {
                println!("{:<6} {}  ({})", kind_label(hit.kind), hit.name, hit.id);
            }
            Ok(())
        }
        Commands::Tree => {
            print_tree(&session.state().tree());
            Ok(())
        }
    }
}

/// Finds a child of the current folder by name, falling back to an exact id.
fn resolve(
    session: &Session<FileStore>,
    name: &str,
    kind: Option<EntityKind>,
) -> Result<EntityId> {
    let state = session.state();
    let wanted = |candidate: EntityKind| kind.map_or(true, |k| k == candidate);

    let by_name = state
        .sidebar()
        .items
        .into_iter()
        .find(|item| wanted(item.kind) && item.name == name)
        .map(|item| item.id);
    if let Some(id) = by_name {
        return Ok(id);
    }

    let id = EntityId::from(name);
    match state.store.resolve(&id) {
        Ok(entity) if wanted(entity.kind()) => Ok(id),
        _ => Err(NotecaseError::NotFound(id)),
    }
}

fn resolve_folder_target(session: &Session<FileStore>, target: &str) -> Result<EntityId> {
    let state = session.state();
    match target {
        "/" => Ok(state.store.root_id().clone()),
        ".." => {
            let current = state.current_folder();
            Ok(state
                .store
                .folder(current)
                .and_then(|folder| folder.parent.clone())
                .unwrap_or_else(|| state.store.root_id().clone()))
        }
        name => resolve(session, name, Some(EntityKind::Folder)),
    }
}

fn print_listing(session: &Session<FileStore>) {
    for line in listing_lines(session.state()) {
        println!("{line}");
    }
}

/// Lines printed for the current folder.
fn listing_lines(state: &AppState) -> Vec<String> {
    if !state.sidebar_visible {
        return vec!["Sidebar hidden (run `notecase sidebar` to show it)".to_string()];
    }

    let sidebar = state.sidebar();
    let mut lines = vec![
        format!("/{}", sidebar.header.breadcrumb.join("/")),
        sidebar.header.title,
    ];
    if sidebar.show_back {
        lines.push("  ..".to_string());
    }
    if let Some(empty) = sidebar.empty_state {
        lines.push(format!("  {}", empty.message));
    }
    for item in sidebar.items {
        let marker = if item.is_selected { '*' } else { ' ' };
        let suffix = if item.kind == EntityKind::Folder { "/" } else { "" };
        lines.push(format!("{marker} {}{suffix}", item.name));
    }
    lines
}

/// Shows the note an event opened, if any.
fn show_opened(session: &Session<FileStore>, outcome: &Dispatch) {
    if outcome.opened_note().is_some() {
        print_note(session);
    } else {
        println!("Nothing to open.");
    }
}

fn print_note(session: &Session<FileStore>) {
    let state = session.state();
    let Some(note) = state.selected() else {
        println!("No note is open.");
        return;
    };

    println!("== {} [{}]", note.name, state.editor_mode);
    if state.editor_mode.shows_editor() {
        println!("{}", note.content);
    }
    if state.editor_mode == EditorMode::Split {
        println!("--");
    }
    if state.editor_mode.shows_preview() {
        if let Some(html) = state.preview() {
            println!("{html}");
        }
    }
}

fn print_tree(lines: &[TreeLine]) {
    for line in lines {
        let indent = "  ".repeat(line.depth);
        let suffix = if line.kind == EntityKind::Folder { "/" } else { "" };
        println!("{indent}{}{suffix}", line.name);
    }
}

const fn kind_label(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Folder => "folder",
        EntityKind::Note => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notecase::domain::Snapshot;
    use notecase::markup::RenderOptions;

    #[test]
    fn listing_shows_folders_then_notes() {
        let mut state = AppState::from_snapshot(Snapshot::default(), RenderOptions::default());
        state.selected_note = Some(EntityId::from("welcome"));

        assert_eq!(
            listing_lines(&state),
            vec!["/All Notes", "All Notes", "  Personal/", "  Work/", "* Welcome to My Notes"]
        );
    }

    #[test]
    fn hidden_sidebar_still_prints_a_line() {
        let mut state = AppState::from_snapshot(Snapshot::default(), RenderOptions::default());
        state.sidebar_visible = false;

        let lines = listing_lines(&state);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Sidebar hidden"));
    }
}
