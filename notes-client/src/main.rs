//! `notes` — terminal front end for the notes dashboard and public view.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use notes_client::sharing::SystemClipboard;
use notes_client::{Config, Dashboard, HttpNotesApi, Note, NoteId, PublicNoteView, PublicViewState};
use std::sync::Arc;

/// Characters of content shown per note in `list`
const PREVIEW_CHARS: usize = 100;

#[derive(Parser)]
#[command(name = "notes", about = "Create, edit, search and share notes", version)]
struct Cli {
    /// Notes collection URL (overrides NOTES_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Origin for public share links (overrides NOTES_PUBLIC_ORIGIN)
    #[arg(long, global = true, value_name = "URL")]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, optionally filtered by title
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a note
    Create(CreateArgs),
    /// Edit an existing note; omitted fields keep their current value
    Edit(EditArgs),
    /// Delete a note
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print the public share link for a note
    Share {
        id: String,
        /// Also copy the link to the system clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Show a note through the public read-only endpoint
    Public { id: String },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    content: String,
}

#[derive(Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn print_note(note: &Note) {
    println!("[{}] {}", note.id, note.title);
    if !note.content.is_empty() {
        println!("    {}", preview(&note.content).replace('\n', "\n    "));
    }
}

async fn mount(config: &Config) -> Result<Dashboard> {
    let api = HttpNotesApi::from_config(config).context("Failed to set up notes API client")?;
    let dashboard = Dashboard::mount(Arc::new(api), &config.public_origin).await;
    if let Some(e) = dashboard.last_error() {
        bail!("Could not load notes from {}: {}", config.api_url, e);
    }
    Ok(dashboard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(origin) = cli.origin {
        config = config.with_public_origin(origin);
    }
    log::debug!("Using notes API at {}", config.api_url);

    match cli.command {
        Commands::List { search } => {
            let mut dashboard = mount(&config).await?;
            dashboard.set_search(search.unwrap_or_default());
            let visible = dashboard.visible_notes();
            if visible.is_empty() {
                println!("No notes.");
            }
            for note in visible {
                print_note(note);
            }
        }
        Commands::Create(args) => {
            let mut dashboard = mount(&config).await?;
            dashboard.begin_create();
            dashboard.session_mut().set_title(args.title);
            dashboard.session_mut().set_content(args.content);
            let note = dashboard.submit().await.context("Failed to create note")?;
            println!("Created note {}", note.id);
        }
        Commands::Edit(args) => {
            let mut dashboard = mount(&config).await?;
            let id = NoteId::from(args.id);
            dashboard.begin_edit(&id)?;
            if let Some(title) = args.title {
                dashboard.session_mut().set_title(title);
            }
            if let Some(content) = args.content {
                dashboard.session_mut().set_content(content);
            }
            let note = dashboard.submit().await.context("Failed to update note")?;
            println!("Updated note {}", note.id);
        }
        Commands::Delete { id, yes } => {
            if !yes {
                bail!("Refusing to delete note {} without --yes", id);
            }
            let mut dashboard = mount(&config).await?;
            let id = NoteId::from(id);
            dashboard.delete(&id).await.context("Failed to delete note")?;
            println!("Deleted note {}", id);
        }
        Commands::Share { id, copy } => {
            let api = HttpNotesApi::from_config(&config)?;
            let mut dashboard = Dashboard::new(Arc::new(api), &config.public_origin);
            let id = NoteId::from(id);
            if copy {
                let clipboard = SystemClipboard::detect()?;
                let link = dashboard.copy_share_link(&id, &clipboard)?;
                println!("Public link copied: {}", link);
            } else {
                println!("{}", dashboard.share_link(&id));
            }
        }
        Commands::Public { id } => {
            let api = HttpNotesApi::from_config(&config)?;
            let mut view = PublicNoteView::new(NoteId::from(id));
            let cancel = tokio_util::sync::CancellationToken::new();

            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            match view.load(&api, &cancel).await {
                PublicViewState::Loaded(note) => {
                    println!("{}\n", note.title);
                    println!("{}", note.content);
                }
                PublicViewState::NotFound => bail!("Note not found."),
                PublicViewState::Loading => bail!("Cancelled."),
            }
        }
    }

    Ok(())
}
